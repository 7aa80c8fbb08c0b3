use almanac_core::constants::JULIAN_CALENDAR_SYSTEM;

use super::gregorian::solar_days_in_month;
use super::{
    ChronologyAlgorithm, from_march_based, invalid_date, march_based, pivot_out_of_range,
};
use crate::date::ChronologyDate;
use crate::error::ChronologyResult;

/// Proleptic Julian calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct JulianCalendar;

impl ChronologyAlgorithm for JulianCalendar {
    fn id(&self) -> &str {
        JULIAN_CALENDAR_SYSTEM
    }

    fn to_pivot(&self, year: i32, month: u32, day: u32) -> ChronologyResult<i64> {
        if !self.is_valid_date(year, month, day) {
            return Err(invalid_date(self.id(), year, month, day));
        }
        let (y, m) = march_based(year, month);
        Ok(i64::from(day) + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32083)
    }

    fn from_pivot(&self, pivot: i64) -> ChronologyResult<ChronologyDate> {
        let out_of_range = || pivot_out_of_range(self.id(), pivot);
        let c = pivot.checked_add(32082).ok_or_else(out_of_range)?;
        let d = c
            .checked_mul(4)
            .and_then(|c4| c4.checked_add(3))
            .ok_or_else(out_of_range)?
            .div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let (m, month, day) = from_march_based(e);
        let year = d - 4800 + m.div_euclid(10);

        let year = i32::try_from(year).map_err(|_err| out_of_range())?;
        let month = u32::try_from(month).map_err(|_err| out_of_range())?;
        let day = u32::try_from(day).map_err(|_err| out_of_range())?;
        Ok(ChronologyDate::new(self.id(), year, month, day))
    }

    fn is_leap_year(&self, year: i32) -> bool {
        year.rem_euclid(4) == 0
    }

    fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        solar_days_in_month(self.is_leap_year(year), month)
    }
}
