use almanac_core::constants::CIVIL_CALENDAR_SYSTEM;
use chrono::{Datelike, NaiveDate};

use super::{ChronologyAlgorithm, invalid_date, pivot_out_of_range};
use crate::date::ChronologyDate;
use crate::error::ChronologyResult;

/// JDN of the day before 0001-01-01 (proleptic Gregorian), which chrono
/// numbers as day 1 of the common era.
const CE_PIVOT_OFFSET: i64 = 1_721_425;

/// Month lengths shared by the Gregorian and Julian calendars.
pub(crate) fn solar_days_in_month(leap: bool, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if leap => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Proleptic Gregorian (civil) calendar, backed by `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GregorianCalendar;

impl ChronologyAlgorithm for GregorianCalendar {
    fn id(&self) -> &str {
        CIVIL_CALENDAR_SYSTEM
    }

    fn to_pivot(&self, year: i32, month: u32, day: u32) -> ChronologyResult<i64> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid_date(self.id(), year, month, day))?;
        Ok(i64::from(date.num_days_from_ce()) + CE_PIVOT_OFFSET)
    }

    fn from_pivot(&self, pivot: i64) -> ChronologyResult<ChronologyDate> {
        let date = pivot
            .checked_sub(CE_PIVOT_OFFSET)
            .and_then(|days| i32::try_from(days).ok())
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| pivot_out_of_range(self.id(), pivot))?;
        Ok(ChronologyDate::civil(date))
    }

    fn is_leap_year(&self, year: i32) -> bool {
        (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
    }

    fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        solar_days_in_month(self.is_leap_year(year), month)
    }
}
