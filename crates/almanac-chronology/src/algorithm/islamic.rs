use almanac_core::constants::ISLAMIC_CALENDAR_SYSTEM;

use super::{ChronologyAlgorithm, invalid_date, locate_in_year, pivot_out_of_range};
use crate::date::ChronologyDate;
use crate::error::ChronologyResult;

/// JDN of 1 Muharram 1 AH in the civil (Friday) epoch.
const ISLAMIC_EPOCH: i64 = 1_948_440;

/// Arithmetical Islamic calendar: 30-year cycle with leap years
/// 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and 29 (Type II intercalation).
///
/// This is a deterministic approximation; it does not model moon sighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct IslamicTabularCalendar;

impl IslamicTabularCalendar {
    fn year_start(year: i32) -> i64 {
        let y = i64::from(year);
        (y - 1) * 354 + (3 + 11 * y).div_euclid(30) + ISLAMIC_EPOCH
    }
}

impl ChronologyAlgorithm for IslamicTabularCalendar {
    fn id(&self) -> &str {
        ISLAMIC_CALENDAR_SYSTEM
    }

    fn to_pivot(&self, year: i32, month: u32, day: u32) -> ChronologyResult<i64> {
        if !self.is_valid_date(year, month, day) {
            return Err(invalid_date(self.id(), year, month, day));
        }
        // Months alternate 30 and 29 days; ceil(29.5 * (month - 1)) days precede `month`.
        let preceding = (59 * i64::from(month - 1) + 1).div_euclid(2);
        Ok(Self::year_start(year) + preceding + i64::from(day) - 1)
    }

    fn from_pivot(&self, pivot: i64) -> ChronologyResult<ChronologyDate> {
        let out_of_range = || pivot_out_of_range(self.id(), pivot);
        let estimate = pivot
            .checked_sub(ISLAMIC_EPOCH)
            .and_then(|days| days.checked_mul(30))
            .and_then(|days| days.checked_add(10646))
            .ok_or_else(out_of_range)?
            .div_euclid(10631);
        let mut year = i32::try_from(estimate).map_err(|_err| out_of_range())?;
        while Self::year_start(year) > pivot {
            year = year.checked_sub(1).ok_or_else(out_of_range)?;
        }
        while Self::year_start(year.checked_add(1).ok_or_else(out_of_range)?) <= pivot {
            year += 1;
        }
        locate_in_year(self, year, Self::year_start(year), pivot)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        (14 + 11 * i64::from(year)).rem_euclid(30) < 11
    }

    fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        match month {
            12 if self.is_leap_year(year) => Some(30),
            1..=12 if month % 2 == 1 => Some(30),
            1..=12 => Some(29),
            _ => None,
        }
    }
}
