//! Per-calendar-system conversion algorithms.

mod formula;
mod gregorian;
mod islamic;
mod julian;

pub use formula::FormulaCalendar;
pub use gregorian::GregorianCalendar;
pub use islamic::IslamicTabularCalendar;
pub use julian::JulianCalendar;

use crate::date::ChronologyDate;
use crate::error::{ChronologyError, ChronologyResult};

/// Conversion logic for one calendar system.
///
/// Implementations must round-trip exactly: for every valid date,
/// `from_pivot(to_pivot(date)) == date`.
pub trait ChronologyAlgorithm: Send + Sync + std::fmt::Debug {
    /// Calendar-system identifier this algorithm is registered under.
    fn id(&self) -> &str;

    /// ## Summary
    /// Converts a date of this calendar system to its Julian Day Number.
    ///
    /// ## Errors
    /// Returns `ChronologyError::InvalidDate` if the date does not exist.
    fn to_pivot(&self, year: i32, month: u32, day: u32) -> ChronologyResult<i64>;

    /// ## Summary
    /// Converts a Julian Day Number to a date of this calendar system.
    ///
    /// ## Errors
    /// Returns `ChronologyError::PivotOutOfRange` if the pivot cannot be
    /// represented.
    fn from_pivot(&self, pivot: i64) -> ChronologyResult<ChronologyDate>;

    fn is_leap_year(&self, year: i32) -> bool;

    fn months_in_year(&self) -> u32 {
        12
    }

    /// Number of days in `month`, or `None` if the month does not exist.
    fn days_in_month(&self, year: i32, month: u32) -> Option<u32>;

    fn is_valid_date(&self, year: i32, month: u32, day: u32) -> bool {
        day >= 1
            && self
                .days_in_month(year, month)
                .is_some_and(|days| day <= days)
    }
}

pub(crate) fn invalid_date(system: &str, year: i32, month: u32, day: u32) -> ChronologyError {
    ChronologyError::InvalidDate {
        system: system.to_string(),
        year,
        month,
        day,
    }
}

pub(crate) fn pivot_out_of_range(system: &str, pivot: i64) -> ChronologyError {
    ChronologyError::PivotOutOfRange {
        system: system.to_string(),
        pivot,
    }
}

/// ## Summary
/// Finds the month and day of `pivot` inside a year whose first day is
/// `year_start`, using the algorithm's month lengths.
///
/// ## Errors
/// Returns `PivotOutOfRange` if `pivot` lies outside that year.
pub(crate) fn locate_in_year(
    algorithm: &dyn ChronologyAlgorithm,
    year: i32,
    year_start: i64,
    pivot: i64,
) -> ChronologyResult<ChronologyDate> {
    let mut month_start = year_start;
    for month in 1..=algorithm.months_in_year() {
        let length = i64::from(algorithm.days_in_month(year, month).unwrap_or(0));
        if pivot < month_start + length {
            let day = u32::try_from(pivot - month_start + 1)
                .map_err(|_err| pivot_out_of_range(algorithm.id(), pivot))?;
            return Ok(ChronologyDate::new(algorithm.id(), year, month, day));
        }
        month_start += length;
    }
    Err(pivot_out_of_range(algorithm.id(), pivot))
}

/// Fliegel–Van Flandern month shift shared by the Gregorian and Julian
/// formulas: the computational year starts in March.
pub(crate) fn march_based(year: i32, month: u32) -> (i64, i64) {
    let a = i64::from(14 - month) / 12;
    let y = i64::from(year) + 4800 - a;
    let m = i64::from(month) + 12 * a - 3;
    (y, m)
}

/// Inverse of [`march_based`] for the day-of-year remainder `e`.
pub(crate) fn from_march_based(e: i64) -> (i64, i64, i64) {
    let m = (5 * e + 2).div_euclid(153);
    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * m.div_euclid(10);
    (m, month, day)
}
