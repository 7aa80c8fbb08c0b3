//! Calendar-system-qualified dates.

use almanac_core::constants::CIVIL_CALENDAR_SYSTEM;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const PIVOT_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A (calendar system, year, month, day) triple.
///
/// The triple is only meaningful together with the algorithm registered
/// under `system`; validity is checked when it is converted to a pivot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChronologyDate {
    pub system: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ChronologyDate {
    #[must_use]
    pub fn new(system: impl Into<String>, year: i32, month: u32, day: u32) -> Self {
        Self {
            system: system.into(),
            year,
            month,
            day,
        }
    }

    /// Wraps a civil date.
    #[must_use]
    pub fn civil(date: NaiveDate) -> Self {
        Self::new(CIVIL_CALENDAR_SYSTEM, date.year(), date.month(), date.day())
    }

    #[must_use]
    pub fn is_civil(&self) -> bool {
        self.system == CIVIL_CALENDAR_SYSTEM
    }

    /// ## Summary
    /// Returns the equivalent `NaiveDate` when this date is civil.
    ///
    /// Returns `None` for other calendar systems or for an invalid triple.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDate> {
        if !self.is_civil() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl std::fmt::Display for ChronologyDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:04}-{:02}-{:02}",
            self.system, self.year, self.month, self.day
        )
    }
}

/// ## Summary
/// Returns the day of the week of a Julian Day Number.
///
/// JDN 0 fell on a Monday, so the weekday cycles with `pivot mod 7`.
#[must_use]
pub fn weekday_of_pivot(pivot: i64) -> Weekday {
    let index = usize::try_from(pivot.rem_euclid(7)).unwrap_or_default();
    PIVOT_WEEKDAYS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_of_pivot() {
        // 2000-01-01 was a Saturday
        assert_eq!(weekday_of_pivot(2_451_545), Weekday::Sat);
        assert_eq!(weekday_of_pivot(0), Weekday::Mon);
        assert_eq!(weekday_of_pivot(-1), Weekday::Sun);
    }

    #[test]
    fn test_civil_round_trip() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let date = ChronologyDate::civil(naive);
        assert!(date.is_civil());
        assert_eq!(date.to_naive(), Some(naive));
        assert_eq!(date.to_string(), "gregorian:2024-02-29");
    }

    #[test]
    fn test_non_civil_has_no_naive_date() {
        let date = ChronologyDate::new("islamic", 1445, 9, 1);
        assert_eq!(date.to_naive(), None);
    }
}
