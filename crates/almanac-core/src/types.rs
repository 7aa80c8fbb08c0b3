use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Business meaning of a generated event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Closed,
    EarlyClose,
    Notable,
    PeriodMarker,
    Weekend,
}

impl Classification {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "CLOSED",
            Self::EarlyClose => "EARLY_CLOSE",
            Self::Notable => "NOTABLE",
            Self::PeriodMarker => "PERIOD_MARKER",
            Self::Weekend => "WEEKEND",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How shiftable occurrences that land on a weekend day are observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekendShiftPolicy {
    #[default]
    None,
    NearestWeekday,
    NextAvailableWeekday,
}

impl WeekendShiftPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::NearestWeekday => "NEAREST_WEEKDAY",
            Self::NextAvailableWeekday => "NEXT_AVAILABLE_WEEKDAY",
        }
    }
}

impl std::fmt::Display for WeekendShiftPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of weekdays treated as non-business days.
///
/// Stored as a bitmask indexed by `Weekday::num_days_from_monday`, so
/// iteration order is always Monday first regardless of declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WeekendDays(u8);

impl WeekendDays {
    /// Saturday and Sunday.
    #[must_use]
    pub fn saturday_sunday() -> Self {
        [Weekday::Sat, Weekday::Sun].into_iter().collect()
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    /// ## Summary
    /// Returns true if the date falls on one of the weekend days.
    #[must_use]
    pub fn is_weekend(self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        let mut day = Weekday::Mon;
        (0..7).filter_map(move |_| {
            let current = day;
            day = day.succ();
            self.contains(current).then_some(current)
        })
    }
}

impl FromIterator<Weekday> for WeekendDays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Self::empty();
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl From<Vec<Weekday>> for WeekendDays {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<WeekendDays> for Vec<Weekday> {
    fn from(days: WeekendDays) -> Self {
        days.iter().collect()
    }
}

/// Inclusive civil date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// ## Summary
    /// Creates an inclusive range `[from, to]`.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidRange` if `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> CoreResult<Self> {
        if from > to {
            return Err(CoreError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Civil years touched by the range.
    #[must_use]
    pub fn years(&self) -> RangeInclusive<i32> {
        self.from.year()..=self.to.year()
    }

    /// Every day of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let to = self.to;
        self.from.iter_days().take_while(move |day| *day <= to)
    }

    /// ## Summary
    /// Returns the range widened by `days` on both sides, saturating at the
    /// representable date bounds.
    #[must_use]
    pub fn padded(&self, days: u64) -> Self {
        let pad = Days::new(days);
        Self {
            from: self.from.checked_sub_days(pad).unwrap_or(NaiveDate::MIN),
            to: self.to.checked_add_days(pad).unwrap_or(NaiveDate::MAX),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2024, 3, 29), date(2024, 3, 29)).unwrap();
        assert_eq!(range.days().count(), 1);
        assert_eq!(range.years(), 2024..=2024);
        assert!(range.contains(date(2024, 3, 29)));
        assert!(!range.contains(date(2024, 3, 30)));
    }

    #[test]
    fn test_padded_range_spans_years() {
        let range = DateRange::new(date(2024, 1, 3), date(2024, 12, 30)).unwrap();
        let padded = range.padded(7);
        assert_eq!(padded.from(), date(2023, 12, 27));
        assert_eq!(padded.to(), date(2025, 1, 6));
    }

    #[test]
    fn test_weekend_days_membership() {
        let weekend = WeekendDays::saturday_sunday();
        assert!(weekend.contains(Weekday::Sat));
        assert!(weekend.contains(Weekday::Sun));
        assert!(!weekend.contains(Weekday::Fri));
        // 2024-03-30 is a Saturday
        assert!(weekend.is_weekend(date(2024, 3, 30)));
        assert!(!weekend.is_weekend(date(2024, 3, 29)));
    }

    #[test]
    fn test_weekend_days_serialize_in_weekday_order() {
        let weekend: WeekendDays = vec![Weekday::Sun, Weekday::Fri].into();
        let json = serde_json::to_string(&weekend).unwrap();
        assert_eq!(json, r#"["Fri","Sun"]"#);

        let parsed: WeekendDays = serde_json::from_str(r#"["saturday","SUNDAY"]"#).unwrap();
        assert_eq!(parsed, WeekendDays::saturday_sunday());
    }

    #[test]
    fn test_classification_serialization() {
        let json = serde_json::to_string(&Classification::EarlyClose).unwrap();
        assert_eq!(json, r#""EARLY_CLOSE""#);
        assert_eq!(Classification::PeriodMarker.to_string(), "PERIOD_MARKER");

        let policy: WeekendShiftPolicy = serde_json::from_str(r#""NEXT_AVAILABLE_WEEKDAY""#).unwrap();
        assert_eq!(policy, WeekendShiftPolicy::NextAvailableWeekday);
    }
}
