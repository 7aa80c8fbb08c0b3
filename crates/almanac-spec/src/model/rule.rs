use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A date with an optional historical note, used by explicit-date rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDate {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Before,
    After,
}

/// "The nth `weekday` strictly before/after the anchor".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayOffset {
    pub weekday: Weekday,
    pub nth: u32,
    pub direction: Direction,
}

/// How an event source produces dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    ExplicitDates {
        dates: Vec<AnnotatedDate>,
    },
    /// Month and day in `calendar_system`, repeated every year.
    FixedMonthDay {
        month: u32,
        day: u32,
        #[serde(
            default,
            alias = "calendar",
            alias = "calendar-system",
            skip_serializing_if = "Option::is_none"
        )]
        calendar_system: Option<String>,
    },
    /// `nth` weekday of a civil month; `-1` selects the last one.
    NthWeekdayOfMonth {
        month: u32,
        weekday: Weekday,
        nth: i32,
    },
    /// Offset from a named reference or from a fixed anchor date.
    ///
    /// When both anchor forms are present the reference wins; likewise
    /// `offset_days` wins over `weekday_offset`.
    RelativeToReference {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor: Option<MonthDay>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset_days: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weekday_offset: Option<WeekdayOffset>,
    },
}

impl Rule {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::ExplicitDates { .. } => "explicit_dates",
            Self::FixedMonthDay { .. } => "fixed_month_day",
            Self::NthWeekdayOfMonth { .. } => "nth_weekday_of_month",
            Self::RelativeToReference { .. } => "relative_to_reference",
        }
    }

    /// Calendar system a fixed-month-day rule is expressed in, if it names one.
    #[must_use]
    pub fn calendar_system(&self) -> Option<&str> {
        match self {
            Self::FixedMonthDay {
                calendar_system, ..
            } => calendar_system.as_deref(),
            _ => None,
        }
    }
}
