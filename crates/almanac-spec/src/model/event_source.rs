use almanac_core::types::Classification;
use serde::{Deserialize, Serialize};

use super::Rule;

/// Inclusive year range; an absent `end` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i32>,
}

impl YearRange {
    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && self.end.is_none_or(|end| year <= end)
    }
}

/// Years in which an event source produces events.
///
/// A year must satisfy the explicit bounds and, when `ranges` is non-empty,
/// fall into at least one of the ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveYears {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<YearRange>,
}

impl ActiveYears {
    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        self.start_year.is_none_or(|start| start <= year)
            && self.end_year.is_none_or(|end| year <= end)
            && (self.ranges.is_empty() || self.ranges.iter().any(|range| range.contains(year)))
    }
}

/// One named, rule-driven stream of dated events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSource {
    pub key: String,
    pub name: String,
    pub rule: Rule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_classification: Option<Classification>,
    /// Explicit shiftability; see [`EventSource::is_shiftable`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shiftable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_years: Option<ActiveYears>,
}

impl EventSource {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>, rule: Rule) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            rule,
            default_classification: None,
            shiftable: None,
            active_years: None,
        }
    }

    /// Whether weekend occurrences of this source move under a shift policy.
    ///
    /// Defaults to true for fixed-month-day rules only; any source can opt
    /// in or out explicitly.
    #[must_use]
    pub fn is_shiftable(&self) -> bool {
        self.shiftable
            .unwrap_or(matches!(self.rule, Rule::FixedMonthDay { .. }))
    }

    #[must_use]
    pub fn is_active_in(&self, year: i32) -> bool {
        self.active_years
            .as_ref()
            .is_none_or(|active| active.contains(year))
    }
}
