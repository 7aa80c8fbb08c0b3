#![allow(clippy::expect_used, dead_code)]
//! Shared helpers for the integration tests.

use almanac_test::Harness;
use almanac_test::core::types::Classification;
use almanac_test::engine::Event;
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn harness() -> Harness {
    Harness::from_fixtures().expect("fixtures should load")
}

/// Generates `calendar` over `[from, to]`, panicking on error.
pub fn generate(calendar: &str, from: NaiveDate, to: NaiveDate) -> Vec<Event> {
    harness()
        .generate(calendar, from, to)
        .expect("generation should succeed")
}

/// `(date, description)` pairs of the non-weekend events.
pub fn holidays(events: &[Event]) -> Vec<(NaiveDate, &str)> {
    events
        .iter()
        .filter(|event| event.classification != Classification::Weekend)
        .map(|event| (event.date, event.description.as_str()))
        .collect()
}

pub fn find<'a>(events: &'a [Event], description: &str) -> Option<&'a Event> {
    events
        .iter()
        .find(|event| event.description == description)
}
