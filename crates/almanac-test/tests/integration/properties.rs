//! Properties that hold for every calendar and every range.

use std::sync::LazyLock;

use almanac_test::Harness;
use almanac_test::app::output::render_events;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use super::helpers::date;

static HARNESS: LazyLock<Harness> = LazyLock::new(super::helpers::harness);

const CALENDARS: [&str; 5] = ["us-market", "us-market-next", "gulf-market", "diamond", "founders"];

fn range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0u64..20_000, 0u64..120).prop_map(|(start, length)| {
        let from = date(1970, 1, 1) + Days::new(start);
        (from, from + Days::new(length))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn events_are_sorted_and_in_range(
        calendar in proptest::sample::select(CALENDARS.to_vec()),
        (from, to) in range(),
    ) {
        let events = HARNESS.generate(calendar, from, to).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(events.windows(2).all(|pair| pair[0].date <= pair[1].date));
        prop_assert!(events.iter().all(|event| from <= event.date && event.date <= to));
    }

    #[test]
    fn generation_is_deterministic(
        calendar in proptest::sample::select(CALENDARS.to_vec()),
        (from, to) in range(),
    ) {
        let first = HARNESS.generate(calendar, from, to).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = HARNESS.generate(calendar, from, to).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let first = render_events(&first, false).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = render_events(&second, false).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn custom_chronology_round_trips(offset in -50_000i64..50_000) {
        let registry = HARNESS.generator.registry();
        let pivot = 2_451_545 + offset;
        let date = registry.from_pivot("decimal", pivot).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(registry.to_pivot(&date), Ok(pivot));
    }
}

#[test_log::test]
fn inverted_range_is_rejected() {
    let err = HARNESS
        .generate("us-market", date(2024, 12, 31), date(2024, 1, 1))
        .unwrap_err();
    assert!(err.to_string().contains("2024-12-31"));
}
