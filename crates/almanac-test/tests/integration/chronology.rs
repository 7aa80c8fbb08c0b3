//! Custom chronologies loaded from documents.

use almanac_test::chronology::{ChronologyDate, ChronologyError, ChronologyRegistry};
use almanac_test::core::types::Classification;
use almanac_test::load_fixtures;

use super::helpers::{date, generate, harness, holidays};

#[test_log::test]
fn fixture_chronology_is_registered() {
    let harness = harness();
    let registry = harness.generator.registry();
    assert_eq!(registry.ids(), vec!["gregorian", "julian", "islamic", "decimal"]);

    assert_eq!(
        registry.from_civil(date(2000, 1, 1), "decimal"),
        Ok(ChronologyDate::new("decimal", 1, 1, 1))
    );
    assert_eq!(
        registry.to_civil(&ChronologyDate::new("decimal", 2, 1, 1)),
        Ok(date(2000, 12, 31))
    );
    // Leap year 4 has a 42-day last month.
    assert!(registry.get("decimal").is_ok_and(|calendar| calendar.is_valid_date(4, 10, 42)));
    assert!(!registry.get("decimal").is_ok_and(|calendar| calendar.is_valid_date(3, 10, 42)));
}

#[test_log::test]
fn calendar_in_custom_system() {
    let events = generate("founders", date(2000, 1, 1), date(2001, 12, 31));
    assert_eq!(
        holidays(&events),
        vec![
            (date(2000, 2, 6), "Founders' Day"),
            (date(2001, 2, 5), "Founders' Day"),
        ]
    );
    assert!(
        events
            .iter()
            .filter(|event| event.description == "Founders' Day")
            .all(|event| event.classification == Classification::PeriodMarker)
    );
}

#[test_log::test]
fn unregistered_system_fails_generation() {
    let loaded = load_fixtures().expect("fixtures load");
    // Without the fixture chronology the founders calendar cannot be generated.
    let harness = almanac_test::Harness::new(
        loaded.catalog,
        std::sync::Arc::new(ChronologyRegistry::with_defaults()),
    );
    let err = harness
        .generate("founders", date(2000, 1, 1), date(2000, 12, 31))
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown calendar system: decimal");
}

#[test_log::test]
fn registering_twice_is_rejected() {
    let loaded = load_fixtures().expect("fixtures load");
    let registry = ChronologyRegistry::with_defaults();
    loaded.register_chronologies(&registry).expect("first registration");
    let err = loaded.register_chronologies(&registry).unwrap_err();
    assert!(matches!(
        err,
        almanac_test::app::error::AppError::ChronologyError(ChronologyError::AlreadyRegistered(ref id))
            if id == "decimal"
    ));
}
