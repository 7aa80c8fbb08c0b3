//! Specification resolution over the fixture catalog.

use almanac_test::core::types::{WeekendDays, WeekendShiftPolicy};
use almanac_test::spec::{
    CalendarSpecification, InMemoryCatalog, ModuleSpecification, SpecError,
    SpecificationResolver,
};
use chrono::Weekday;

use super::helpers::harness;

#[test_log::test]
fn diamond_module_contributes_once() {
    let harness = harness();
    let spec = harness.resolver.resolve("diamond").expect("diamond resolves");

    let keys: Vec<&str> = spec
        .event_sources
        .iter()
        .map(|source| source.key.as_str())
        .collect();
    assert_eq!(keys, vec!["shared_day", "left_day", "right_day"]);
    assert_eq!(
        spec.resolution_chain
            .iter()
            .filter(|entry| entry.as_str() == "module:diamond-shared")
            .count(),
        1
    );
}

#[test_log::test]
fn resolve_is_idempotent() {
    let harness = harness();
    let first = harness.resolver.resolve("us-market-next").expect("resolves");
    harness.resolver.clear_cache();
    assert!(harness.resolver.cached_ids().is_empty());
    let second = harness.resolver.resolve("us-market-next").expect("resolves");

    assert_eq!(first.id, second.id);
    assert_eq!(first.event_sources.len(), second.event_sources.len());
    assert_eq!(first.weekend_shift_policy, second.weekend_shift_policy);
    assert_eq!(first.classifications, second.classifications);
    assert_eq!(first.deltas.len(), second.deltas.len());
}

#[test_log::test]
fn child_calendar_inherits_and_overrides() {
    let harness = harness();
    let spec = harness.resolver.resolve("us-market-next").expect("resolves");

    assert_eq!(spec.weekend_shift_policy, WeekendShiftPolicy::NextAvailableWeekday);
    assert_eq!(
        spec.metadata.name.as_deref(),
        Some("US equity market (next available weekday)")
    );
    assert_eq!(
        spec.metadata.description.as_deref(),
        Some("Exchange holidays and early closes")
    );
    assert!(spec.event_source("good_friday").is_some());
    assert_eq!(
        spec.event_sources.last().map(|source| source.key.as_str()),
        Some("boxing_day")
    );
    assert_eq!(spec.deltas.len(), 3);
    // Post-order: dependencies are merged before the node that uses them.
    assert_eq!(
        spec.resolution_chain.first().map(String::as_str),
        Some("module:weekends-sat-sun")
    );
    let position = |entry: &str| spec.resolution_chain.iter().position(|e| e == entry);
    assert!(position("module:us-federal") < position("calendar:us-market"));
    assert_eq!(
        position("calendar:us-market-next"),
        Some(spec.resolution_chain.len() - 1)
    );
}

#[test_log::test]
fn module_weekend_policy_applies() {
    let harness = harness();
    let gulf = harness.resolver.resolve("gulf-market").expect("resolves");
    let mut expected = WeekendDays::empty();
    expected.insert(Weekday::Fri);
    expected.insert(Weekday::Sat);
    assert_eq!(gulf.weekend_days, expected);

    let founders = harness.resolver.resolve("founders").expect("resolves");
    assert_eq!(founders.weekend_days, WeekendDays::saturday_sunday());
    assert_eq!(founders.calendar_system(), "decimal");
}

#[test_log::test]
fn unknown_calendar_is_reported() {
    let harness = harness();
    let err = harness.resolver.resolve("nyse").unwrap_err();
    assert!(matches!(err, SpecError::UnknownCalendar(ref id) if id == "nyse"));
}

#[test_log::test]
fn cycle_through_extends_and_uses() {
    let mut child = CalendarSpecification::new("child");
    child.extends.push("parent".to_string());
    let mut parent = CalendarSpecification::new("parent");
    parent.uses.push("m1".to_string());
    let mut m1 = ModuleSpecification::new("m1");
    m1.uses.push("m2".to_string());
    let mut m2 = ModuleSpecification::new("m2");
    m2.uses.push("m1".to_string());

    let catalog = InMemoryCatalog::new()
        .with_calendar(child)
        .and_then(|catalog| catalog.with_calendar(parent))
        .and_then(|catalog| catalog.with_module(m1))
        .and_then(|catalog| catalog.with_module(m2))
        .expect("catalog builds");
    let resolver = SpecificationResolver::new(catalog);

    let err = resolver.resolve("child").unwrap_err();
    assert_eq!(
        err,
        SpecError::CircularDependency(vec![
            "module:m1".to_string(),
            "module:m2".to_string(),
            "module:m1".to_string(),
        ])
    );
    assert!(resolver.cached_ids().is_empty());
}

#[test_log::test]
fn concurrent_resolution_shares_results() {
    let harness = harness();
    std::thread::scope(|scope| {
        let handles: Vec<_> = ["us-market", "us-market-next", "gulf-market", "us-market"]
            .into_iter()
            .map(|id| {
                let resolver = &harness.resolver;
                scope.spawn(move || resolver.resolve(id).map(|spec| spec.event_sources.len()))
            })
            .collect();
        for handle in handles {
            let count = handle.join().expect("thread completes").expect("resolves");
            assert!(count > 0);
        }
    });
    assert_eq!(
        harness.resolver.cached_ids(),
        vec!["gulf-market", "us-market", "us-market-next"]
    );
}
