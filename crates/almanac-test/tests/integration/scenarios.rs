//! Concrete holiday scenarios.

use almanac_test::core::types::Classification;
use almanac_test::engine::ReferenceResolver;
use almanac_test::engine::reference::western_easter;
use almanac_test::spec::Reference;

use super::helpers::{date, find, generate, harness, holidays};

#[test_log::test]
fn western_easter_dates() {
    assert_eq!(western_easter(2024), Some(date(2024, 3, 31)));
    assert_eq!(western_easter(2025), Some(date(2025, 4, 20)));

    let harness = harness();
    let references = vec![Reference {
        key: "easter".to_string(),
        formula: "EASTER_WESTERN".to_string(),
    }];
    let range = almanac_test::core::DateRange::new(date(2024, 1, 1), date(2025, 12, 31))
        .expect("valid range");
    let resolved = ReferenceResolver::resolve(&references, &range, harness.generator.registry())
        .expect("references should resolve");
    let dates = resolved.get_dates("easter");
    assert!(dates.contains(&date(2024, 3, 31)));
    assert!(dates.contains(&date(2025, 4, 20)));
}

#[test_log::test]
fn good_friday_single_day_range() {
    let events = generate("us-market", date(2024, 3, 29), date(2024, 3, 29));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, date(2024, 3, 29));
    assert_eq!(events[0].description, "Good Friday");
    assert_eq!(events[0].classification, Classification::Closed);
    assert_eq!(events[0].provenance, "rule:good_friday");
}

#[test_log::test]
fn independence_day_observed_on_friday() {
    let events = generate("us-market", date(2020, 7, 1), date(2020, 7, 10));
    let observed = find(&events, "Independence Day").expect("holiday should be generated");
    assert_eq!(observed.date, date(2020, 7, 3));
    assert_eq!(
        observed.provenance,
        "rule:independence_day;observed-from=2020-07-04"
    );
}

#[test_log::test]
fn consecutive_weekend_holidays_do_not_collide() {
    let events = generate("us-market-next", date(2021, 12, 20), date(2021, 12, 31));
    assert_eq!(
        holidays(&events),
        vec![
            (date(2021, 12, 24), "Christmas Eve"),
            (date(2021, 12, 27), "Christmas Day"),
            (date(2021, 12, 28), "Boxing Day"),
        ]
    );
}

#[test_log::test]
fn fifth_monday_of_february() {
    let events = generate("us-market", date(2024, 2, 1), date(2024, 2, 29));
    assert!(find(&events, "Fifth Monday of February").is_none());

    let events = generate("us-market", date(2016, 2, 1), date(2016, 2, 29));
    let monday = find(&events, "Fifth Monday of February").expect("2016 has five Mondays");
    assert_eq!(monday.date, date(2016, 2, 29));
    assert_eq!(monday.classification, Classification::Notable);
}

#[test_log::test]
fn election_day_skips_the_anchor_itself() {
    let events = generate("us-market", date(2022, 11, 1), date(2022, 11, 30));
    let election = find(&events, "Election Day").expect("election day should be generated");
    assert_eq!(election.date, date(2022, 11, 8));
}

#[test_log::test]
fn us_market_full_year() {
    let events = generate("us-market", date(2024, 1, 1), date(2024, 12, 31));
    assert_eq!(
        holidays(&events),
        vec![
            (date(2024, 1, 1), "New Year's Day"),
            (date(2024, 3, 29), "Good Friday"),
            (date(2024, 7, 4), "Independence Day"),
            (date(2024, 11, 5), "Election Day"),
            (date(2024, 11, 28), "Thanksgiving Day"),
            (date(2024, 12, 24), "Christmas Eve"),
            (date(2024, 12, 25), "Christmas Day"),
        ]
    );
    // Reclassified by delta.
    let eve = find(&events, "Christmas Eve").expect("christmas eve");
    assert_eq!(eve.classification, Classification::Closed);

    let weekends = events
        .iter()
        .filter(|event| event.classification == Classification::Weekend)
        .count();
    assert_eq!(weekends, 104);
}

#[test_log::test]
fn new_year_observed_in_previous_year() {
    let events = generate("us-market", date(2021, 12, 27), date(2021, 12, 31));
    let new_year = find(&events, "New Year's Day").expect("observed new year");
    assert_eq!(new_year.date, date(2021, 12, 31));
    assert_eq!(
        new_year.provenance,
        "rule:new_years_day;observed-from=2022-01-01"
    );
}

#[test_log::test]
fn deltas_add_and_remove() {
    let events = generate("us-market", date(2020, 11, 1), date(2020, 11, 30));
    assert!(find(&events, "Election Day").is_none());

    let events = generate("us-market", date(2025, 1, 6), date(2025, 1, 10));
    let mourning = find(&events, "National Day of Mourning").expect("added by delta");
    assert_eq!(mourning.date, date(2025, 1, 9));
    assert_eq!(mourning.classification, Classification::Closed);
    assert_eq!(mourning.provenance, "delta:add");
}

#[test_log::test]
fn islamic_holiday_on_custom_weekend() {
    let events = generate("gulf-market", date(2024, 3, 1), date(2024, 3, 31));
    let ramadan = find(&events, "First day of Ramadan").expect("ramadan start");
    assert_eq!(ramadan.date, date(2024, 3, 11));

    let weekend_days: Vec<_> = events
        .iter()
        .filter(|event| event.classification == Classification::Weekend)
        .map(|event| chrono::Datelike::weekday(&event.date))
        .collect();
    assert!(!weekend_days.is_empty());
    assert!(
        weekend_days
            .iter()
            .all(|day| matches!(day, chrono::Weekday::Fri | chrono::Weekday::Sat))
    );
}

#[test_log::test]
fn json_output_shape() {
    let events = generate("us-market", date(2024, 7, 4), date(2024, 7, 4));
    let json = almanac_test::app::output::render_events(&events, false).expect("render");
    assert_eq!(
        json,
        r#"[{"date":"2024-07-04","classification":"CLOSED","description":"Independence Day","provenance":"rule:independence_day"}]"#
    );
}
