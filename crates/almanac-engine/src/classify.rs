//! Mapping of occurrences to classified events, and weekend fill.

use std::collections::HashSet;

use almanac_core::constants::{WEEKEND_DESCRIPTION, WEEKEND_PROVENANCE};
use almanac_core::types::{Classification, DateRange, WeekendDays};
use almanac_spec::{Delta, NormalizedSpecification};
use chrono::NaiveDate;

use crate::occurrence::{Event, Occurrence};

/// ## Summary
/// Turns occurrences into events.
///
/// Classification precedence, highest first: a `reclassify` delta for the
/// exact `(key, date)` (the last one wins), the specification's
/// classification map, the classification of an `add` delta for the pair,
/// the source's default, and finally `CLOSED`.
#[must_use]
pub fn classify(occurrences: Vec<Occurrence>, spec: &NormalizedSpecification) -> Vec<Event> {
    occurrences
        .into_iter()
        .map(|occurrence| {
            let source = spec.event_source(&occurrence.key);
            let classification = reclassification(&spec.deltas, &occurrence)
                .or_else(|| spec.classifications.get(&occurrence.key).copied())
                .or_else(|| added_classification(&spec.deltas, &occurrence))
                .or_else(|| source.and_then(|source| source.default_classification))
                .unwrap_or(Classification::Closed);

            Event {
                date: occurrence.date,
                classification,
                description: occurrence.name,
                provenance: occurrence.provenance,
            }
        })
        .collect()
}

fn same_pair(key: &str, date: NaiveDate, occurrence: &Occurrence) -> bool {
    key == occurrence.key && date == occurrence.date
}

fn reclassification(deltas: &[Delta], occurrence: &Occurrence) -> Option<Classification> {
    deltas.iter().rev().find_map(|delta| match delta {
        Delta::Reclassify {
            key,
            date,
            classification,
        } if same_pair(key, *date, occurrence) => Some(*classification),
        _ => None,
    })
}

fn added_classification(deltas: &[Delta], occurrence: &Occurrence) -> Option<Classification> {
    deltas.iter().find_map(|delta| match delta {
        Delta::Add {
            key,
            date,
            classification,
            ..
        } if same_pair(key, *date, occurrence) => *classification,
        _ => None,
    })
}

/// ## Summary
/// Appends a `WEEKEND` event for every weekend day of `range` that has no
/// event yet.
pub fn fill_weekends(events: &mut Vec<Event>, weekend_days: WeekendDays, range: &DateRange) {
    let taken: HashSet<NaiveDate> = events.iter().map(|event| event.date).collect();
    let before = events.len();
    events.extend(
        range
            .days()
            .filter(|day| weekend_days.is_weekend(*day) && !taken.contains(day))
            .map(|date| Event {
                date,
                classification: Classification::Weekend,
                description: WEEKEND_DESCRIPTION.to_string(),
                provenance: WEEKEND_PROVENANCE.to_string(),
            }),
    );
    tracing::trace!(added = events.len() - before, "Filled weekend days");
}
