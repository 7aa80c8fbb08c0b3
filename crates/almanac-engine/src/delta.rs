//! Explicit add/remove overrides.

use almanac_core::constants::DELTA_ADD_PROVENANCE;
use almanac_core::types::DateRange;
use almanac_spec::{Delta, EventSource};
use chrono::NaiveDate;
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::occurrence::Occurrence;

/// Applies `add` and `remove` deltas to an occurrence set.
///
/// Occurrences are indexed by `(key, date)`; the first occurrence of a pair
/// wins and later duplicates are discarded. `reclassify` deltas are left
/// for classification.
#[derive(Debug, Clone, Copy)]
pub struct DeltaApplier<'a> {
    sources: &'a [EventSource],
}

impl<'a> DeltaApplier<'a> {
    /// `sources` supply display names for added occurrences.
    #[must_use]
    pub const fn new(sources: &'a [EventSource]) -> Self {
        Self { sources }
    }

    /// ## Summary
    /// Applies `deltas` in declaration order.
    ///
    /// `add` inserts a synthetic occurrence when its date is inside `range`
    /// and the pair is not already present. `remove` deletes an exact
    /// `(key, date)` match and is a no-op otherwise.
    #[must_use]
    pub fn apply(
        &self,
        occurrences: Vec<Occurrence>,
        deltas: &[Delta],
        range: &DateRange,
    ) -> Vec<Occurrence> {
        let mut indexed: IndexMap<(String, NaiveDate), Occurrence> =
            IndexMap::with_capacity(occurrences.len());
        for occurrence in occurrences {
            if let Entry::Vacant(entry) = indexed.entry((occurrence.key.clone(), occurrence.date)) {
                entry.insert(occurrence);
            }
        }

        for delta in deltas {
            match delta {
                Delta::Add { key, date, name, .. } => {
                    if !range.contains(*date) {
                        continue;
                    }
                    if let Entry::Vacant(entry) = indexed.entry((key.clone(), *date)) {
                        let name = name.clone().unwrap_or_else(|| self.source_name(key));
                        tracing::debug!(%key, %date, "Delta added occurrence");
                        entry.insert(Occurrence::new(key, *date, name, DELTA_ADD_PROVENANCE));
                    }
                }
                Delta::Remove { key, date } => {
                    if indexed.shift_remove(&(key.clone(), *date)).is_some() {
                        tracing::debug!(%key, %date, "Delta removed occurrence");
                    }
                }
                Delta::Reclassify { .. } => {}
            }
        }

        indexed.into_values().collect()
    }

    fn source_name(&self, key: &str) -> String {
        self.sources
            .iter()
            .find(|source| source.key == key)
            .map_or_else(|| key.to_string(), |source| source.name.clone())
    }
}
