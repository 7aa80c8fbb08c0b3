use almanac_core::constants::{CALENDAR_CHAIN_PREFIX, MODULE_CHAIN_PREFIX};
use almanac_core::types::{Classification, WeekendDays, WeekendShiftPolicy};
use indexmap::IndexMap;

use crate::model::{
    CalendarMetadata, CalendarSpecification, Delta, EventSource, ModuleSpecification,
    NormalizedSpecification, Reference,
};

pub(super) fn chain_entry(prefix: &str, id: &str) -> String {
    format!("{prefix}:{id}")
}

/// Accumulates content in merge order.
///
/// Keyed collections keep the position of the first insertion while a later
/// entry with the same key replaces its value.
#[derive(Debug, Default)]
pub(super) struct Merged {
    metadata: CalendarMetadata,
    weekend_days: Option<WeekendDays>,
    weekend_shift_policy: Option<WeekendShiftPolicy>,
    references: IndexMap<String, Reference>,
    event_sources: IndexMap<String, EventSource>,
    classifications: IndexMap<String, Classification>,
    deltas: Vec<Delta>,
    chain: Vec<String>,
}

impl Merged {
    pub(super) fn merge_calendar(&mut self, calendar: &CalendarSpecification) {
        self.metadata.overlay(&calendar.metadata);
        if calendar.weekend_shift_policy.is_some() {
            self.weekend_shift_policy = calendar.weekend_shift_policy;
        }
        self.merge_event_sources(&calendar.event_sources);
        for (key, classification) in &calendar.classifications {
            self.classifications.insert(key.clone(), *classification);
        }
        self.deltas.extend(calendar.deltas.iter().cloned());
        self.chain
            .push(chain_entry(CALENDAR_CHAIN_PREFIX, &calendar.id));

        tracing::debug!(
            calendar = %calendar.id,
            event_sources = calendar.event_sources.len(),
            deltas = calendar.deltas.len(),
            "Merged calendar"
        );
    }

    pub(super) fn merge_module(&mut self, module: &ModuleSpecification) {
        if !module.policies.weekends.is_empty() {
            self.weekend_days = Some(module.policies.weekends.iter().copied().collect());
        }
        for reference in &module.references {
            self.references
                .insert(reference.key.clone(), reference.clone());
        }
        self.merge_event_sources(&module.event_sources);
        self.chain.push(chain_entry(MODULE_CHAIN_PREFIX, &module.id));

        tracing::debug!(
            module = %module.id,
            event_sources = module.event_sources.len(),
            references = module.references.len(),
            "Merged module"
        );
    }

    fn merge_event_sources(&mut self, sources: &[EventSource]) {
        for source in sources {
            if let Some(previous) = self.event_sources.insert(source.key.clone(), source.clone()) {
                tracing::trace!(key = %previous.key, "Event source overridden");
            }
        }
    }

    pub(super) fn finish(self, id: &str) -> NormalizedSpecification {
        NormalizedSpecification {
            id: id.to_string(),
            metadata: self.metadata,
            weekend_days: self
                .weekend_days
                .unwrap_or_else(WeekendDays::saturday_sunday),
            weekend_shift_policy: self.weekend_shift_policy.unwrap_or_default(),
            references: self.references.into_values().collect(),
            event_sources: self.event_sources.into_values().collect(),
            classifications: self.classifications,
            deltas: self.deltas,
            resolution_chain: self.chain,
        }
    }
}
