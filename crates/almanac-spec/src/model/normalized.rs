use almanac_core::constants::CIVIL_CALENDAR_SYSTEM;
use almanac_core::types::{Classification, WeekendDays, WeekendShiftPolicy};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{CalendarMetadata, Delta, EventSource, Reference};

/// A calendar with its whole `extends`/`uses` graph merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSpecification {
    pub id: String,
    pub metadata: CalendarMetadata,
    pub weekend_days: WeekendDays,
    pub weekend_shift_policy: WeekendShiftPolicy,
    pub references: Vec<Reference>,
    pub event_sources: Vec<EventSource>,
    pub classifications: IndexMap<String, Classification>,
    pub deltas: Vec<Delta>,
    /// `calendar:<id>` / `module:<id>` entries in merge order.
    pub resolution_chain: Vec<String>,
}

impl NormalizedSpecification {
    /// Calendar system of the calendar itself, civil unless overridden.
    #[must_use]
    pub fn calendar_system(&self) -> &str {
        self.metadata
            .calendar_system
            .as_deref()
            .unwrap_or(CIVIL_CALENDAR_SYSTEM)
    }

    #[must_use]
    pub fn event_source(&self, key: &str) -> Option<&EventSource> {
        self.event_sources.iter().find(|source| source.key == key)
    }
}
