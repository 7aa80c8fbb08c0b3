//! The generation pipeline.

use std::collections::HashSet;
use std::sync::Arc;

use almanac_chronology::{ChronologyError, ChronologyRegistry};
use almanac_core::constants::{RULE_PROVENANCE_PREFIX, SHIFT_PADDING_DAYS};
use almanac_core::types::{DateRange, WeekendShiftPolicy};
use almanac_spec::{NormalizedSpecification, SpecCatalog, SpecificationResolver};
use chrono::{Datelike, NaiveDate};

use crate::classify::{classify, fill_weekends};
use crate::delta::DeltaApplier;
use crate::error::EngineResult;
use crate::expander::RuleExpander;
use crate::occurrence::{Event, Occurrence};
use crate::reference::ReferenceResolver;
use crate::shift::WeekendShiftEngine;

/// Produces the dated, classified events of a normalized specification.
///
/// Owns the chronology registry used for non-civil calendar systems; share
/// one registry between generators with [`EventGenerator::new`].
#[derive(Debug, Clone)]
pub struct EventGenerator {
    registry: Arc<ChronologyRegistry>,
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ChronologyRegistry::with_defaults()))
    }
}

impl EventGenerator {
    #[must_use]
    pub const fn new(registry: Arc<ChronologyRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &ChronologyRegistry {
        &self.registry
    }

    /// ## Summary
    /// Generates the events of `spec` between `from` and `to`, inclusive.
    ///
    /// The output is sorted by date. Events on the same date keep the order
    /// in which they were produced: rule and delta events in event-source
    /// order, then weekend fill. Identical inputs give identical output.
    ///
    /// ## Errors
    /// - `InvalidRange` if `from` is after `to`,
    /// - `UnknownCalendarSystem` for an unregistered calendar-system tag,
    /// - reference and rule configuration errors from expansion.
    #[tracing::instrument(skip(self, spec), fields(calendar = %spec.id))]
    pub fn generate(
        &self,
        spec: &NormalizedSpecification,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Event>> {
        let range = DateRange::new(from, to)?;
        self.validate(spec)?;

        // A weekend holiday just outside the range may be observed inside it.
        let expansion = if spec.weekend_shift_policy == WeekendShiftPolicy::None {
            range
        } else {
            range.padded(SHIFT_PADDING_DAYS)
        };

        let references = ReferenceResolver::resolve(&spec.references, &expansion, &self.registry)?;
        let occurrences = self.expand_all(spec, &references, &expansion)?;

        let shiftable: HashSet<String> = spec
            .event_sources
            .iter()
            .filter(|source| source.is_shiftable())
            .map(|source| source.key.clone())
            .collect();
        let shifted = WeekendShiftEngine::new(spec.weekend_shift_policy, spec.weekend_days)
            .apply(occurrences, &shiftable, &range);
        let in_range: Vec<Occurrence> = shifted
            .into_iter()
            .filter(|occurrence| range.contains(occurrence.date))
            .collect();

        let applied = DeltaApplier::new(&spec.event_sources).apply(in_range, &spec.deltas, &range);

        let mut events = classify(applied, spec);
        fill_weekends(&mut events, spec.weekend_days, &range);
        events.sort_by_key(|event| event.date);

        tracing::debug!(events = events.len(), %range, "Generated events");
        Ok(events)
    }

    /// ## Summary
    /// Resolves calendar `id` and generates its events.
    ///
    /// ## Errors
    /// Resolution errors, then the errors of [`Self::generate`].
    pub fn resolve_and_generate<C: SpecCatalog>(
        &self,
        resolver: &SpecificationResolver<C>,
        id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Event>> {
        let spec = resolver.resolve(id)?;
        self.generate(&spec, from, to)
    }

    /// ## Summary
    /// Checks that every calendar system the specification names is
    /// registered.
    ///
    /// ## Errors
    /// Returns `UnknownCalendarSystem` for the first missing one.
    pub fn validate(&self, spec: &NormalizedSpecification) -> EngineResult<()> {
        let systems = std::iter::once(spec.calendar_system()).chain(
            spec.event_sources
                .iter()
                .filter_map(|source| source.rule.calendar_system()),
        );
        for system in systems {
            if !self.registry.contains(system) {
                return Err(ChronologyError::UnknownCalendarSystem(system.to_string()).into());
            }
        }
        Ok(())
    }

    fn expand_all(
        &self,
        spec: &NormalizedSpecification,
        references: &ReferenceResolver,
        range: &DateRange,
    ) -> EngineResult<Vec<Occurrence>> {
        let expander = RuleExpander::new(&self.registry)
            .with_references(references)
            .with_default_system(spec.calendar_system());

        let mut occurrences = Vec::new();
        for source in &spec.event_sources {
            let provenance = format!("{RULE_PROVENANCE_PREFIX}:{}", source.key);
            // Active years apply to the rule's own date, before any shift.
            occurrences.extend(
                expander
                    .expand(source, range, &provenance)?
                    .into_iter()
                    .filter(|occurrence| {
                        let active = source.is_active_in(occurrence.date.year());
                        if !active {
                            tracing::trace!(key = %occurrence.key, date = %occurrence.date, "Inactive year");
                        }
                        active
                    }),
            );
        }
        Ok(occurrences)
    }
}
