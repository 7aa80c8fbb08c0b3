use std::collections::HashMap;

use almanac_core::constants::{CALENDAR_CHAIN_PREFIX, MODULE_CHAIN_PREFIX};

use super::merge::{Merged, chain_entry};
use crate::catalog::SpecCatalog;
use crate::error::{SpecError, SpecResult};
use crate::model::NormalizedSpecification;

/// Absent from the map means unvisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// One depth-first walk from a single calendar.
pub(super) struct Traversal<'a, C: ?Sized> {
    catalog: &'a C,
    calendars: HashMap<&'a str, Mark>,
    modules: HashMap<&'a str, Mark>,
    /// Chain entries of the nodes currently in progress, outermost first.
    path: Vec<String>,
    merged: Merged,
}

impl<'a, C: SpecCatalog + ?Sized> Traversal<'a, C> {
    pub(super) fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            calendars: HashMap::new(),
            modules: HashMap::new(),
            path: Vec::new(),
            merged: Merged::default(),
        }
    }

    pub(super) fn run(mut self, id: &str) -> SpecResult<NormalizedSpecification> {
        self.visit_calendar(id)?;
        Ok(self.merged.finish(id))
    }

    fn visit_calendar(&mut self, id: &str) -> SpecResult<()> {
        match self.calendars.get(id) {
            Some(Mark::Done) => {
                tracing::trace!(calendar = %id, "Calendar already merged");
                return Ok(());
            }
            Some(Mark::InProgress) => return Err(self.cycle(CALENDAR_CHAIN_PREFIX, id)),
            None => {}
        }

        let catalog: &'a C = self.catalog;
        let calendar = catalog
            .calendar(id)
            .ok_or_else(|| SpecError::UnknownCalendar(id.to_string()))?;

        self.calendars.insert(&calendar.id, Mark::InProgress);
        self.path
            .push(chain_entry(CALENDAR_CHAIN_PREFIX, &calendar.id));

        for parent in &calendar.extends {
            self.visit_calendar(parent)?;
        }
        for module in &calendar.uses {
            self.visit_module(module)?;
        }
        self.merged.merge_calendar(calendar);

        self.path.pop();
        self.calendars.insert(&calendar.id, Mark::Done);
        Ok(())
    }

    fn visit_module(&mut self, id: &str) -> SpecResult<()> {
        match self.modules.get(id) {
            Some(Mark::Done) => {
                tracing::trace!(module = %id, "Module already merged");
                return Ok(());
            }
            Some(Mark::InProgress) => return Err(self.cycle(MODULE_CHAIN_PREFIX, id)),
            None => {}
        }

        let catalog: &'a C = self.catalog;
        let module = catalog
            .module(id)
            .ok_or_else(|| SpecError::UnknownModule(id.to_string()))?;

        self.modules.insert(&module.id, Mark::InProgress);
        self.path.push(chain_entry(MODULE_CHAIN_PREFIX, &module.id));

        for used in &module.uses {
            self.visit_module(used)?;
        }
        self.merged.merge_module(module);

        self.path.pop();
        self.modules.insert(&module.id, Mark::Done);
        Ok(())
    }

    /// Builds the error for an edge back to `id`, listing the loop from its
    /// first appearance on the current path.
    fn cycle(&self, prefix: &str, id: &str) -> SpecError {
        let entry = chain_entry(prefix, id);
        let start = self
            .path
            .iter()
            .position(|visited| *visited == entry)
            .unwrap_or_default();
        let mut cycle = self.path[start..].to_vec();
        cycle.push(entry);
        tracing::warn!(cycle = ?cycle, "Circular dependency detected");
        SpecError::CircularDependency(cycle)
    }
}
