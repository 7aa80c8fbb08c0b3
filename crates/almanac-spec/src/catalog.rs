//! Lookup of calendar and module documents by identifier.

use almanac_core::error::CoreError;
use indexmap::IndexMap;

use crate::error::{SpecError, SpecResult};
use crate::model::{CalendarSpecification, ModuleSpecification};

/// Source of specification documents for the resolver.
///
/// Loading is someone else's job; a catalog only answers lookups.
pub trait SpecCatalog: Send + Sync {
    fn calendar(&self, id: &str) -> Option<&CalendarSpecification>;

    fn module(&self, id: &str) -> Option<&ModuleSpecification>;
}

/// A catalog held entirely in memory, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    calendars: IndexMap<String, CalendarSpecification>,
    modules: IndexMap<String, ModuleSpecification>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Adds a calendar document.
    ///
    /// ## Errors
    /// Returns `DuplicateId` if a calendar with the same identifier exists,
    /// or a core `InvalidInput` error for an empty identifier.
    pub fn insert_calendar(&mut self, calendar: CalendarSpecification) -> SpecResult<()> {
        check_id(&calendar.id)?;
        if self.calendars.contains_key(&calendar.id) {
            return Err(SpecError::DuplicateId(calendar.id));
        }
        self.calendars.insert(calendar.id.clone(), calendar);
        Ok(())
    }

    /// ## Summary
    /// Adds a module document.
    ///
    /// ## Errors
    /// Same as [`Self::insert_calendar`].
    pub fn insert_module(&mut self, module: ModuleSpecification) -> SpecResult<()> {
        check_id(&module.id)?;
        if self.modules.contains_key(&module.id) {
            return Err(SpecError::DuplicateId(module.id));
        }
        self.modules.insert(module.id.clone(), module);
        Ok(())
    }

    /// Builder-style [`Self::insert_calendar`].
    ///
    /// ## Errors
    /// Same as [`Self::insert_calendar`].
    pub fn with_calendar(mut self, calendar: CalendarSpecification) -> SpecResult<Self> {
        self.insert_calendar(calendar)?;
        Ok(self)
    }

    /// Builder-style [`Self::insert_module`].
    ///
    /// ## Errors
    /// Same as [`Self::insert_module`].
    pub fn with_module(mut self, module: ModuleSpecification) -> SpecResult<Self> {
        self.insert_module(module)?;
        Ok(self)
    }

    pub fn calendar_ids(&self) -> impl Iterator<Item = &str> {
        self.calendars.keys().map(String::as_str)
    }

    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

fn check_id(id: &str) -> SpecResult<()> {
    if id.trim().is_empty() {
        return Err(CoreError::InvalidInput("specification identifier is empty".to_string()).into());
    }
    Ok(())
}

impl SpecCatalog for InMemoryCatalog {
    fn calendar(&self, id: &str) -> Option<&CalendarSpecification> {
        self.calendars.get(id)
    }

    fn module(&self, id: &str) -> Option<&ModuleSpecification> {
        self.modules.get(id)
    }
}
