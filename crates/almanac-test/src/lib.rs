//! Almanac calendar compiler - integration test support.
//!
//! Loads the JSON documents under `fixtures/calendars` the same way the
//! binary does, and wires them into a resolver and a generator.

use std::path::PathBuf;
use std::sync::Arc;

use almanac_app::loader::{LoadedDocuments, load_directory};
use almanac_chronology::ChronologyRegistry;
use almanac_core::types::Classification;
use almanac_engine::{Event, EventGenerator};
use almanac_spec::{InMemoryCatalog, SpecificationResolver};
use chrono::NaiveDate;

pub use almanac_app as app;
pub use almanac_chronology as chronology;
pub use almanac_core as core;
pub use almanac_engine as engine;
pub use almanac_spec as spec;

/// Directory holding the fixture documents.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("calendars")
}

/// ## Summary
/// Loads every fixture document.
///
/// ## Errors
/// Returns the loader error if a fixture is unreadable or invalid.
pub fn load_fixtures() -> anyhow::Result<LoadedDocuments> {
    Ok(load_directory(&fixtures_dir())?)
}

/// A resolver and a generator over the fixture catalog, sharing one
/// chronology registry with the fixture chronologies registered.
pub struct Harness {
    pub resolver: SpecificationResolver<InMemoryCatalog>,
    pub generator: EventGenerator,
}

impl Harness {
    /// ## Summary
    /// Builds a harness from the fixture directory.
    ///
    /// ## Errors
    /// Returns an error if loading or chronology registration fails.
    pub fn from_fixtures() -> anyhow::Result<Self> {
        let loaded = load_fixtures()?;
        let registry = Arc::new(ChronologyRegistry::with_defaults());
        loaded.register_chronologies(&registry)?;
        Ok(Self::new(loaded.catalog, registry))
    }

    #[must_use]
    pub fn new(catalog: InMemoryCatalog, registry: Arc<ChronologyRegistry>) -> Self {
        Self {
            resolver: SpecificationResolver::new(catalog),
            generator: EventGenerator::new(registry),
        }
    }

    /// ## Summary
    /// Resolves `calendar` and generates its events over `[from, to]`.
    ///
    /// ## Errors
    /// Returns resolution and generation errors.
    pub fn generate(
        &self,
        calendar: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Event>> {
        Ok(self
            .generator
            .resolve_and_generate(&self.resolver, calendar, from, to)?)
    }
}

/// Events other than the weekend fill.
#[must_use]
pub fn without_weekends(events: &[Event]) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| event.classification != Classification::Weekend)
        .collect()
}
