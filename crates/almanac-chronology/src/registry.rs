//! Registry of calendar-system algorithms.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use almanac_core::constants::CIVIL_CALENDAR_SYSTEM;
use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::algorithm::{
    ChronologyAlgorithm, FormulaCalendar, GregorianCalendar, IslamicTabularCalendar,
    JulianCalendar,
};
use crate::date::ChronologyDate;
use crate::definition::ChronologyDefinition;
use crate::error::{ChronologyError, ChronologyResult};

type AlgorithmMap = IndexMap<String, Arc<dyn ChronologyAlgorithm>>;

/// Calendar-system algorithms keyed by identifier.
///
/// Cross-calendar conversion always routes `source -> pivot -> target`.
/// The registry is safe to share between threads; registration takes a write
/// lock, lookups a read lock. Algorithms are handed out as `Arc`s so no lock
/// is held while converting.
#[derive(Debug)]
pub struct ChronologyRegistry {
    algorithms: RwLock<AlgorithmMap>,
}

impl Default for ChronologyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ChronologyRegistry {
    /// Creates a registry with no calendar systems at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            algorithms: RwLock::new(IndexMap::new()),
        }
    }

    /// Creates a registry holding the built-in Gregorian, Julian and
    /// tabular Islamic calendars.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            algorithms: RwLock::new(default_algorithms()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AlgorithmMap> {
        self.algorithms.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AlgorithmMap> {
        self.algorithms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// ## Summary
    /// Registers an algorithm under its own identifier.
    ///
    /// ## Errors
    /// Returns `AlreadyRegistered` if the identifier is taken.
    pub fn register(&self, algorithm: Arc<dyn ChronologyAlgorithm>) -> ChronologyResult<()> {
        let id = algorithm.id().to_string();
        let mut algorithms = self.write();
        if algorithms.contains_key(&id) {
            return Err(ChronologyError::AlreadyRegistered(id));
        }
        tracing::debug!(calendar_system = %id, "Registered calendar system");
        algorithms.insert(id, algorithm);
        Ok(())
    }

    /// ## Summary
    /// Builds a [`FormulaCalendar`] from a chronology document and registers it.
    ///
    /// The leap-year formula is compiled here, so a malformed formula is
    /// reported at registration rather than on first use.
    ///
    /// ## Errors
    /// Returns the construction error of [`FormulaCalendar::from_definition`],
    /// or `AlreadyRegistered`.
    pub fn register_definition(&self, definition: &ChronologyDefinition) -> ChronologyResult<()> {
        let calendar = FormulaCalendar::from_definition(definition)?;
        self.register(Arc::new(calendar))
    }

    /// ## Summary
    /// Looks up the algorithm for a calendar system.
    ///
    /// ## Errors
    /// Returns `UnknownCalendarSystem` if nothing is registered under `id`.
    pub fn get(&self, id: &str) -> ChronologyResult<Arc<dyn ChronologyAlgorithm>> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| ChronologyError::UnknownCalendarSystem(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Registered identifiers in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Drops every runtime registration and restores the built-in set.
    pub fn reset_to_defaults(&self) {
        *self.write() = default_algorithms();
        tracing::debug!("Chronology registry reset to defaults");
    }

    /// ## Summary
    /// Converts a date to its Julian Day Number.
    ///
    /// ## Errors
    /// Returns `UnknownCalendarSystem` or `InvalidDate`.
    pub fn to_pivot(&self, date: &ChronologyDate) -> ChronologyResult<i64> {
        self.get(&date.system)?
            .to_pivot(date.year, date.month, date.day)
    }

    /// ## Summary
    /// Converts a Julian Day Number into a date of `system`.
    ///
    /// ## Errors
    /// Returns `UnknownCalendarSystem` or `PivotOutOfRange`.
    pub fn from_pivot(&self, system: &str, pivot: i64) -> ChronologyResult<ChronologyDate> {
        self.get(system)?.from_pivot(pivot)
    }

    /// ## Summary
    /// Converts a date into another calendar system through the pivot.
    ///
    /// ## Errors
    /// Returns an error if either system is unknown, the date is invalid, or
    /// the target cannot represent the day.
    pub fn convert(&self, date: &ChronologyDate, target: &str) -> ChronologyResult<ChronologyDate> {
        let pivot = self.to_pivot(date)?;
        self.from_pivot(target, pivot)
    }

    /// ## Summary
    /// Converts a date of any registered system to a civil `NaiveDate`.
    ///
    /// ## Errors
    /// Same as [`Self::convert`].
    pub fn to_civil(&self, date: &ChronologyDate) -> ChronologyResult<NaiveDate> {
        if let Some(naive) = date.to_naive() {
            return Ok(naive);
        }
        let pivot = self.to_pivot(date)?;
        self.from_pivot(CIVIL_CALENDAR_SYSTEM, pivot)?
            .to_naive()
            .ok_or_else(|| ChronologyError::PivotOutOfRange {
                system: CIVIL_CALENDAR_SYSTEM.to_string(),
                pivot,
            })
    }

    /// ## Summary
    /// Expresses a civil date in `system`.
    ///
    /// ## Errors
    /// Same as [`Self::convert`].
    pub fn from_civil(&self, date: NaiveDate, system: &str) -> ChronologyResult<ChronologyDate> {
        self.convert(&ChronologyDate::civil(date), system)
    }
}

fn default_algorithms() -> AlgorithmMap {
    let builtins: [Arc<dyn ChronologyAlgorithm>; 3] = [
        Arc::new(GregorianCalendar),
        Arc::new(JulianCalendar),
        Arc::new(IslamicTabularCalendar),
    ];
    builtins
        .into_iter()
        .map(|algorithm| (algorithm.id().to_string(), algorithm))
        .collect()
}
