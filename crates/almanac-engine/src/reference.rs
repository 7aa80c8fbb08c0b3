//! Reference dates (anchors such as Easter) consumed by relative rules.

use std::str::FromStr;

use almanac_chronology::{ChronologyDate, ChronologyError, ChronologyRegistry};
use almanac_core::constants::JULIAN_CALENDAR_SYSTEM;
use almanac_core::types::DateRange;
use almanac_spec::Reference;
use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;

use crate::error::{EngineError, EngineResult};

/// Date-producing functions a reference can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceFormula {
    /// Gregorian computus.
    EasterWestern,
    /// Julian computus, expressed as a civil date.
    EasterOrthodox,
}

impl FromStr for ReferenceFormula {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASTER" | "EASTER_WESTERN" => Ok(Self::EasterWestern),
            "EASTER_ORTHODOX" => Ok(Self::EasterOrthodox),
            _ => Err(EngineError::UnknownFormula(s.to_string())),
        }
    }
}

impl ReferenceFormula {
    /// ## Summary
    /// Computes the civil date of this formula in `year`.
    ///
    /// Returns `Ok(None)` when the year cannot be represented.
    ///
    /// ## Errors
    /// Returns a chronology error if the Julian calendar is not registered.
    pub fn date_in(
        self,
        year: i32,
        registry: &ChronologyRegistry,
    ) -> EngineResult<Option<NaiveDate>> {
        match self {
            Self::EasterWestern => Ok(western_easter(year)),
            Self::EasterOrthodox => {
                let (month, day) = julian_easter(year);
                let julian = ChronologyDate::new(JULIAN_CALENDAR_SYSTEM, year, month, day);
                match registry.to_civil(&julian) {
                    Ok(date) => Ok(Some(date)),
                    Err(ChronologyError::PivotOutOfRange { .. }) => Ok(None),
                    Err(err) => Err(err.into()),
                }
            }
        }
    }
}

/// Western Easter Sunday by the anonymous Gregorian algorithm (Meeus).
#[must_use]
pub fn western_easter(year: i32) -> Option<NaiveDate> {
    let y = i64::from(year);
    let a = y.rem_euclid(19);
    let b = y.div_euclid(100);
    let c = y.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let month = (h + l - 7 * m + 114).div_euclid(31);
    let day = (h + l - 7 * m + 114).rem_euclid(31) + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Easter Sunday in the Julian calendar by the Julian computus (Meeus),
/// as a Julian (month, day).
#[must_use]
pub fn julian_easter(year: i32) -> (u32, u32) {
    let y = i64::from(year);
    let a = y.rem_euclid(4);
    let b = y.rem_euclid(7);
    let c = y.rem_euclid(19);
    let d = (19 * c + 15).rem_euclid(30);
    let e = (2 * a + 4 * b - d + 34).rem_euclid(7);
    let month = (d + e + 114).div_euclid(31);
    let day = (d + e + 114).rem_euclid(31) + 1;
    // month is 3 or 4 and day is 1..=31 by construction
    (
        u32::try_from(month).unwrap_or(4),
        u32::try_from(day).unwrap_or(1),
    )
}

/// Precomputed reference dates for one generation run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceResolver {
    dates: IndexMap<String, Vec<NaiveDate>>,
}

impl ReferenceResolver {
    /// ## Summary
    /// Computes every reference for each year the range touches, plus one
    /// year on either side.
    ///
    /// The dates are not filtered to `range`: a rule offset from a reference
    /// outside the range may still land inside it.
    ///
    /// ## Errors
    /// Returns `UnknownFormula` for an unrecognized formula tag.
    #[tracing::instrument(skip(references, registry), fields(references = references.len()))]
    pub fn resolve(
        references: &[Reference],
        range: &DateRange,
        registry: &ChronologyRegistry,
    ) -> EngineResult<Self> {
        let first = range.from().year() - 1;
        let last = range.to().year() + 1;

        let mut dates = IndexMap::with_capacity(references.len());
        for reference in references {
            let formula: ReferenceFormula = reference.formula.parse()?;
            let mut per_year = Vec::new();
            for year in first..=last {
                if let Some(date) = formula.date_in(year, registry)? {
                    per_year.push(date);
                }
            }
            tracing::trace!(key = %reference.key, ?formula, count = per_year.len(), "Resolved reference");
            dates.insert(reference.key.clone(), per_year);
        }
        Ok(Self { dates })
    }

    /// Dates of `key` in ascending order; empty for an unknown key.
    #[must_use]
    pub fn get_dates(&self, key: &str) -> &[NaiveDate] {
        self.dates.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn has_reference(&self, key: &str) -> bool {
        self.dates.contains_key(key)
    }
}
