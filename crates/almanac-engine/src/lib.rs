//! Event generation from normalized calendar specifications.
//!
//! The pipeline, driven by [`EventGenerator::generate`]:
//!
//! 1. compute reference dates ([`ReferenceResolver`]),
//! 2. expand every event source's rule ([`RuleExpander`]),
//! 3. move weekend occurrences per the shift policy ([`WeekendShiftEngine`]),
//! 4. apply add/remove overrides ([`DeltaApplier`]),
//! 5. classify occurrences into events and fill in weekend days,
//! 6. sort by date.

pub mod classify;
pub mod delta;
pub mod error;
pub mod expander;
pub mod generator;
pub mod occurrence;
pub mod reference;
pub mod shift;

pub use delta::DeltaApplier;
pub use error::{EngineError, EngineResult};
pub use expander::RuleExpander;
pub use generator::EventGenerator;
pub use occurrence::{Event, Occurrence};
pub use reference::{ReferenceFormula, ReferenceResolver};
pub use shift::WeekendShiftEngine;
