use thiserror::Error;

use crate::formula::FormulaError;

/// Chronology conversion and registration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChronologyError {
    #[error("Unknown calendar system: {0}")]
    UnknownCalendarSystem(String),

    #[error("Calendar system already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid date {year}-{month}-{day} in calendar system {system}")]
    InvalidDate {
        system: String,
        year: i32,
        month: u32,
        day: u32,
    },

    #[error("Pivot {pivot} is out of range for calendar system {system}")]
    PivotOutOfRange { system: String, pivot: i64 },

    #[error("Invalid chronology definition {id}: {reason}")]
    InvalidDefinition { id: String, reason: String },

    #[error("Unsupported chronology algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid leap-year formula: {0}")]
    Formula(#[from] FormulaError),
}

pub type ChronologyResult<T> = std::result::Result<T, ChronologyError>;
