use almanac_core::error::CoreError;
use thiserror::Error;

/// Specification catalog and resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("Unknown calendar: {0}")]
    UnknownCalendar(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Circular dependency: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),

    #[error("Duplicate specification identifier: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

pub type SpecResult<T> = std::result::Result<T, SpecError>;
