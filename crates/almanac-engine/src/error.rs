use almanac_chronology::ChronologyError;
use almanac_core::error::CoreError;
use almanac_spec::SpecError;
use thiserror::Error;

/// Event generation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown reference formula: {0}")]
    UnknownFormula(String),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("Event source {0} refers to a reference but no reference dates were resolved")]
    ReferencesUnavailable(String),

    #[error("Event source {0} has neither a reference nor an anchor date")]
    MissingAnchor(String),

    #[error("Event source {0} has neither offset_days nor weekday_offset")]
    MissingOffset(String),

    #[error("Event source {0} has a weekday offset with nth = 0")]
    InvalidWeekdayOffset(String),

    #[error(transparent)]
    ChronologyError(#[from] ChronologyError),

    #[error(transparent)]
    SpecError(#[from] SpecError),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
