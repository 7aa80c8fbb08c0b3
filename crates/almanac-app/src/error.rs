use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors (document loading and output)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize events: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    SpecError(#[from] almanac_spec::SpecError),

    #[error(transparent)]
    ChronologyError(#[from] almanac_chronology::ChronologyError),

    #[error(transparent)]
    EngineError(#[from] almanac_engine::EngineError),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
