//! Error types for evolve-script

use thiserror::Error;

/// Race definition loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid {field} for race {race}: {value:?} is not a number")]
    InvalidStat {
        race: String,
        field: &'static str,
        value: String,
    },

    #[error("Invalid level entry: {0}")]
    InvalidLevel(String),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error(transparent)]
    Core(#[from] evolve_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
