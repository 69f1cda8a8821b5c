//! Error types for evolve-core

use thiserror::Error;

/// Core error type
///
/// Every variant describes broken or incompatible race data. None of them are
/// retried; they surface to whoever triggered the load or the level-up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown buff action: {0}")]
    UnknownBuff(String),

    #[error("Level {requested} is out of range (highest configured level is {max})")]
    LevelOutOfRange { requested: u32, max: u32 },

    #[error("Race {0} has no configured levels")]
    EmptyLevelTable(String),
}

impl Error {
    /// Whether this error comes from a broken configuration file
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownBuff(_) | Error::LevelOutOfRange { .. } | Error::EmptyLevelTable(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
