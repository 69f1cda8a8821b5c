//! Error types for evolve-hub

use evolve_core::{RaceId, SubjectId};
use thiserror::Error;

/// Result type for evolve-hub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in evolve-hub
#[derive(Debug, Error)]
pub enum Error {
    /// No template registered under this name
    #[error("race {0} not found")]
    RaceNotFound(RaceId),

    /// A template with this name is already registered
    #[error("race {0} is already registered")]
    DuplicateRace(RaceId),

    /// The subject has no race
    #[error("{0} has no race")]
    SubjectNotFound(SubjectId),

    /// Hub configuration could not be parsed
    #[error("config error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// Core error
    #[error("core error: {0}")]
    Core(#[from] evolve_core::Error),
}

/// A failed [`Hub::assign_race`](crate::Hub::assign_race)
///
/// Carries the subject handle back to the caller.
pub struct AssignError<S> {
    /// Why the race could not be assigned
    pub error: Error,
    /// The subject that was passed in, untouched
    pub subject: S,
}

impl<S> AssignError<S> {
    /// Drop the handle and keep the error
    pub fn into_error(self) -> Error {
        self.error
    }
}

impl<S> std::fmt::Debug for AssignError<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<S> std::fmt::Display for AssignError<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error, f)
    }
}

impl<S> std::error::Error for AssignError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<S> From<AssignError<S>> for Error {
    fn from(err: AssignError<S>) -> Self {
        err.error
    }
}

// Compile-time check that Error is Send + Sync for thread-safe error propagation.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
