//! Identity types for races and subjects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a subject (the entity a race is bound to) at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub u64);

impl SubjectId {
    /// Create a new subject ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subject:{}", self.0)
    }
}

/// Identifier of a race archetype
///
/// Race names are case-insensitive: the ID is always stored lower-cased so
/// `"Elf"`, `"ELF"` and `"elf"` all name the same race.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RaceId(String);

impl RaceId {
    /// Create a new race ID
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RaceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RaceId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<RaceId> for String {
    fn from(id: RaceId) -> Self {
        id.0
    }
}
