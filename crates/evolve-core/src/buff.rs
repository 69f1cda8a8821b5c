//! Buffs: permanent additive changes to a race's base stats
//!
//! Buff actions are stored as written in the configuration and resolved
//! against the closed [`BuffKind`] catalog when they are applied. An action
//! outside the catalog means the data file is corrupt or written for another
//! version, so it is always an error, never skipped.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed catalog of buff actions
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BuffKind {
    /// Adds the amount to base health
    HealthUp,
    /// Adds the amount to base movement speed
    MovementSpeedUp,
}

impl BuffKind {
    /// Parse a configured action name (exact match, e.g. `HEALTH_UP`)
    pub fn parse(action: &str) -> Result<Self> {
        BuffKind::from_str(action).map_err(|_| Error::UnknownBuff(action.to_string()))
    }

    /// Apply this buff to a set of base stats
    pub fn apply(&self, stats: &mut BaseStats, amount: i32) {
        match self {
            BuffKind::HealthUp => stats.health += f64::from(amount),
            BuffKind::MovementSpeedUp => stats.movement_speed += f64::from(amount),
        }
    }
}

/// Base stats a race pushes onto its subject
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    /// Health scale
    pub health: f64,
    /// Walk speed
    pub movement_speed: f64,
}

impl BaseStats {
    /// Create a new set of base stats
    pub fn new(health: f64, movement_speed: f64) -> Self {
        Self {
            health,
            movement_speed,
        }
    }
}

/// A configured buff entry: an action name and the amount it adds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    /// Action name as written in the configuration
    pub action: String,
    /// Amount added to the targeted stat
    pub amount: i32,
}

impl Buff {
    /// Create a new buff entry
    pub fn new(action: impl Into<String>, amount: i32) -> Self {
        Self {
            action: action.into(),
            amount,
        }
    }

    /// Create a buff entry from a known kind
    pub fn of(kind: BuffKind, amount: i32) -> Self {
        Self::new(kind.as_ref(), amount)
    }

    /// Resolve the action against the buff catalog
    pub fn kind(&self) -> Result<BuffKind> {
        BuffKind::parse(&self.action)
    }

    /// Apply this buff to a set of base stats
    pub fn apply(&self, stats: &mut BaseStats) -> Result<()> {
        self.kind()?.apply(stats, self.amount);
        Ok(())
    }
}

impl fmt::Display for Buff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.action, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_buff_kind_names() {
        assert_eq!(BuffKind::parse("HEALTH_UP").unwrap(), BuffKind::HealthUp);
        assert_eq!(
            BuffKind::parse("MOVEMENT_SPEED_UP").unwrap(),
            BuffKind::MovementSpeedUp
        );
        for kind in BuffKind::iter() {
            assert_eq!(BuffKind::parse(kind.as_ref()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_buff_is_an_error() {
        assert_eq!(
            BuffKind::parse("FLY_UP"),
            Err(Error::UnknownBuff("FLY_UP".to_string()))
        );
        // Actions are matched exactly
        assert!(BuffKind::parse("health_up").is_err());
    }

    #[test]
    fn test_buff_apply() {
        let mut stats = BaseStats::new(20.0, 0.2);
        Buff::of(BuffKind::HealthUp, 5).apply(&mut stats).unwrap();
        Buff::of(BuffKind::MovementSpeedUp, 1).apply(&mut stats).unwrap();

        assert_eq!(stats.health, 25.0);
        assert!((stats.movement_speed - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_buff_apply_unknown_leaves_stats() {
        let mut stats = BaseStats::new(20.0, 0.2);
        assert!(Buff::new("FLY_UP", 3).apply(&mut stats).is_err());
        assert_eq!(stats, BaseStats::new(20.0, 0.2));
    }
}
