//! Hub Configuration - effect refresh cadence and starting level
//!
//! Loaded from RON by the host, e.g.
//!
//! ```ron
//! (
//!     effect_interval: 20,
//!     default_level: 1,
//! )
//! ```
//!
//! Missing fields fall back to their defaults.

use crate::error::Result;
use evolve_core::{Tick, DEFAULT_STARTING_LEVEL};
use serde::{Deserialize, Serialize};

/// Default number of ticks between two effect refreshes
pub const DEFAULT_EFFECT_INTERVAL: Tick = 20;

/// Configuration for the hub
///
/// # Example
///
/// ```
/// use evolve_hub::HubConfig;
///
/// let config = HubConfig::from_ron_str("(effect_interval: 40)").unwrap();
/// assert_eq!(config.effect_interval(), 40);
/// assert_eq!(config.default_level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Ticks between two effect refreshes
    ///
    /// Clamped to at least 1.
    effect_interval: Tick,
    /// Level a race starts at when none is requested
    default_level: u32,
}

impl HubConfig {
    /// Create a configuration with the given refresh interval
    ///
    /// The interval is clamped to at least 1 tick.
    pub fn with_effect_interval(effect_interval: Tick) -> Self {
        Self {
            effect_interval: effect_interval.max(1),
            ..Self::default()
        }
    }

    /// Parse a configuration from RON
    pub fn from_ron_str(content: &str) -> Result<Self> {
        let config: HubConfig = ron::from_str(content)?;
        Ok(Self {
            effect_interval: config.effect_interval.max(1),
            ..config
        })
    }

    /// Ticks between two effect refreshes
    pub fn effect_interval(&self) -> Tick {
        self.effect_interval
    }

    /// Set the refresh interval (clamped to at least 1)
    pub fn set_effect_interval(&mut self, interval: Tick) {
        self.effect_interval = interval.max(1);
    }

    /// Level a race starts at when none is requested
    pub fn default_level(&self) -> u32 {
        self.default_level
    }

    /// Set the default starting level
    pub fn set_default_level(&mut self, level: u32) {
        self.default_level = level;
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            effect_interval: DEFAULT_EFFECT_INTERVAL,
            default_level: DEFAULT_STARTING_LEVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default() {
        let config = HubConfig::default();
        assert_eq!(config.effect_interval(), DEFAULT_EFFECT_INTERVAL);
        assert_eq!(config.default_level(), DEFAULT_STARTING_LEVEL);
    }

    #[test]
    fn test_from_ron() {
        let config = HubConfig::from_ron_str("(effect_interval: 10, default_level: 2)").unwrap();
        assert_eq!(config.effect_interval(), 10);
        assert_eq!(config.default_level(), 2);

        let config = HubConfig::from_ron_str("()").unwrap();
        assert_eq!(config, HubConfig::default());
    }

    #[test]
    fn test_interval_clamped() {
        assert_eq!(HubConfig::with_effect_interval(0).effect_interval(), 1);
        assert_eq!(
            HubConfig::from_ron_str("(effect_interval: 0)")
                .unwrap()
                .effect_interval(),
            1
        );

        let mut config = HubConfig::default();
        config.set_effect_interval(0);
        assert_eq!(config.effect_interval(), 1);
    }

    #[test]
    fn test_bad_config() {
        let err = HubConfig::from_ron_str("(effect_interval: \"soon\")").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
