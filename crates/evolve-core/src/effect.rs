//! Timed status effects
//!
//! Effect names from the configuration resolve against two disjoint catalogs:
//! the host engine's built-in ("standard") effects, and the effects defined by
//! this crate ("custom"). Standard names are looked up first and, like the
//! host's own registry, case-insensitively. Custom names must match exactly.
//!
//! A name found in neither catalog is not an error: the entry is dropped with
//! a warning and the rest of the level still applies.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Effects built into the host engine
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
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum StandardEffect {
    Speed,
    Slow,
    FastDigging,
    SlowDigging,
    IncreaseDamage,
    Heal,
    Harm,
    Jump,
    Confusion,
    Regeneration,
    DamageResistance,
    FireResistance,
    WaterBreathing,
    Invisibility,
    Blindness,
    NightVision,
    Hunger,
    Weakness,
    Poison,
    Wither,
    HealthBoost,
    Absorption,
    Saturation,
    Glowing,
    Levitation,
    Luck,
    Unluck,
    SlowFalling,
    ConduitPower,
    DolphinsGrace,
    BadOmen,
    HeroOfTheVillage,
}

/// Effects defined by the race system itself
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
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomEffect {
    /// Damaged while standing in direct sunlight
    SunSensitivity,
    /// Damaged while standing in water
    WaterSensitivity,
    /// Stronger while it is night
    NightStrength,
    /// Immune to fire and lava while active
    FireWalker,
    /// Takes no fall damage
    Featherweight,
    /// Slowly regains hunger
    Forager,
}

/// A resolved effect kind, as handed to the subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Standard(StandardEffect),
    Custom(CustomEffect),
}

impl EffectKind {
    /// Configuration name of this effect
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Standard(effect) => effect.into(),
            EffectKind::Custom(effect) => effect.into(),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<StandardEffect> for EffectKind {
    fn from(effect: StandardEffect) -> Self {
        EffectKind::Standard(effect)
    }
}

impl From<CustomEffect> for EffectKind {
    fn from(effect: CustomEffect) -> Self {
        EffectKind::Custom(effect)
    }
}

/// Outcome of looking an effect name up in both catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectResolution {
    Standard(StandardEffect),
    Custom(CustomEffect),
    Unresolved,
}

impl EffectResolution {
    /// Resolve a configured effect name, standard catalog first
    pub fn resolve(name: &str) -> Self {
        if let Ok(effect) = StandardEffect::from_str(name) {
            return EffectResolution::Standard(effect);
        }
        match CustomEffect::from_str(name) {
            Ok(effect) => EffectResolution::Custom(effect),
            Err(_) => EffectResolution::Unresolved,
        }
    }

    /// The effect kind, if the name was found
    pub fn kind(&self) -> Option<EffectKind> {
        match self {
            EffectResolution::Standard(effect) => Some(EffectKind::Standard(*effect)),
            EffectResolution::Custom(effect) => Some(EffectKind::Custom(*effect)),
            EffectResolution::Unresolved => None,
        }
    }
}

/// The effects currently granted by a race, with their intensities
///
/// The two catalogs are kept in separate maps; both preserve insertion
/// order so effects are re-applied in the order the level declared them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    standard: IndexMap<StandardEffect, i32>,
    custom: IndexMap<CustomEffect, i32>,
}

impl ActiveEffects {
    /// Create an empty effect set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an effect set from configured `(name, intensity)` entries
    ///
    /// Unresolvable names are logged and skipped.
    pub fn resolve<'a>(entries: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let mut effects = Self::new();
        for (name, intensity) in entries {
            match EffectResolution::resolve(name).kind() {
                Some(kind) => effects.insert(kind, intensity),
                None => tracing::warn!(effect = %name, "Effect could not be found"),
            }
        }
        effects
    }

    /// Insert an effect, replacing any previous intensity
    pub fn insert(&mut self, kind: EffectKind, intensity: i32) {
        match kind {
            EffectKind::Standard(effect) => {
                self.standard.insert(effect, intensity);
            }
            EffectKind::Custom(effect) => {
                self.custom.insert(effect, intensity);
            }
        }
    }

    /// Get the intensity of an effect
    pub fn get(&self, kind: EffectKind) -> Option<i32> {
        match kind {
            EffectKind::Standard(effect) => self.standard.get(&effect).copied(),
            EffectKind::Custom(effect) => self.custom.get(&effect).copied(),
        }
    }

    /// Check whether an effect is active
    pub fn contains(&self, kind: EffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Remove every effect
    pub fn clear(&mut self) {
        self.standard.clear();
        self.custom.clear();
    }

    /// Active standard effects
    pub fn standard(&self) -> &IndexMap<StandardEffect, i32> {
        &self.standard
    }

    /// Active custom effects
    pub fn custom(&self) -> &IndexMap<CustomEffect, i32> {
        &self.custom
    }

    /// Iterate all effects, custom first, then standard
    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, i32)> + '_ {
        let custom = self
            .custom
            .iter()
            .map(|(effect, intensity)| (EffectKind::Custom(*effect), *intensity));
        let standard = self
            .standard
            .iter()
            .map(|(effect, intensity)| (EffectKind::Standard(*effect), *intensity));
        custom.chain(standard)
    }

    /// Total number of active effects
    pub fn len(&self) -> usize {
        self.standard.len() + self.custom.len()
    }

    /// Check if no effect is active
    pub fn is_empty(&self) -> bool {
        self.standard.is_empty() && self.custom.is_empty()
    }
}

impl fmt::Display for ActiveEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (kind, intensity)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", kind, intensity)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_standard_first() {
        assert_eq!(
            EffectResolution::resolve("SPEED"),
            EffectResolution::Standard(StandardEffect::Speed)
        );
        // The host catalog is case-insensitive
        assert_eq!(
            EffectResolution::resolve("night_vision"),
            EffectResolution::Standard(StandardEffect::NightVision)
        );
    }

    #[test]
    fn test_resolve_custom() {
        assert_eq!(
            EffectResolution::resolve("SUN_SENSITIVITY"),
            EffectResolution::Custom(CustomEffect::SunSensitivity)
        );
        // Custom names must match exactly
        assert_eq!(
            EffectResolution::resolve("sun_sensitivity"),
            EffectResolution::Unresolved
        );
    }

    #[test]
    fn test_resolve_unknown() {
        let resolution = EffectResolution::resolve("TELEPORTITIS");
        assert_eq!(resolution, EffectResolution::Unresolved);
        assert_eq!(resolution.kind(), None);
    }

    #[test]
    fn test_active_effects_resolve_skips_unknown() {
        let effects = ActiveEffects::resolve([
            ("SPEED", 2),
            ("TELEPORTITIS", 9),
            ("FIRE_WALKER", 1),
        ]);

        assert_eq!(effects.len(), 2);
        assert_eq!(effects.get(StandardEffect::Speed.into()), Some(2));
        assert_eq!(effects.get(CustomEffect::FireWalker.into()), Some(1));
        assert_eq!(effects.standard().len(), 1);
        assert_eq!(effects.custom().len(), 1);
    }

    #[test]
    fn test_active_effects_iter_order() {
        let mut effects = ActiveEffects::new();
        effects.insert(StandardEffect::Jump.into(), 1);
        effects.insert(CustomEffect::Forager.into(), 3);
        effects.insert(StandardEffect::Speed.into(), 2);

        let order: Vec<_> = effects.iter().map(|(kind, _)| kind.name()).collect();
        assert_eq!(order, vec!["FORAGER", "JUMP", "SPEED"]);
        assert_eq!(effects.to_string(), "{FORAGER: 3, JUMP: 1, SPEED: 2}");
    }

    #[test]
    fn test_active_effects_clear() {
        let mut effects = ActiveEffects::resolve([("SPEED", 2), ("FORAGER", 1)]);
        assert!(!effects.is_empty());
        effects.clear();
        assert!(effects.is_empty());
        assert_eq!(effects.len(), 0);
    }
}
