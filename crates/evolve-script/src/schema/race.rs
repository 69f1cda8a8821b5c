//! Race definition schema
//!
//! Field names follow the race file format (`BaseHealth`, `Levels`, `Buffs`,
//! ...). Definitions are converted to core types with [`RaceDef::into_template`],
//! which is where every check happens.

use crate::error::{Error, Result};
use evolve_core::{BaseStats, Buff, LevelTable, LevelUpgrade, RaceTemplate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A base stat as written in the file
///
/// Integers, floats and numeric strings are all accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    /// Numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Int(i) => Some(*i as f64),
            StatValue::Float(f) => Some(*f),
            StatValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for StatValue {
    fn from(f: f64) -> Self {
        StatValue::Float(f)
    }
}

/// Definition of a race archetype
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RaceDef {
    /// Health before any level buff
    #[serde(default)]
    pub base_health: Option<StatValue>,
    /// Movement speed before any level buff
    #[serde(default)]
    pub base_movement_speed: Option<StatValue>,
    /// Single-key entries `{ level: (...) }`, in level order
    #[serde(default)]
    pub levels: Vec<IndexMap<u32, LevelDef>>,
}

/// Upgrades declared for one level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LevelDef {
    #[serde(default)]
    pub buffs: Vec<BuffDef>,
    /// Single-key entries `{ "EFFECT": intensity }`
    #[serde(default)]
    pub effects: Vec<IndexMap<String, i32>>,
}

/// A buff entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffDef {
    pub buff: String,
    pub amount: i32,
}

impl RaceDef {
    /// Create a definition with base stats and no levels
    pub fn new(base_health: f64, base_movement_speed: f64) -> Self {
        Self {
            base_health: Some(base_health.into()),
            base_movement_speed: Some(base_movement_speed.into()),
            levels: Vec::new(),
        }
    }

    /// Append the next level
    pub fn with_level(mut self, level: LevelDef) -> Self {
        let index = self.levels.len() as u32;
        let mut entry = IndexMap::new();
        entry.insert(index, level);
        self.levels.push(entry);
        self
    }

    /// Validate and convert into a race template
    ///
    /// Level entries are taken in file order; a declared level number that
    /// does not match the entry's position is only warned about.
    pub fn into_template(self, name: &str) -> Result<RaceTemplate> {
        let health = stat(name, "BaseHealth", self.base_health)?;
        let speed = stat(name, "BaseMovementSpeed", self.base_movement_speed)?;

        let mut levels = Vec::with_capacity(self.levels.len());
        for (position, entry) in self.levels.into_iter().enumerate() {
            let count = entry.len();
            let mut entries = entry.into_iter();
            let (declared, level) = match (entries.next(), entries.next()) {
                (Some(pair), None) => pair,
                _ => {
                    return Err(Error::InvalidLevel(format!(
                        "race {} entry {} declares {} levels, expected exactly one",
                        name, position, count
                    )))
                }
            };
            if declared as usize != position {
                tracing::warn!(
                    race = %name,
                    declared,
                    position,
                    "Level entry is out of order, using its position"
                );
            }
            levels.push(level.into_upgrade(name, position)?);
        }

        let table = LevelTable::new(name, levels)?;
        table.validate()?;
        Ok(RaceTemplate::new(
            name,
            BaseStats::new(health, speed),
            table,
        ))
    }
}

impl LevelDef {
    /// Create an empty level
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a buff
    pub fn with_buff(mut self, buff: impl Into<String>, amount: i32) -> Self {
        self.buffs.push(BuffDef {
            buff: buff.into(),
            amount,
        });
        self
    }

    /// Add an effect
    pub fn with_effect(mut self, effect: impl Into<String>, intensity: i32) -> Self {
        let mut entry = IndexMap::new();
        entry.insert(effect.into(), intensity);
        self.effects.push(entry);
        self
    }

    /// Convert into a core level upgrade
    ///
    /// Every effect entry must name exactly one effect.
    pub fn into_upgrade(self, race: &str, level: usize) -> Result<LevelUpgrade> {
        let mut upgrade = LevelUpgrade::new();
        for buff in self.buffs {
            upgrade = upgrade.with_buff(Buff::new(buff.buff, buff.amount));
        }
        for (index, entry) in self.effects.into_iter().enumerate() {
            if entry.len() != 1 {
                return Err(Error::InvalidLevel(format!(
                    "race {} level {} effect entry {} declares {} effects, expected exactly one",
                    race,
                    level,
                    index,
                    entry.len()
                )));
            }
            for (effect, intensity) in entry {
                upgrade = upgrade.with_effect(effect, intensity);
            }
        }
        Ok(upgrade)
    }
}

fn stat(race: &str, field: &'static str, value: Option<StatValue>) -> Result<f64> {
    let value = value.ok_or_else(|| Error::MissingField(format!("{}.{}", race, field)))?;
    value.as_f64().ok_or_else(|| Error::InvalidStat {
        race: race.to_string(),
        field,
        value: match value {
            StatValue::Text(s) => s,
            other => format!("{:?}", other),
        },
    })
}
