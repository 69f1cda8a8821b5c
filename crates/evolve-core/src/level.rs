//! Per-level upgrade table

use crate::buff::{BaseStats, Buff};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Upgrades granted at a single level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpgrade {
    /// Permanent stat buffs, applied once when the level is reached
    #[serde(default)]
    pub buffs: Vec<Buff>,
    /// Effects active while at this level, by configured name
    #[serde(default)]
    pub effects: IndexMap<String, i32>,
}

impl LevelUpgrade {
    /// Create an upgrade with no buffs and no effects
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a buff
    pub fn with_buff(mut self, buff: Buff) -> Self {
        self.buffs.push(buff);
        self
    }

    /// Add an effect
    pub fn with_effect(mut self, name: impl Into<String>, intensity: i32) -> Self {
        self.effects.insert(name.into(), intensity);
        self
    }

    /// Apply every buff of this level to `stats`, in order
    pub fn apply_buffs(&self, stats: &mut BaseStats) -> Result<()> {
        for buff in &self.buffs {
            buff.apply(stats)?;
        }
        Ok(())
    }

    /// Check that every buff action is in the catalog
    pub fn validate(&self) -> Result<()> {
        for buff in &self.buffs {
            buff.kind()?;
        }
        Ok(())
    }
}

/// Ordered sequence of level upgrades; index `n` holds level `n`
///
/// Level 0 is the baseline and is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelTable {
    levels: Vec<LevelUpgrade>,
}

impl LevelTable {
    /// Build a table from upgrades in level order
    ///
    /// `race` is only used for the error message.
    pub fn new(race: &str, levels: Vec<LevelUpgrade>) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::EmptyLevelTable(race.to_string()));
        }
        Ok(Self { levels })
    }

    /// Upgrade for a level
    pub fn get(&self, level: u32) -> Option<&LevelUpgrade> {
        self.levels.get(level as usize)
    }

    /// Upgrade for a level, or an out-of-range error
    pub fn level(&self, level: u32) -> Result<&LevelUpgrade> {
        self.get(level).ok_or(Error::LevelOutOfRange {
            requested: level,
            max: self.max_level(),
        })
    }

    /// The baseline (level 0) upgrade
    pub fn baseline(&self) -> &LevelUpgrade {
        &self.levels[0]
    }

    /// Highest configured level
    pub fn max_level(&self) -> u32 {
        (self.levels.len() - 1) as u32
    }

    /// Number of levels, including level 0
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: a table holds at least level 0
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate upgrades in level order
    pub fn iter(&self) -> impl Iterator<Item = &LevelUpgrade> {
        self.levels.iter()
    }

    /// Upgrades for an inclusive range of levels
    ///
    /// Fails if the range ends past the last level.
    pub fn range(&self, levels: RangeInclusive<u32>) -> Result<&[LevelUpgrade]> {
        let (start, end) = levels.into_inner();
        self.level(end)?;
        if start > end {
            return Ok(&[]);
        }
        Ok(&self.levels[start as usize..=end as usize])
    }

    /// Check every buff action in every level
    pub fn validate(&self) -> Result<()> {
        self.levels.iter().try_for_each(LevelUpgrade::validate)
    }
}
