//! Race templates and the race instances bound to subjects
//!
//! A [`RaceTemplate`] is the immutable archetype built from configuration. It
//! is never mutated and shares its [`LevelTable`] with every instance cloned
//! from it. A [`RaceInstance`] is the template bound to one subject: it owns
//! the current level, the accumulated base stats and the active effect set.
//!
//! ## Level-up
//!
//! Leveling from `L` to `L + n` applies the buffs of every level in
//! `L+1 ..= L+n` in order, then replaces the active effects with the effects
//! of level `L + n`. Jumping several levels at once is therefore identical to
//! leveling one at a time.
//!
//! Level-ups are transactional: the new state is computed first and only
//! committed once every buff has been recognized. A failing level-up leaves
//! the instance and its subject untouched.

use crate::buff::BaseStats;
use crate::effect::ActiveEffects;
use crate::error::{Error, Result};
use crate::identity::RaceId;
use crate::level::LevelTable;
use crate::subject::Subject;
use crate::time::{effect_duration, Tick};
use std::fmt;
use std::sync::Arc;

/// Level a freshly cloned race starts at unless told otherwise
pub const DEFAULT_STARTING_LEVEL: u32 = 1;

/// An unbound race archetype
#[derive(Debug, Clone, PartialEq)]
pub struct RaceTemplate {
    id: RaceId,
    display_name: String,
    stats: BaseStats,
    levels: Arc<LevelTable>,
}

impl RaceTemplate {
    /// Create a template
    pub fn new(name: impl Into<String>, stats: BaseStats, levels: LevelTable) -> Self {
        let display_name = name.into();
        Self {
            id: RaceId::new(&display_name),
            display_name,
            stats,
            levels: Arc::new(levels),
        }
    }

    /// Normalized (lower-case) identifier
    pub fn id(&self) -> &RaceId {
        &self.id
    }

    /// Race name, lower-cased
    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    /// Race name as written in the configuration
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Base stats before any level buff
    pub fn base_stats(&self) -> BaseStats {
        self.stats
    }

    /// The shared level table
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// Highest configured level
    pub fn max_level(&self) -> u32 {
        self.levels.max_level()
    }

    /// Bind this race to a subject at level 0, without applying any level
    pub fn bind<S: Subject>(&self, subject: S) -> RaceInstance<S> {
        RaceInstance {
            template: self.clone(),
            subject,
            level: 0,
            stats: self.stats,
            effects: ActiveEffects::new(),
            active: false,
        }
    }

    /// Create an instance bound to `subject` and level it up to `level`
    ///
    /// The instance is not active until [`RaceInstance::init`] is called.
    pub fn clone_to_subject<S: Subject>(&self, subject: S, level: u32) -> Result<RaceInstance<S>> {
        let mut instance = self.bind(subject);
        instance.level_up(level)?;
        Ok(instance)
    }

    /// Create an instance at [`DEFAULT_STARTING_LEVEL`]
    pub fn clone_to_subject_default<S: Subject>(&self, subject: S) -> Result<RaceInstance<S>> {
        self.clone_to_subject(subject, DEFAULT_STARTING_LEVEL)
    }
}

impl fmt::Display for RaceTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let baseline = self.levels.baseline();
        writeln!(f, "\t{}", self.display_name)?;
        writeln!(f, "Health: {}", self.stats.health)?;
        writeln!(f, "Speed:  {}", self.stats.movement_speed)?;
        writeln!(f, "First Level Effects")?;
        write!(f, "{:?}", baseline.effects)
    }
}

/// A race bound to a subject
#[derive(Debug, Clone)]
pub struct RaceInstance<S> {
    template: RaceTemplate,
    subject: S,
    level: u32,
    stats: BaseStats,
    effects: ActiveEffects,
    active: bool,
}

impl<S: Subject> RaceInstance<S> {
    /// Activate the race and push its stats to the subject
    pub fn init(&mut self) {
        self.active = true;
        self.apply_stats();
    }

    /// Deactivate the race; level, stats and effects are kept
    pub fn disable(&mut self) {
        self.active = false;
    }

    /// Advance one level
    pub fn level_up_once(&mut self) -> Result<()> {
        self.level_up(1)
    }

    /// Advance `levels` levels and recompute buffs and effects
    pub fn level_up(&mut self, levels: u32) -> Result<()> {
        let table = self.template.levels();
        let target = self
            .level
            .checked_add(levels)
            .ok_or(Error::LevelOutOfRange {
                requested: u32::MAX,
                max: table.max_level(),
            })?;

        let mut stats = self.stats;
        for upgrade in table.range(self.level.saturating_add(1)..=target)? {
            upgrade.apply_buffs(&mut stats)?;
        }

        let upgrade = table.level(target)?;
        tracing::debug!(
            race = %self.template.id(),
            from = self.level,
            to = target,
            buffs = ?upgrade.buffs,
            "Race leveled up"
        );
        let effects = ActiveEffects::resolve(
            upgrade
                .effects
                .iter()
                .map(|(name, intensity)| (name.as_str(), *intensity)),
        );

        self.level = target;
        self.stats = stats;
        self.effects = effects;

        if self.active {
            self.apply_stats();
        }
        Ok(())
    }

    /// Push base health and movement speed to the subject
    pub fn apply_stats(&mut self) {
        self.subject.set_health_scale(self.stats.health);
        self.subject.set_walk_speed(self.stats.movement_speed);
    }

    /// Refresh every active effect on the subject
    ///
    /// Meant to be called every `interval` ticks; each effect lasts a little
    /// longer than the interval. A disabled race applies nothing. Returns the
    /// number of effects applied.
    pub fn apply_effects(&mut self, interval: Tick) -> usize {
        if !self.active {
            return 0;
        }
        let duration = effect_duration(interval);
        for (effect, intensity) in self.effects.iter() {
            self.subject.apply_effect(effect, duration, intensity);
        }
        self.effects.len()
    }
}

impl<S> RaceInstance<S> {
    /// The template this instance was cloned from
    pub fn template(&self) -> &RaceTemplate {
        &self.template
    }

    /// Race name, lower-cased
    pub fn name(&self) -> &str {
        self.template.name()
    }

    /// Current level
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Highest level this race can reach
    pub fn max_level(&self) -> u32 {
        self.template.max_level()
    }

    /// Accumulated base stats
    pub fn stats(&self) -> BaseStats {
        self.stats
    }

    /// Accumulated base health
    pub fn base_health(&self) -> f64 {
        self.stats.health
    }

    /// Accumulated base movement speed
    pub fn base_movement_speed(&self) -> f64 {
        self.stats.movement_speed
    }

    /// Effects granted by the current level
    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    /// Whether effects and stats are currently pushed to the subject
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The bound subject
    pub fn subject(&self) -> &S {
        &self.subject
    }

    /// The bound subject, mutably
    pub fn subject_mut(&mut self) -> &mut S {
        &mut self.subject
    }

    /// Discard the race and hand the subject back
    pub fn into_subject(self) -> S {
        self.subject
    }
}

impl<S> fmt::Display for RaceInstance<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\t{} (level {})", self.template.display_name(), self.level)?;
        writeln!(f, "Health: {}", self.stats.health)?;
        writeln!(f, "Speed:  {}", self.stats.movement_speed)?;
        write!(f, "Effects: {}", self.effects)
    }
}
