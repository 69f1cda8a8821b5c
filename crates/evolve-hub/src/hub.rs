//! Hub - registry of race templates and of the races bound to subjects
//!
//! The hub owns every `RaceInstance` of a session, keyed by `SubjectId`, and
//! drives the effect refresh from the host's tick loop.
//!
//! ```text
//! register_template ──► templates
//! assign_race ─────────► races[subject] ── init()
//! tick() ──(every effect_interval)──► apply_effects(effect_interval) on all races
//! ```

use crate::config::HubConfig;
use crate::error::{AssignError, Error, Result};
use crate::scheduler::EffectScheduler;
use evolve_core::{RaceId, RaceInstance, RaceTemplate, Subject, SubjectId, Tick};
use indexmap::IndexMap;

/// Result of a hub tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// The tick that was executed
    pub tick: Tick,
    /// Whether effects were refreshed on this tick
    pub refreshed: bool,
    /// Number of races visited by the refresh
    pub instances: usize,
    /// Number of effects pushed to subjects
    pub effects: usize,
}

/// Registry of race templates and bound races
///
/// ```
/// use evolve_core::{BaseStats, LevelTable, LevelUpgrade, RaceTemplate, RecordingSubject, SubjectId};
/// use evolve_hub::{Hub, HubConfig};
///
/// let table = LevelTable::new(
///     "Elf",
///     vec![LevelUpgrade::new(), LevelUpgrade::new().with_effect("SPEED", 1)],
/// )
/// .unwrap();
///
/// let mut hub = Hub::new(HubConfig::with_effect_interval(2));
/// hub.register_template(RaceTemplate::new("Elf", BaseStats::new(20.0, 0.2), table))
///     .unwrap();
///
/// let player = SubjectId::new(1);
/// hub.assign_race(player, RecordingSubject::new(), "elf", None).unwrap();
///
/// assert!(!hub.tick().refreshed);
/// assert_eq!(hub.tick().effects, 1);
/// ```
pub struct Hub<S> {
    /// Runtime configuration
    config: HubConfig,
    /// Registered templates by race name
    templates: IndexMap<RaceId, RaceTemplate>,
    /// Bound races by subject, in assignment order
    races: IndexMap<SubjectId, RaceInstance<S>>,
    /// Effect refresh clock
    scheduler: EffectScheduler,
}

impl<S: Subject> Hub<S> {
    /// Create an empty hub
    pub fn new(config: HubConfig) -> Self {
        let scheduler = EffectScheduler::new(config.effect_interval());
        Self {
            config,
            templates: IndexMap::new(),
            races: IndexMap::new(),
            scheduler,
        }
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Register a race template
    pub fn register_template(&mut self, template: RaceTemplate) -> Result<()> {
        let id = template.id().clone();
        if self.templates.contains_key(&id) {
            return Err(Error::DuplicateRace(id));
        }
        tracing::debug!(race = %id, max_level = template.max_level(), "Registered race");
        self.templates.insert(id, template);
        Ok(())
    }

    /// Register several templates, stopping at the first duplicate
    pub fn register_templates(
        &mut self,
        templates: impl IntoIterator<Item = RaceTemplate>,
    ) -> Result<()> {
        for template in templates {
            self.register_template(template)?;
        }
        Ok(())
    }

    /// Get a registered template
    pub fn template(&self, race: impl Into<RaceId>) -> Option<&RaceTemplate> {
        self.templates.get(&race.into())
    }

    /// Registered templates, in registration order
    pub fn templates(&self) -> impl Iterator<Item = &RaceTemplate> {
        self.templates.values()
    }

    fn template_for(&self, race: RaceId, level: u32) -> Result<RaceTemplate> {
        let template = self
            .templates
            .get(&race)
            .ok_or(Error::RaceNotFound(race))?;

        // Once these hold, cloning the template to a subject cannot fail.
        template.levels().range(1..=level)?;
        template.levels().validate()?;
        Ok(template.clone())
    }

    // ========================================================================
    // Subjects
    // ========================================================================

    /// Bind `race` to a subject and activate it
    ///
    /// The race starts at `level`, or at the configured default level. If the
    /// subject already had a race, the old one is disabled and returned. On
    /// error the subject handle comes back inside [`AssignError`].
    pub fn assign_race(
        &mut self,
        subject_id: SubjectId,
        subject: S,
        race: impl Into<RaceId>,
        level: Option<u32>,
    ) -> std::result::Result<Option<RaceInstance<S>>, AssignError<S>> {
        let level = level.unwrap_or(self.config.default_level());
        let template = match self.template_for(race.into(), level) {
            Ok(template) => template,
            Err(error) => return Err(AssignError { error, subject }),
        };

        let mut instance = template.bind(subject);
        if let Err(error) = instance.level_up(level) {
            return Err(AssignError {
                error: error.into(),
                subject: instance.into_subject(),
            });
        }
        instance.init();
        tracing::info!(subject = %subject_id, race = %template.id(), level, "Race assigned");

        let previous = self.races.insert(subject_id, instance);
        Ok(previous.map(|mut old| {
            old.disable();
            old
        }))
    }

    /// Move a subject to another race at the default level
    ///
    /// The current race is disabled and its subject handle rebound. On error
    /// the subject keeps its current race.
    pub fn switch_race(&mut self, subject_id: SubjectId, race: impl Into<RaceId>) -> Result<()> {
        let level = self.config.default_level();
        let template = self.template_for(race.into(), level)?;

        let mut old = self
            .races
            .shift_remove(&subject_id)
            .ok_or(Error::SubjectNotFound(subject_id))?;
        old.disable();
        let from = old.template().id().clone();

        let mut instance = template.clone_to_subject(old.into_subject(), level)?;
        instance.init();
        tracing::info!(subject = %subject_id, from = %from, to = %template.id(), "Race switched");

        self.races.insert(subject_id, instance);
        Ok(())
    }

    /// Advance a subject's race by `levels` levels
    pub fn level_up(&mut self, subject_id: SubjectId, levels: u32) -> Result<u32> {
        let instance = self.instance_mut(subject_id)?;
        instance.level_up(levels)?;
        Ok(instance.level())
    }

    /// Stop applying a subject's race; level and effects are kept
    pub fn disable(&mut self, subject_id: SubjectId) -> Result<()> {
        self.instance_mut(subject_id)?.disable();
        Ok(())
    }

    /// Re-activate a subject's race and push its stats again
    pub fn enable(&mut self, subject_id: SubjectId) -> Result<()> {
        self.instance_mut(subject_id)?.init();
        Ok(())
    }

    /// Remove a subject and hand back its disabled race
    pub fn disconnect(&mut self, subject_id: SubjectId) -> Option<RaceInstance<S>> {
        let mut instance = self.races.shift_remove(&subject_id)?;
        instance.disable();
        tracing::info!(subject = %subject_id, race = %instance.template().id(), "Subject disconnected");
        Some(instance)
    }

    /// Name of a subject's race
    pub fn race_of(&self, subject_id: SubjectId) -> Option<&RaceId> {
        self.races
            .get(&subject_id)
            .map(|instance| instance.template().id())
    }

    /// Get a subject's race
    pub fn instance(&self, subject_id: SubjectId) -> Option<&RaceInstance<S>> {
        self.races.get(&subject_id)
    }

    /// Get a subject's race mutably
    pub fn instance_mut(&mut self, subject_id: SubjectId) -> Result<&mut RaceInstance<S>> {
        self.races
            .get_mut(&subject_id)
            .ok_or(Error::SubjectNotFound(subject_id))
    }

    /// Iterate bound races in assignment order
    pub fn instances(&self) -> impl Iterator<Item = (SubjectId, &RaceInstance<S>)> {
        self.races.iter().map(|(id, instance)| (*id, instance))
    }

    /// Number of subjects with a race
    pub fn len(&self) -> usize {
        self.races.len()
    }

    /// Check if no subject has a race
    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance the hub by one tick
    ///
    /// Every `effect_interval` ticks, effects of all races are refreshed.
    pub fn tick(&mut self) -> TickReport {
        let refreshed = self.scheduler.advance();
        let tick = self.scheduler.tick();
        if !refreshed {
            return TickReport {
                tick,
                refreshed,
                instances: 0,
                effects: 0,
            };
        }

        let interval = self.scheduler.interval();
        let effects = self
            .races
            .values_mut()
            .map(|instance| instance.apply_effects(interval))
            .sum();
        tracing::trace!(tick, instances = self.races.len(), effects, "Effects refreshed");

        TickReport {
            tick,
            refreshed,
            instances: self.races.len(),
            effects,
        }
    }

    /// Tick until the next effect refresh has run
    pub fn tick_until_refresh(&mut self) -> TickReport {
        loop {
            let report = self.tick();
            if report.refreshed {
                return report;
            }
        }
    }

    /// Current tick
    pub fn current_tick(&self) -> Tick {
        self.scheduler.tick()
    }

    /// Get the hub configuration
    pub fn config(&self) -> &HubConfig {
        &self.config
    }
}

impl<S> std::fmt::Debug for Hub<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("config", &self.config)
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field("races", &self.races.len())
            .field("tick", &self.scheduler.tick())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolve_core::{
        BaseStats, Buff, CustomEffect, EffectKind, LevelTable, LevelUpgrade, RecordingSubject,
        StandardEffect, SubjectCall,
    };

    fn elf() -> RaceTemplate {
        let table = LevelTable::new(
            "Elf",
            vec![
                LevelUpgrade::new(),
                LevelUpgrade::new()
                    .with_buff(Buff::new("HEALTH_UP", 5))
                    .with_effect("SPEED", 2),
                LevelUpgrade::new()
                    .with_buff(Buff::new("MOVEMENT_SPEED_UP", 1))
                    .with_effect("SPEED", 3)
                    .with_effect("NIGHT_STRENGTH", 1),
            ],
        )
        .unwrap();
        RaceTemplate::new("Elf", BaseStats::new(20.0, 0.2), table)
    }

    fn dwarf() -> RaceTemplate {
        let table = LevelTable::new(
            "Dwarf",
            vec![
                LevelUpgrade::new(),
                LevelUpgrade::new()
                    .with_buff(Buff::new("HEALTH_UP", 4))
                    .with_effect("FAST_DIGGING", 1),
            ],
        )
        .unwrap();
        RaceTemplate::new("Dwarf", BaseStats::new(24.0, 0.15), table)
    }

    fn hub(interval: Tick) -> Hub<RecordingSubject> {
        let mut hub = Hub::new(HubConfig::with_effect_interval(interval));
        hub.register_templates([elf(), dwarf()]).unwrap();
        hub
    }

    const PLAYER: SubjectId = SubjectId(7);

    #[test]
    fn test_hub_register() {
        let mut hub = hub(20);
        assert_eq!(
            hub.templates().map(|t| t.name()).collect::<Vec<_>>(),
            vec!["elf", "dwarf"]
        );
        assert!(hub.template("ELF").is_some());

        let err = hub.register_template(elf()).unwrap_err();
        assert!(matches!(err, Error::DuplicateRace(ref id) if id.as_str() == "elf"));
    }

    #[test]
    fn test_hub_assign_race() {
        let mut hub = hub(20);
        let previous = hub
            .assign_race(PLAYER, RecordingSubject::new(), "Elf", None)
            .unwrap();
        assert!(previous.is_none());

        let instance = hub.instance(PLAYER).unwrap();
        assert!(instance.is_active());
        assert_eq!(instance.level(), 1);
        assert_eq!(instance.base_health(), 25.0);
        assert_eq!(instance.subject().health_scale, Some(25.0));
        assert_eq!(instance.subject().walk_speed, Some(0.2));
        assert_eq!(hub.race_of(PLAYER).map(|r| r.as_str()), Some("elf"));
    }

    #[test]
    fn test_hub_assign_at_level() {
        let mut hub = hub(20);
        hub.assign_race(PLAYER, RecordingSubject::new(), "elf", Some(0))
            .unwrap();
        assert_eq!(hub.instance(PLAYER).unwrap().level(), 0);
        assert!(hub.instance(PLAYER).unwrap().effects().is_empty());

        let err = hub
            .assign_race(SubjectId(8), RecordingSubject::new(), "elf", Some(9))
            .unwrap_err();
        assert!(matches!(
            err.error,
            Error::Core(evolve_core::Error::LevelOutOfRange { requested: 9, max: 2 })
        ));
        assert!(err.subject.calls.is_empty());
        assert!(hub.instance(SubjectId(8)).is_none());
    }

    #[test]
    fn test_hub_reassign_returns_previous() {
        let mut hub = hub(20);
        hub.assign_race(PLAYER, RecordingSubject::new(), "elf", None)
            .unwrap();
        let previous = hub
            .assign_race(PLAYER, RecordingSubject::new(), "dwarf", None)
            .unwrap()
            .unwrap();

        assert_eq!(previous.name(), "elf");
        assert!(!previous.is_active());
        assert_eq!(hub.race_of(PLAYER).map(|r| r.as_str()), Some("dwarf"));
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn test_hub_unknown_race() {
        let mut hub = hub(20);
        let mut subject = RecordingSubject::new();
        subject.set_walk_speed(0.5);

        let err = hub.assign_race(PLAYER, subject, "orc", None).unwrap_err();
        assert!(matches!(err.error, Error::RaceNotFound(ref id) if id.as_str() == "orc"));
        assert!(hub.is_empty());

        // The handle comes back as it was passed in
        let subject = err.subject;
        assert_eq!(subject.walk_speed, Some(0.5));
        assert_eq!(subject.calls, vec![SubjectCall::WalkSpeed(0.5)]);

        let err: Error = hub
            .assign_race(PLAYER, subject, "orc", None)
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::RaceNotFound(_)));
    }

    #[test]
    fn test_hub_switch_race() {
        let mut hub = hub(20);
        hub.assign_race(PLAYER, RecordingSubject::new(), "elf", Some(2))
            .unwrap();
        hub.switch_race(PLAYER, "dwarf").unwrap();

        let instance = hub.instance(PLAYER).unwrap();
        assert_eq!(instance.name(), "dwarf");
        assert_eq!(instance.level(), 1);
        assert!(instance.is_active());
        // Same handle, so the elf calls are still recorded before the dwarf ones.
        assert_eq!(instance.subject().health_scale, Some(28.0));
        assert_eq!(instance.subject().walk_speed, Some(0.15));
        assert!(instance
            .subject()
            .calls
            .contains(&SubjectCall::HealthScale(25.0)));
    }

    #[test]
    fn test_hub_switch_race_failure_keeps_race() {
        let mut hub = hub(20);
        hub.assign_race(PLAYER, RecordingSubject::new(), "elf", None)
            .unwrap();

        assert!(matches!(
            hub.switch_race(PLAYER, "orc"),
            Err(Error::RaceNotFound(_))
        ));
        assert_eq!(hub.race_of(PLAYER).map(|r| r.as_str()), Some("elf"));
        assert!(hub.instance(PLAYER).unwrap().is_active());

        assert!(matches!(
            hub.switch_race(SubjectId(99), "dwarf"),
            Err(Error::SubjectNotFound(SubjectId(99)))
        ));
    }

    #[test]
    fn test_hub_level_up() {
        let mut hub = hub(20);
        hub.assign_race(PLAYER, RecordingSubject::new(), "elf", None)
            .unwrap();
        assert_eq!(hub.level_up(PLAYER, 1).unwrap(), 2);

        let instance = hub.instance(PLAYER).unwrap();
        assert_eq!(instance.base_movement_speed(), 1.2);
        assert_eq!(
            instance.effects().get(StandardEffect::Speed.into()),
            Some(3)
        );

        let err = hub.level_up(PLAYER, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(evolve_core::Error::LevelOutOfRange { requested: 3, max: 2 })
        ));
        assert_eq!(hub.instance(PLAYER).unwrap().level(), 2);

        assert!(matches!(
            hub.level_up(SubjectId(1), 1),
            Err(Error::SubjectNotFound(_))
        ));
    }

    #[test]
    fn test_hub_tick_refresh() {
        let mut hub = hub(3);
        hub.assign_race(PLAYER, RecordingSubject::new(), "elf", Some(2))
            .unwrap();
        hub.assign_race(SubjectId(8), RecordingSubject::new(), "dwarf", None)
            .unwrap();

        let reports: Vec<_> = (0..3).map(|_| hub.tick()).collect();
        assert!(!reports[0].refreshed);
        assert!(!reports[1].refreshed);
        assert_eq!(
            reports[2],
            TickReport {
                tick: 3,
                refreshed: true,
                instances: 2,
                effects: 3,
            }
        );

        let effects: Vec<_> = hub.instance(PLAYER).unwrap().subject().effects().collect();
        assert_eq!(
            effects,
            vec![
                (EffectKind::from(CustomEffect::NightStrength), 8, 1),
                (EffectKind::from(StandardEffect::Speed), 8, 3),
            ]
        );
        assert_eq!(hub.current_tick(), 3);

        hub.tick();
        let report = hub.tick_until_refresh();
        assert_eq!(report.tick, 6);
        assert_eq!(report.instances, 2);
    }

    #[test]
    fn test_hub_disable_enable() {
        let mut hub = hub(1);
        hub.assign_race(PLAYER, RecordingSubject::new(), "elf", None)
            .unwrap();
        hub.disable(PLAYER).unwrap();

        let report = hub.tick();
        assert!(report.refreshed);
        assert_eq!(report.effects, 0);
        assert_eq!(hub.instance(PLAYER).unwrap().subject().effects().count(), 0);

        hub.instance_mut(PLAYER).unwrap().subject_mut().clear_calls();
        hub.enable(PLAYER).unwrap();
        assert_eq!(
            hub.instance(PLAYER).unwrap().subject().calls,
            vec![SubjectCall::HealthScale(25.0), SubjectCall::WalkSpeed(0.2)]
        );
        assert_eq!(hub.tick().effects, 1);
    }

    #[test]
    fn test_hub_disconnect() {
        let mut hub = hub(1);
        hub.assign_race(PLAYER, RecordingSubject::new(), "elf", None)
            .unwrap();

        let instance = hub.disconnect(PLAYER).unwrap();
        assert!(!instance.is_active());
        assert_eq!(instance.level(), 1);
        assert!(hub.is_empty());
        assert!(hub.disconnect(PLAYER).is_none());
        assert_eq!(hub.tick().instances, 0);

        let subject = instance.into_subject();
        assert_eq!(subject.health_scale, Some(25.0));
    }

    #[test]
    fn test_hub_borrowed_subjects() {
        let mut alice = RecordingSubject::new();
        {
            let mut hub: Hub<&mut RecordingSubject> = Hub::new(HubConfig::with_effect_interval(1));
            hub.register_template(elf()).unwrap();
            hub.assign_race(PLAYER, &mut alice, "elf", None).unwrap();
            hub.tick();
        }
        assert_eq!(alice.health_scale, Some(25.0));
        assert_eq!(alice.effects().count(), 1);
    }
}
