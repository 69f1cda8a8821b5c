//! The subject a race is bound to
//!
//! Races never touch the host engine directly. They only call the three
//! primitives of [`Subject`], so any player handle, NPC or test double can
//! carry a race.

use crate::effect::EffectKind;
use crate::time::Tick;
use serde::{Deserialize, Serialize};

/// Mutation primitives a race needs from its subject
pub trait Subject {
    /// Set the subject's health scale
    fn set_health_scale(&mut self, health: f64);

    /// Set the subject's walk speed
    fn set_walk_speed(&mut self, speed: f64);

    /// Apply (or refresh) a timed effect
    fn apply_effect(&mut self, effect: EffectKind, duration: Tick, intensity: i32);
}

impl<S: Subject + ?Sized> Subject for &mut S {
    fn set_health_scale(&mut self, health: f64) {
        (**self).set_health_scale(health);
    }

    fn set_walk_speed(&mut self, speed: f64) {
        (**self).set_walk_speed(speed);
    }

    fn apply_effect(&mut self, effect: EffectKind, duration: Tick, intensity: i32) {
        (**self).apply_effect(effect, duration, intensity);
    }
}

impl<S: Subject + ?Sized> Subject for Box<S> {
    fn set_health_scale(&mut self, health: f64) {
        (**self).set_health_scale(health);
    }

    fn set_walk_speed(&mut self, speed: f64) {
        (**self).set_walk_speed(speed);
    }

    fn apply_effect(&mut self, effect: EffectKind, duration: Tick, intensity: i32) {
        (**self).apply_effect(effect, duration, intensity);
    }
}

/// A single call made on a subject
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SubjectCall {
    HealthScale(f64),
    WalkSpeed(f64),
    Effect {
        effect: EffectKind,
        duration: Tick,
        intensity: i32,
    },
}

/// In-memory subject that keeps its attributes and records every call
///
/// Useful for headless simulations and for tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingSubject {
    /// Last health scale set
    pub health_scale: Option<f64>,
    /// Last walk speed set
    pub walk_speed: Option<f64>,
    /// Every call, oldest first
    pub calls: Vec<SubjectCall>,
}

impl RecordingSubject {
    /// Create a subject with no recorded calls
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects applied so far, oldest first
    pub fn effects(&self) -> impl Iterator<Item = (EffectKind, Tick, i32)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            SubjectCall::Effect {
                effect,
                duration,
                intensity,
            } => Some((*effect, *duration, *intensity)),
            _ => None,
        })
    }

    /// Forget all recorded calls (attributes are kept)
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Subject for RecordingSubject {
    fn set_health_scale(&mut self, health: f64) {
        self.health_scale = Some(health);
        self.calls.push(SubjectCall::HealthScale(health));
    }

    fn set_walk_speed(&mut self, speed: f64) {
        self.walk_speed = Some(speed);
        self.calls.push(SubjectCall::WalkSpeed(speed));
    }

    fn apply_effect(&mut self, effect: EffectKind, duration: Tick, intensity: i32) {
        self.calls.push(SubjectCall::Effect {
            effect,
            duration,
            intensity,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::StandardEffect;

    #[test]
    fn test_recording_subject() {
        let mut subject = RecordingSubject::new();
        subject.set_health_scale(25.0);
        subject.set_walk_speed(0.2);
        subject.apply_effect(StandardEffect::Speed.into(), 25, 2);

        assert_eq!(subject.health_scale, Some(25.0));
        assert_eq!(subject.walk_speed, Some(0.2));
        assert_eq!(subject.calls.len(), 3);
        assert_eq!(
            subject.effects().collect::<Vec<_>>(),
            vec![(StandardEffect::Speed.into(), 25, 2)]
        );

        subject.clear_calls();
        assert!(subject.calls.is_empty());
        assert_eq!(subject.health_scale, Some(25.0));
    }

    #[test]
    fn test_borrowed_subject() {
        fn push_health<S: Subject>(mut subject: S) {
            subject.set_health_scale(10.0);
        }

        let mut subject = RecordingSubject::new();
        push_health(&mut subject);
        assert_eq!(subject.health_scale, Some(10.0));
    }
}
