//! Evolve Core - level-driven race progression
//!
//! This crate provides the data model and state machine for races:
//! - Level tables of per-level buffs and effects (`LevelTable`, `LevelUpgrade`)
//! - Buff catalog and base stats (`BuffKind`, `Buff`, `BaseStats`)
//! - Standard and custom effect catalogs (`StandardEffect`, `CustomEffect`)
//! - The active effect set of a race (`ActiveEffects`)
//! - Race templates and bound race instances (`RaceTemplate`, `RaceInstance`)
//! - The `Subject` capability a race mutates
//!
//! ## Lifecycle
//!
//! ```text
//! config -> LevelTable -> RaceTemplate --clone_to_subject--> RaceInstance
//!                                                              │ init()
//!                                                              │ level_up(n)*
//!                                                              │ apply_effects(interval) every interval ticks
//!                                                              └ disable()
//! ```
//!
//! Everything here is synchronous and single-threaded. Mutations take
//! `&mut self`, so a level-up can never interleave with an effect refresh on
//! the same instance.

mod buff;
pub mod effect;
mod error;
mod identity;
mod level;
pub mod race;
mod subject;
pub mod time;

pub use buff::{BaseStats, Buff, BuffKind};
pub use effect::{ActiveEffects, CustomEffect, EffectKind, EffectResolution, StandardEffect};
pub use error::{Error, Result};
pub use identity::{RaceId, SubjectId};
pub use level::{LevelTable, LevelUpgrade};
pub use race::{RaceInstance, RaceTemplate, DEFAULT_STARTING_LEVEL};
pub use subject::{RecordingSubject, Subject, SubjectCall};
pub use time::{effect_duration, Tick, EFFECT_REFRESH_BUFFER};
