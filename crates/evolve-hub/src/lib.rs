//! Evolve Hub - session registry for races
//!
//! This crate ties race templates to the subjects of a running session and
//! drives the periodic effect refresh.
//!
//! ## Architecture
//!
//! ```text
//! Hub
//!  │
//!  ├── templates: RaceId -> RaceTemplate
//!  ├── races:     SubjectId -> RaceInstance<S>
//!  └── EffectScheduler ── every effect_interval ticks ──► apply_effects
//! ```
//!
//! ## Key Components
//!
//! - [`Hub`]: Owns templates and bound races, advanced once per host tick
//! - [`HubConfig`]: Effect refresh interval and default starting level (RON)
//! - [`EffectScheduler`]: Fixed-cadence refresh clock
//!
//! The hub is driven through `&mut self`; hosts sharing it across threads wrap
//! it in a `Mutex`.

mod config;
mod error;
mod hub;
mod scheduler;

pub use config::{HubConfig, DEFAULT_EFFECT_INTERVAL};
pub use error::{AssignError, Error, Result};
pub use hub::{Hub, TickReport};
pub use scheduler::EffectScheduler;
