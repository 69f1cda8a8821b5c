//! Evolve Script - RON loader and schema definitions
//!
//! Loads race archetypes from RON files into validated
//! [`evolve_core::RaceTemplate`]s:
//! - Base health and movement speed
//! - Per-level buffs and effects
//!
//! A file either holds a `races: { "Name": (...) }` map, or a single race
//! named after the file.

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{Loader, RaceDefs, Rejection};
pub use schema::{BuffDef, LevelDef, RaceDef, StatValue};
