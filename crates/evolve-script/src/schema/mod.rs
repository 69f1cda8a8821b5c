//! Schema definitions for RON race files

pub mod race;

pub use race::{BuffDef, LevelDef, RaceDef, StatValue};
