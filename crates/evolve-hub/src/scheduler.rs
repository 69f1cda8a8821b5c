//! EffectScheduler - fixed-cadence effect refresh
//!
//! The hub advances the scheduler once per host tick. Every
//! `interval` ticks the scheduler reports a refresh as due, and the hub calls
//! `apply_effects(interval)` on every bound race.

use evolve_core::Tick;

/// Counts ticks and decides when effects are refreshed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectScheduler {
    /// Ticks between two refreshes (at least 1)
    interval: Tick,
    /// Ticks elapsed since the scheduler started
    tick: Tick,
}

impl EffectScheduler {
    /// Create a scheduler refreshing every `interval` ticks
    pub fn new(interval: Tick) -> Self {
        Self {
            interval: interval.max(1),
            tick: 0,
        }
    }

    /// Advance by one tick; returns true when a refresh is due
    pub fn advance(&mut self) -> bool {
        self.tick += 1;
        self.tick % self.interval == 0
    }

    /// Current tick
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Refresh interval
    pub fn interval(&self) -> Tick {
        self.interval
    }

    /// Ticks left until the next refresh
    pub fn ticks_until_refresh(&self) -> Tick {
        self.interval - self.tick % self.interval
    }
}
