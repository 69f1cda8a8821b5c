//! Tick-based time for periodic effect refresh
//!
//! The host scheduler calls `apply_effects(interval)` once every `interval`
//! ticks. Each refresh grants effects a little longer than the interval so
//! they never visibly lapse between two refreshes.

/// A discrete tick (logical time unit of the host engine)
pub type Tick = u64;

/// Extra ticks added on top of the refresh interval for every applied effect
pub const EFFECT_REFRESH_BUFFER: Tick = 5;

/// Duration granted to an effect refreshed every `interval` ticks
pub fn effect_duration(interval: Tick) -> Tick {
    interval.saturating_add(EFFECT_REFRESH_BUFFER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_duration_adds_buffer() {
        assert_eq!(effect_duration(20), 25);
        assert_eq!(effect_duration(0), EFFECT_REFRESH_BUFFER);
    }

    #[test]
    fn test_effect_duration_saturates() {
        assert_eq!(effect_duration(Tick::MAX), Tick::MAX);
    }
}
