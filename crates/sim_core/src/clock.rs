//! Simulation time: a minute-resolution clock and calendar constants.
//!
//! The model advances by fixed one-minute ticks; there is no event queue.
//! All timestamps are integer minutes since the simulation epoch.

pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 60 * 24;
/// One simulated month: 31 days of minutes.
pub const MINUTES_PER_MONTH: u64 = 60 * 24 * 31;

/// Minute of day marking the noon boundary used by the re-engagement sampler.
pub const NOON: u64 = 12 * MINUTES_PER_HOUR;

/// Minute within the current day for an absolute timestamp.
pub fn time_of_day(minute: u64) -> u64 {
    minute % MINUTES_PER_DAY
}

/// Start-of-day timestamp for an absolute timestamp.
pub fn day_start(minute: u64) -> u64 {
    minute - time_of_day(minute)
}

/// Discrete minute clock advancing from 0 to a fixed horizon.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    now: u64,
    horizon: u64,
}

impl SimulationClock {
    pub fn new(horizon: u64) -> Self {
        Self { now: 0, horizon }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    pub fn is_finished(&self) -> bool {
        self.now >= self.horizon
    }

    /// Advance by one minute. Returns the new time, or `None` once the
    /// horizon has been reached.
    pub fn tick(&mut self) -> Option<u64> {
        if self.is_finished() {
            return None;
        }
        self.now += 1;
        Some(self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ticks_to_horizon_and_stops() {
        let mut clock = SimulationClock::new(3);
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.tick(), Some(1));
        assert_eq!(clock.tick(), Some(2));
        assert_eq!(clock.tick(), Some(3));
        assert!(clock.is_finished());
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.now(), 3);
    }

    #[test]
    fn time_of_day_wraps_at_midnight() {
        assert_eq!(time_of_day(0), 0);
        assert_eq!(time_of_day(MINUTES_PER_DAY + 75), 75);
        assert_eq!(day_start(MINUTES_PER_DAY + 75), MINUTES_PER_DAY);
    }
}
