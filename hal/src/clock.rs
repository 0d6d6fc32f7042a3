//! Monotonic time source
//!
//! Provides access to a monotonic millisecond counter. It does NOT provide
//! wall-clock time, block, or schedule anything; overlay timeouts and
//! uptime displays are computed against this counter by the caller.

/// Monotonic clock device.
///
/// Implementations must never return a smaller value than a previous call
/// and must answer immediately.
pub trait Clock {
    /// Returns milliseconds elapsed since boot
    fn poll_millis(&mut self) -> u64;
}

/// Hand-advanced clock for tests and scripted runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock at a fixed instant
    pub fn starting_at(now: u64) -> Self {
        Self { now }
    }

    /// Moves time forward
    pub fn advance(&mut self, millis: u64) {
        self.now += millis;
    }
}

impl Clock for ManualClock {
    fn poll_millis(&mut self) -> u64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.poll_millis(), 0);
        clock.advance(250);
        assert_eq!(clock.poll_millis(), 250);
        clock.advance(1);
        assert_eq!(clock.poll_millis(), 251);
    }
}
