// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wall-clock time source.

use std::time::Instant;

use strata_core::clock::Clock;
use strata_core::time::{Duration, HostTime};

/// Monotonic nanosecond clock measured from its creation.
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    /// Creates a clock reading zero now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now(&self) -> HostTime {
        let nanos = self.origin.elapsed().as_nanos();
        HostTime(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(std::time::Duration::from_nanos(duration.nanos()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_non_decreasing() {
        let clock = StdClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first, "monotonic clock should not go backwards");
    }

    #[test]
    fn sleep_advances_time() {
        let mut clock = StdClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(2));
        let slept = clock.now().saturating_duration_since(before);
        assert!(
            slept >= Duration::from_millis(2),
            "slept only {slept:?}"
        );
    }
}
