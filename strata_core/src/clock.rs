// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic clock contract used by the frame pacer.
//!
//! The engine never reads wall time directly. It asks a [`Clock`] for the
//! current [`HostTime`] and asks it to block for the pacing interval, which
//! lets simulations and tests substitute [`ManualClock`] for a real timer.

use alloc::vec::Vec;

use crate::time::{Duration, HostTime};

/// A monotonic nanosecond clock that can block the calling thread.
pub trait Clock {
    /// Returns the current monotonic time.
    fn now(&self) -> HostTime;

    /// Blocks for (at least) the given duration.
    fn sleep(&mut self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now(&self) -> HostTime {
        (**self).now()
    }

    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// A clock driven entirely by the caller.
///
/// [`sleep`](Clock::sleep) advances time by exactly the requested duration
/// and records the request, so pacing decisions can be asserted without
/// waiting.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: HostTime,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub const fn new(start: HostTime) -> Self {
        Self {
            now: start,
            sleeps: Vec::new(),
        }
    }

    /// Advances the clock without recording a sleep (simulated work).
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.saturating_add(by);
    }

    /// Jumps the clock to `t`. Time never runs backwards; earlier values are
    /// ignored.
    pub fn set(&mut self, t: HostTime) {
        if t > self.now {
            self.now = t;
        }
    }

    /// Every sleep requested so far, oldest first.
    #[must_use]
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }

    /// Forgets the recorded sleeps.
    pub fn clear_sleeps(&mut self) {
        self.sleeps.clear();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> HostTime {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.now = self.now.saturating_add(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_advances_and_records() {
        let mut clock = ManualClock::new(HostTime(100));
        clock.sleep(Duration(50));
        clock.advance(Duration(5));
        assert_eq!(clock.now(), HostTime(155));
        assert_eq!(clock.sleeps(), &[Duration(50)]);
        clock.clear_sleeps();
        assert!(clock.sleeps().is_empty(), "sleeps should be forgotten");
    }

    #[test]
    fn set_is_monotonic() {
        let mut clock = ManualClock::new(HostTime(1_000));
        clock.set(HostTime(500));
        assert_eq!(clock.now(), HostTime(1_000));
        clock.set(HostTime(2_000));
        assert_eq!(clock.now(), HostTime(2_000));
    }

    #[test]
    fn mutable_reference_is_a_clock() {
        fn tick(mut c: impl Clock) -> HostTime {
            c.sleep(Duration(7));
            c.now()
        }
        let mut clock = ManualClock::default();
        assert_eq!(tick(&mut clock), HostTime(7));
        assert_eq!(clock.sleeps().len(), 1);
    }
}
