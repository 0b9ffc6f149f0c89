// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sleep-based frame pacing.
//!
//! The [`FramePacer`] converts a target frame rate into a sleep request once
//! per poll. It tracks two timestamps:
//!
//! - the previous *checkpoint*, taken each time a poll is paced, and
//! - the previous *presentation*, reported by the presentation step.
//!
//! A poll that follows a checkpoint without an intervening presentation is
//! not paced again, so a loop that drains every pending event before
//! rendering pays the frame interval once per frame rather than once per
//! event.
//!
//! There is no catch-up: a frame that overran its interval is followed by
//! an immediate checkpoint, and the next frame gets a full interval again.

use crate::clock::Clock;
use crate::time::{Duration, HostTime, NANOS_PER_SECOND};

/// Configuration for the [`FramePacer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PacerConfig {
    /// Target frames per second; `0` disables pacing.
    pub target_fps: u32,
}

impl PacerConfig {
    /// Pace to a fixed frame rate. `0` is the same as [`uncapped`](Self::uncapped).
    #[must_use]
    pub const fn fixed(target_fps: u32) -> Self {
        Self { target_fps }
    }

    /// Never sleep.
    #[must_use]
    pub const fn uncapped() -> Self {
        Self { target_fps: 0 }
    }

    /// The target interval between frames, or `None` when uncapped.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        if self.target_fps == 0 {
            None
        } else {
            Some(Duration(NANOS_PER_SECOND / self.target_fps as u64))
        }
    }
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self::fixed(60)
    }
}

/// What a single poll decided to do about pacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaceDecision {
    /// Pacing is disabled; nothing was slept or recorded.
    Uncapped,
    /// This frame was already paced and has not been presented since.
    AlreadyPaced,
    /// The frame finished early; sleep for the remainder of the interval.
    Sleep(Duration),
    /// The frame used its whole interval (or more); no sleep.
    Overrun {
        /// Time since the previous checkpoint.
        elapsed: Duration,
    },
}

impl PaceDecision {
    /// Returns the sleep this decision requests, if any.
    #[must_use]
    pub const fn sleep(self) -> Option<Duration> {
        match self {
            Self::Sleep(d) => Some(d),
            _ => None,
        }
    }
}

/// Frame pacer that turns a target frame rate into per-poll sleeps.
///
/// [`plan`](Self::plan) is pure; [`pace`](Self::pace) plans, sleeps on the
/// given clock, and records the checkpoint.
#[derive(Clone, Debug, Default)]
pub struct FramePacer {
    config: PacerConfig,
    last_present: Option<HostTime>,
    last_checkpoint: Option<HostTime>,
    presented_since_checkpoint: bool,
}

impl FramePacer {
    /// Creates a pacer with no history.
    #[must_use]
    pub const fn new(config: PacerConfig) -> Self {
        Self {
            config,
            last_present: None,
            last_checkpoint: None,
            presented_since_checkpoint: false,
        }
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> PacerConfig {
        self.config
    }

    /// Changes the target frame rate. Takes effect on the next poll.
    pub fn set_target_fps(&mut self, fps: u32) {
        self.config.target_fps = fps;
    }

    /// Time of the previous presentation, if any.
    #[must_use]
    pub const fn last_present(&self) -> Option<HostTime> {
        self.last_present
    }

    /// Time of the previous pacing checkpoint, if any.
    #[must_use]
    pub const fn last_checkpoint(&self) -> Option<HostTime> {
        self.last_checkpoint
    }

    /// Decides how to pace a poll happening at `now`, without changing state.
    #[must_use]
    pub fn plan(&self, now: HostTime) -> PaceDecision {
        let Some(interval) = self.config.interval() else {
            return PaceDecision::Uncapped;
        };
        if self.last_checkpoint.is_some() && !self.presented_since_checkpoint {
            return PaceDecision::AlreadyPaced;
        }
        let elapsed = self
            .last_checkpoint
            .map_or(Duration::ZERO, |cp| now.saturating_duration_since(cp));
        if elapsed < interval {
            PaceDecision::Sleep(interval - elapsed)
        } else {
            PaceDecision::Overrun { elapsed }
        }
    }

    /// Plans a poll at the clock's current time and carries the decision out.
    ///
    /// A sleep is followed by a checkpoint at the clock's time after waking.
    pub fn pace<C: Clock + ?Sized>(&mut self, clock: &mut C) -> PaceDecision {
        let decision = self.plan(clock.now());
        match decision {
            PaceDecision::Uncapped | PaceDecision::AlreadyPaced => {}
            PaceDecision::Sleep(d) => {
                clock.sleep(d);
                self.checkpoint(clock.now());
            }
            PaceDecision::Overrun { .. } => self.checkpoint(clock.now()),
        }
        decision
    }

    /// Records a pacing checkpoint.
    pub fn checkpoint(&mut self, at: HostTime) {
        self.last_checkpoint = Some(at);
        self.presented_since_checkpoint = false;
    }

    /// Records that a frame was presented.
    pub fn mark_presented(&mut self, at: HostTime) {
        self.last_present = Some(at);
        self.presented_since_checkpoint = true;
    }
}
