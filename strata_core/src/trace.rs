// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the queue and the frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Engine`](crate::engine::Engine) calls when its `debug` flag is set. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. Each method performs a
//! single `Option` branch before dispatching.
//!
//! Sinks never influence control flow: an error is reported to the sink and
//! then returned to the caller exactly as it would be without tracing.

use alloc::boxed::Box;

use crate::drawable::DrawableKind;
use crate::error::Error;
use crate::queue::EntryId;
use crate::scheduler::PaceDecision;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which queue mutation happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueueOp {
    /// An entry was appended at the back.
    Appended,
    /// An entry was removed.
    Removed,
    /// An entry was moved to a new position.
    Moved {
        /// The requested 1-based position (`-1` for the back).
        position: i32,
    },
    /// Every entry was removed.
    Cleared,
}

/// Engine lifecycle milestones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// The engine was constructed.
    Started,
    /// The engine tore down its queue and released the backend.
    ShutDown,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a successful queue mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueOpEvent {
    /// Frames presented so far.
    pub frame_index: u64,
    /// What happened.
    pub op: QueueOp,
    /// The entry involved, if the operation names one.
    pub entry: Option<EntryId>,
    /// Queue length after the operation.
    pub len: usize,
}

/// Emitted for each entry released while tearing a queue down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryFreedEvent {
    /// 1-based position of the entry in the teardown order.
    pub index: usize,
    /// Number of entries the queue held when teardown began.
    pub total: usize,
    /// What kind of drawable was released.
    pub kind: DrawableKind,
}

/// Emitted after each pacing decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaceEvent {
    /// Frames presented so far.
    pub frame_index: u64,
    /// Host time when the poll started.
    pub now: HostTime,
    /// What the pacer decided.
    pub decision: PaceDecision,
}

/// Emitted after a frame is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentEvent {
    /// Index of the presented frame, starting at 0.
    pub frame_index: u64,
    /// Host time of presentation.
    pub timestamp: HostTime,
    /// Number of draw calls issued (one per entry).
    pub draw_calls: usize,
}

/// Emitted when the engine records an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorEvent {
    /// Frames presented so far.
    pub frame_index: u64,
    /// The error being returned to the caller.
    pub error: Error,
}

/// Emitted at engine lifecycle milestones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Which milestone.
    pub phase: Lifecycle,
    /// Host time of the milestone.
    pub timestamp: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a successful queue mutation.
    fn on_queue_op(&mut self, e: &QueueOpEvent) {
        _ = e;
    }

    /// Called for each entry released during teardown.
    fn on_entry_freed(&mut self, e: &EntryFreedEvent) {
        _ = e;
    }

    /// Called after each pacing decision.
    fn on_pace(&mut self, e: &PaceEvent) {
        _ = e;
    }

    /// Called after a frame is presented.
    fn on_present(&mut self, e: &PresentEvent) {
        _ = e;
    }

    /// Called when an error is recorded.
    fn on_error(&mut self, e: &ErrorEvent) {
        _ = e;
    }

    /// Called at lifecycle milestones.
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        _ = e;
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn on_queue_op(&mut self, e: &QueueOpEvent) {
        (**self).on_queue_op(e);
    }
    fn on_entry_freed(&mut self, e: &EntryFreedEvent) {
        (**self).on_entry_freed(e);
    }
    fn on_pace(&mut self, e: &PaceEvent) {
        (**self).on_pace(e);
    }
    fn on_present(&mut self, e: &PresentEvent) {
        (**self).on_present(e);
    }
    fn on_error(&mut self, e: &ErrorEvent) {
        (**self).on_error(e);
    }
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        (**self).on_lifecycle(e);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn on_queue_op(&mut self, e: &QueueOpEvent) {
        (**self).on_queue_op(e);
    }
    fn on_entry_freed(&mut self, e: &EntryFreedEvent) {
        (**self).on_entry_freed(e);
    }
    fn on_pace(&mut self, e: &PaceEvent) {
        (**self).on_pace(e);
    }
    fn on_present(&mut self, e: &PresentEvent) {
        (**self).on_present(e);
    }
    fn on_error(&mut self, e: &ErrorEvent) {
        (**self).on_error(e);
    }
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        (**self).on_lifecycle(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// Each method checks the inner `Option` (one branch) before dispatching to
/// the sink.
pub struct Tracer<'a> {
    sink: Option<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("enabled", &self.sink.is_some())
            .finish()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self { sink: None }
    }

    /// Returns `true` if events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Emits a [`QueueOpEvent`].
    #[inline]
    pub fn queue_op(&mut self, e: &QueueOpEvent) {
        if let Some(s) = &mut self.sink {
            s.on_queue_op(e);
        }
    }

    /// Emits an [`EntryFreedEvent`].
    #[inline]
    pub fn entry_freed(&mut self, e: &EntryFreedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_entry_freed(e);
        }
    }

    /// Emits a [`PaceEvent`].
    #[inline]
    pub fn pace(&mut self, e: &PaceEvent) {
        if let Some(s) = &mut self.sink {
            s.on_pace(e);
        }
    }

    /// Emits a [`PresentEvent`].
    #[inline]
    pub fn present(&mut self, e: &PresentEvent) {
        if let Some(s) = &mut self.sink {
            s.on_present(e);
        }
    }

    /// Emits an [`ErrorEvent`].
    #[inline]
    pub fn error(&mut self, e: &ErrorEvent) {
        if let Some(s) = &mut self.sink {
            s.on_error(e);
        }
    }

    /// Emits a [`LifecycleEvent`].
    #[inline]
    pub fn lifecycle(&mut self, e: &LifecycleEvent) {
        if let Some(s) = &mut self.sink {
            s.on_lifecycle(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn sample_present() -> PresentEvent {
        PresentEvent {
            frame_index: 3,
            timestamp: HostTime(1_000),
            draw_calls: 5,
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        presents: Vec<u64>,
        errors: Vec<Error>,
    }

    impl TraceSink for RecordingSink {
        fn on_present(&mut self, e: &PresentEvent) {
            self.presents.push(e.frame_index);
        }
        fn on_error(&mut self, e: &ErrorEvent) {
            self.errors.push(e.error);
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_present(&sample_present());
        sink.on_lifecycle(&LifecycleEvent {
            phase: Lifecycle::Started,
            timestamp: HostTime(0),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        assert!(!tracer.is_enabled());
        tracer.present(&sample_present());
    }

    #[test]
    fn tracer_dispatches_to_sink() {
        let mut sink = RecordingSink::default();
        let mut tracer = Tracer::new(&mut sink);
        assert!(tracer.is_enabled());
        tracer.present(&sample_present());
        tracer.error(&ErrorEvent {
            frame_index: 3,
            error: Error::EntryNotFound,
        });
        // Unhandled events fall through to the default no-op.
        tracer.pace(&PaceEvent {
            frame_index: 3,
            now: HostTime(0),
            decision: PaceDecision::Uncapped,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.presents, &[3]);
        assert_eq!(sink.errors, &[Error::EntryNotFound]);
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut boxed: Box<dyn TraceSink> = Box::new(RecordingSink::default());
        let mut tracer = Tracer::new(&mut boxed);
        tracer.present(&sample_present());
    }
}
