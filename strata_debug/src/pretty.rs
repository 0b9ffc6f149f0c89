// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in microseconds.

use std::io::Write;

use strata_core::drawable::DrawableKind;
use strata_core::scheduler::PaceDecision;
use strata_core::time::{Duration, HostTime};
use strata_core::trace::{
    EntryFreedEvent, ErrorEvent, Lifecycle, LifecycleEvent, PaceEvent, PresentEvent, QueueOp,
    QueueOpEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn host_us(t: HostTime) -> f64 {
    t.nanos() as f64 / 1000.0
}

fn dur_us(d: Duration) -> f64 {
    d.nanos() as f64 / 1000.0
}

fn kind_name(kind: DrawableKind) -> &'static str {
    match kind {
        DrawableKind::Rect => "rect",
        DrawableKind::Texture => "texture",
        DrawableKind::Text => "text",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_queue_op(&mut self, e: &QueueOpEvent) {
        let op = match e.op {
            QueueOp::Appended => "append".to_owned(),
            QueueOp::Removed => "remove".to_owned(),
            QueueOp::Moved { position } => format!("move to={position}"),
            QueueOp::Cleared => "clear".to_owned(),
        };
        let _ = match e.entry {
            Some(id) => writeln!(
                self.writer,
                "[queue] frame={} {op} entry={}@gen{} len={}",
                e.frame_index,
                id.index(),
                id.generation(),
                e.len,
            ),
            None => writeln!(
                self.writer,
                "[queue] frame={} {op} len={}",
                e.frame_index, e.len,
            ),
        };
    }

    fn on_entry_freed(&mut self, e: &EntryFreedEvent) {
        let _ = writeln!(
            self.writer,
            "[freed] {} of {} ({})",
            e.index,
            e.total,
            kind_name(e.kind),
        );
    }

    fn on_pace(&mut self, e: &PaceEvent) {
        let now = host_us(e.now);
        let _ = match e.decision {
            PaceDecision::Uncapped => writeln!(
                self.writer,
                "[pace] frame={} now={now:.1}µs uncapped",
                e.frame_index,
            ),
            PaceDecision::AlreadyPaced => writeln!(
                self.writer,
                "[pace] frame={} now={now:.1}µs already-paced",
                e.frame_index,
            ),
            PaceDecision::Sleep(d) => writeln!(
                self.writer,
                "[pace] frame={} now={now:.1}µs sleep={:.1}µs",
                e.frame_index,
                dur_us(d),
            ),
            PaceDecision::Overrun { elapsed } => writeln!(
                self.writer,
                "[pace] frame={} now={now:.1}µs OVERRUN elapsed={:.1}µs",
                e.frame_index,
                dur_us(elapsed),
            ),
        };
    }

    fn on_present(&mut self, e: &PresentEvent) {
        let _ = writeln!(
            self.writer,
            "[present] frame={} at={:.1}µs draws={}",
            e.frame_index,
            host_us(e.timestamp),
            e.draw_calls,
        );
    }

    fn on_error(&mut self, e: &ErrorEvent) {
        let _ = writeln!(
            self.writer,
            "[error] frame={} ERROR: {}",
            e.frame_index, e.error,
        );
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        let phase = match e.phase {
            Lifecycle::Started => "started",
            Lifecycle::ShutDown => "shut down",
        };
        let _ = writeln!(
            self.writer,
            "[lifecycle] {phase} at={:.1}µs",
            host_us(e.timestamp),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Error;
    use strata_core::queue::EntryId;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn queue_op_lines() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_queue_op(&QueueOpEvent {
            frame_index: 2,
            op: QueueOp::Moved { position: -1 },
            entry: Some(EntryId::from_raw(3, 1)),
            len: 5,
        });
        sink.on_queue_op(&QueueOpEvent {
            frame_index: 2,
            op: QueueOp::Cleared,
            entry: None,
            len: 0,
        });
        let out = output(sink);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[queue] frame=2 move to=-1 entry=3@gen1 len=5");
        assert_eq!(lines[1], "[queue] frame=2 clear len=0");
    }

    #[test]
    fn pace_and_present_lines() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_pace(&PaceEvent {
            frame_index: 0,
            now: HostTime(1_000_000),
            decision: PaceDecision::Sleep(Duration(16_666_666)),
        });
        sink.on_pace(&PaceEvent {
            frame_index: 1,
            now: HostTime(40_000_000),
            decision: PaceDecision::Overrun {
                elapsed: Duration(20_000_000),
            },
        });
        sink.on_present(&PresentEvent {
            frame_index: 0,
            timestamp: HostTime(17_666_666),
            draw_calls: 4,
        });
        let out = output(sink);
        assert!(out.contains("[pace] frame=0 now=1000.0µs sleep=16666.7µs"));
        assert!(out.contains("OVERRUN elapsed=20000.0µs"));
        assert!(out.contains("[present] frame=0 at=17666.7µs draws=4"));
    }

    #[test]
    fn error_and_lifecycle_lines() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_lifecycle(&LifecycleEvent {
            phase: Lifecycle::Started,
            timestamp: HostTime(0),
        });
        sink.on_error(&ErrorEvent {
            frame_index: 7,
            error: Error::PositionCannotBeZero,
        });
        sink.on_entry_freed(&EntryFreedEvent {
            index: 1,
            total: 2,
            kind: DrawableKind::Text,
        });
        let out = output(sink);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3, "one line per event");
        assert_eq!(lines[0], "[lifecycle] started at=0.0µs");
        assert_eq!(
            lines[1],
            "[error] frame=7 ERROR: The position provided was exactly zero"
        );
        assert_eq!(lines[2], "[freed] 1 of 2 (text)");
    }
}
