// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Every record starts with a one-byte tag. Decoding stops at the first
//! unknown tag or truncated record.

use strata_core::Error;
use strata_core::drawable::DrawableKind;
use strata_core::queue::EntryId;
use strata_core::scheduler::PaceDecision;
use strata_core::time::{Duration, HostTime};
use strata_core::trace::{
    EntryFreedEvent, ErrorEvent, Lifecycle, LifecycleEvent, PaceEvent, PresentEvent, QueueOp,
    QueueOpEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_QUEUE_OP: u8 = 1;
const TAG_ENTRY_FREED: u8 = 2;
const TAG_PACE: u8 = 3;
const TAG_PRESENT: u8 = 4;
const TAG_ERROR: u8 = 5;
const TAG_LIFECYCLE: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_len(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    fn write_option_entry(&mut self, v: Option<EntryId>) {
        match v {
            Some(id) => {
                self.write_u8(1);
                self.write_u32(id.index());
                self.write_u32(id.generation());
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
                self.write_u32(0);
            }
        }
    }

    fn write_op(&mut self, op: QueueOp) {
        let (code, position) = match op {
            QueueOp::Appended => (0, 0),
            QueueOp::Removed => (1, 0),
            QueueOp::Moved { position } => (2, position),
            QueueOp::Cleared => (3, 0),
        };
        self.write_u8(code);
        self.write_i32(position);
    }

    fn write_decision(&mut self, d: PaceDecision) {
        let (code, nanos) = match d {
            PaceDecision::Uncapped => (0, 0),
            PaceDecision::AlreadyPaced => (1, 0),
            PaceDecision::Sleep(d) => (2, d.nanos()),
            PaceDecision::Overrun { elapsed } => (3, elapsed.nanos()),
        };
        self.write_u8(code);
        self.write_u64(nanos);
    }

    fn write_kind(&mut self, k: DrawableKind) {
        self.write_u8(match k {
            DrawableKind::Rect => 0,
            DrawableKind::Texture => 1,
            DrawableKind::Text => 2,
        });
    }
}

fn error_code(e: Error) -> u8 {
    match e {
        Error::InitializationFailed => 0,
        Error::WindowCreationFailed => 1,
        Error::RendererCreationFailed => 2,
        Error::AllocationFailed => 3,
        Error::EntryNotFound => 4,
        Error::ImageLoadFailed => 5,
        Error::FontOpenFailed => 6,
        Error::TextRenderFailed => 7,
        Error::TextureConversionFailed => 8,
        Error::PositionCannotBeZero => 9,
        Error::PositionOutOfRange => 10,
        Error::NegativePosition => 11,
    }
}

fn error_from_code(code: u8) -> Option<Error> {
    Some(match code {
        0 => Error::InitializationFailed,
        1 => Error::WindowCreationFailed,
        2 => Error::RendererCreationFailed,
        3 => Error::AllocationFailed,
        4 => Error::EntryNotFound,
        5 => Error::ImageLoadFailed,
        6 => Error::FontOpenFailed,
        7 => Error::TextRenderFailed,
        8 => Error::TextureConversionFailed,
        9 => Error::PositionCannotBeZero,
        10 => Error::PositionOutOfRange,
        11 => Error::NegativePosition,
        _ => return None,
    })
}

impl TraceSink for RecorderSink {
    fn on_queue_op(&mut self, e: &QueueOpEvent) {
        self.write_u8(TAG_QUEUE_OP);
        self.write_u64(e.frame_index);
        self.write_op(e.op);
        self.write_option_entry(e.entry);
        self.write_len(e.len);
    }

    fn on_entry_freed(&mut self, e: &EntryFreedEvent) {
        self.write_u8(TAG_ENTRY_FREED);
        self.write_len(e.index);
        self.write_len(e.total);
        self.write_kind(e.kind);
    }

    fn on_pace(&mut self, e: &PaceEvent) {
        self.write_u8(TAG_PACE);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.nanos());
        self.write_decision(e.decision);
    }

    fn on_present(&mut self, e: &PresentEvent) {
        self.write_u8(TAG_PRESENT);
        self.write_u64(e.frame_index);
        self.write_u64(e.timestamp.nanos());
        self.write_len(e.draw_calls);
    }

    fn on_error(&mut self, e: &ErrorEvent) {
        self.write_u8(TAG_ERROR);
        self.write_u64(e.frame_index);
        self.write_u8(error_code(e.error));
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.write_u8(TAG_LIFECYCLE);
        self.write_u8(match e.phase {
            Lifecycle::Started => 0,
            Lifecycle::ShutDown => 1,
        });
        self.write_u64(e.timestamp.nanos());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`QueueOpEvent`].
    QueueOp(QueueOpEvent),
    /// An [`EntryFreedEvent`].
    EntryFreed(EntryFreedEvent),
    /// A [`PaceEvent`].
    Pace(PaceEvent),
    /// A [`PresentEvent`].
    Present(PresentEvent),
    /// An [`ErrorEvent`].
    Error(ErrorEvent),
    /// A [`LifecycleEvent`].
    Lifecycle(LifecycleEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes = self.data.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        let [v] = self.take::<1>()?;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_len(&mut self) -> Option<usize> {
        usize::try_from(self.read_u64()?).ok()
    }

    fn read_option_entry(&mut self) -> Option<Option<EntryId>> {
        let present = self.read_u8()?;
        let idx = self.read_u32()?;
        let generation = self.read_u32()?;
        Some((present != 0).then(|| EntryId::from_raw(idx, generation)))
    }

    fn read_op(&mut self) -> Option<QueueOp> {
        let code = self.read_u8()?;
        let position = self.read_i32()?;
        Some(match code {
            0 => QueueOp::Appended,
            1 => QueueOp::Removed,
            2 => QueueOp::Moved { position },
            3 => QueueOp::Cleared,
            _ => return None,
        })
    }

    fn read_decision(&mut self) -> Option<PaceDecision> {
        let code = self.read_u8()?;
        let nanos = Duration(self.read_u64()?);
        Some(match code {
            0 => PaceDecision::Uncapped,
            1 => PaceDecision::AlreadyPaced,
            2 => PaceDecision::Sleep(nanos),
            3 => PaceDecision::Overrun { elapsed: nanos },
            _ => return None,
        })
    }

    fn read_kind(&mut self) -> Option<DrawableKind> {
        Some(match self.read_u8()? {
            0 => DrawableKind::Rect,
            1 => DrawableKind::Texture,
            2 => DrawableKind::Text,
            _ => return None,
        })
    }

    fn decode_queue_op(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::QueueOp(QueueOpEvent {
            frame_index: self.read_u64()?,
            op: self.read_op()?,
            entry: self.read_option_entry()?,
            len: self.read_len()?,
        }))
    }

    fn decode_entry_freed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::EntryFreed(EntryFreedEvent {
            index: self.read_len()?,
            total: self.read_len()?,
            kind: self.read_kind()?,
        }))
    }

    fn decode_pace(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Pace(PaceEvent {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            decision: self.read_decision()?,
        }))
    }

    fn decode_present(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Present(PresentEvent {
            frame_index: self.read_u64()?,
            timestamp: HostTime(self.read_u64()?),
            draw_calls: self.read_len()?,
        }))
    }

    fn decode_error(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Error(ErrorEvent {
            frame_index: self.read_u64()?,
            error: error_from_code(self.read_u8()?)?,
        }))
    }

    fn decode_lifecycle(&mut self) -> Option<RecordedEvent> {
        let phase = match self.read_u8()? {
            0 => Lifecycle::Started,
            1 => Lifecycle::ShutDown,
            _ => return None,
        };
        Some(RecordedEvent::Lifecycle(LifecycleEvent {
            phase,
            timestamp: HostTime(self.read_u64()?),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        let event = match self.read_u8()? {
            TAG_QUEUE_OP => self.decode_queue_op(),
            TAG_ENTRY_FREED => self.decode_entry_freed(),
            TAG_PACE => self.decode_pace(),
            TAG_PRESENT => self.decode_present(),
            TAG_ERROR => self.decode_error(),
            TAG_LIFECYCLE => self.decode_lifecycle(),
            _ => None,
        };
        if event.is_none() {
            // Unknown tag or truncated record: stop for good.
            self.pos = self.data.len();
        }
        event
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
