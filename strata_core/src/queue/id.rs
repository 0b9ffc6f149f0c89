// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry identity.

use core::fmt;

/// Sentinel value indicating "no entry" in link fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an entry in a [`RenderQueue`](super::RenderQueue).
///
/// Contains both a slot index and a generation counter so that stale handles
/// are detected after an entry is removed and its slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    /// Slot index into the queue's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the queue's generation for this slot.
    pub(crate) generation: u32,
}

impl EntryId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Reassembles a handle from its raw parts, as recorded by a trace sink.
    ///
    /// The result is only meaningful for the queue that issued the parts.
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({}@gen{})", self.idx, self.generation)
    }
}
