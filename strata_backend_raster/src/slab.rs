// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle table for backend-owned objects.

use strata_core::drawable::{TextId, TextureId};
use strata_core::{Error, Result};

/// A slot index paired with the generation it was issued under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SlabKey {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl From<SlabKey> for TextureId {
    fn from(key: SlabKey) -> Self {
        Self::from_raw(key.idx, key.generation)
    }
}

impl From<TextureId> for SlabKey {
    fn from(id: TextureId) -> Self {
        Self {
            idx: id.index(),
            generation: id.generation(),
        }
    }
}

impl From<SlabKey> for TextId {
    fn from(key: SlabKey) -> Self {
        Self::from_raw(key.idx, key.generation)
    }
}

impl From<TextId> for SlabKey {
    fn from(id: TextId) -> Self {
        Self {
            idx: id.index(),
            generation: id.generation(),
        }
    }
}

/// Dense slot storage with slot reuse.
///
/// Each slot carries a generation that is bumped on removal, so a key held
/// past its removal misses instead of aliasing the slot's next occupant.
#[derive(Debug)]
pub(crate) struct Slab<T> {
    slots: Vec<Option<T>>,
    generation: Vec<u32>,
    free: Vec<u32>,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            generation: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Slab<T> {
    /// Stores `value` and returns its key.
    pub(crate) fn insert(&mut self, value: T) -> Result<SlabKey> {
        if let Some(idx) = self.free.pop() {
            let i = idx as usize;
            self.slots[i] = Some(value);
            return Ok(SlabKey {
                idx,
                generation: self.generation[i],
            });
        }
        let idx = u32::try_from(self.slots.len()).map_err(|_| Error::AllocationFailed)?;
        self.slots
            .try_reserve(1)
            .map_err(|_| Error::AllocationFailed)?;
        self.generation
            .try_reserve(1)
            .map_err(|_| Error::AllocationFailed)?;
        self.slots.push(Some(value));
        self.generation.push(0);
        Ok(SlabKey { idx, generation: 0 })
    }

    fn is_live(&self, key: SlabKey) -> bool {
        self.generation.get(key.idx as usize) == Some(&key.generation)
    }

    pub(crate) fn get(&self, key: SlabKey) -> Option<&T> {
        if !self.is_live(key) {
            return None;
        }
        self.slots.get(key.idx as usize)?.as_ref()
    }

    /// Removes and returns the value; unknown or stale keys yield `None`.
    pub(crate) fn remove(&mut self, key: SlabKey) -> Option<T> {
        if !self.is_live(key) {
            return None;
        }
        let i = key.idx as usize;
        let value = self.slots.get_mut(i)?.take()?;
        self.generation[i] = self.generation[i].wrapping_add(1);
        self.free.push(key.idx);
        Some(value)
    }

    /// Number of live values.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
