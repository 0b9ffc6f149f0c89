// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays entry storage with an intrusive paint order.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::drawable::Drawable;
use crate::error::{Error, Result};

use super::id::{EntryId, INVALID};
use super::iter::{Drain, Iter};

/// An ordered collection of [`Drawable`]s with stable identities.
///
/// Entries are addressed by [`EntryId`] handles. Internally, each entry
/// occupies a slot in parallel arrays. Removed entries are recycled via a free
/// list, and generation counters make handles to removed entries fail with
/// [`Error::EntryNotFound`] instead of aliasing whatever reuses the slot.
///
/// The queue owns its drawables but not the backend objects they reference;
/// see [`Engine::release`](crate::engine::Engine::release).
#[derive(Debug, Default, Clone)]
pub struct RenderQueue {
    // -- Payload --
    pub(crate) drawables: Vec<Option<Drawable>>,

    // -- Order --
    pub(crate) prev: Vec<u32>,
    pub(crate) next: Vec<u32>,
    pub(crate) head: u32,
    pub(crate) tail: u32,
    len: usize,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl RenderQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            drawables: Vec::new(),
            prev: Vec::new(),
            next: Vec::new(),
            head: INVALID,
            tail: INVALID,
            len: 0,
            generation: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Returns the number of live entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the queue holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    // -- Mutation API --

    /// Appends `drawable` at the back of the paint order and returns its
    /// handle.
    ///
    /// Fails with [`Error::AllocationFailed`] if storage for a new slot cannot
    /// be reserved; the queue is unchanged in that case.
    pub fn append(&mut self, drawable: Drawable) -> Result<EntryId> {
        let idx = self.allocate_slot()?;
        self.drawables[idx as usize] = Some(drawable);
        self.link_tail(idx);
        Ok(EntryId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    /// Removes an entry and returns its drawable.
    ///
    /// The slot is released for reuse and `id` becomes stale. Backend handles
    /// referenced by the drawable are left alive.
    pub fn remove(&mut self, id: EntryId) -> Result<Drawable> {
        let idx = self.live(id).ok_or(Error::EntryNotFound)?;
        self.unlink(idx);
        self.release_slot(idx).ok_or(Error::EntryNotFound)
    }

    /// Moves an entry to a 1-based position in the paint order.
    ///
    /// - `position == len` or `position == -1` moves the entry to the back.
    /// - `1 <= position < len` makes the entry the `position`-th element; the
    ///   other entries keep their relative order.
    /// - On a single-entry queue every nonzero position is a no-op.
    ///
    /// # Errors
    ///
    /// Checked in this order, with the queue untouched on failure:
    /// [`Error::PositionCannotBeZero`], [`Error::EntryNotFound`],
    /// [`Error::PositionOutOfRange`] (`|position| > len`), and
    /// [`Error::NegativePosition`] (negative values other than `-1`).
    pub fn move_to_position(&mut self, id: EntryId, position: i32) -> Result<()> {
        if position == 0 {
            return Err(Error::PositionCannotBeZero);
        }
        let idx = self.live(id).ok_or(Error::EntryNotFound)?;
        if self.len == 1 {
            return Ok(());
        }
        let magnitude = position.unsigned_abs() as usize;
        if magnitude > self.len {
            return Err(Error::PositionOutOfRange);
        }
        if position == -1 || (position > 0 && magnitude == self.len) {
            self.unlink(idx);
            self.link_tail(idx);
            return Ok(());
        }
        if position < 0 {
            return Err(Error::NegativePosition);
        }

        self.unlink(idx);
        // The shrunken list still has at least `magnitude` entries, so the
        // walk always lands on a live slot.
        let mut at = self.head;
        for _ in 1..magnitude {
            at = self.next[at as usize];
        }
        self.link_before(idx, at);
        Ok(())
    }

    /// Removes and returns the front entry.
    pub fn pop_front(&mut self) -> Option<(EntryId, Drawable)> {
        if self.head == INVALID {
            return None;
        }
        let idx = self.head;
        let id = EntryId {
            idx,
            generation: self.generation[idx as usize],
        };
        self.unlink(idx);
        self.release_slot(idx).map(|d| (id, d))
    }

    /// Removes every entry, front to back, yielding each drawable.
    ///
    /// Entries not consumed by the caller are removed when the iterator is
    /// dropped.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain::new(self)
    }

    /// Removes every entry. All outstanding handles become stale.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    // -- Query API --

    /// Returns whether the handle refers to a live entry.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.live(id).is_some()
    }

    /// Returns the drawable behind a handle.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&Drawable> {
        let idx = self.live(id)?;
        self.drawables[idx as usize].as_ref()
    }

    /// Returns the drawable behind a handle, mutably.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Drawable> {
        let idx = self.live(id)?;
        self.drawables[idx as usize].as_mut()
    }

    /// Returns an entry's destination rectangle.
    #[must_use]
    pub fn bounds(&self, id: EntryId) -> Option<Rect> {
        self.get(id).map(Drawable::bounds)
    }

    /// Returns the 1-based position of an entry in the paint order.
    #[must_use]
    pub fn position(&self, id: EntryId) -> Option<usize> {
        let target = self.live(id)?;
        let mut cur = self.head;
        let mut pos = 1;
        while cur != INVALID {
            if cur == target {
                return Some(pos);
            }
            cur = self.next[cur as usize];
            pos += 1;
        }
        None
    }

    /// Iterates entries front to back (paint order).
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Iterates entry handles front to back.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    // -- Internal helpers --

    /// Returns the slot of a live handle.
    fn live(&self, id: EntryId) -> Option<u32> {
        let i = id.idx as usize;
        (i < self.generation.len()
            && self.generation[i] == id.generation
            && self.drawables[i].is_some())
        .then_some(id.idx)
    }

    /// Takes a slot from the free list or grows the arrays by one.
    fn allocate_slot(&mut self) -> Result<u32> {
        if let Some(idx) = self.free_list.pop() {
            return Ok(idx);
        }
        let slots = self.generation.len();
        let idx = u32::try_from(slots)
            .ok()
            .filter(|&i| i != INVALID)
            .ok_or(Error::AllocationFailed)?;

        // The free list can hold every slot, so releasing never allocates.
        let free_additional = slots + 1 - self.free_list.len();
        self.drawables
            .try_reserve(1)
            .and(self.prev.try_reserve(1))
            .and(self.next.try_reserve(1))
            .and(self.generation.try_reserve(1))
            .and(self.free_list.try_reserve(free_additional))
            .map_err(|_| Error::AllocationFailed)?;

        self.drawables.push(None);
        self.prev.push(INVALID);
        self.next.push(INVALID);
        self.generation.push(0);
        Ok(idx)
    }

    /// Drops the slot's payload, bumps its generation, and recycles it.
    fn release_slot(&mut self, idx: u32) -> Option<Drawable> {
        let i = idx as usize;
        let drawable = self.drawables[i].take();
        self.generation[i] = self.generation[i].wrapping_add(1);
        self.free_list.push(idx);
        drawable
    }

    /// Links a detached slot at the back. Increments the length.
    fn link_tail(&mut self, idx: u32) {
        let i = idx as usize;
        self.prev[i] = self.tail;
        self.next[i] = INVALID;
        if self.tail == INVALID {
            self.head = idx;
        } else {
            self.next[self.tail as usize] = idx;
        }
        self.tail = idx;
        self.len += 1;
    }

    /// Links a detached slot immediately before the linked slot `at`.
    /// Increments the length.
    fn link_before(&mut self, idx: u32, at: u32) {
        let i = idx as usize;
        let before = self.prev[at as usize];
        self.prev[i] = before;
        self.next[i] = at;
        if before == INVALID {
            self.head = idx;
        } else {
            self.next[before as usize] = idx;
        }
        self.prev[at as usize] = idx;
        self.len += 1;
    }

    /// Detaches a linked slot from the order. Decrements the length.
    fn unlink(&mut self, idx: u32) {
        let i = idx as usize;
        let prev = self.prev[i];
        let next = self.next[i];

        if prev == INVALID {
            self.head = next;
        } else {
            self.next[prev as usize] = next;
        }
        if next == INVALID {
            self.tail = prev;
        } else {
            self.prev[next as usize] = prev;
        }

        self.prev[i] = INVALID;
        self.next[i] = INVALID;
        self.len -= 1;
    }

    /// Panics if the links, the length, and the free list disagree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut count = 0;
        let mut prev = INVALID;
        let mut cur = self.head;
        while cur != INVALID {
            assert_eq!(self.prev[cur as usize], prev, "broken prev link at {cur}");
            assert!(
                self.drawables[cur as usize].is_some(),
                "linked slot {cur} has no drawable"
            );
            count += 1;
            prev = cur;
            cur = self.next[cur as usize];
        }
        assert_eq!(self.tail, prev, "tail does not end the list");
        assert_eq!(self.len, count, "length drifted from topology");
        assert_eq!(
            self.len + self.free_list.len(),
            self.generation.len(),
            "slots leaked"
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::color::Color;

    fn rect(n: u8) -> Drawable {
        let x = f64::from(n) * 10.0;
        Drawable::rect(Rect::new(x, 0.0, x + 10.0, 10.0), Color::rgb(n, 0, 0))
    }

    /// Builds A..E and returns the queue plus their handles.
    fn five() -> (RenderQueue, [EntryId; 5]) {
        let mut q = RenderQueue::new();
        let ids = [0, 1, 2, 3, 4].map(|n| q.append(rect(n)).unwrap());
        (q, ids)
    }

    fn order(q: &RenderQueue, ids: &[EntryId]) -> Vec<usize> {
        q.ids()
            .map(|id| ids.iter().position(|&x| x == id).unwrap())
            .collect()
    }

    #[test]
    fn append_preserves_order() {
        let (q, ids) = five();
        assert_eq!(q.len(), 5);
        assert_eq!(order(&q, &ids), vec![0, 1, 2, 3, 4]);
        for (n, (_, d)) in q.iter().enumerate() {
            assert_eq!(d, &rect(u8::try_from(n).unwrap()));
        }
        q.assert_consistent();
    }

    #[test]
    fn reorder_scenario() {
        let (mut q, ids) = five();
        let [a, b, c, d, e] = ids;

        q.move_to_position(a, -1).unwrap();
        assert_eq!(order(&q, &ids), vec![1, 2, 3, 4, 0]);

        q.move_to_position(d, 1).unwrap();
        assert_eq!(order(&q, &ids), vec![3, 1, 2, 4, 0]);
        q.assert_consistent();

        // Remove C from D,B,C,E,A.
        let removed = q.remove(c).unwrap();
        assert_eq!(removed, rect(2));
        assert_eq!(order(&q, &ids), vec![3, 1, 4, 0]);
        assert_eq!(q.len(), 4);
        assert_eq!(q.remove(c), Err(Error::EntryNotFound));
        assert_eq!(q.len(), 4);
        q.assert_consistent();

        assert!(q.contains(b));
        assert!(q.contains(e));
    }

    #[test]
    fn minus_one_equals_len() {
        let (mut q1, ids1) = five();
        let (mut q2, ids2) = five();
        q1.move_to_position(ids1[1], -1).unwrap();
        q2.move_to_position(ids2[1], 5).unwrap();
        assert_eq!(order(&q1, &ids1), order(&q2, &ids2));
        assert_eq!(q1.position(ids1[1]), Some(5));
    }

    #[test]
    fn every_position_places_entry() {
        for from in 0..5 {
            for k in 1..=5_i32 {
                let (mut q, ids) = five();
                q.move_to_position(ids[from], k).unwrap();
                assert_eq!(q.position(ids[from]), Some(k as usize), "from {from} to {k}");
                // The others keep their relative order.
                let rest: Vec<_> = order(&q, &ids).into_iter().filter(|&i| i != from).collect();
                let expected: Vec<_> = (0..5).filter(|&i| i != from).collect();
                assert_eq!(rest, expected, "from {from} to {k}");
                q.assert_consistent();
            }
        }
    }

    #[test]
    fn zero_position_rejected_first() {
        let (mut q, ids) = five();
        q.remove(ids[0]).unwrap();
        // Zero wins over the stale handle.
        assert_eq!(q.move_to_position(ids[0], 0), Err(Error::PositionCannotBeZero));
        assert_eq!(q.move_to_position(ids[1], 0), Err(Error::PositionCannotBeZero));
        assert_eq!(order(&q, &ids), vec![1, 2, 3, 4]);
    }

    #[test]
    fn stale_handle_on_move() {
        let (mut q, ids) = five();
        q.remove(ids[2]).unwrap();
        assert_eq!(q.move_to_position(ids[2], 1), Err(Error::EntryNotFound));
        assert_eq!(q.move_to_position(ids[2], 99), Err(Error::EntryNotFound));
    }

    #[test]
    fn out_of_range_and_negative() {
        let (mut q, ids) = five();
        assert_eq!(q.move_to_position(ids[0], 6), Err(Error::PositionOutOfRange));
        assert_eq!(q.move_to_position(ids[0], -6), Err(Error::PositionOutOfRange));
        assert_eq!(q.move_to_position(ids[0], -2), Err(Error::NegativePosition));
        assert_eq!(q.move_to_position(ids[0], -5), Err(Error::NegativePosition));
        assert_eq!(order(&q, &ids), vec![0, 1, 2, 3, 4]);
        q.assert_consistent();
    }

    #[test]
    fn single_entry_move_is_noop() {
        let mut q = RenderQueue::new();
        let id = q.append(rect(1)).unwrap();
        assert_eq!(q.move_to_position(id, 42), Ok(()));
        assert_eq!(q.move_to_position(id, -42), Ok(()));
        assert_eq!(q.move_to_position(id, 0), Err(Error::PositionCannotBeZero));
        assert_eq!(q.len(), 1);
        q.assert_consistent();
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut q = RenderQueue::new();
        let id1 = q.append(rect(1)).unwrap();
        q.remove(id1).unwrap();
        let id2 = q.append(rect(2)).unwrap();
        assert_eq!(id1.index(), id2.index(), "slot should be reused");
        assert_ne!(id1.generation(), id2.generation());
        assert!(!q.contains(id1));
        assert!(q.get(id1).is_none());
        assert_eq!(q.get(id2), Some(&rect(2)));
    }

    #[test]
    fn never_issued_handle() {
        let mut q = RenderQueue::new();
        let bogus = EntryId::from_raw(7, 0);
        assert_eq!(q.remove(bogus), Err(Error::EntryNotFound));
        assert_eq!(q.position(bogus), None);
        assert_eq!(q.bounds(bogus), None);
    }

    #[test]
    fn get_mut_and_bounds() {
        let (mut q, ids) = five();
        q.get_mut(ids[3]).unwrap().set_origin(500.0, 400.0);
        assert_eq!(
            q.bounds(ids[3]),
            Some(Rect::new(500.0, 400.0, 510.0, 410.0))
        );
    }

    #[test]
    fn remove_head_and_tail() {
        let (mut q, ids) = five();
        q.remove(ids[0]).unwrap();
        q.remove(ids[4]).unwrap();
        assert_eq!(order(&q, &ids), vec![1, 2, 3]);
        q.assert_consistent();
        let id = q.append(rect(9)).unwrap();
        assert_eq!(q.position(id), Some(4));
        q.assert_consistent();
    }

    #[test]
    fn drain_yields_in_order_and_empties() {
        let (mut q, ids) = five();
        q.move_to_position(ids[4], 1).unwrap();
        let drained: Vec<_> = q.drain().map(|(id, _)| id).collect();
        assert_eq!(drained, vec![ids[4], ids[0], ids[1], ids[2], ids[3]]);
        assert!(q.is_empty());
        assert!(!q.contains(ids[0]));
        q.assert_consistent();
    }

    #[test]
    fn dropped_drain_still_clears() {
        let (mut q, _) = five();
        {
            let mut d = q.drain();
            assert!(d.next().is_some());
        }
        assert_eq!(q.len(), 0);
        q.assert_consistent();
    }

    #[test]
    fn clear_then_reuse() {
        let (mut q, ids) = five();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.iter().count(), 0);
        let id = q.append(rect(3)).unwrap();
        assert!(ids.iter().all(|&old| old != id));
        assert_eq!(q.len(), 1);
        q.assert_consistent();
    }

    #[test]
    fn churn_keeps_length_in_sync() {
        let mut q = RenderQueue::new();
        let mut live = Vec::new();
        for round in 0_u8..40 {
            live.push(q.append(rect(round)).unwrap());
            if round % 3 == 0 {
                let victim = live.remove(usize::from(round) % live.len());
                q.remove(victim).unwrap();
            }
            if live.len() > 1 {
                let pos = i32::from(round % 4) + 1;
                let pos = pos.min(i32::try_from(q.len()).unwrap());
                q.move_to_position(live[0], pos).unwrap();
            }
            q.assert_consistent();
            assert_eq!(q.len(), live.len());
        }
    }
}
