// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order traversal.

use crate::drawable::Drawable;

use super::id::{EntryId, INVALID};
use super::store::RenderQueue;

/// An iterator over the entries of a queue, front to back.
///
/// Created by [`RenderQueue::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    queue: &'a RenderQueue,
    current: u32,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(queue: &'a RenderQueue) -> Self {
        Self {
            queue,
            current: queue.head,
            remaining: queue.len(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (EntryId, &'a Drawable);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.queue.next[idx as usize];
        self.remaining = self.remaining.saturating_sub(1);
        let drawable = self.queue.drawables[idx as usize].as_ref()?;
        Some((
            EntryId {
                idx,
                generation: self.queue.generation[idx as usize],
            },
            drawable,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RenderQueue {
    type Item = (EntryId, &'a Drawable);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// A draining iterator that empties a queue front to back.
///
/// Created by [`RenderQueue::drain`]. Each yielded handle is already stale.
#[derive(Debug)]
pub struct Drain<'a> {
    queue: &'a mut RenderQueue,
}

impl<'a> Drain<'a> {
    pub(crate) fn new(queue: &'a mut RenderQueue) -> Self {
        Self { queue }
    }
}

impl Iterator for Drain<'_> {
    type Item = (EntryId, Drawable);

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl ExactSizeIterator for Drain<'_> {}

impl Drop for Drain<'_> {
    fn drop(&mut self) {
        self.queue.clear();
    }
}
