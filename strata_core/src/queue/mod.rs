// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered render queue.
//!
//! A *render queue* is the paint order of one frame. Each entry has:
//!
//! - An identity ([`EntryId`]), a generational handle that becomes stale when
//!   the entry is removed, so a reused slot is never mistaken for the entry
//!   that used to live there.
//! - A position in the order: `prev` and `next` slot links forming a
//!   doubly-linked list from `head` (painted first) to `tail` (painted last).
//! - Its [`Drawable`](crate::drawable::Drawable) payload.
//!
//! Entries are stored in struct-of-arrays layout. Append, removal and
//! splicing are O(1) given a handle; only walking to a numeric position is
//! O(n).
//!
//! # Positions
//!
//! [`RenderQueue::move_to_position`] takes 1-based positions. `1` is the
//! front (painted first), `len` and `-1` are the back (painted last, so on
//! top). Zero, magnitudes above the length, and other negative values are
//! rejected without touching the order.

mod id;
mod iter;
mod store;

pub use id::{EntryId, INVALID};
pub use iter::{Drain, Iter};
pub use store::RenderQueue;
