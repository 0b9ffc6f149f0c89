// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered render queue, frame pacing, and presentation for 2D front ends.
//!
//! `strata_core` sits between application logic and a graphics backend. It
//! owns the draw order of a frame and the pacing of the loop that produces
//! frames; everything that touches pixels, files, or the windowing system is
//! reached through the collaborator traits in [`backend`] and [`clock`].
//!
//! # Architecture
//!
//! ```text
//!   EventSource ──► Engine::poll_event() ──► FramePacer::plan() ──► Clock::sleep()
//!                          │
//!                          ▼
//!                  application mutates RenderQueue
//!                  (append / remove / move_to_position)
//!                          │
//!                          ▼
//!   Engine::render() ──► present::present() ──► Canvas (clear, draw…, present)
//! ```
//!
//! **[`queue`]**: Struct-of-arrays arena with generational [`EntryId`]
//! handles and an intrusive doubly-linked paint order.
//!
//! **[`drawable`]**: The closed [`Drawable`] sum type (rect, texture, text).
//!
//! **[`scheduler`]**: [`FramePacer`](scheduler::FramePacer): converts a
//! target frame rate into a sleep request per poll.
//!
//! **[`input`]**: Raw backend events and their translation into engine
//! events.
//!
//! **[`present`]**: The presentation step: one draw call per entry, in
//! queue order, then a single present.
//!
//! **[`engine`]**: [`Engine`], the explicit context object that ties a
//! backend, a clock, the pacer, application state, last-error bookkeeping,
//! and diagnostics together.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! queue and frame-loop diagnostics.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//!
//! [`EntryId`]: queue::EntryId
//! [`Drawable`]: drawable::Drawable
//! [`Engine`]: engine::Engine

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod clock;
pub mod color;
pub mod drawable;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod present;
pub mod queue;
pub mod scheduler;
pub mod time;
pub mod trace;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
