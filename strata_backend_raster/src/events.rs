// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted window events.

use kurbo::{Point, Size};

use strata_core::backend::EventSource;
use strata_core::input::RawEvent;

use crate::surface::RasterBackend;

impl RasterBackend {
    /// Queues an event for a later [`poll_event`](EventSource::poll_event).
    pub fn push_event(&mut self, event: RawEvent) {
        self.events.push_back(event);
    }

    /// Queues several events in order.
    pub fn push_events(&mut self, events: impl IntoIterator<Item = RawEvent>) {
        self.events.extend(events);
    }

    /// Number of events not yet polled.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "sizes are clamped to the u32 range first"
)]
fn pixel_extent(v: f64) -> u32 {
    v.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

impl EventSource for RasterBackend {
    fn poll_event(&mut self) -> Option<RawEvent> {
        let event = self.events.pop_front()?;
        match event {
            RawEvent::MouseMotion { position } => self.pointer = position,
            RawEvent::WindowResized { size } => {
                // A size the surface cannot take keeps the old buffers.
                self.resize(pixel_extent(size.width), pixel_extent(size.height));
            }
            _ => {}
        }
        Some(event)
    }

    fn pointer_position(&self) -> Point {
        self.pointer
    }

    fn window_size(&self) -> Size {
        Size::new(f64::from(self.back.width()), f64::from(self.back.height()))
    }
}
