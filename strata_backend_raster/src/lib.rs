// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software raster backend for strata.
//!
//! This crate provides a headless implementation of the
//! [`Backend`](strata_core::backend::Backend) contract:
//!
//! - A double-buffered [`tiny_skia::Pixmap`] surface standing in for the
//!   window. [`present`](strata_core::backend::Canvas::present) copies the
//!   back buffer to the front buffer, which [`RasterBackend::front`] exposes
//!   and [`RasterBackend::save_png`] writes out.
//! - Image loading through `image` and text rasterization through
//!   `rusttype`, with fonts cached per path.
//! - A scripted event queue fed by [`RasterBackend::push_event`].
//! - [`StdClock`], a monotonic clock over [`std::time::Instant`].

mod assets;
mod clock;
mod events;
mod slab;
mod surface;

pub use clock::StdClock;
pub use surface::{MAX_SURFACE_DIMENSION, RasterBackend, RasterConfig};
