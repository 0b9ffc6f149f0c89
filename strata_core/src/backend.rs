// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for graphics integrations.
//!
//! Strata splits pixel, file, and window work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Canvas**: clear, fill a rectangle, blit a texture into a rectangle,
//!   present. Implements [`Canvas`].
//!
//! - **Assets**: turn image files and text into backend textures, and
//!   destroy them again. Implements [`Assets`].
//!
//! - **Events**: a queue of [`RawEvent`]s plus the current pointer position
//!   and window size. Implements [`EventSource`].
//!
//! - **Clock**: a monotonic nanosecond clock that can sleep. Implements
//!   [`Clock`](crate::clock::Clock); usually a separate value so that
//!   simulations can swap it for [`ManualClock`](crate::clock::ManualClock).
//!
//! Window and renderer creation belong to the backend's constructor, which
//! reports [`Error::InitializationFailed`], [`Error::WindowCreationFailed`],
//! or [`Error::RendererCreationFailed`].
//!
//! # Crate boundaries
//!
//! `strata_core` owns the queue, pacing, presentation order, and this
//! contract module. Backend crates depend on `strata_core` and provide the
//! glue. Application code depends on both and hands a backend and a clock to
//! an [`Engine`](crate::engine::Engine).
//!
//! [`Error::InitializationFailed`]: crate::Error::InitializationFailed
//! [`Error::WindowCreationFailed`]: crate::Error::WindowCreationFailed
//! [`Error::RendererCreationFailed`]: crate::Error::RendererCreationFailed

use kurbo::{Point, Rect, Size};

use crate::color::Color;
use crate::drawable::{TextId, TextureId};
use crate::error::Result;
use crate::input::RawEvent;

/// Immediate-mode drawing target.
///
/// The presentation step calls [`clear`](Self::clear) once, one draw method
/// per queued entry, then [`present`](Self::present) once.
pub trait Canvas {
    /// Fills the whole target with `color`.
    fn clear(&mut self, color: Color);

    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, color: Color, rect: Rect);

    /// Draws the whole of `texture` scaled into `rect`.
    ///
    /// Unknown textures draw nothing.
    fn draw_texture(&mut self, texture: TextureId, rect: Rect);

    /// Makes everything drawn since the last clear visible.
    fn present(&mut self);
}

/// Text rasterized by [`Assets::render_text`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedText {
    /// The text bitmap, kept by the backend until destroyed.
    pub text: TextId,
    /// The texture made from the bitmap.
    pub texture: TextureId,
    /// Measured size of the bitmap in pixels.
    pub size: Size,
}

/// Loader and owner of textures and text bitmaps.
pub trait Assets {
    /// Loads an image file into a texture.
    ///
    /// Returns the texture and the image's natural size in pixels.
    fn load_image(&mut self, path: &str) -> Result<(TextureId, Size)>;

    /// Rasterizes a line of text with the font at `font_path`.
    fn render_text(
        &mut self,
        font_path: &str,
        point_size: f32,
        text: &str,
        color: Color,
    ) -> Result<RenderedText>;

    /// Destroys a texture. Unknown handles are ignored.
    fn destroy_texture(&mut self, texture: TextureId);

    /// Destroys a text bitmap. Unknown handles are ignored.
    fn destroy_text(&mut self, text: TextId);
}

/// Source of raw input events.
pub trait EventSource {
    /// Removes and returns the oldest pending event.
    fn poll_event(&mut self) -> Option<RawEvent>;

    /// Current pointer position in window coordinates.
    fn pointer_position(&self) -> Point;

    /// Current window client-area size.
    fn window_size(&self) -> Size;
}

/// Everything an [`Engine`](crate::engine::Engine) needs from a backend.
///
/// Implemented automatically for any type that implements the three
/// component traits.
pub trait Backend: Canvas + Assets + EventSource {}

impl<T: Canvas + Assets + EventSource + ?Sized> Backend for T {}
