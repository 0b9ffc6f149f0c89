// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The double-buffered drawing surface.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::Path;

use kurbo::{Point, Rect};
use rusttype::Font;
use tiny_skia::{FilterQuality, Paint, Pixmap, PixmapPaint, Transform};

use strata_core::backend::Canvas;
use strata_core::color::Color;
use strata_core::drawable::TextureId;
use strata_core::input::RawEvent;
use strata_core::{Error, Result};

use crate::slab::Slab;

/// Largest accepted surface width or height, in pixels.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;

/// Window parameters for a [`RasterBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterConfig {
    /// Window title.
    pub title: String,
    /// Client-area width in pixels.
    pub width: u32,
    /// Client-area height in pixels.
    pub height: u32,
}

impl RasterConfig {
    /// Creates a configuration.
    #[must_use]
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self::new("strata", 800, 600)
    }
}

/// A headless backend drawing into `tiny-skia` pixmaps.
pub struct RasterBackend {
    pub(crate) title: String,
    pub(crate) back: Pixmap,
    pub(crate) front: Pixmap,
    pub(crate) textures: Slab<Pixmap>,
    pub(crate) texts: Slab<Pixmap>,
    pub(crate) fonts: HashMap<String, Font<'static>>,
    pub(crate) events: VecDeque<RawEvent>,
    pub(crate) pointer: Point,
    pub(crate) presented: u64,
}

impl std::fmt::Debug for RasterBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterBackend")
            .field("title", &self.title)
            .field("width", &self.back.width())
            .field("height", &self.back.height())
            .field("textures", &self.textures.len())
            .field("texts", &self.texts.len())
            .field("fonts", &self.fonts.len())
            .field("pending_events", &self.events.len())
            .field("pointer", &self.pointer)
            .field("presented", &self.presented)
            .finish()
    }
}

impl RasterBackend {
    /// Creates the window surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WindowCreationFailed`] if either dimension is zero or
    /// above [`MAX_SURFACE_DIMENSION`], or the front buffer cannot be
    /// allocated; [`Error::RendererCreationFailed`] if the back buffer cannot
    /// be allocated.
    pub fn new(config: RasterConfig) -> Result<Self> {
        let front = allocate(config.width, config.height).ok_or(Error::WindowCreationFailed)?;
        let back = allocate(config.width, config.height).ok_or(Error::RendererCreationFailed)?;
        Ok(Self {
            title: config.title,
            back,
            front,
            textures: Slab::default(),
            texts: Slab::default(),
            fonts: HashMap::new(),
            events: VecDeque::new(),
            pointer: Point::ZERO,
            presented: 0,
        })
    }

    /// Window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The most recently presented frame.
    #[must_use]
    pub fn front(&self) -> &Pixmap {
        &self.front
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    /// Number of live textures.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of live text bitmaps.
    #[must_use]
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Writes the most recently presented frame as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if encoding fails or the file cannot be written.
    pub fn save_png(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.front.save_png(path).map_err(io::Error::other)
    }

    /// Reallocates both buffers at a new size.
    ///
    /// Invalid or unallocatable sizes leave the surface untouched and return
    /// `false`.
    pub(crate) fn resize(&mut self, width: u32, height: u32) -> bool {
        let (Some(front), Some(back)) = (allocate(width, height), allocate(width, height)) else {
            return false;
        };
        self.front = front;
        self.back = back;
        true
    }
}

fn allocate(width: u32, height: u32) -> Option<Pixmap> {
    if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        return None;
    }
    Pixmap::new(width, height)
}

pub(crate) fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "surface coordinates fit comfortably in f32"
)]
fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let rect = rect.abs();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
}

impl Canvas for RasterBackend {
    fn clear(&mut self, color: Color) {
        self.back.fill(skia_color(color));
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        let Some(rect) = skia_rect(rect) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = false;
        self.back.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn draw_texture(&mut self, texture: TextureId, rect: Rect) {
        let Some(source) = self.textures.get(texture.into()) else {
            return;
        };
        let Some(dest) = skia_rect(rect) else {
            return;
        };
        let (sx, sy) = (
            dest.width() / source.width() as f32,
            dest.height() / source.height() as f32,
        );
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, dest.left(), dest.top());
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        self.back
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    fn present(&mut self) {
        self.front.clone_from(&self.back);
        self.presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(w: u32, h: u32) -> RasterBackend {
        RasterBackend::new(RasterConfig::new("test", w, h)).unwrap()
    }

    fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = pixmap.pixel(x, y).unwrap();
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    #[test]
    fn zero_or_huge_dimensions_fail() {
        let zero = RasterBackend::new(RasterConfig::new("z", 0, 10));
        assert_eq!(zero.unwrap_err(), Error::WindowCreationFailed);
        let huge = RasterBackend::new(RasterConfig::new("h", MAX_SURFACE_DIMENSION + 1, 10));
        assert_eq!(huge.unwrap_err(), Error::WindowCreationFailed);
    }

    #[test]
    fn present_publishes_back_buffer() {
        let mut b = backend(4, 4);
        b.clear(Color::RED);
        // Nothing is visible until present.
        assert_eq!(rgba(b.front(), 0, 0), (0, 0, 0, 0));
        b.present();
        assert_eq!(rgba(b.front(), 3, 3), (255, 0, 0, 255));
        assert_eq!(b.presented_frames(), 1);
    }

    #[test]
    fn fill_rect_covers_only_its_bounds() {
        let mut b = backend(8, 8);
        b.clear(Color::BLACK);
        b.fill_rect(Color::GREEN, Rect::new(2.0, 2.0, 4.0, 4.0));
        b.present();
        assert_eq!(rgba(b.front(), 2, 2), (0, 255, 0, 255));
        assert_eq!(rgba(b.front(), 3, 3), (0, 255, 0, 255));
        assert_eq!(rgba(b.front(), 4, 4), (0, 0, 0, 255));
        assert_eq!(rgba(b.front(), 1, 2), (0, 0, 0, 255));
    }

    #[test]
    fn later_draws_paint_over_earlier_ones() {
        let mut b = backend(4, 4);
        b.clear(Color::BLACK);
        b.fill_rect(Color::RED, Rect::new(0.0, 0.0, 4.0, 4.0));
        b.fill_rect(Color::BLUE, Rect::new(0.0, 0.0, 2.0, 2.0));
        b.present();
        assert_eq!(rgba(b.front(), 0, 0), (0, 0, 255, 255));
        assert_eq!(rgba(b.front(), 3, 3), (255, 0, 0, 255));
    }

    #[test]
    fn texture_is_scaled_into_rect() {
        let mut b = backend(8, 8);
        let mut tex = Pixmap::new(1, 1).unwrap();
        tex.fill(skia_color(Color::WHITE));
        let id: TextureId = b.textures.insert(tex).unwrap().into();

        b.clear(Color::BLACK);
        b.draw_texture(id, Rect::new(4.0, 4.0, 8.0, 8.0));
        b.present();
        assert_eq!(rgba(b.front(), 5, 5), (255, 255, 255, 255));
        assert_eq!(rgba(b.front(), 7, 7), (255, 255, 255, 255));
        assert_eq!(rgba(b.front(), 3, 3), (0, 0, 0, 255));
    }

    #[test]
    fn unknown_texture_and_empty_rect_draw_nothing() {
        let mut b = backend(4, 4);
        b.clear(Color::BLACK);
        b.draw_texture(TextureId::from_raw(99, 0), Rect::new(0.0, 0.0, 4.0, 4.0));
        b.fill_rect(Color::RED, Rect::new(1.0, 1.0, 1.0, 3.0));
        b.present();
        assert_eq!(rgba(b.front(), 1, 1), (0, 0, 0, 255));
    }

    #[test]
    fn resize_rejects_invalid_sizes() {
        let mut b = backend(4, 4);
        assert!(!b.resize(0, 4), "zero width is refused");
        assert_eq!(b.front().width(), 4);
        assert!(b.resize(6, 2), "valid size is accepted");
        assert_eq!((b.front().width(), b.front().height()), (6, 2));
    }
}
