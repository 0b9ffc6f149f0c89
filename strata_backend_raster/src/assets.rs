// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image decoding and text rasterization.

use kurbo::Size;
use rusttype::{Font, Scale, point};
use tiny_skia::{Pixmap, PremultipliedColorU8};

use strata_core::backend::{Assets, RenderedText};
use strata_core::color::Color;
use strata_core::drawable::{TextId, TextureId};
use strata_core::{Error, Result};

use crate::surface::{MAX_SURFACE_DIMENSION, RasterBackend};

/// Premultiplies one straight-alpha channel.
fn premultiply(channel: u8, alpha: u8) -> u8 {
    let v = (u16::from(channel) * u16::from(alpha) + 127) / 255;
    // At most 255 because alpha is at most 255.
    u8::try_from(v).unwrap_or(u8::MAX)
}

fn premultiplied(r: u8, g: u8, b: u8, a: u8) -> PremultipliedColorU8 {
    PremultipliedColorU8::from_rgba(premultiply(r, a), premultiply(g, a), premultiply(b, a), a)
        .unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "coverage is in 0..=1, so the product is in 0..=255"
)]
fn coverage_alpha(coverage: f32, alpha: u8) -> u8 {
    (coverage.clamp(0.0, 1.0) * f32::from(alpha)).round() as u8
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "values are clamped to the surface limit first"
)]
fn ceil_dimension(v: f32) -> u32 {
    v.ceil().clamp(0.0, MAX_SURFACE_DIMENSION as f32) as u32
}

impl RasterBackend {
    fn font(&mut self, path: &str) -> Result<&Font<'static>> {
        if !self.fonts.contains_key(path) {
            let bytes = std::fs::read(path).map_err(|_| Error::FontOpenFailed)?;
            let font = Font::try_from_vec(bytes).ok_or(Error::FontOpenFailed)?;
            self.fonts.insert(path.to_owned(), font);
        }
        self.fonts.get(path).ok_or(Error::FontOpenFailed)
    }
}

/// Decodes an image file into a premultiplied pixmap.
fn decode_image(path: &str) -> Result<Pixmap> {
    let rgba = image::open(path)
        .map_err(|_| Error::ImageLoadFailed)?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        return Err(Error::TextureConversionFailed);
    }
    let mut pixmap = Pixmap::new(width, height).ok_or(Error::TextureConversionFailed)?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = premultiplied(r, g, b, a);
    }
    Ok(pixmap)
}

/// Rasterizes one line of text; the baseline sits at the font's ascent.
fn rasterize(font: &Font<'_>, point_size: f32, text: &str, color: Color) -> Result<Pixmap> {
    let scale = Scale::uniform(point_size);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let advance = glyphs
        .last()
        .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width);
    let width = ceil_dimension(advance);
    let height = ceil_dimension(v_metrics.ascent - v_metrics.descent);
    let mut pixmap = Pixmap::new(width, height).ok_or(Error::TextRenderFailed)?;

    let stride = width as usize;
    let pixels = pixmap.pixels_mut();
    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|x, y, v| {
            let (Ok(px), Ok(py)) = (
                usize::try_from(bb.min.x + x.cast_signed()),
                usize::try_from(bb.min.y + y.cast_signed()),
            ) else {
                return;
            };
            if px >= stride {
                return;
            }
            let a = coverage_alpha(v, color.a);
            if let Some(dst) = pixels.get_mut(py * stride + px) {
                // Overlapping glyph edges keep the stronger coverage.
                if a > dst.alpha() {
                    *dst = premultiplied(color.r, color.g, color.b, a);
                }
            }
        });
    }
    Ok(pixmap)
}

impl Assets for RasterBackend {
    fn load_image(&mut self, path: &str) -> Result<(TextureId, Size)> {
        let pixmap = decode_image(path)?;
        let size = Size::new(f64::from(pixmap.width()), f64::from(pixmap.height()));
        let id = self.textures.insert(pixmap)?;
        Ok((id.into(), size))
    }

    fn render_text(
        &mut self,
        font_path: &str,
        point_size: f32,
        text: &str,
        color: Color,
    ) -> Result<RenderedText> {
        let bitmap = {
            let font = self.font(font_path)?;
            rasterize(font, point_size, text, color)?
        };
        let size = Size::new(f64::from(bitmap.width()), f64::from(bitmap.height()));
        let texture = bitmap.clone();
        let text = self.texts.insert(bitmap)?;
        let texture = match self.textures.insert(texture) {
            Ok(t) => t,
            Err(_) => {
                self.texts.remove(text);
                return Err(Error::TextureConversionFailed);
            }
        };
        Ok(RenderedText {
            text: text.into(),
            texture: texture.into(),
            size,
        })
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.textures.remove(texture.into());
    }

    fn destroy_text(&mut self, text: TextId) {
        self.texts.remove(text.into());
    }
}
