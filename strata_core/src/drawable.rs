// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The items a render queue holds.

use core::fmt;

use kurbo::Rect;

use crate::color::Color;

/// A handle to a texture owned by the backend.
///
/// Backends that reuse slots bump the generation on release, so a handle
/// that outlives its texture never resolves to a later one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId {
    idx: u32,
    generation: u32,
}

impl TextureId {
    /// Assembles a handle from a backend slot index and generation.
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Returns the backend slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureId({}@gen{})", self.idx, self.generation)
    }
}

/// A handle to a rendered text bitmap owned by the backend.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextId {
    idx: u32,
    generation: u32,
}

impl TextId {
    /// Assembles a handle from a backend slot index and generation.
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Returns the backend slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextId({}@gen{})", self.idx, self.generation)
    }
}

/// Which variant a [`Drawable`] is, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    /// A solid filled rectangle.
    Rect,
    /// A texture blitted into its bounds.
    Texture,
    /// Rendered text, blitted like a texture.
    Text,
}

/// One item of a frame: a destination rectangle plus what to paint there.
///
/// Rect colors are owned by the drawable. Texture and text handles refer to
/// backend objects that outlive removal from a queue; they are only
/// destroyed by an explicit release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drawable {
    /// A filled rectangle.
    Rect {
        /// Where to fill.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// A texture scaled into `bounds`.
    Texture {
        /// Destination rectangle.
        bounds: Rect,
        /// Backend texture to draw.
        texture: TextureId,
    },
    /// A rendered text bitmap scaled into `bounds`.
    Text {
        /// Destination rectangle.
        bounds: Rect,
        /// Backend text bitmap the texture was produced from.
        text: TextId,
        /// Backend texture to draw.
        texture: TextureId,
    },
}

impl Drawable {
    /// Creates a filled rectangle.
    #[must_use]
    pub const fn rect(bounds: Rect, color: Color) -> Self {
        Self::Rect { bounds, color }
    }

    /// Creates a texture drawable.
    #[must_use]
    pub const fn texture(bounds: Rect, texture: TextureId) -> Self {
        Self::Texture { bounds, texture }
    }

    /// Creates a text drawable.
    #[must_use]
    pub const fn text(bounds: Rect, text: TextId, texture: TextureId) -> Self {
        Self::Text {
            bounds,
            text,
            texture,
        }
    }

    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> DrawableKind {
        match self {
            Self::Rect { .. } => DrawableKind::Rect,
            Self::Texture { .. } => DrawableKind::Texture,
            Self::Text { .. } => DrawableKind::Text,
        }
    }

    /// Returns the destination rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        match self {
            Self::Rect { bounds, .. }
            | Self::Texture { bounds, .. }
            | Self::Text { bounds, .. } => *bounds,
        }
    }

    /// Replaces the destination rectangle.
    pub fn set_bounds(&mut self, new_bounds: Rect) {
        match self {
            Self::Rect { bounds, .. }
            | Self::Texture { bounds, .. }
            | Self::Text { bounds, .. } => *bounds = new_bounds,
        }
    }

    /// Moves the destination rectangle so its top-left corner is at `(x, y)`,
    /// keeping its size.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        let b = self.bounds();
        self.set_bounds(b.with_origin((x, y)));
    }

    /// Returns the backend texture this drawable blits, if any.
    #[must_use]
    pub const fn texture_id(&self) -> Option<TextureId> {
        match self {
            Self::Rect { .. } => None,
            Self::Texture { texture, .. } | Self::Text { texture, .. } => Some(*texture),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_bounds() {
        let r = Rect::new(0.0, 0.0, 10.0, 20.0);
        let d = Drawable::rect(r, Color::RED);
        assert_eq!(d.kind(), DrawableKind::Rect);
        assert_eq!(d.bounds(), r);
        assert_eq!(d.texture_id(), None);

        let t = Drawable::text(r, TextId::from_raw(3, 0), TextureId::from_raw(4, 0));
        assert_eq!(t.kind(), DrawableKind::Text);
        assert_eq!(t.texture_id(), Some(TextureId::from_raw(4, 0)));
    }

    #[test]
    fn set_origin_keeps_size() {
        let mut d = Drawable::texture(Rect::new(5.0, 5.0, 15.0, 25.0), TextureId::from_raw(0, 0));
        d.set_origin(100.0, 200.0);
        assert_eq!(d.bounds(), Rect::new(100.0, 200.0, 110.0, 220.0));
    }
}
