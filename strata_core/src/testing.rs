// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles for the backend traits.

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::backend::{Assets, Canvas, EventSource, RenderedText};
use crate::color::Color;
use crate::drawable::{TextId, TextureId};
use crate::error::{Error, Result};
use crate::input::RawEvent;

/// One recorded canvas call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Call {
    Clear(Color),
    Fill(Color, Rect),
    Texture(TextureId, Rect),
    Present,
}

/// A canvas that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    pub(crate) calls: Vec<Call>,
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.calls.push(Call::Fill(color, rect));
    }

    fn draw_texture(&mut self, texture: TextureId, rect: Rect) {
        self.calls.push(Call::Texture(texture, rect));
    }

    fn present(&mut self) {
        self.calls.push(Call::Present);
    }
}

/// A full backend double: recording canvas, scripted events, and counted
/// textures.
///
/// Image paths ending in `.png` load as 32x16 textures; anything else fails
/// with [`Error::ImageLoadFailed`]. Fonts named `missing.ttf` fail with
/// [`Error::FontOpenFailed`]; empty text fails with
/// [`Error::TextRenderFailed`]. Rendered text measures 8 pixels per byte by
/// `point_size` pixels.
#[derive(Debug)]
pub(crate) struct FakeBackend {
    pub(crate) canvas: RecordingCanvas,
    pub(crate) events: VecDeque<RawEvent>,
    pub(crate) pointer: Point,
    pub(crate) window: Size,
    pub(crate) live_textures: Vec<TextureId>,
    pub(crate) live_texts: Vec<TextId>,
    pub(crate) loaded: Vec<String>,
    next_handle: u32,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            canvas: RecordingCanvas::default(),
            events: VecDeque::new(),
            pointer: Point::ZERO,
            window: Size::new(800.0, 600.0),
            live_textures: Vec::new(),
            live_texts: Vec::new(),
            loaded: Vec::new(),
            next_handle: 0,
        }
    }
}

impl FakeBackend {
    pub(crate) fn push(&mut self, event: RawEvent) {
        self.events.push_back(event);
    }

    fn handle(&mut self) -> u32 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }
}

impl Canvas for FakeBackend {
    fn clear(&mut self, color: Color) {
        self.canvas.clear(color);
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.canvas.fill_rect(color, rect);
    }

    fn draw_texture(&mut self, texture: TextureId, rect: Rect) {
        self.canvas.draw_texture(texture, rect);
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}

impl Assets for FakeBackend {
    fn load_image(&mut self, path: &str) -> Result<(TextureId, Size)> {
        if !path.ends_with(".png") {
            return Err(Error::ImageLoadFailed);
        }
        let id = TextureId::from_raw(self.handle(), 0);
        self.live_textures.push(id);
        self.loaded.push(path.to_string());
        Ok((id, Size::new(32.0, 16.0)))
    }

    fn render_text(
        &mut self,
        font_path: &str,
        point_size: f32,
        text: &str,
        _color: Color,
    ) -> Result<RenderedText> {
        if font_path == "missing.ttf" {
            return Err(Error::FontOpenFailed);
        }
        if text.is_empty() {
            return Err(Error::TextRenderFailed);
        }
        let text_id = TextId::from_raw(self.handle(), 0);
        let texture = TextureId::from_raw(self.handle(), 0);
        self.live_texts.push(text_id);
        self.live_textures.push(texture);
        let width = 8.0 * text.len() as f64;
        Ok(RenderedText {
            text: text_id,
            texture,
            size: Size::new(width, f64::from(point_size)),
        })
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.live_textures.retain(|&t| t != texture);
    }

    fn destroy_text(&mut self, text: TextId) {
        self.live_texts.retain(|&t| t != text);
    }
}

impl EventSource for FakeBackend {
    fn poll_event(&mut self) -> Option<RawEvent> {
        let event = self.events.pop_front()?;
        match event {
            RawEvent::MouseMotion { position } => self.pointer = position,
            RawEvent::WindowResized { size } if size.width > 0.0 && size.height > 0.0 => {
                self.window = size;
            }
            _ => {}
        }
        Some(event)
    }

    fn pointer_position(&self) -> Point {
        self.pointer
    }

    fn window_size(&self) -> Size {
        self.window
    }
}
