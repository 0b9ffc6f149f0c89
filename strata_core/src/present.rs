// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation step.

use crate::backend::Canvas;
use crate::color::Color;
use crate::drawable::Drawable;
use crate::queue::RenderQueue;

/// Draws `queue` onto `canvas` and presents it.
///
/// Clears to `background`, issues exactly one draw call per entry in paint
/// order, then presents once. Returns the number of draw calls issued.
pub fn present<C: Canvas + ?Sized>(
    queue: &RenderQueue,
    canvas: &mut C,
    background: Color,
) -> usize {
    canvas.clear(background);
    let mut draw_calls = 0;
    for (_, drawable) in queue {
        draw(canvas, drawable);
        draw_calls += 1;
    }
    canvas.present();
    draw_calls
}

/// Issues the single draw call for one entry.
fn draw<C: Canvas + ?Sized>(canvas: &mut C, drawable: &Drawable) {
    match *drawable {
        Drawable::Rect { bounds, color } => canvas.fill_rect(color, bounds),
        Drawable::Texture { bounds, texture } | Drawable::Text { bounds, texture, .. } => {
            canvas.draw_texture(texture, bounds);
        }
    }
}
