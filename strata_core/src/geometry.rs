// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers for game logic built on the queue.

use kurbo::{Rect, Size};

/// Returns `true` if the two rectangles overlap with positive area.
///
/// Rectangles that only share an edge or a corner do not touch, and a
/// rectangle with zero width or height touches nothing.
#[must_use]
pub fn is_touching(a: Rect, b: Rect) -> bool {
    let a = a.abs();
    let b = b.abs();
    if a.area() <= 0.0 || b.area() <= 0.0 {
        return false;
    }
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Returns `rect` moved so that its center is the center of a
/// `container`-sized area anchored at the origin.
#[must_use]
pub fn centered_in(rect: Rect, container: Size) -> Rect {
    let size = rect.size();
    let x = (container.width - size.width) / 2.0;
    let y = (container.height - size.height) / 2.0;
    rect.with_origin((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_touch() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(is_touching(a, b));
        assert!(is_touching(b, a));
    }

    #[test]
    fn shared_edge_does_not_touch() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!is_touching(a, b), "edge contact has zero area");
    }

    #[test]
    fn empty_rect_never_touches() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let zero_width = Rect::new(5.0, 5.0, 5.0, 8.0);
        assert!(!is_touching(a, zero_width));
        assert!(!is_touching(zero_width, a));
        let zero_height = Rect::new(2.0, 4.0, 8.0, 4.0);
        assert!(!is_touching(a, zero_height));
        assert!(!is_touching(zero_width, zero_width), "not even itself");
    }

    #[test]
    fn containment_touches() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 60.0, 60.0);
        assert!(is_touching(outer, inner));
    }

    #[test]
    fn centering() {
        let r = Rect::new(3.0, 4.0, 103.0, 54.0);
        let c = centered_in(r, Size::new(800.0, 600.0));
        assert_eq!(c, Rect::new(350.0, 275.0, 450.0, 325.0));
    }
}
