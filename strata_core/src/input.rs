// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw backend events and their translation into engine events.
//!
//! Backends report keys as USB HID usage ids (the same numbering SDL uses for
//! scancodes) and mouse buttons as 1 (left), 2 (middle), 3 (right). The
//! engine only understands a small symbolic vocabulary; everything else is
//! consumed and dropped by [`translate`].

use kurbo::{Point, Size};

/// An event as delivered by an [`EventSource`](crate::backend::EventSource).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawEvent {
    /// The user asked to close the application.
    Quit,
    /// A key was pressed.
    KeyDown {
        /// USB HID usage id of the key.
        scancode: u32,
    },
    /// A key was released.
    KeyUp {
        /// USB HID usage id of the key.
        scancode: u32,
    },
    /// A mouse button was pressed.
    MouseButtonDown {
        /// Raw button index; 1 left, 2 middle, 3 right.
        button: u8,
    },
    /// A mouse button was released.
    MouseButtonUp {
        /// Raw button index.
        button: u8,
    },
    /// The pointer moved.
    MouseMotion {
        /// New pointer position in window coordinates.
        position: Point,
    },
    /// The window changed size.
    WindowResized {
        /// New client-area size in pixels.
        size: Size,
    },
}

/// A key the engine can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs, reason = "key names are self-describing")]
pub enum Key {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Escape,
}

const LETTERS: [Key; 26] = [
    Key::A,
    Key::B,
    Key::C,
    Key::D,
    Key::E,
    Key::F,
    Key::G,
    Key::H,
    Key::I,
    Key::J,
    Key::K,
    Key::L,
    Key::M,
    Key::N,
    Key::O,
    Key::P,
    Key::Q,
    Key::R,
    Key::S,
    Key::T,
    Key::U,
    Key::V,
    Key::W,
    Key::X,
    Key::Y,
    Key::Z,
];

/// Digits in HID order: 1 through 9, then 0.
const DIGITS: [Key; 10] = [
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
    Key::Num0,
];

const SCANCODE_A: u32 = 4;
const SCANCODE_1: u32 = 30;
const SCANCODE_ESCAPE: u32 = 41;

impl Key {
    /// Maps a USB HID usage id to a key, if it is one the engine reports.
    #[must_use]
    pub const fn from_scancode(scancode: u32) -> Option<Self> {
        match scancode {
            SCANCODE_A..=29 => Some(LETTERS[(scancode - SCANCODE_A) as usize]),
            SCANCODE_1..=39 => Some(DIGITS[(scancode - SCANCODE_1) as usize]),
            SCANCODE_ESCAPE => Some(Self::Escape),
            _ => None,
        }
    }

    /// Returns the USB HID usage id of this key.
    #[must_use]
    pub const fn scancode(self) -> u32 {
        match self {
            Self::Escape => SCANCODE_ESCAPE,
            Self::Num0 => 39,
            _ => {
                let c = self.as_char() as u32;
                if c >= 'A' as u32 {
                    SCANCODE_A + (c - 'A' as u32)
                } else {
                    SCANCODE_1 + (c - '1' as u32)
                }
            }
        }
    }

    /// Returns the character printed on the key: `'0'..='9'`, `'A'..='Z'`,
    /// or ESC (`'\u{1b}'`).
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Num0 => '0',
            Self::Num1 => '1',
            Self::Num2 => '2',
            Self::Num3 => '3',
            Self::Num4 => '4',
            Self::Num5 => '5',
            Self::Num6 => '6',
            Self::Num7 => '7',
            Self::Num8 => '8',
            Self::Num9 => '9',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
            Self::I => 'I',
            Self::J => 'J',
            Self::K => 'K',
            Self::L => 'L',
            Self::M => 'M',
            Self::N => 'N',
            Self::O => 'O',
            Self::P => 'P',
            Self::Q => 'Q',
            Self::R => 'R',
            Self::S => 'S',
            Self::T => 'T',
            Self::U => 'U',
            Self::V => 'V',
            Self::W => 'W',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
            Self::Escape => '\u{1b}',
        }
    }
}

/// A mouse button the engine can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

impl MouseButton {
    /// Maps a raw button index (1, 2, 3) to a button.
    #[must_use]
    pub const fn from_raw(button: u8) -> Option<Self> {
        match button {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            _ => None,
        }
    }

    /// Returns the raw button index.
    #[must_use]
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
        }
    }
}

/// A translated event, as stored in the engine's application state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A recognized key was pressed.
    KeyDown(Key),
    /// A recognized mouse button was pressed.
    MouseButtonDown(MouseButton),
    /// The pointer moved.
    MouseMotion(Point),
    /// The window changed size.
    WindowResized(Size),
}

/// Translates a raw event.
///
/// Returns `None` for quit requests (the engine handles those itself), key
/// releases, button releases, and unrecognized keys or buttons.
#[must_use]
pub fn translate(raw: &RawEvent) -> Option<Event> {
    match *raw {
        RawEvent::KeyDown { scancode } => Key::from_scancode(scancode).map(Event::KeyDown),
        RawEvent::MouseButtonDown { button } => {
            MouseButton::from_raw(button).map(Event::MouseButtonDown)
        }
        RawEvent::MouseMotion { position } => Some(Event::MouseMotion(position)),
        RawEvent::WindowResized { size } => Some(Event::WindowResized(size)),
        RawEvent::Quit | RawEvent::KeyUp { .. } | RawEvent::MouseButtonUp { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits() {
        assert_eq!(Key::from_scancode(4), Some(Key::A));
        assert_eq!(Key::from_scancode(29), Some(Key::Z));
        assert_eq!(Key::from_scancode(26), Some(Key::W));
        assert_eq!(Key::from_scancode(30), Some(Key::Num1));
        assert_eq!(Key::from_scancode(38), Some(Key::Num9));
        assert_eq!(Key::from_scancode(39), Some(Key::Num0));
        assert_eq!(Key::from_scancode(41), Some(Key::Escape));
    }

    #[test]
    fn unknown_scancodes() {
        for code in [0, 1, 2, 3, 40, 42, 44, 224, u32::MAX] {
            assert_eq!(Key::from_scancode(code), None, "scancode {code}");
        }
    }

    #[test]
    fn scancode_is_inverse() {
        for code in (4..=39).chain([41]) {
            let key = Key::from_scancode(code).unwrap();
            assert_eq!(key.scancode(), code, "{key:?}");
        }
    }

    #[test]
    fn key_chars() {
        assert_eq!(Key::Num0.as_char(), '0');
        assert_eq!(Key::Q.as_char(), 'Q');
    }

    #[test]
    fn mouse_buttons() {
        assert_eq!(MouseButton::from_raw(1), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_raw(2), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_raw(3), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_raw(4), None);
        assert_eq!(MouseButton::from_raw(0), None);
        assert_eq!(MouseButton::Right.to_raw(), 3);
    }

    #[test]
    fn translation() {
        assert_eq!(
            translate(&RawEvent::KeyDown { scancode: 41 }),
            Some(Event::KeyDown(Key::Escape))
        );
        assert_eq!(translate(&RawEvent::KeyDown { scancode: 200 }), None);
        assert_eq!(translate(&RawEvent::KeyUp { scancode: 4 }), None);
        assert_eq!(translate(&RawEvent::Quit), None);
        assert_eq!(translate(&RawEvent::MouseButtonUp { button: 1 }), None);
        assert_eq!(
            translate(&RawEvent::MouseButtonDown { button: 2 }),
            Some(Event::MouseButtonDown(MouseButton::Middle))
        );
        let size = Size::new(1024.0, 768.0);
        assert_eq!(
            translate(&RawEvent::WindowResized { size }),
            Some(Event::WindowResized(size))
        );
    }
}
