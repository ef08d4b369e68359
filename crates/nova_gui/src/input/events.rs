//! Raw input events as delivered by the native renderer
//!
//! These structs are returned by value from the native event queues, so their
//! layout is part of the wire contract. An event whose `filled` field is zero
//! means the queue was empty.

use bitflags::bitflags;

/// Action code carried by button and key events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Action {
    /// Button or key released
    Release = 0,
    /// Button or key pressed
    Press = 1,
    /// Key held long enough to auto-repeat
    Repeat = 2,
}

impl Action {
    /// Decode a raw action code
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Release),
            1 => Some(Self::Press),
            2 => Some(Self::Repeat),
            _ => None,
        }
    }

    /// Raw action code
    pub fn to_raw(self) -> i32 {
        self as i32
    }
}

bitflags! {
    /// Modifier keys held during an event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: i32 {
        /// Either shift key
        const SHIFT = 0x0001;
        /// Either control key
        const CONTROL = 0x0002;
        /// Either alt key
        const ALT = 0x0004;
        /// Either super key
        const SUPER = 0x0008;
        /// Caps lock active
        const CAPS_LOCK = 0x0010;
        /// Num lock active
        const NUM_LOCK = 0x0020;
    }
}

/// Mouse button press or release
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtonEvent {
    /// Button index
    pub button: i32,
    /// Raw [`Action`] code
    pub action: i32,
    /// Raw [`Modifiers`] bits
    pub mods: i32,
    /// Non-zero when this slot holds an event
    pub filled: i32,
}

impl MouseButtonEvent {
    /// Create a filled event
    pub fn new(button: i32, action: Action, mods: Modifiers) -> Self {
        Self {
            button,
            action: action.to_raw(),
            mods: mods.bits(),
            filled: 1,
        }
    }

    /// Whether this slot holds an event
    pub fn is_filled(&self) -> bool {
        self.filled != 0
    }

    /// Decoded action
    pub fn action(&self) -> Option<Action> {
        Action::from_raw(self.action)
    }

    /// Decoded modifiers, ignoring unknown bits
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_bits_truncate(self.mods)
    }
}

/// Absolute cursor position
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MousePositionEvent {
    /// Horizontal position in pixels
    pub xpos: i32,
    /// Vertical position in pixels
    pub ypos: i32,
    /// Non-zero when this slot holds an event
    pub filled: i32,
}

impl MousePositionEvent {
    /// Create a filled event
    pub fn new(xpos: i32, ypos: i32) -> Self {
        Self { xpos, ypos, filled: 1 }
    }

    /// Whether this slot holds an event
    pub fn is_filled(&self) -> bool {
        self.filled != 0
    }
}

/// Key press, release or repeat
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// Key code
    pub key: i32,
    /// Platform scancode
    pub scancode: i32,
    /// Raw [`Action`] code
    pub action: i32,
    /// Raw [`Modifiers`] bits
    pub mods: i32,
    /// Non-zero when this slot holds an event
    pub filled: i32,
}

impl KeyPressEvent {
    /// Create a filled event
    pub fn new(key: i32, scancode: i32, action: Action, mods: Modifiers) -> Self {
        Self {
            key,
            scancode,
            action: action.to_raw(),
            mods: mods.bits(),
            filled: 1,
        }
    }

    /// Whether this slot holds an event
    pub fn is_filled(&self) -> bool {
        self.filled != 0
    }

    /// Decoded action
    pub fn action(&self) -> Option<Action> {
        Action::from_raw(self.action)
    }

    /// Decoded modifiers, ignoring unknown bits
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_bits_truncate(self.mods)
    }
}

/// Character produced by text input
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyCharEvent {
    /// Unicode code point
    pub unicode_char: i64,
    /// Non-zero when this slot holds an event
    pub filled: i32,
}

impl KeyCharEvent {
    /// Create a filled event
    pub fn new(character: char) -> Self {
        Self {
            unicode_char: i64::from(u32::from(character)),
            filled: 1,
        }
    }

    /// Whether this slot holds an event
    pub fn is_filled(&self) -> bool {
        self.filled != 0
    }

    /// Decoded character; `None` for values that are not Unicode scalar values
    pub fn character(&self) -> Option<char> {
        u32::try_from(self.unicode_char).ok().and_then(char::from_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_events_are_unfilled() {
        assert!(!MouseButtonEvent::default().is_filled());
        assert!(!MousePositionEvent::default().is_filled());
        assert!(!KeyPressEvent::default().is_filled());
        assert!(!KeyCharEvent::default().is_filled());
    }

    #[test]
    fn test_action_codes() {
        assert_eq!(Action::from_raw(1), Some(Action::Press));
        assert_eq!(Action::Repeat.to_raw(), 2);
        assert_eq!(Action::from_raw(7), None);
    }

    #[test]
    fn test_modifiers_ignore_unknown_bits() {
        let event = MouseButtonEvent {
            button: 0,
            action: 1,
            mods: 0x0003 | 0x0400,
            filled: 1,
        };
        assert_eq!(event.modifiers(), Modifiers::SHIFT | Modifiers::CONTROL);
    }

    #[test]
    fn test_char_decoding() {
        assert_eq!(KeyCharEvent::new('ä').character(), Some('ä'));
        let surrogate = KeyCharEvent { unicode_char: 0xD800, filled: 1 };
        assert_eq!(surrogate.character(), None);
        let negative = KeyCharEvent { unicode_char: -1, filled: 1 };
        assert_eq!(negative.character(), None);
    }

    #[test]
    fn test_wire_sizes() {
        assert_eq!(std::mem::size_of::<MouseButtonEvent>(), 16);
        assert_eq!(std::mem::size_of::<MousePositionEvent>(), 12);
        assert_eq!(std::mem::size_of::<KeyPressEvent>(), 20);
    }
}
