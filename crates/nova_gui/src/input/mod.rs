//! Input translation
//!
//! Drains the native renderer's raw event queues into polled mouse and keyboard
//! state for the GUI.

pub mod events;
pub mod source;
pub mod mouse;
pub mod keyboard;

pub use events::{
    Action, Modifiers,
    MouseButtonEvent, MousePositionEvent, KeyPressEvent, KeyCharEvent,
};
pub use source::{InputEventSource, EventQueue};
pub use mouse::{Mouse, BUTTON_COUNT};
pub use keyboard::Keyboard;

/// Key codes
///
/// Values are the raw codes carried in key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum KeyCode {
    /// Space key
    Space = 32,
    /// A key
    A = 65,
    /// B key
    B = 66,
    /// C key
    C = 67,
    /// D key
    D = 68,
    /// E key
    E = 69,
    /// F key
    F = 70,
    /// G key
    G = 71,
    /// H key
    H = 72,
    /// I key
    I = 73,
    /// J key
    J = 74,
    /// K key
    K = 75,
    /// L key
    L = 76,
    /// M key
    M = 77,
    /// N key
    N = 78,
    /// O key
    O = 79,
    /// P key
    P = 80,
    /// Q key
    Q = 81,
    /// R key
    R = 82,
    /// S key
    S = 83,
    /// T key
    T = 84,
    /// U key
    U = 85,
    /// V key
    V = 86,
    /// W key
    W = 87,
    /// X key
    X = 88,
    /// Y key
    Y = 89,
    /// Z key
    Z = 90,
    /// Escape key
    Escape = 256,
    /// Enter key
    Enter = 257,
    /// Tab key
    Tab = 258,
    /// Backspace key
    Backspace = 259,
    /// Right arrow
    Right = 262,
    /// Left arrow
    Left = 263,
    /// Down arrow
    Down = 264,
    /// Up arrow
    Up = 265,
}

impl KeyCode {
    const ALL: [KeyCode; 35] = [
        KeyCode::Space,
        KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F,
        KeyCode::G, KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L,
        KeyCode::M, KeyCode::N, KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R,
        KeyCode::S, KeyCode::T, KeyCode::U, KeyCode::V, KeyCode::W, KeyCode::X,
        KeyCode::Y, KeyCode::Z,
        KeyCode::Escape, KeyCode::Enter, KeyCode::Tab, KeyCode::Backspace,
        KeyCode::Right, KeyCode::Left, KeyCode::Down, KeyCode::Up,
    ];

    /// Decode a raw key code
    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.to_raw() == raw)
    }

    /// Raw key code
    pub fn to_raw(self) -> i32 {
        self as i32
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

impl MouseButton {
    /// Map a raw button index; other buttons have no name
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            2 => Some(Self::Middle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_round_trip() {
        for key in KeyCode::ALL {
            assert_eq!(KeyCode::from_raw(key.to_raw()), Some(key));
        }
        assert_eq!(KeyCode::from_raw(-1), None);
    }

    #[test]
    fn test_mouse_button_mapping() {
        assert_eq!(MouseButton::from_index(2), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_index(5), None);
    }
}
