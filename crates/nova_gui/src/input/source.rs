//! Sources of raw input events
//!
//! The native renderer keeps one bounded queue per event kind. Each call takes
//! the oldest event off its queue; an empty queue yields an unfilled event.

use std::collections::VecDeque;

use super::events::{KeyCharEvent, KeyPressEvent, MouseButtonEvent, MousePositionEvent};

/// Per-kind input event queues
pub trait InputEventSource {
    /// Next mouse button event
    fn next_mouse_button_event(&mut self) -> MouseButtonEvent;

    /// Next cursor position event
    fn next_mouse_position_event(&mut self) -> MousePositionEvent;

    /// Next key event
    fn next_key_press_event(&mut self) -> KeyPressEvent;

    /// Next text input event
    fn next_key_char_event(&mut self) -> KeyCharEvent;
}

/// In-process event queues
///
/// Behaves like the native queues: FIFO per kind, each event handed out once,
/// unfilled events when empty.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    mouse_buttons: VecDeque<MouseButtonEvent>,
    mouse_positions: VecDeque<MousePositionEvent>,
    key_presses: VecDeque<KeyPressEvent>,
    key_chars: VecDeque<KeyCharEvent>,
}

impl EventQueue {
    /// Create empty queues
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a mouse button event
    pub fn push_mouse_button(&mut self, event: MouseButtonEvent) {
        self.mouse_buttons.push_back(event);
    }

    /// Queue a cursor position event
    pub fn push_mouse_position(&mut self, event: MousePositionEvent) {
        self.mouse_positions.push_back(event);
    }

    /// Queue a key event
    pub fn push_key_press(&mut self, event: KeyPressEvent) {
        self.key_presses.push_back(event);
    }

    /// Queue a text input event
    pub fn push_key_char(&mut self, event: KeyCharEvent) {
        self.key_chars.push_back(event);
    }

    /// Whether every queue is empty
    pub fn is_empty(&self) -> bool {
        self.mouse_buttons.is_empty()
            && self.mouse_positions.is_empty()
            && self.key_presses.is_empty()
            && self.key_chars.is_empty()
    }
}

impl InputEventSource for EventQueue {
    fn next_mouse_button_event(&mut self) -> MouseButtonEvent {
        self.mouse_buttons.pop_front().unwrap_or_default()
    }

    fn next_mouse_position_event(&mut self) -> MousePositionEvent {
        self.mouse_positions.pop_front().unwrap_or_default()
    }

    fn next_key_press_event(&mut self) -> KeyPressEvent {
        self.key_presses.pop_front().unwrap_or_default()
    }

    fn next_key_char_event(&mut self) -> KeyCharEvent {
        self.key_chars.pop_front().unwrap_or_default()
    }
}
