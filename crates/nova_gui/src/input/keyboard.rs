//! Keyboard state built from polled native events
//!
//! Mirrors the mouse: each [`Keyboard::poll`] takes at most one key event and
//! one text input event, and the event accessors describe only what the latest
//! poll drained. Held keys are tracked across polls for [`Keyboard::is_key_down`].

use std::collections::HashSet;

use super::events::{Action, Modifiers};
use super::source::InputEventSource;
use super::KeyCode;
use crate::core::config::InputConfig;

/// Polled keyboard state
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    repeat_events: bool,

    event_key: Option<i32>,
    event_scancode: i32,
    event_state: bool,
    event_repeat: bool,
    event_modifiers: Modifiers,
    event_character: Option<char>,

    held: HashSet<i32>,
}

impl Keyboard {
    /// Create keyboard state with repeat events disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Create keyboard state from the input configuration
    pub fn with_config(config: &InputConfig) -> Self {
        Self {
            repeat_events: config.repeat_events,
            ..Self::default()
        }
    }

    /// Report repeat events as key events
    pub fn enable_repeat_events(&mut self, enabled: bool) {
        self.repeat_events = enabled;
    }

    /// Whether repeat events are reported
    pub fn are_repeat_events_enabled(&self) -> bool {
        self.repeat_events
    }

    /// Drain one key event and one text input event
    ///
    /// Returns `false` without touching any state when both queues are empty.
    /// A suppressed repeat still counts as an event but leaves no event key.
    pub fn poll(&mut self, source: &mut dyn InputEventSource) -> bool {
        let key = source.next_key_press_event();
        let character = source.next_key_char_event();

        if !key.is_filled() && !character.is_filled() {
            return false;
        }

        self.clear_key_event();

        if key.is_filled() {
            let action = key.action();
            match action {
                Some(Action::Press | Action::Repeat) => {
                    self.held.insert(key.key);
                }
                Some(Action::Release) => {
                    self.held.remove(&key.key);
                }
                None => log::warn!("Ignoring key {} with unknown action {}", key.key, key.action),
            }

            let reported = match action {
                Some(Action::Repeat) => self.repeat_events,
                Some(_) => true,
                None => false,
            };

            if reported {
                self.event_key = Some(key.key);
                self.event_scancode = key.scancode;
                self.event_state = action != Some(Action::Release);
                self.event_repeat = action == Some(Action::Repeat);
                self.event_modifiers = key.modifiers();
            }
            log::trace!("Key {} action {} mods {:?}", key.key, key.action, key.modifiers());
        }

        self.event_character = if character.is_filled() {
            character.character()
        } else {
            None
        };

        true
    }

    fn clear_key_event(&mut self) {
        self.event_key = None;
        self.event_scancode = 0;
        self.event_state = false;
        self.event_repeat = false;
        self.event_modifiers = Modifiers::empty();
    }

    /// Key code of the latest poll's key event
    pub fn event_key(&self) -> Option<i32> {
        self.event_key
    }

    /// Latest poll's key as a named key
    pub fn event_key_code(&self) -> Option<KeyCode> {
        self.event_key.and_then(KeyCode::from_raw)
    }

    /// Scancode of the latest poll's key event
    pub fn event_scancode(&self) -> i32 {
        self.event_scancode
    }

    /// Whether the latest poll's key event was a press or repeat
    pub fn event_key_state(&self) -> bool {
        self.event_state
    }

    /// Whether the latest poll's key event was a repeat
    pub fn is_repeat_event(&self) -> bool {
        self.event_repeat
    }

    /// Modifiers of the latest poll's key event
    pub fn event_modifiers(&self) -> Modifiers {
        self.event_modifiers
    }

    /// Character of the latest poll's text input event
    pub fn event_character(&self) -> Option<char> {
        self.event_character
    }

    /// Whether a key is currently held
    pub fn is_key_down(&self, key: i32) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::{KeyCharEvent, KeyPressEvent};
    use crate::input::source::EventQueue;

    fn key(code: KeyCode, action: Action) -> KeyPressEvent {
        KeyPressEvent::new(code.to_raw(), 30, action, Modifiers::empty())
    }

    #[test]
    fn test_press_and_release_track_held_keys() {
        let mut keyboard = Keyboard::new();
        let mut queue = EventQueue::new();
        queue.push_key_press(key(KeyCode::W, Action::Press));
        queue.push_key_press(key(KeyCode::W, Action::Release));

        assert!(keyboard.poll(&mut queue));
        assert_eq!(keyboard.event_key_code(), Some(KeyCode::W));
        assert!(keyboard.event_key_state());
        assert!(keyboard.is_key_down(KeyCode::W.to_raw()));

        assert!(keyboard.poll(&mut queue));
        assert!(!keyboard.event_key_state());
        assert!(!keyboard.is_key_down(KeyCode::W.to_raw()));

        assert!(!keyboard.poll(&mut queue));
    }

    #[test]
    fn test_repeat_suppressed_by_default() {
        let mut keyboard = Keyboard::new();
        let mut queue = EventQueue::new();
        queue.push_key_press(key(KeyCode::Space, Action::Repeat));

        assert!(keyboard.poll(&mut queue));
        assert_eq!(keyboard.event_key(), None);
        assert!(keyboard.is_key_down(KeyCode::Space.to_raw()));
    }

    #[test]
    fn test_repeat_reported_when_enabled() {
        let mut keyboard = Keyboard::with_config(&InputConfig::default().with_repeat_events(true));
        let mut queue = EventQueue::new();
        queue.push_key_press(key(KeyCode::Backspace, Action::Repeat));

        assert!(keyboard.poll(&mut queue));
        assert_eq!(keyboard.event_key_code(), Some(KeyCode::Backspace));
        assert!(keyboard.event_key_state());
        assert!(keyboard.is_repeat_event());
    }

    #[test]
    fn test_character_is_edge_triggered() {
        let mut keyboard = Keyboard::new();
        let mut queue = EventQueue::new();
        queue.push_key_char(KeyCharEvent::new('q'));
        queue.push_key_press(key(KeyCode::Q, Action::Press));
        queue.push_key_press(key(KeyCode::Q, Action::Release));

        assert!(keyboard.poll(&mut queue));
        assert_eq!(keyboard.event_character(), Some('q'));

        assert!(keyboard.poll(&mut queue));
        assert_eq!(keyboard.event_character(), None);
        assert_eq!(keyboard.event_key_code(), Some(KeyCode::Q));
    }
}
