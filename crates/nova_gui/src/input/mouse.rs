//! Mouse state built from polled native events
//!
//! Every [`Mouse::poll`] takes at most one button event and one position event.
//! Button information is edge-triggered: it describes only the event drained by
//! the latest poll and is cleared by a poll that drains no button event.
//! Movement is accumulated until read through [`Mouse::dx`] / [`Mouse::dy`].

use super::events::{Action, Modifiers};
use super::source::InputEventSource;
use super::MouseButton;

/// Number of addressable mouse buttons
pub const BUTTON_COUNT: usize = 16;

/// Polled mouse state
#[derive(Debug, Clone)]
pub struct Mouse {
    /// Unread movement since the last `dx` read
    dx: i32,
    /// Unread movement since the last `dy` read
    dy: i32,
    /// Unread wheel movement
    dwheel: i32,

    /// Last absolute position
    event_x: i32,
    event_y: i32,
    /// Whether any position event has been seen yet
    has_position: bool,

    /// Button of the latest poll's button event
    event_button: Option<i32>,
    event_state: bool,
    event_modifiers: Modifiers,

    grabbed: bool,
    button_names: Vec<String>,
}

impl Mouse {
    /// Create mouse state with the button name table
    pub fn new() -> Self {
        Self {
            dx: 0,
            dy: 0,
            dwheel: 0,
            event_x: 0,
            event_y: 0,
            has_position: false,
            event_button: None,
            event_state: false,
            event_modifiers: Modifiers::empty(),
            grabbed: false,
            button_names: (0..BUTTON_COUNT).map(|i| format!("BUTTON{i}")).collect(),
        }
    }

    /// Drain one button event and one position event
    ///
    /// Returns `false` without touching any state when both queues are empty.
    /// The first position event ever seen only records the position.
    pub fn poll(&mut self, source: &mut dyn InputEventSource) -> bool {
        let button = source.next_mouse_button_event();
        let position = source.next_mouse_position_event();

        if !button.is_filled() && !position.is_filled() {
            return false;
        }

        if button.is_filled() {
            self.event_button = Some(button.button);
            self.event_state = button.action() == Some(Action::Press);
            self.event_modifiers = button.modifiers();
            log::trace!(
                "Mouse button {} action {} mods {:?}",
                button.button,
                button.action,
                self.event_modifiers
            );
        } else {
            self.event_button = None;
            self.event_state = false;
            self.event_modifiers = Modifiers::empty();
        }

        if position.is_filled() {
            if self.has_position {
                // Positions come from the native side; saturate instead of overflowing
                let dx = position.xpos.saturating_sub(self.event_x);
                let dy = position.ypos.saturating_sub(self.event_y);
                self.dx = self.dx.saturating_add(dx);
                self.dy = self.dy.saturating_add(dy);
            }
            self.event_x = position.xpos;
            self.event_y = position.ypos;
            self.has_position = true;
        }

        true
    }

    /// Button of the latest poll's button event
    pub fn event_button(&self) -> Option<i32> {
        self.event_button
    }

    /// Latest poll's button as a named button
    pub fn event_mouse_button(&self) -> Option<MouseButton> {
        self.event_button.and_then(MouseButton::from_index)
    }

    /// Whether the latest poll's button event was a press
    pub fn event_button_state(&self) -> bool {
        self.event_state
    }

    /// Modifiers of the latest poll's button event
    pub fn event_modifiers(&self) -> Modifiers {
        self.event_modifiers
    }

    /// Last known horizontal position, without polling
    pub fn event_x(&self) -> i32 {
        self.event_x
    }

    /// Last known vertical position, without polling
    pub fn event_y(&self) -> i32 {
        self.event_y
    }

    /// Poll once, then return the horizontal position
    ///
    /// This drains an event pair; button events drained here are visible
    /// through the event accessors until the next poll.
    pub fn x(&mut self, source: &mut dyn InputEventSource) -> i32 {
        self.poll(source);
        self.event_x
    }

    /// Poll once, then return the vertical position
    pub fn y(&mut self, source: &mut dyn InputEventSource) -> i32 {
        self.poll(source);
        self.event_y
    }

    /// Take the accumulated horizontal movement
    pub fn dx(&mut self) -> i32 {
        std::mem::take(&mut self.dx)
    }

    /// Take the accumulated vertical movement
    pub fn dy(&mut self) -> i32 {
        std::mem::take(&mut self.dy)
    }

    /// Take the accumulated wheel movement
    ///
    /// The native side reports no wheel events, so this stays zero.
    pub fn dwheel(&mut self) -> i32 {
        std::mem::take(&mut self.dwheel)
    }

    /// Whether a wheel is reported
    pub fn has_wheel(&self) -> bool {
        false
    }

    /// Number of addressable buttons
    pub fn button_count(&self) -> usize {
        BUTTON_COUNT
    }

    /// Name of a button index
    pub fn button_name(&self, index: usize) -> Option<&str> {
        self.button_names.get(index).map(String::as_str)
    }

    /// Index of a button name
    pub fn button_index(&self, name: &str) -> Option<usize> {
        self.button_names.iter().position(|n| n == name)
    }

    /// Record whether the cursor is grabbed by the window
    pub fn set_grabbed(&mut self, grabbed: bool) {
        self.grabbed = grabbed;
    }

    /// Whether the cursor is grabbed
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::{MouseButtonEvent, MousePositionEvent};
    use crate::input::source::EventQueue;

    fn press(button: i32) -> MouseButtonEvent {
        MouseButtonEvent::new(button, Action::Press, Modifiers::empty())
    }

    #[test]
    fn test_poll_on_empty_queues_changes_nothing() {
        let mut mouse = Mouse::new();
        let mut queue = EventQueue::new();
        queue.push_mouse_button(press(1));
        assert!(mouse.poll(&mut queue));

        assert!(!mouse.poll(&mut queue));
        assert_eq!(mouse.event_button(), Some(1));
        assert!(mouse.event_button_state());
    }

    #[test]
    fn test_deltas_accumulate_until_read() {
        let mut mouse = Mouse::new();
        let mut queue = EventQueue::new();
        for (x, y) in [(10, 10), (12, 15), (8, 9)] {
            queue.push_mouse_position(MousePositionEvent::new(x, y));
        }

        while mouse.poll(&mut queue) {}

        assert_eq!(mouse.dx(), -2);
        assert_eq!(mouse.dx(), 0);
        assert_eq!(mouse.dy(), -1);
        assert_eq!(mouse.dy(), 0);
        assert_eq!((mouse.event_x(), mouse.event_y()), (8, 9));
    }

    #[test]
    fn test_extreme_positions_saturate() {
        let mut mouse = Mouse::new();
        let mut queue = EventQueue::new();
        for x in [i32::MIN, i32::MAX, i32::MIN, i32::MAX] {
            queue.push_mouse_position(MousePositionEvent::new(x, 0));
        }

        while mouse.poll(&mut queue) {}

        // Each delta clamps to the i32 range: MAX, then MIN, then MAX again
        assert_eq!(mouse.dx(), i32::MAX - 1);
        assert_eq!(mouse.event_x(), i32::MAX);
        assert_eq!(mouse.dy(), 0);
    }

    #[test]
    fn test_button_state_is_edge_triggered() {
        let mut mouse = Mouse::new();
        let mut queue = EventQueue::new();
        queue.push_mouse_button(press(0));
        queue.push_mouse_position(MousePositionEvent::new(5, 5));
        queue.push_mouse_position(MousePositionEvent::new(6, 5));

        assert!(mouse.poll(&mut queue));
        assert_eq!(mouse.event_button(), Some(0));
        assert_eq!(mouse.event_mouse_button(), Some(MouseButton::Left));
        assert!(mouse.event_button_state());

        // Only a position event this time: button info resets
        assert!(mouse.poll(&mut queue));
        assert_eq!(mouse.event_button(), None);
        assert!(!mouse.event_button_state());
    }

    #[test]
    fn test_release_is_not_pressed() {
        let mut mouse = Mouse::new();
        let mut queue = EventQueue::new();
        queue.push_mouse_button(MouseButtonEvent::new(1, Action::Release, Modifiers::SHIFT));

        assert!(mouse.poll(&mut queue));
        assert_eq!(mouse.event_button(), Some(1));
        assert!(!mouse.event_button_state());
        assert_eq!(mouse.event_modifiers(), Modifiers::SHIFT);
    }

    #[test]
    fn test_x_polls_implicitly() {
        let mut mouse = Mouse::new();
        let mut queue = EventQueue::new();
        queue.push_mouse_position(MousePositionEvent::new(100, 50));
        queue.push_mouse_position(MousePositionEvent::new(110, 40));

        assert_eq!(mouse.x(&mut queue), 100);
        assert_eq!(mouse.y(&mut queue), 40);
        // Queues empty: last known values
        assert_eq!(mouse.x(&mut queue), 110);
        assert_eq!(mouse.dx(), 10);
    }

    #[test]
    fn test_button_names() {
        let mouse = Mouse::new();
        assert_eq!(mouse.button_name(0), Some("BUTTON0"));
        assert_eq!(mouse.button_name(15), Some("BUTTON15"));
        assert_eq!(mouse.button_name(16), None);
        assert_eq!(mouse.button_index("BUTTON3"), Some(3));
        assert_eq!(mouse.button_index("BUTTON16"), None);
        assert_eq!(mouse.button_count(), 16);
    }

    #[test]
    fn test_grab_and_wheel() {
        let mut mouse = Mouse::new();
        assert!(!mouse.is_grabbed());
        mouse.set_grabbed(true);
        assert!(mouse.is_grabbed());
        assert!(!mouse.has_wheel());
        assert_eq!(mouse.dwheel(), 0);
    }
}
