//! GUI screens as seen by the frame driver
//!
//! The host UI framework owns its screens. The bridge only needs to ask a screen
//! whether it changed and to let it draw, plus the pointer position in the
//! screen's own scaled coordinate system.

use crate::error::{BridgeError, BridgeResult};
use crate::ui::rendering::BatchRegistry;

/// Maximum number of buttons in the native screen description
pub const MAX_GUI_BUTTONS: usize = 22;

/// Pointer position in scaled GUI coordinates, origin at the top-left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PointerPosition {
    /// Horizontal position
    pub x: i32,
    /// Vertical position, growing downwards
    pub y: i32,
}

/// Physical display size and the scaled GUI size laid over it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    /// Framebuffer width in pixels
    pub display_width: u32,
    /// Framebuffer height in pixels
    pub display_height: u32,
    /// GUI width in scaled units
    pub scaled_width: u32,
    /// GUI height in scaled units
    pub scaled_height: u32,
}

impl ScreenMetrics {
    /// Create screen metrics
    pub fn new(display_width: u32, display_height: u32, scaled_width: u32, scaled_height: u32) -> Self {
        Self {
            display_width,
            display_height,
            scaled_width,
            scaled_height,
        }
    }

    /// Convert a raw pointer position into scaled GUI coordinates
    ///
    /// Raw positions have their origin at the bottom-left, GUI coordinates at
    /// the top-left, so the vertical axis is flipped. Integer division truncates
    /// like the GUI layout code expects. A zero-sized display maps to the origin
    /// row/column.
    pub fn pointer_position(&self, raw_x: i32, raw_y: i32) -> PointerPosition {
        let scaled_width = i64::from(self.scaled_width);
        let scaled_height = i64::from(self.scaled_height);

        let x = if self.display_width == 0 {
            0
        } else {
            i64::from(raw_x) * scaled_width / i64::from(self.display_width)
        };
        let y_from_bottom = if self.display_height == 0 {
            0
        } else {
            i64::from(raw_y) * scaled_height / i64::from(self.display_height)
        };
        let y = scaled_height - y_from_bottom - 1;

        PointerPosition {
            x: clamp_to_i32(x),
            y: clamp_to_i32(y),
        }
    }
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// A GUI screen driven once per frame
pub trait GuiScreen {
    /// Whether anything visible or interactive changed since the previous frame
    ///
    /// Called every frame, before any drawing.
    fn check_state_changed(&mut self, pointer: PointerPosition) -> bool;

    /// Emit the screen's geometry into `batches`
    ///
    /// Only called on frames where the screen is rebuilt.
    fn draw(&mut self, batches: &mut BatchRegistry, pointer: PointerPosition) -> BridgeResult<()>;
}

/// Native description of one GUI button
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuiButtonDescription {
    /// Left edge in scaled units
    pub x: i32,
    /// Top edge in scaled units
    pub y: i32,
    /// Width in scaled units
    pub width: i32,
    /// Height in scaled units
    pub height: i32,
    /// Label
    pub text: String,
    /// Whether the button is held down
    pub pressed: bool,
    /// Whether the button accepts input
    pub enabled: bool,
}

impl GuiButtonDescription {
    /// Create an enabled, released button
    pub fn new(x: i32, y: i32, width: i32, height: i32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: text.into(),
            pressed: false,
            enabled: true,
        }
    }

    /// Set the pressed flag
    pub fn with_pressed(mut self, pressed: bool) -> Self {
        self.pressed = pressed;
        self
    }

    /// Set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether a scaled position lies inside the button
    pub fn contains(&self, pointer: PointerPosition) -> bool {
        pointer.x >= self.x
            && pointer.y >= self.y
            && pointer.x < self.x + self.width
            && pointer.y < self.y + self.height
    }
}

/// Native description of the active GUI screen
///
/// The native side stores buttons in a fixed array of [`MAX_GUI_BUTTONS`]
/// slots. Here they are an ordered list whose length is checked against that
/// capacity before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuiScreenDescription {
    buttons: Vec<GuiButtonDescription>,
}

impl GuiScreenDescription {
    /// Create an empty description
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a button
    pub fn push_button(&mut self, button: GuiButtonDescription) -> BridgeResult<()> {
        if self.buttons.len() >= MAX_GUI_BUTTONS {
            return Err(BridgeError::TooManyButtons {
                count: self.buttons.len() + 1,
                capacity: MAX_GUI_BUTTONS,
            });
        }
        self.buttons.push(button);
        Ok(())
    }

    /// Buttons in order
    pub fn buttons(&self) -> &[GuiButtonDescription] {
        &self.buttons
    }

    /// Number of buttons
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Check the button count against the native capacity
    pub fn validate(&self) -> BridgeResult<()> {
        if self.buttons.len() > MAX_GUI_BUTTONS {
            return Err(BridgeError::TooManyButtons {
                count: self.buttons.len(),
                capacity: MAX_GUI_BUTTONS,
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<GuiButtonDescription>> for GuiScreenDescription {
    type Error = BridgeError;

    fn try_from(buttons: Vec<GuiButtonDescription>) -> BridgeResult<Self> {
        let screen = Self { buttons };
        screen.validate()?;
        Ok(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_flips_vertical_axis() {
        // 854x480 window at GUI scale 2
        let metrics = ScreenMetrics::new(854, 480, 427, 240);

        assert_eq!(metrics.pointer_position(0, 0), PointerPosition { x: 0, y: 239 });
        assert_eq!(metrics.pointer_position(853, 479), PointerPosition { x: 426, y: 0 });
        assert_eq!(metrics.pointer_position(200, 100), PointerPosition { x: 100, y: 189 });
    }

    #[test]
    fn test_pointer_with_zero_display() {
        let metrics = ScreenMetrics::new(0, 0, 320, 240);
        assert_eq!(metrics.pointer_position(50, 50), PointerPosition { x: 0, y: 239 });
    }

    #[test]
    fn test_button_contains() {
        let button = GuiButtonDescription::new(10, 10, 200, 20, "Singleplayer");
        assert!(button.contains(PointerPosition { x: 10, y: 10 }));
        assert!(button.contains(PointerPosition { x: 209, y: 29 }));
        assert!(!button.contains(PointerPosition { x: 210, y: 15 }));
        assert!(!button.contains(PointerPosition { x: 50, y: 30 }));
    }

    #[test]
    fn test_screen_capacity_enforced() {
        let mut screen = GuiScreenDescription::new();
        for i in 0..MAX_GUI_BUTTONS as i32 {
            screen.push_button(GuiButtonDescription::new(0, i * 24, 200, 20, format!("Button {i}"))).unwrap();
        }
        let result = screen.push_button(GuiButtonDescription::new(0, 0, 1, 1, "overflow"));
        assert!(matches!(result, Err(BridgeError::TooManyButtons { count: 23, capacity: 22 })));
        assert_eq!(screen.button_count(), MAX_GUI_BUTTONS);

        let too_many = vec![GuiButtonDescription::default(); MAX_GUI_BUTTONS + 1];
        assert!(GuiScreenDescription::try_from(too_many).is_err());
    }
}
