//! C layouts of the native renderer's GUI interface
//!
//! Field order and widths here are the wire contract with the renderer. Boolean
//! fields are 32-bit integers on that side.
//!
//! Pointers in these structs borrow from Rust-owned data. The helpers below only
//! hand them out inside a closure, so the borrowed data outlives every use; the
//! renderer must copy anything it keeps past the call.

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use crate::error::{BridgeError, BridgeResult};
use crate::input::{KeyCharEvent, KeyPressEvent, MouseButtonEvent, MousePositionEvent};
use crate::ui::rendering::GuiBufferCommand;
use crate::ui::screen::{GuiScreenDescription, MAX_GUI_BUTTONS};

/// `mc_gui_send_buffer_command`
#[repr(C)]
#[derive(Debug)]
pub struct RawGuiBufferCommand {
    /// Texture name, NUL terminated
    pub texture_name: *const c_char,
    /// Number of indices
    pub index_buffer_size: i32,
    /// Number of vertex scalars
    pub vertex_buffer_size: i32,
    /// Index data
    pub index_buffer: *const i32,
    /// Vertex data
    pub vertex_buffer: *const f32,
}

/// `mc_gui_button`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawGuiButton {
    /// Left edge
    pub x_position: i32,
    /// Top edge
    pub y_position: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
    /// Label, NUL terminated; null in unused slots
    pub text: *const c_char,
    /// Non-zero while pressed
    pub is_pressed: i32,
    /// Non-zero when enabled
    pub enabled: i32,
}

impl RawGuiButton {
    const EMPTY: Self = Self {
        x_position: 0,
        y_position: 0,
        width: 0,
        height: 0,
        text: ptr::null(),
        is_pressed: 0,
        enabled: 0,
    };
}

/// `mc_gui_screen`
#[repr(C)]
#[derive(Debug)]
pub struct RawGuiScreen {
    /// Fixed button slots; only the first `num_buttons` are meaningful
    pub buttons: [RawGuiButton; MAX_GUI_BUTTONS],
    /// Number of used slots
    pub num_buttons: i32,
}

/// `mc_set_gui_screen_command`
#[repr(C)]
#[derive(Debug)]
pub struct RawSetGuiScreenCommand {
    /// New screen
    pub screen: RawGuiScreen,
}

/// `void f(void)`
pub type VoidFn = unsafe extern "C" fn();
/// `int should_close(void)`
pub type ShouldCloseFn = unsafe extern "C" fn() -> i32;
/// `void send_gui_buffer_command(mc_gui_send_buffer_command*)`
pub type SendGuiBufferCommandFn = unsafe extern "C" fn(*const RawGuiBufferCommand);
/// `void send_change_gui_screen_command(mc_set_gui_screen_command*)`
pub type SendChangeGuiScreenCommandFn = unsafe extern "C" fn(*const RawSetGuiScreenCommand);
/// `mouse_button_event get_next_mouse_button_event(void)`
pub type NextMouseButtonEventFn = unsafe extern "C" fn() -> MouseButtonEvent;
/// `mouse_position_event get_next_mouse_position_event(void)`
pub type NextMousePositionEventFn = unsafe extern "C" fn() -> MousePositionEvent;
/// `key_press_event get_next_key_press_event(void)`
pub type NextKeyPressEventFn = unsafe extern "C" fn() -> KeyPressEvent;
/// `key_char_event get_next_key_char_event(void)`
pub type NextKeyCharEventFn = unsafe extern "C" fn() -> KeyCharEvent;

fn c_string(text: &str) -> BridgeResult<CString> {
    CString::new(text).map_err(|_| BridgeError::InvalidString(text.to_string()))
}

/// Run `f` with a C view of `command`
pub fn with_raw_command<R>(
    command: &GuiBufferCommand,
    f: impl FnOnce(&RawGuiBufferCommand) -> R,
) -> BridgeResult<R> {
    let texture_name = c_string(command.texture_name())?;
    let raw = RawGuiBufferCommand {
        texture_name: texture_name.as_ptr(),
        index_buffer_size: command.index_buffer_size(),
        vertex_buffer_size: command.vertex_buffer_size(),
        index_buffer: command.index_buffer().as_ptr(),
        vertex_buffer: command.vertex_buffer().as_ptr(),
    };
    Ok(f(&raw))
}

/// Run `f` with a C view of `screen`
///
/// The button count is checked against the fixed slot count first.
pub fn with_raw_screen<R>(
    screen: &GuiScreenDescription,
    f: impl FnOnce(&RawSetGuiScreenCommand) -> R,
) -> BridgeResult<R> {
    screen.validate()?;

    let labels = screen
        .buttons()
        .iter()
        .map(|button| c_string(&button.text))
        .collect::<BridgeResult<Vec<_>>>()?;

    let mut buttons = [RawGuiButton::EMPTY; MAX_GUI_BUTTONS];
    for ((slot, button), label) in buttons.iter_mut().zip(screen.buttons()).zip(&labels) {
        *slot = RawGuiButton {
            x_position: button.x,
            y_position: button.y,
            width: button.width,
            height: button.height,
            text: label.as_ptr(),
            is_pressed: i32::from(button.pressed),
            enabled: i32::from(button.enabled),
        };
    }

    let raw = RawSetGuiScreenCommand {
        screen: RawGuiScreen {
            buttons,
            // Bounded by MAX_GUI_BUTTONS
            num_buttons: screen.button_count() as i32,
        },
    };
    Ok(f(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::rendering::{to_command, GeometryBatch};
    use crate::ui::screen::GuiButtonDescription;
    use crate::ui::TextureId;
    use std::ffi::CStr;

    #[test]
    fn test_raw_command_views_owned_buffers() {
        let mut batch = GeometryBatch::new();
        batch.add(&[0, 0, 1], &[1.0, 2.0, 0.0, 0.0, 0.0, 3.0, 4.0, 0.0, 1.0, 1.0]).unwrap();
        let command = to_command(&TextureId::new("minecraft", "textures/gui/widgets.png"), &batch).unwrap();

        let (name, indices, vertices) = with_raw_command(&command, |raw| {
            // SAFETY: pointers borrow from `command` and the CString, both alive here
            unsafe {
                (
                    CStr::from_ptr(raw.texture_name).to_str().unwrap().to_string(),
                    std::slice::from_raw_parts(raw.index_buffer, raw.index_buffer_size as usize).to_vec(),
                    std::slice::from_raw_parts(raw.vertex_buffer, raw.vertex_buffer_size as usize).to_vec(),
                )
            }
        })
        .unwrap();

        assert_eq!(name, "textures/gui/widgets.png");
        assert_eq!(indices, command.index_buffer());
        assert_eq!(vertices, command.vertex_buffer());
    }

    #[test]
    fn test_raw_screen_fills_used_slots() {
        let screen = GuiScreenDescription::try_from(vec![
            GuiButtonDescription::new(10, 20, 200, 20, "Options").with_pressed(true),
            GuiButtonDescription::new(10, 44, 200, 20, "Quit").with_enabled(false),
        ])
        .unwrap();

        let (count, first_pressed, second_enabled, label, spare_is_null) =
            with_raw_screen(&screen, |raw| {
                let buttons = &raw.screen.buttons;
                // SAFETY: label pointer borrows from a CString alive for the closure
                let label = unsafe { CStr::from_ptr(buttons[1].text) }.to_str().unwrap().to_string();
                (
                    raw.screen.num_buttons,
                    buttons[0].is_pressed,
                    buttons[1].enabled,
                    label,
                    buttons[2].text.is_null(),
                )
            })
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(first_pressed, 1);
        assert_eq!(second_enabled, 0);
        assert_eq!(label, "Quit");
        assert!(spare_is_null);
    }

    #[test]
    fn test_interior_nul_rejected() {
        let screen = GuiScreenDescription::try_from(vec![GuiButtonDescription::new(0, 0, 1, 1, "a\0b")]).unwrap();
        let result = with_raw_screen(&screen, |_| ());
        assert!(matches!(result, Err(BridgeError::InvalidString(_))));
    }
}
