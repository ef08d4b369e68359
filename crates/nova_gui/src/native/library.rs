//! Dynamically loaded native renderer
//!
//! All symbols are resolved when the library is loaded, so a missing or
//! incompatible renderer is reported once at startup rather than on first use.

use std::path::{Path, PathBuf};

use libloading::Library;

use super::ffi::{
    self, NextKeyCharEventFn, NextKeyPressEventFn, NextMouseButtonEventFn,
    NextMousePositionEventFn, SendChangeGuiScreenCommandFn, SendGuiBufferCommandFn,
    ShouldCloseFn, VoidFn,
};
use crate::core::config::NativeLibraryConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::input::{
    InputEventSource, KeyCharEvent, KeyPressEvent, MouseButtonEvent, MousePositionEvent,
};
use crate::ui::backend::GuiCommandSink;
use crate::ui::rendering::GuiBufferCommand;
use crate::ui::screen::GuiScreenDescription;

/// Resolved entry points
#[derive(Clone, Copy)]
struct NativeApi {
    initialize: VoidFn,
    execute_frame: VoidFn,
    should_close: ShouldCloseFn,
    clear_gui_buffers: VoidFn,
    send_gui_buffer_command: SendGuiBufferCommandFn,
    send_change_gui_screen_command: SendChangeGuiScreenCommandFn,
    get_next_mouse_button_event: NextMouseButtonEventFn,
    get_next_mouse_position_event: NextMousePositionEventFn,
    get_next_key_press_event: NextKeyPressEventFn,
    get_next_key_char_event: NextKeyCharEventFn,
}

/// Copy a function pointer out of the library
///
/// # Safety
/// `T` must match the symbol's real signature.
unsafe fn symbol<T: Copy>(library: &Library, name: &str) -> BridgeResult<T> {
    let symbol = library
        .get::<T>(name.as_bytes())
        .map_err(|e| BridgeError::BoundaryUnavailable(format!("missing symbol '{name}': {e}")))?;
    Ok(*symbol)
}

impl NativeApi {
    /// # Safety
    /// The library must export the renderer's GUI interface with the
    /// signatures declared in [`ffi`].
    unsafe fn resolve(library: &Library) -> BridgeResult<Self> {
        Ok(Self {
            initialize: symbol(library, "initialize")?,
            execute_frame: symbol(library, "execute_frame")?,
            should_close: symbol(library, "should_close")?,
            clear_gui_buffers: symbol(library, "clear_gui_buffers")?,
            send_gui_buffer_command: symbol(library, "send_gui_buffer_command")?,
            send_change_gui_screen_command: symbol(library, "send_change_gui_screen_command")?,
            get_next_mouse_button_event: symbol(library, "get_next_mouse_button_event")?,
            get_next_mouse_position_event: symbol(library, "get_next_mouse_position_event")?,
            get_next_key_press_event: symbol(library, "get_next_key_press_event")?,
            get_next_key_char_event: symbol(library, "get_next_key_char_event")?,
        })
    }
}

/// The native renderer, loaded from a shared library
///
/// Implements both the GUI command sink and the input event source. Calls are
/// synchronous; the renderer is expected to copy command data before returning.
pub struct NativeLibrary {
    api: NativeApi,
    path: PathBuf,
    // Keeps the code behind `api` mapped; must outlive every call through it
    _library: Library,
}

impl NativeLibrary {
    /// Load the renderer using the configured search paths
    pub fn load(config: &NativeLibraryConfig) -> BridgeResult<Self> {
        config.validate()?;

        let mut failures = Vec::new();
        for candidate in config.candidates() {
            match Self::load_from(&candidate) {
                Ok(library) => return Ok(library),
                Err(err) => {
                    log::debug!("Could not load {}: {}", candidate.display(), err);
                    failures.push(format!("{}: {}", candidate.display(), err));
                }
            }
        }

        Err(BridgeError::BoundaryUnavailable(format!(
            "could not load '{}' ({})",
            config.library_name,
            failures.join("; ")
        )))
    }

    /// Load the renderer from an explicit path
    pub fn load_from(path: &Path) -> BridgeResult<Self> {
        // SAFETY: loading runs the library's initializers; the renderer library
        // has none with preconditions on the host
        let library = unsafe { Library::new(path) }
            .map_err(|e| BridgeError::BoundaryUnavailable(e.to_string()))?;
        // SAFETY: signatures in `ffi` mirror the renderer's exported interface
        let api = unsafe { NativeApi::resolve(&library) }?;

        log::info!("Loaded native renderer from {}", path.display());
        Ok(Self {
            api,
            path: path.to_path_buf(),
            _library: library,
        })
    }

    /// Path the library was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start the renderer
    pub fn initialize(&mut self) {
        // SAFETY: resolved from the loaded library, which is still mapped
        unsafe { (self.api.initialize)() }
    }

    /// Render one frame
    pub fn execute_frame(&mut self) {
        // SAFETY: as above
        unsafe { (self.api.execute_frame)() }
    }

    /// Whether the renderer's window was asked to close
    pub fn should_close(&self) -> bool {
        // SAFETY: as above
        unsafe { (self.api.should_close)() != 0 }
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary").field("path", &self.path).finish()
    }
}

impl GuiCommandSink for NativeLibrary {
    fn clear_gui_buffers(&mut self) {
        // SAFETY: no arguments; library still mapped
        unsafe { (self.api.clear_gui_buffers)() }
    }

    fn send_gui_buffer_command(&mut self, command: &GuiBufferCommand) -> BridgeResult<()> {
        let send = self.api.send_gui_buffer_command;
        ffi::with_raw_command(command, |raw| {
            // SAFETY: `raw` and everything it points to is alive for this call;
            // the renderer copies the buffers before returning
            unsafe { send(raw) }
        })
    }

    fn send_change_gui_screen_command(&mut self, screen: &GuiScreenDescription) -> BridgeResult<()> {
        let send = self.api.send_change_gui_screen_command;
        ffi::with_raw_screen(screen, |raw| {
            // SAFETY: as for buffer commands
            unsafe { send(raw) }
        })
    }
}

impl InputEventSource for NativeLibrary {
    fn next_mouse_button_event(&mut self) -> MouseButtonEvent {
        // SAFETY: returns a plain struct by value
        unsafe { (self.api.get_next_mouse_button_event)() }
    }

    fn next_mouse_position_event(&mut self) -> MousePositionEvent {
        // SAFETY: as above
        unsafe { (self.api.get_next_mouse_position_event)() }
    }

    fn next_key_press_event(&mut self) -> KeyPressEvent {
        // SAFETY: as above
        unsafe { (self.api.get_next_key_press_event)() }
    }

    fn next_key_char_event(&mut self) -> KeyCharEvent {
        // SAFETY: as above
        unsafe { (self.api.get_next_key_char_event)() }
    }
}
