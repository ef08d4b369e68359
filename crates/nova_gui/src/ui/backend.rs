//! GUI Command Sink
//!
//! Defines the interface between GUI batching and the native renderer.
//! Keeps the batching code independent of how commands actually cross the
//! process boundary.

use crate::error::BridgeResult;
use crate::ui::rendering::GuiBufferCommand;
use crate::ui::screen::GuiScreenDescription;

/// Receiver of GUI commands on the native side
///
/// Calls are synchronous and must not re-enter the batching code. Borrowed
/// command data is only valid for the duration of the call; implementations
/// copy whatever they need to keep.
pub trait GuiCommandSink {
    /// Drop last frame's GUI geometry
    ///
    /// Fire-and-forget; there is nothing to wait for.
    fn clear_gui_buffers(&mut self);

    /// Upload the geometry for one texture
    fn send_gui_buffer_command(&mut self, command: &GuiBufferCommand) -> BridgeResult<()>;

    /// Replace the native description of the active GUI screen
    fn send_change_gui_screen_command(&mut self, screen: &GuiScreenDescription) -> BridgeResult<()>;
}

/// In-memory sink that keeps copies of everything it receives
///
/// Useful for headless runs and for checking what a frame produced.
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    commands: Vec<GuiBufferCommand>,
    clears: usize,
    screens: Vec<GuiScreenDescription>,
}

impl CommandRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far
    pub fn commands(&self) -> &[GuiBufferCommand] {
        &self.commands
    }

    /// Number of clear notifications received
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Screen descriptions received so far
    pub fn screens(&self) -> &[GuiScreenDescription] {
        &self.screens
    }

    /// Forget everything recorded
    pub fn reset(&mut self) {
        self.commands.clear();
        self.clears = 0;
        self.screens.clear();
    }
}

impl GuiCommandSink for CommandRecorder {
    fn clear_gui_buffers(&mut self) {
        self.clears += 1;
    }

    fn send_gui_buffer_command(&mut self, command: &GuiBufferCommand) -> BridgeResult<()> {
        self.commands.push(command.clone());
        Ok(())
    }

    fn send_change_gui_screen_command(&mut self, screen: &GuiScreenDescription) -> BridgeResult<()> {
        screen.validate()?;
        self.screens.push(screen.clone());
        Ok(())
    }
}
