//! Frame Driver
//!
//! Runs the per-frame GUI cycle: resolve the pointer, ask the active screen
//! whether it changed, and only then rebuild and send its geometry.
//!
//! Geometry is rebuilt on state changes, never on every frame. A frame whose
//! screen is unchanged touches neither the batches nor the native side.

use super::backend::GuiCommandSink;
use super::rendering::BatchRegistry;
use super::screen::{GuiScreen, PointerPosition, ScreenMetrics};
use crate::core::config::GuiConfig;
use crate::error::BridgeResult;
use crate::input::Mouse;

/// Whether the GUI geometry has to be rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Native side holds current geometry
    Stable,
    /// Geometry must be rebuilt and sent
    Dirty,
}

/// What a call to [`FrameDriver::render_frame`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Screen unchanged; nothing was drawn or sent
    Unchanged,
    /// Geometry rebuilt and sent
    Flushed {
        /// Commands sent, one per texture
        commands: usize,
    },
    /// Sending stopped on an allocation failure; the next frame rebuilds
    Deferred,
}

/// Counters for the frame driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames seen
    pub frames: u64,
    /// Frames that rebuilt geometry
    pub rebuilds: u64,
    /// Commands sent to the native side
    pub commands_sent: u64,
    /// Flushes cut short by allocation failures
    pub aborted_flushes: u64,
}

/// Owns the frame's batches and decides when to rebuild them
#[derive(Debug)]
pub struct FrameDriver {
    batches: BatchRegistry,
    state: FrameState,
    pointer: PointerPosition,
    stats: FrameStats,
}

impl FrameDriver {
    /// Create a frame driver with the default GUI configuration
    pub fn new() -> Self {
        Self::with_config(&GuiConfig::default())
    }

    /// Create a frame driver for the given GUI configuration
    pub fn with_config(config: &GuiConfig) -> Self {
        Self {
            batches: BatchRegistry::with_config(config),
            state: FrameState::Stable,
            pointer: PointerPosition::default(),
            stats: FrameStats::default(),
        }
    }

    /// Force a rebuild on the next frame (window resize, screen switch)
    pub fn mark_dirty(&mut self) {
        self.state = FrameState::Dirty;
    }

    /// Current state
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Pointer position resolved for the most recent frame
    pub fn pointer(&self) -> PointerPosition {
        self.pointer
    }

    /// Frame counters
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Run one frame
    ///
    /// The pointer is taken from the mouse's last polled position without
    /// polling, so input events stay with the caller's own event loop.
    ///
    /// Allocation failures while sending are absorbed: the rest of the flush is
    /// skipped, the driver stays dirty and [`FrameOutcome::Deferred`] is
    /// returned. Any other error leaves the driver dirty and is returned.
    pub fn render_frame(
        &mut self,
        screen: &mut dyn GuiScreen,
        mouse: &Mouse,
        metrics: &ScreenMetrics,
        sink: &mut dyn GuiCommandSink,
    ) -> BridgeResult<FrameOutcome> {
        self.stats.frames += 1;
        self.pointer = metrics.pointer_position(mouse.event_x(), mouse.event_y());

        if screen.check_state_changed(self.pointer) {
            self.state = FrameState::Dirty;
        }

        if self.state == FrameState::Stable {
            return Ok(FrameOutcome::Unchanged);
        }

        self.stats.rebuilds += 1;
        self.batches.clear(sink);
        screen.draw(&mut self.batches, self.pointer)?;

        match self.batches.flush_all(sink) {
            Ok(commands) => {
                self.state = FrameState::Stable;
                self.stats.commands_sent += commands as u64;
                Ok(FrameOutcome::Flushed { commands })
            }
            Err(err) if err.is_transient() => {
                log::warn!("GUI flush aborted, rebuilding next frame: {}", err);
                self.stats.aborted_flushes += 1;
                Ok(FrameOutcome::Deferred)
            }
            Err(err) => Err(err),
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
