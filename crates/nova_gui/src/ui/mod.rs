//! GUI System Module
//!
//! Turns the managed GUI's draw calls into per-texture geometry for the native
//! renderer.
//!
//! Architecture:
//! - FrameDriver: per-frame change detection, rebuild and flush
//! - rendering/: geometry batches, batch registry, command marshalling
//! - backend: the command sink the native renderer implements
//! - screen: screen trait, pointer conversion, native screen description

pub mod manager;
pub mod backend;
pub mod rendering;
pub mod screen;
pub mod texture;

#[cfg(test)]
mod tests;

pub use manager::{FrameDriver, FrameOutcome, FrameState, FrameStats};
pub use backend::{GuiCommandSink, CommandRecorder};
pub use texture::TextureId;

// Re-export rendering types
pub use rendering::{
    BatchRegistry, GeometryBatch, GuiBufferCommand, GuiVertex,
    QUAD_INDICES, VERTEX_STRIDE,
};

// Re-export screen types
pub use screen::{
    GuiScreen, GuiScreenDescription, GuiButtonDescription,
    PointerPosition, ScreenMetrics, MAX_GUI_BUTTONS,
};
