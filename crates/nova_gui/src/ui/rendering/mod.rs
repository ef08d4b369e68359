//! GUI rendering module
//!
//! Batching of GUI geometry by texture and marshalling into native commands

pub mod vertex;
pub mod batch;
pub mod commands;
pub mod registry;

// Re-export commonly used types
pub use vertex::{GuiVertex, VERTEX_STRIDE};
pub use batch::GeometryBatch;
pub use commands::{GuiBufferCommand, to_command};
pub use registry::{BatchRegistry, QUAD_INDICES};
