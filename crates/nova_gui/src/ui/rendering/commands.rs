//! # GUI Buffer Commands
//!
//! Flattening of a finished [`GeometryBatch`] into the command the native
//! renderer consumes.
//!
//! A command owns exactly-sized copies of the batch's buffers. It is built right
//! before it is handed to the boundary and dropped right after; the native side
//! may read the buffers only while the call that receives them is running.

use super::batch::GeometryBatch;
use crate::error::{BridgeError, BridgeResult};
use crate::ui::texture::TextureId;

/// Boundary-ready geometry for one texture
#[derive(Debug, Clone, PartialEq)]
pub struct GuiBufferCommand {
    texture_name: String,
    index_buffer: Vec<i32>,
    vertex_buffer: Vec<f32>,
}

impl GuiBufferCommand {
    /// Name of the texture the native renderer binds for this geometry
    pub fn texture_name(&self) -> &str {
        &self.texture_name
    }

    /// Index buffer as 32-bit signed integers
    pub fn index_buffer(&self) -> &[i32] {
        &self.index_buffer
    }

    /// Flattened x,y,z,u,v vertex scalars
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertex_buffer
    }

    /// Index buffer length as stamped into the wire struct
    pub fn index_buffer_size(&self) -> i32 {
        // Bounded at construction
        self.index_buffer.len() as i32
    }

    /// Vertex buffer length as stamped into the wire struct
    pub fn vertex_buffer_size(&self) -> i32 {
        self.vertex_buffer.len() as i32
    }
}

/// Marshal a batch into a command
///
/// Both buffers are reserved up front with their exact sizes, so an allocation
/// failure aborts before anything is copied and no partial command exists.
/// Indices are truncated to 32 bits.
pub fn to_command(texture: &TextureId, batch: &GeometryBatch) -> BridgeResult<GuiBufferCommand> {
    let index_count = checked_size(texture, "index", batch.index_count())?;
    let vertex_count = checked_size(texture, "vertex", batch.vertices().len())?;

    let mut index_buffer: Vec<i32> = reserve_exact(texture, "index", index_count)?;
    let mut vertex_buffer: Vec<f32> = reserve_exact(texture, "vertex", vertex_count)?;

    index_buffer.extend(batch.indices().iter().map(|&index| index as i32));
    vertex_buffer.extend_from_slice(batch.vertices());

    log::debug!(
        "Marshalled '{}': {} indices, {} vertex scalars",
        texture,
        index_buffer.len(),
        vertex_buffer.len()
    );

    Ok(GuiBufferCommand {
        texture_name: texture.native_name().to_string(),
        index_buffer,
        vertex_buffer,
    })
}

fn checked_size(texture: &TextureId, buffer: &'static str, len: usize) -> BridgeResult<usize> {
    if i32::try_from(len).is_err() {
        return Err(BridgeError::BufferTooLarge {
            texture: texture.to_string(),
            buffer,
            len,
        });
    }
    Ok(len)
}

fn reserve_exact<T>(texture: &TextureId, buffer: &'static str, len: usize) -> BridgeResult<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| BridgeError::Allocation {
            texture: texture.to_string(),
            buffer,
            requested: len,
        })?;
    Ok(values)
}
