//! Vertex type for GUI geometry

/// Number of scalars in one flattened vertex (x, y, z, u, v)
pub const VERTEX_STRIDE: usize = 5;

/// GUI vertex with screen position and texture coordinates
///
/// The field order is the wire layout: x, y, z, u, v as consecutive `f32`s.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GuiVertex {
    /// Position in screen pixels; z is 0 for flat GUI geometry
    pub position: [f32; 3],
    /// Texture coordinates in [0, 1]
    pub uv: [f32; 2],
}

// SAFETY: five f32 fields, no padding, every bit pattern valid
unsafe impl bytemuck::Pod for GuiVertex {}
unsafe impl bytemuck::Zeroable for GuiVertex {}

impl GuiVertex {
    /// Create a flat vertex (z = 0)
    pub fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self::with_depth(x, y, 0.0, u, v)
    }

    /// Create a vertex with an explicit depth
    pub fn with_depth(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, z],
            uv: [u, v],
        }
    }

    /// Flatten vertices into x,y,z,u,v scalars without copying
    pub fn flatten(vertices: &[GuiVertex]) -> &[f32] {
        bytemuck::cast_slice(vertices)
    }
}
