//! Error types shared across the bridge
//!
//! Validation problems in caller-supplied geometry are reported as [`DrawError`];
//! everything that can go wrong between the managed side and the native renderer
//! is folded into [`BridgeError`].

use crate::config::ConfigError;
use thiserror::Error;

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Rejected draw input
///
/// These are caller programming errors. The batch a rejected call targeted is
/// left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Vertex scalars do not divide into whole x,y,z,u,v vertices
    #[error("vertex buffer holds {len} scalars, which is not a multiple of {stride}")]
    PartialVertex {
        /// Number of scalars supplied
        len: usize,
        /// Scalars per vertex
        stride: usize,
    },

    /// An index points past the vertices supplied with the same call
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value
        index: u32,
        /// Position of the index inside the call's index list
        position: usize,
        /// Number of vertices supplied with the call
        vertex_count: usize,
    },

    /// The batch would hold more vertices than a 32-bit index can address
    #[error("batch would grow to {vertex_count} vertices, beyond 32-bit index range")]
    IndexOverflow {
        /// Vertex count after the rejected call
        vertex_count: usize,
    },
}

/// Errors raised by the batching, marshalling and native boundary layers
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Invalid draw input
    #[error("invalid draw call for texture '{texture}': {source}")]
    Draw {
        /// Texture the draw targeted
        texture: String,
        /// Validation failure
        #[source]
        source: DrawError,
    },

    /// Raw buffer allocation failed while building a command
    #[error("failed to allocate {requested} elements for the '{texture}' {buffer} buffer")]
    Allocation {
        /// Texture whose command was being built
        texture: String,
        /// Which buffer failed ("index" or "vertex")
        buffer: &'static str,
        /// Requested element count
        requested: usize,
    },

    /// A buffer is longer than the 32-bit size field of the wire format allows
    #[error("{buffer} buffer for '{texture}' has {len} elements, exceeding the native size limit")]
    BufferTooLarge {
        /// Texture whose command was being built
        texture: String,
        /// Which buffer overflowed
        buffer: &'static str,
        /// Element count
        len: usize,
    },

    /// A string cannot be represented as a C string
    #[error("string '{0}' contains an interior NUL byte")]
    InvalidString(String),

    /// Texture identity could not be parsed
    #[error("invalid texture identity '{0}'")]
    InvalidTexture(String),

    /// GUI screen description exceeds the fixed native button array
    #[error("screen has {count} buttons but the native layout holds at most {capacity}")]
    TooManyButtons {
        /// Buttons supplied
        count: usize,
        /// Native capacity
        capacity: usize,
    },

    /// Native renderer library could not be loaded or is missing symbols
    #[error("native boundary unavailable: {0}")]
    BoundaryUnavailable(String),

    /// The native side rejected or failed a call
    #[error("native boundary call failed: {0}")]
    Boundary(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// Whether this error only affects the current frame
    ///
    /// Allocation failures are retried by rebuilding on the next frame; every
    /// other error is reported to the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Allocation { .. })
    }
}
