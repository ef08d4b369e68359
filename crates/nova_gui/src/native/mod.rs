//! Native renderer boundary
//!
//! C layouts of the renderer's GUI and input interface, and a loader that binds
//! them from the renderer's shared library.

pub mod ffi;
pub mod library;

pub use library::NativeLibrary;
