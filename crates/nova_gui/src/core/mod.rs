//! # Core Module
//!
//! Shared configuration used by every subsystem of the bridge.
//!
//! ## Organization
//!
//! - **Config**: Native library, GUI batching and input configuration
//! - **Foundation**: Logging setup

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    BridgeConfig,
    NativeLibraryConfig,
    GuiConfig,
    InputConfig,
    Config,
    ConfigError,
};
