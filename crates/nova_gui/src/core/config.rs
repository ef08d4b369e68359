//! # Bridge Configuration
//!
//! Configuration for the pieces that sit between the managed GUI and the native
//! renderer: where to find the renderer library, how GUI textures are named and
//! scaled, and how keyboard input is surfaced.
//!
//! All structures load from TOML or RON through the [`Config`] trait.

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

pub use crate::config::{Config, ConfigError};

/// Default file stem of the native renderer library
pub const DEFAULT_LIBRARY_NAME: &str = "nova-renderer";

/// # Native Library Configuration
///
/// Locates the renderer's shared library. The platform prefix and extension are
/// added to `library_name` (`libnova-renderer.so`, `nova-renderer.dll`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeLibraryConfig {
    /// Library name without platform prefix or extension
    pub library_name: String,
    /// Directories searched in order before falling back to the system loader
    pub search_paths: Vec<PathBuf>,
}

impl NativeLibraryConfig {
    /// Create a configuration for the named library
    pub fn new(library_name: impl Into<String>) -> Self {
        Self {
            library_name: library_name.into(),
            search_paths: Vec::new(),
        }
    }

    /// Add a search directory
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Platform specific file name of the library
    pub fn file_name(&self) -> String {
        format!(
            "{}{}{}",
            std::env::consts::DLL_PREFIX,
            self.library_name,
            std::env::consts::DLL_SUFFIX
        )
    }

    /// Candidate paths in load order
    ///
    /// Every search directory is tried first; the bare file name comes last so the
    /// system loader gets a chance at its own search path.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let file_name = self.file_name();
        let mut candidates: Vec<PathBuf> = self
            .search_paths
            .iter()
            .map(|dir| dir.join(&file_name))
            .collect();
        candidates.push(PathBuf::from(file_name));
        candidates
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library_name.is_empty() {
            return Err(ConfigError::Invalid("Library name cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for NativeLibraryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_NAME)
    }
}

/// # GUI Configuration
///
/// Texture naming and pixel-space conversion for GUI geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Namespace assumed for texture names without an explicit `namespace:` prefix
    pub default_namespace: String,
    /// Edge length in pixels of the source GUI textures
    ///
    /// Pixel texture coordinates are divided by this to obtain UVs.
    pub atlas_pixel_size: u32,
}

impl GuiConfig {
    /// Create the default GUI configuration
    pub fn new() -> Self {
        Self {
            default_namespace: "minecraft".to_string(),
            atlas_pixel_size: 256,
        }
    }

    /// Set the default texture namespace
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Set the source texture size in pixels
    pub fn with_atlas_pixel_size(mut self, size: u32) -> Self {
        self.atlas_pixel_size = size;
        self
    }

    /// Factor that maps a pixel texture coordinate to a UV coordinate
    ///
    /// A zero size is treated as 1 so the factor stays finite.
    pub fn uv_scale(&self) -> f32 {
        1.0 / self.atlas_pixel_size.max(1) as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_namespace.is_empty() {
            return Err(ConfigError::Invalid("Default namespace cannot be empty".to_string()));
        }
        if self.atlas_pixel_size == 0 {
            return Err(ConfigError::Invalid("Atlas pixel size must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Input Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Report key repeat events as key events
    ///
    /// When disabled a repeat still keeps the key held but does not show up as
    /// the current event key.
    pub repeat_events: bool,
}

impl InputConfig {
    /// Enable or disable key repeat events
    pub fn with_repeat_events(mut self, enabled: bool) -> Self {
        self.repeat_events = enabled;
        self
    }
}

/// # Complete Bridge Configuration
///
/// Top-level configuration applications load at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Native renderer library
    pub native: NativeLibraryConfig,
    /// GUI batching
    pub gui: GuiConfig,
    /// Input translation
    pub input: InputConfig,
}

impl BridgeConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the native library configuration
    pub fn with_native(mut self, native: NativeLibraryConfig) -> Self {
        self.native = native;
        self
    }

    /// Replace the GUI configuration
    pub fn with_gui(mut self, gui: GuiConfig) -> Self {
        self.gui = gui;
        self
    }

    /// Replace the input configuration
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.native.validate()?;
        self.gui.validate()?;
        Ok(())
    }
}

impl Config for BridgeConfig {}
