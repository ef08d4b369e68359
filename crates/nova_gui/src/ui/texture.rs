//! Texture identity used to group GUI geometry

use crate::error::{BridgeError, BridgeResult};
use std::fmt;

/// Identity of a GUI texture: a namespace plus a resource path
///
/// Equality is exact and case-sensitive on both parts. Batches are keyed by the
/// whole identity; the resource path is what the native renderer knows the
/// texture by and is sent as the command's texture name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId {
    namespace: String,
    path: String,
}

impl TextureId {
    /// Create a texture identity from its parts
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parse `namespace:path`, using `default_namespace` when no prefix is given
    pub fn parse(location: &str, default_namespace: &str) -> BridgeResult<Self> {
        let (namespace, path) = match location.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (default_namespace, location),
        };

        if namespace.is_empty() || path.is_empty() || path.contains(':') {
            return Err(BridgeError::InvalidTexture(location.to_string()));
        }

        Ok(Self::new(namespace, path))
    }

    /// Namespace part
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resource path part
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name the native renderer uses for this texture
    pub fn native_name(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}
