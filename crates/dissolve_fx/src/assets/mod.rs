//! Asset resolution
//!
//! The effect consumes three kinds of external resources: textures, shader
//! text and a scene holding the surfaces. Each is reached through a provider
//! trait so the caller decides where assets come from:
//!
//! - [`AssetDirectory`] reads PNG, shader and RON files from disk
//! - [`ProceduralAssets`] generates stand-ins in memory
//! - [`Fallback`] tries one source and falls back to another on a miss
//!
//! Images are turned into shareable [`TextureRef`]s by a [`TextureLibrary`],
//! which caches them in a [`TextureRegistry`].
//!
//! A missing resource is reported as [`AssetError::NotFound`] naming the
//! resource, never by aborting.

pub mod directory;
pub mod fallback;
pub mod image_loader;
pub mod library;
pub mod procedural;

pub use directory::AssetDirectory;
pub use fallback::Fallback;
pub use image_loader::ImageData;
pub use library::TextureLibrary;
pub use procedural::ProceduralAssets;

use std::fmt;
use thiserror::Error;

use crate::render::material::{TextureRef, TextureRegistry};
use crate::scene::Scene;

/// Category of a resource, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Scene description
    Scene,
    /// Named node inside a scene
    SceneNode,
    /// Geometry attached to a scene node
    Geometry,
    /// Shader program text
    Shader,
    /// Texture image
    Image,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssetKind::Scene => "scene",
            AssetKind::SceneNode => "scene node",
            AssetKind::Geometry => "geometry",
            AssetKind::Shader => "shader",
            AssetKind::Image => "image",
        };
        f.write_str(label)
    }
}

/// Asset resolution errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// A required resource does not exist
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What was looked up
        kind: AssetKind,
        /// Name it was looked up under
        name: String,
    },

    /// A resource exists but could not be decoded
    #[error("Failed to load {kind} '{name}': {reason}")]
    LoadFailed {
        /// What was loaded
        kind: AssetKind,
        /// Name it was loaded under
        name: String,
        /// Underlying failure
        reason: String,
    },

    /// Shader text does not declare the uniforms the effect drives
    #[error("Shader '{shader}' is missing uniforms: {}", missing.join(", "))]
    ShaderContract {
        /// Shader name
        shader: String,
        /// Uniform names absent from the source
        missing: Vec<String>,
    },
}

impl AssetError {
    /// Shorthand for [`AssetError::NotFound`]
    pub fn not_found(kind: AssetKind, name: impl Into<String>) -> Self {
        Self::NotFound { kind, name: name.into() }
    }

    /// Shorthand for [`AssetError::LoadFailed`]
    pub fn load_failed(kind: AssetKind, name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::LoadFailed {
            kind,
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error reports a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Provides decoded images by name
pub trait ImageSource {
    /// Load the image registered as `name`
    fn load_image(&self, name: &str) -> Result<ImageData, AssetError>;
}

/// Provides textures by name
pub trait TextureProvider {
    /// Resolve a texture, loading it on first request
    fn texture(&mut self, name: &str) -> Result<TextureRef, AssetError>;

    /// Registry owning every texture handed out so far
    fn registry(&self) -> &TextureRegistry;
}

/// Provides shader program text by name
pub trait ShaderSourceProvider {
    /// Read the shader source registered as `name`
    fn shader_source(&self, name: &str) -> Result<String, AssetError>;
}

/// Provides scenes by name
pub trait SceneProvider {
    /// Build the scene registered as `name`
    fn scene(&self, name: &str) -> Result<Scene, AssetError>;
}
