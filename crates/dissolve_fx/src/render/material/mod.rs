//! Material system
//!
//! Material definitions, texture registry and the dissolve shader contract.

#[allow(clippy::module_inception)]
pub mod material;
pub mod shader;
pub mod texture;
pub mod uniforms;

// Re-export commonly used types
pub use material::{Material, SharedMaterial, ShadedSurface, ShaderEntryPoint, DiffuseProperty};
pub use shader::ShaderModifier;
pub use texture::{TextureRegistry, TextureRef, TextureHandle, WrapMode};
pub use uniforms::{UniformValue, DissolveUniforms};
