//! Rendering-side data
//!
//! No GPU backend lives here. This module holds the host-side material model
//! a backend samples each frame.

pub mod material;

pub use material::{
    Material, SharedMaterial, ShadedSurface, ShaderEntryPoint, ShaderModifier,
    TextureRef, TextureRegistry, WrapMode, DissolveUniforms,
};
