//! Shader uniform contract
//!
//! Names here must match the dissolve shader text byte for byte.

use bytemuck::{Pod, Zeroable};

use super::{Material, TextureRef};

/// Dissolve progress, 0 = fully dissolved, 1 = fully visible
pub const DISSOLVE_STAGE: &str = "dissolveStage";

/// Tiling multiplier applied to the noise texture coordinates
pub const NOISE_SCALE: &str = "noiseScale";

/// Sampler holding the noise pattern
pub const NOISE_TEXTURE: &str = "noiseTexture";

/// Every uniform the dissolve shader declares
pub const REQUIRED_UNIFORMS: [&str; 3] = [DISSOLVE_STAGE, NOISE_SCALE, NOISE_TEXTURE];

/// Value stored in a named material uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// Scalar float uniform
    Float(f32),
    /// Texture sampler uniform
    Texture(TextureRef),
}

impl UniformValue {
    /// Float payload, if this is a float uniform
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Texture(_) => None,
        }
    }

    /// Texture payload, if this is a sampler uniform
    pub fn as_texture(&self) -> Option<&TextureRef> {
        match self {
            Self::Texture(texture) => Some(texture),
            Self::Float(_) => None,
        }
    }
}

/// Dissolve scalar uniforms laid out for a GPU uniform buffer
///
/// Layout must match the corresponding shader uniform block (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DissolveUniforms {
    /// Current dissolve threshold
    pub dissolve_stage: f32,
    /// Noise texture tiling
    pub noise_scale: f32,
    /// Padding to 16 bytes
    pub _padding: [f32; 2],
}

impl DissolveUniforms {
    /// Build the block from explicit values
    pub fn new(dissolve_stage: f32, noise_scale: f32) -> Self {
        Self {
            dissolve_stage,
            noise_scale,
            _padding: [0.0; 2],
        }
    }

    /// Snapshot the scalar uniforms of a material, unset values read as zero
    pub fn from_material(material: &Material) -> Self {
        Self::new(
            material.float(DISSOLVE_STAGE).unwrap_or_default(),
            material.float(NOISE_SCALE).unwrap_or_default(),
        )
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
