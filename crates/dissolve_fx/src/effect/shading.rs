//! CPU reference of the dissolve fragment test
//!
//! Mirrors the bundled shader so hosts without a GPU (and tests) can measure
//! how much of a surface a given uniform state leaves visible.

use crate::assets::ImageData;
use crate::foundation::math::Vec2;
use crate::render::material::DissolveUniforms;

/// Whether a fragment with the given noise sample survives the threshold
///
/// A stage of 0 removes everything, even texels whose noise is exactly 0.
pub fn fragment_visible(noise: f32, dissolve_stage: f32) -> bool {
    dissolve_stage > 0.0 && noise <= dissolve_stage
}

/// Noise lookup coordinate for a surface texture coordinate
///
/// A scale of 0 collapses every fragment onto a single noise sample.
pub fn noise_coords(uv: Vec2, noise_scale: f32) -> Vec2 {
    (uv * noise_scale).map(|c| c.rem_euclid(1.0))
}

/// Fraction of a `resolution`×`resolution` grid of surface points left visible
pub fn visible_fraction(noise: &ImageData, uniforms: &DissolveUniforms, resolution: u32) -> f32 {
    let resolution = resolution.max(1);
    let mut visible = 0u32;

    for y in 0..resolution {
        for x in 0..resolution {
            let uv = Vec2::new(
                (x as f32 + 0.5) / resolution as f32,
                (y as f32 + 0.5) / resolution as f32,
            );
            let coords = noise_coords(uv, uniforms.noise_scale);
            if fragment_visible(noise.sample_red(coords.x, coords.y), uniforms.dissolve_stage) {
                visible += 1;
            }
        }
    }

    visible as f32 / (resolution * resolution) as f32
}
