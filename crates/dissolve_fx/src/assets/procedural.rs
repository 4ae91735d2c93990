//! Generated stand-in assets
//!
//! Lets the effect run with no files on disk: the three noise patterns, a
//! placeholder primary texture, the dissolve shader and a two-surface scene.

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{AssetError, AssetKind, ImageData, ImageSource, SceneProvider, ShaderSourceProvider};
use crate::foundation::math::utils::{clamp01, lerp};
use crate::scene::{GeometryKind, Scene, SceneNode};

/// Dissolve fragment modifier bundled with the crate
pub const DISSOLVE_SHADER: &str = include_str!("../../shaders/dissolve.shader");

/// Lattice cells across the value-noise texture
const NOISE_CELLS: usize = 8;

/// In-memory asset source
#[derive(Debug, Clone)]
pub struct ProceduralAssets {
    size: u32,
    seed: u64,
}

impl Default for ProceduralAssets {
    fn default() -> Self {
        Self::new(256, 0x5eed)
    }
}

impl ProceduralAssets {
    /// Square textures of `size` pixels; `seed` fixes the noise pattern
    pub fn new(size: u32, seed: u64) -> Self {
        Self { size: size.max(1), seed }
    }

    /// Names of every texture this source can generate
    pub const TEXTURES: [&'static str; 4] = ["gradientH", "gradientV", "noise", "earth"];

    fn gray(value: f32) -> Rgba<u8> {
        let level = (clamp01(value) * 255.0).round() as u8;
        Rgba([level, level, level, 255])
    }

    fn gradient(&self, horizontal: bool) -> RgbaImage {
        let span = (self.size.max(2) - 1) as f32;
        RgbaImage::from_fn(self.size, self.size, |x, y| {
            let t = if horizontal { x } else { y } as f32 / span;
            Self::gray(t)
        })
    }

    /// Bilinear value noise over a wrapping lattice, in [0, 1]
    fn value_noise(&self, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        let lattice: Vec<f32> = (0..NOISE_CELLS * NOISE_CELLS).map(|_| rng.gen::<f32>()).collect();
        let at = |cx: usize, cy: usize| lattice[(cy % NOISE_CELLS) * NOISE_CELLS + (cx % NOISE_CELLS)];

        let size = self.size as usize;
        let cell = size as f32 / NOISE_CELLS as f32;
        let mut out = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let fx = x as f32 / cell;
                let fy = y as f32 / cell;
                let (cx, cy) = (fx.floor() as usize, fy.floor() as usize);
                let (tx, ty) = (fx.fract(), fy.fract());
                let top = lerp(at(cx, cy), at(cx + 1, cy), tx);
                let bottom = lerp(at(cx, cy + 1), at(cx + 1, cy + 1), tx);
                out.push(lerp(top, bottom, ty));
            }
        }
        out
    }

    fn noise(&self) -> RgbaImage {
        let values = self.value_noise(self.seed);
        let size = self.size;
        RgbaImage::from_fn(size, size, |x, y| Self::gray(values[(y * size + x) as usize]))
    }

    /// Oceans, continents and polar caps
    fn earth(&self) -> RgbaImage {
        let land = self.value_noise(self.seed.wrapping_add(1));
        let size = self.size;
        let span = (size.max(2) - 1) as f32;
        RgbaImage::from_fn(size, size, |x, y| {
            let latitude = (y as f32 / span - 0.5).abs() * 2.0;
            if latitude > 0.9 {
                Rgba([240, 240, 245, 255])
            } else if land[(y * size + x) as usize] > 0.55 {
                Rgba([46, 125, 50, 255])
            } else {
                Rgba([21, 67, 140, 255])
            }
        })
    }

    /// Sphere and box side by side
    pub fn default_scene() -> Scene {
        let mut scene = Scene::new();
        scene.root_mut().add_child(SceneNode::with_geometry("sphere", GeometryKind::Sphere { radius: 0.5 }));
        scene.root_mut().add_child(SceneNode::with_geometry(
            "box",
            GeometryKind::Cuboid { width: 0.8, height: 0.8, length: 0.8 },
        ));
        scene
    }
}

impl ImageSource for ProceduralAssets {
    fn load_image(&self, name: &str) -> Result<ImageData, AssetError> {
        let image = match name {
            "gradientH" => self.gradient(true),
            "gradientV" => self.gradient(false),
            "noise" => self.noise(),
            "earth" => self.earth(),
            _ => return Err(AssetError::not_found(AssetKind::Image, name)),
        };
        log::debug!("Generated {}x{} texture '{}'", self.size, self.size, name);
        Ok(ImageData::from_rgba_image(image))
    }
}

impl ShaderSourceProvider for ProceduralAssets {
    fn shader_source(&self, name: &str) -> Result<String, AssetError> {
        match name {
            "dissolve" => Ok(DISSOLVE_SHADER.to_string()),
            _ => Err(AssetError::not_found(AssetKind::Shader, name)),
        }
    }
}

impl SceneProvider for ProceduralAssets {
    fn scene(&self, name: &str) -> Result<Scene, AssetError> {
        match name {
            "scene" => Ok(Self::default_scene()),
            _ => Err(AssetError::not_found(AssetKind::Scene, name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::material::ShaderModifier;

    #[test]
    fn test_gradients_run_dark_to_light() {
        let assets = ProceduralAssets::new(16, 7);
        let horizontal = assets.load_image("gradientH").unwrap();
        let vertical = assets.load_image("gradientV").unwrap();

        assert_eq!(horizontal.pixel(0, 5), Some([0, 0, 0, 255]));
        assert_eq!(horizontal.pixel(15, 5), Some([255, 255, 255, 255]));
        assert_eq!(horizontal.pixel(7, 0), horizontal.pixel(7, 15), "constant along Y");

        assert_eq!(vertical.pixel(5, 0), Some([0, 0, 0, 255]));
        assert_eq!(vertical.pixel(5, 15), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_noise_is_seeded() {
        let a = ProceduralAssets::new(32, 42).load_image("noise").unwrap();
        let b = ProceduralAssets::new(32, 42).load_image("noise").unwrap();
        let c = ProceduralAssets::new(32, 43).load_image("noise").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.data.chunks(4).any(|px| px[0] != a.data[0]), "noise is not flat");
    }

    #[test]
    fn test_every_listed_texture_generates() {
        let assets = ProceduralAssets::new(8, 1);
        for name in ProceduralAssets::TEXTURES {
            let image = assets.load_image(name).unwrap();
            assert_eq!((image.width, image.height), (8, 8), "{name}");
        }
        assert!(assets.load_image("marble").unwrap_err().is_not_found());
    }

    #[test]
    fn test_bundled_shader_declares_dissolve_uniforms() {
        let source = ProceduralAssets::default().shader_source("dissolve").unwrap();
        assert!(ShaderModifier::fragment(source).validate_dissolve_contract("dissolve").is_ok());
    }

    #[test]
    fn test_default_scene_has_both_surfaces() {
        let scene = ProceduralAssets::default().scene("scene").unwrap();
        assert!(scene.geometry("sphere").is_ok());
        assert!(scene.geometry("box").is_ok());
        assert!(ProceduralAssets::default().scene("level1").is_err());
    }
}
