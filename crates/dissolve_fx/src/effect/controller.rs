//! Dissolve material controller
//!
//! Holds the dissolve state and forwards every change to a [`ShadedSurface`].
//! Control events (sliders, buttons) map one-to-one onto the setters; the
//! host frame loop calls [`DissolveMaterialController::update`] to drive the
//! reveal cycle.

use crate::assets::{AssetError, TextureProvider};
use crate::core::EffectConfig;
use crate::foundation::math::{utils::clamp01, Mat4, Mat4Ext};
use crate::render::material::{uniforms, DissolveUniforms, ShadedSurface, TextureRef, WrapMode};

use super::{DiffuseSource, NoisePattern, RevealCycle, RevealPhase};

/// Uniform-side state of the dissolve effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DissolveState {
    /// Dissolve threshold, always within `[0, 1]`
    pub threshold: f32,
    /// Noise tiling, never negative
    pub noise_scale: f32,
    /// What the diffuse channel shows
    pub diffuse_source: DiffuseSource,
}

impl DissolveState {
    /// Whether the diffuse channel keeps its own texture
    pub fn uses_separate_diffuse_texture(&self) -> bool {
        self.diffuse_source.keeps_distinct()
    }
}

/// Drives a dissolve material
pub struct DissolveMaterialController<S: ShadedSurface> {
    surface: S,
    state: DissolveState,
    primary_texture: TextureRef,
    last_noise_texture: TextureRef,
    min_noise_scale: f32,
    reveal: RevealCycle,
}

impl<S: ShadedSurface> DissolveMaterialController<S> {
    /// Take control of `surface` and push the initial state from `config`
    ///
    /// Every uniform is written, even for an unvalidated config: NaN initial
    /// values fall back to the [`EffectConfig`] defaults.
    pub fn new(surface: S, primary_texture: TextureRef, noise_texture: TextureRef, config: &EffectConfig) -> Self {
        let defaults = EffectConfig::default();
        let min_noise_scale = if config.min_noise_scale.is_finite() { config.min_noise_scale.max(0.0) } else { 0.0 };
        let threshold = if config.initial_threshold.is_nan() {
            log::warn!("NaN initial threshold, using {}", defaults.initial_threshold);
            defaults.initial_threshold
        } else {
            config.initial_threshold
        };
        let noise_scale = if config.initial_noise_scale.is_nan() {
            log::warn!("NaN initial noise scale, using {}", defaults.initial_noise_scale);
            defaults.initial_noise_scale
        } else {
            config.initial_noise_scale
        };

        let mut controller = Self {
            surface,
            state: DissolveState {
                threshold: defaults.initial_threshold,
                noise_scale: defaults.initial_noise_scale,
                diffuse_source: DiffuseSource::from_keep_distinct(config.keep_distinct_diffuse),
            },
            primary_texture,
            last_noise_texture: noise_texture.clone(),
            min_noise_scale,
            reveal: RevealCycle::new(),
        };

        controller.push_threshold(clamp01(threshold));
        controller.push_noise_scale(noise_scale.max(min_noise_scale));
        controller.apply_diffuse_source();
        controller.set_noise_texture(noise_texture);

        log::info!(
            "Dissolve controller ready: threshold={} scale={} diffuse={:?}",
            controller.state.threshold,
            controller.state.noise_scale,
            controller.state.diffuse_source
        );
        controller
    }

    /// Set the dissolve threshold, clamped to `[0, 1]`
    ///
    /// A manual change stops a running reveal cycle instead of being
    /// overwritten by it on the next frame. NaN is ignored.
    pub fn set_threshold(&mut self, value: f32) {
        if value.is_nan() {
            log::warn!("Ignoring NaN dissolve threshold");
            return;
        }
        if self.reveal.cancel() {
            log::debug!("Manual threshold change stopped the reveal cycle");
        }
        self.push_threshold(clamp01(value));
    }

    fn push_threshold(&mut self, value: f32) {
        self.state.threshold = value;
        self.surface.set_float(uniforms::DISSOLVE_STAGE, value);
        log::debug!("{} = {}", uniforms::DISSOLVE_STAGE, value);
    }

    /// Set the noise tiling and mirror it onto the diffuse contents transform
    ///
    /// Values below the configured minimum are raised to it. NaN is ignored.
    pub fn set_noise_scale(&mut self, value: f32) {
        if value.is_nan() {
            log::warn!("Ignoring NaN noise scale");
            return;
        }
        self.push_noise_scale(value.max(self.min_noise_scale));
    }

    fn push_noise_scale(&mut self, scale: f32) {
        self.state.noise_scale = scale;
        self.surface.set_float(uniforms::NOISE_SCALE, scale);
        self.surface
            .set_diffuse_transform(Mat4::uv_tiling(scale), WrapMode::Repeat, WrapMode::Repeat);
        log::debug!("{} = {}", uniforms::NOISE_SCALE, scale);
    }

    /// Install a new noise texture
    ///
    /// The diffuse channel follows it only while it mirrors the noise texture.
    pub fn set_noise_texture(&mut self, texture: TextureRef) {
        self.surface.set_texture(uniforms::NOISE_TEXTURE, texture.clone());
        log::debug!("{} = {}", uniforms::NOISE_TEXTURE, texture.name());
        self.last_noise_texture = texture;

        match self.state.diffuse_source {
            DiffuseSource::UsingNoiseTexture => {
                self.surface.set_diffuse_texture(self.last_noise_texture.clone());
            }
            DiffuseSource::UsingPrimaryTexture => {}
        }
    }

    /// Keep the primary texture on the diffuse channel (`true`) or mirror the noise texture (`false`)
    pub fn set_keep_distinct_diffuse_texture(&mut self, enabled: bool) {
        self.state.diffuse_source = DiffuseSource::from_keep_distinct(enabled);
        self.apply_diffuse_source();
        log::info!("Diffuse source: {:?}", self.state.diffuse_source);
    }

    fn apply_diffuse_source(&mut self) {
        let texture = self
            .state
            .diffuse_source
            .select(&self.last_noise_texture, &self.primary_texture)
            .clone();
        self.surface.set_diffuse_texture(texture);
    }

    /// Resolve a built-in pattern and install it as the noise texture
    pub fn select_noise_pattern<P: TextureProvider + ?Sized>(
        &mut self,
        pattern: NoisePattern,
        provider: &mut P,
    ) -> Result<TextureRef, AssetError> {
        let texture = provider.texture(pattern.asset_name())?;
        self.set_noise_texture(texture.clone());
        Ok(texture)
    }

    /// Start the perpetual reveal/conceal cycle, `duration` seconds per leg
    pub fn trigger_reveal(&mut self, duration: f32) {
        let start = self.reveal.start(duration);
        self.push_threshold(start);
    }

    /// Stop the reveal cycle, keeping the current threshold
    ///
    /// Returns whether a cycle was running.
    pub fn cancel_reveal(&mut self) -> bool {
        self.reveal.cancel()
    }

    /// Frame callback: advance the reveal cycle and push the new threshold
    ///
    /// Returns the pushed value, or `None` when no cycle is running.
    pub fn update(&mut self, delta_seconds: f32) -> Option<f32> {
        let value = self.reveal.advance(delta_seconds)?;
        self.push_threshold(value);
        Some(value)
    }

    /// Current state
    pub fn state(&self) -> DissolveState {
        self.state
    }

    /// Current threshold
    pub fn threshold(&self) -> f32 {
        self.state.threshold
    }

    /// Current noise scale
    pub fn noise_scale(&self) -> f32 {
        self.state.noise_scale
    }

    /// Current diffuse source
    pub fn diffuse_source(&self) -> DiffuseSource {
        self.state.diffuse_source
    }

    /// Current reveal leg
    pub fn reveal_phase(&self) -> RevealPhase {
        self.reveal.phase()
    }

    /// Reveal cycle
    pub fn reveal(&self) -> &RevealCycle {
        &self.reveal
    }

    /// Most recently installed noise texture
    pub fn last_noise_texture(&self) -> &TextureRef {
        &self.last_noise_texture
    }

    /// Fixed primary texture
    pub fn primary_texture(&self) -> &TextureRef {
        &self.primary_texture
    }

    /// Scalar uniforms ready for upload
    pub fn uniform_block(&self) -> DissolveUniforms {
        DissolveUniforms::new(self.state.threshold, self.state.noise_scale)
    }

    /// Controlled surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

}

impl<S: ShadedSurface + std::fmt::Debug> std::fmt::Debug for DissolveMaterialController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DissolveMaterialController")
            .field("state", &self.state)
            .field("primary_texture", &self.primary_texture)
            .field("last_noise_texture", &self.last_noise_texture)
            .field("reveal", &self.reveal)
            .field("surface", &self.surface)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ProceduralAssets, TextureLibrary};
    use crate::render::material::{Material, SharedMaterial};
    use crate::scene::MaterialBinding;
    use approx::assert_relative_eq;

    struct Fixture {
        library: TextureLibrary<ProceduralAssets>,
        earth: TextureRef,
        gradient_h: TextureRef,
    }

    fn fixture() -> Fixture {
        let mut library = TextureLibrary::new(ProceduralAssets::new(8, 3));
        let earth = library.texture("earth").unwrap();
        let gradient_h = library.texture("gradientH").unwrap();
        Fixture { library, earth, gradient_h }
    }

    fn controller(f: &Fixture, config: &EffectConfig) -> DissolveMaterialController<Material> {
        DissolveMaterialController::new(
            Material::new().with_diffuse_texture(f.earth.clone()),
            f.earth.clone(),
            f.gradient_h.clone(),
            config,
        )
    }

    #[test]
    fn test_initial_state_is_pushed() {
        let f = fixture();
        let c = controller(&f, &EffectConfig::default());
        let m = c.surface();

        assert_eq!(m.float(uniforms::DISSOLVE_STAGE), Some(0.5));
        assert_eq!(m.float(uniforms::NOISE_SCALE), Some(1.0));
        assert_eq!(m.texture(uniforms::NOISE_TEXTURE), Some(&f.gradient_h));
        assert_eq!(m.diffuse().contents.as_ref(), Some(&f.gradient_h));
        assert_eq!(m.diffuse().wrap_s, WrapMode::Repeat);
        assert_eq!(c.reveal_phase(), RevealPhase::Idle);
        assert!(!c.state().uses_separate_diffuse_texture());
    }

    #[test]
    fn test_initial_distinct_mode_keeps_primary() {
        let f = fixture();
        let c = controller(&f, &EffectConfig::new().with_keep_distinct_diffuse(true));
        assert_eq!(c.surface().diffuse().contents.as_ref(), Some(&f.earth));
        assert_eq!(c.surface().texture(uniforms::NOISE_TEXTURE), Some(&f.gradient_h));
    }

    #[test]
    fn test_nan_initial_values_still_reach_surface() {
        let f = fixture();
        let mut config = EffectConfig::default();
        config.initial_threshold = f32::NAN;
        config.initial_noise_scale = f32::NAN;
        let c = controller(&f, &config);
        let m = c.surface();

        assert_eq!(m.float(uniforms::DISSOLVE_STAGE), Some(c.threshold()));
        assert_eq!(c.threshold(), 0.5);
        assert_eq!(m.float(uniforms::NOISE_SCALE), Some(c.noise_scale()));
        assert_eq!(c.noise_scale(), 1.0);
        assert_eq!(m.diffuse().contents_transform, Mat4::uv_tiling(1.0));
        assert_eq!(m.diffuse().wrap_s, WrapMode::Repeat);
    }

    #[test]
    fn test_out_of_range_initial_values_are_pushed_clamped() {
        let f = fixture();
        let mut config = EffectConfig::default();
        config.initial_threshold = 4.0;
        config.initial_noise_scale = -1.0;
        let c = controller(&f, &config);

        assert_eq!(c.surface().float(uniforms::DISSOLVE_STAGE), Some(1.0));
        assert_eq!(c.surface().float(uniforms::NOISE_SCALE), Some(0.0));
    }

    #[test]
    fn test_threshold_is_clamped() {
        let f = fixture();
        let mut c = controller(&f, &EffectConfig::default());

        for x in [0.0, 0.25, 0.5, 1.0] {
            c.set_threshold(x);
            assert_eq!(c.surface().float(uniforms::DISSOLVE_STAGE), Some(x));
        }

        c.set_threshold(-3.0);
        assert_eq!(c.threshold(), 0.0);
        assert_eq!(c.surface().float(uniforms::DISSOLVE_STAGE), Some(0.0));

        c.set_threshold(7.5);
        assert_eq!(c.surface().float(uniforms::DISSOLVE_STAGE), Some(1.0));

        c.set_threshold(f32::NAN);
        assert_eq!(c.threshold(), 1.0, "NaN leaves the state alone");
    }

    #[test]
    fn test_noise_scale_sets_tiling_and_wrap() {
        let f = fixture();
        let mut c = controller(&f, &EffectConfig::default());

        c.set_noise_scale(4.0);
        let diffuse = c.surface().diffuse().clone();
        assert_eq!(c.surface().float(uniforms::NOISE_SCALE), Some(4.0));
        assert_relative_eq!(diffuse.contents_transform.uv_scale_factors().x, 4.0);
        assert_relative_eq!(diffuse.contents_transform.uv_scale_factors().y, 4.0);
        assert_eq!(diffuse.contents_transform, Mat4::uv_tiling(4.0));
        assert_eq!((diffuse.wrap_s, diffuse.wrap_t), (WrapMode::Repeat, WrapMode::Repeat));

        // Zero is accepted, negatives are raised to the floor
        c.set_noise_scale(0.0);
        assert_eq!(c.noise_scale(), 0.0);
        c.set_noise_scale(-2.0);
        assert_eq!(c.noise_scale(), 0.0);
    }

    #[test]
    fn test_noise_scale_floor_from_config() {
        let f = fixture();
        let mut c = controller(&f, &EffectConfig::new().with_min_noise_scale(0.01));
        c.set_noise_scale(0.0);
        assert_relative_eq!(c.noise_scale(), 0.01);
        assert_eq!(c.surface().diffuse().contents_transform, Mat4::uv_tiling(0.01));
    }

    #[test]
    fn test_diffuse_toggle() {
        let mut f = fixture();
        let mut c = controller(&f, &EffectConfig::default());
        let noise = f.library.texture("noise").unwrap();
        c.set_noise_texture(noise.clone());

        c.set_keep_distinct_diffuse_texture(true);
        assert_eq!(c.diffuse_source(), DiffuseSource::UsingPrimaryTexture);
        assert_eq!(c.surface().diffuse().contents.as_ref(), Some(&f.earth));

        c.set_keep_distinct_diffuse_texture(false);
        assert_eq!(c.diffuse_source(), DiffuseSource::UsingNoiseTexture);
        assert_eq!(c.surface().diffuse().contents.as_ref(), Some(&noise));
    }

    #[test]
    fn test_noise_texture_respects_diffuse_mode() {
        let mut f = fixture();
        let mut c = controller(&f, &EffectConfig::default());
        let vertical = f.library.texture("gradientV").unwrap();
        let noise = f.library.texture("noise").unwrap();

        c.set_noise_texture(vertical.clone());
        assert_eq!(c.surface().texture(uniforms::NOISE_TEXTURE), Some(&vertical));
        assert_eq!(c.surface().diffuse().contents.as_ref(), Some(&vertical));

        c.set_keep_distinct_diffuse_texture(true);
        c.set_noise_texture(noise.clone());
        assert_eq!(c.surface().texture(uniforms::NOISE_TEXTURE), Some(&noise));
        assert_eq!(c.surface().diffuse().contents.as_ref(), Some(&f.earth));
        assert_eq!(c.last_noise_texture(), &noise);

        // Leaving distinct mode shows the texture installed while it was on
        c.set_keep_distinct_diffuse_texture(false);
        assert_eq!(c.surface().diffuse().contents.as_ref(), Some(&noise));
    }

    #[test]
    fn test_select_noise_pattern() {
        let mut f = fixture();
        let mut c = controller(&f, &EffectConfig::default());

        let texture = c.select_noise_pattern(NoisePattern::Noise, &mut f.library).unwrap();
        assert_eq!(texture.name(), "noise");
        assert_eq!(c.surface().texture(uniforms::NOISE_TEXTURE), Some(&texture));

        // Pressing the same pattern again reuses the cached texture
        let again = c.select_noise_pattern(NoisePattern::Noise, &mut f.library).unwrap();
        assert_eq!(again, texture);
    }

    #[test]
    fn test_reveal_cycle_drives_uniform() {
        let f = fixture();
        let mut c = controller(&f, &EffectConfig::default());
        assert_eq!(c.update(0.1), None);

        c.trigger_reveal(2.5);
        assert_eq!(c.surface().float(uniforms::DISSOLVE_STAGE), Some(1.0));
        assert_eq!(c.reveal_phase(), RevealPhase::RevealingOut);

        let mut expected = Vec::new();
        let mut observed = Vec::new();
        // Two full cycles in quarter-second frames
        for frame in 1..=40 {
            let t = frame as f32 * 0.25;
            let leg_t = t % 2.5;
            let leg = (t / 2.5).floor() as u32;
            let value = if leg % 2 == 0 { 1.0 - leg_t / 2.5 } else { leg_t / 2.5 };
            expected.push(value);
            observed.push(c.update(0.25).unwrap());
        }

        for (o, e) in observed.iter().zip(&expected) {
            assert_relative_eq!(*o, *e, epsilon = 1e-4);
        }
        assert_relative_eq!(
            c.surface().float(uniforms::DISSOLVE_STAGE).unwrap(),
            *observed.last().unwrap()
        );
    }

    #[test]
    fn test_cancel_and_manual_override() {
        let f = fixture();
        let mut c = controller(&f, &EffectConfig::default());

        c.trigger_reveal(2.0);
        c.update(0.5);
        assert!(c.cancel_reveal());
        assert_relative_eq!(c.threshold(), 0.75);
        assert_eq!(c.update(1.0), None);
        assert_relative_eq!(c.threshold(), 0.75, epsilon = 1e-6);
        assert!(!c.cancel_reveal());

        c.trigger_reveal(2.0);
        c.update(0.5);
        c.set_threshold(0.2);
        assert_eq!(c.reveal_phase(), RevealPhase::Idle);
        assert_eq!(c.update(1.0), None);
        assert_eq!(c.threshold(), 0.2);
    }

    #[test]
    fn test_uniform_block_tracks_state() {
        let f = fixture();
        let mut c = controller(&f, &EffectConfig::default());
        c.set_threshold(0.4);
        c.set_noise_scale(3.0);
        assert_eq!(c.uniform_block(), DissolveUniforms::new(0.4, 3.0));
    }

    #[test]
    fn test_two_surfaces_share_one_write() {
        let f = fixture();
        let mut scene = ProceduralAssets::default_scene();
        let material = SharedMaterial::new(Material::new().with_diffuse_texture(f.earth.clone()));
        let binding = MaterialBinding::attach(&mut scene, material.clone(), ["sphere", "box"]).unwrap();

        let mut c = DissolveMaterialController::new(
            material,
            f.earth.clone(),
            f.gradient_h.clone(),
            &EffectConfig::default(),
        );
        c.set_threshold(0.3);

        for name in binding.surfaces() {
            let geometry = scene.geometry(name).unwrap();
            let shared = geometry.first_material.as_ref().unwrap();
            assert_eq!(shared.float(uniforms::DISSOLVE_STAGE), Some(0.3), "{name}");
            assert_eq!(shared.texture(uniforms::NOISE_TEXTURE).as_ref(), Some(&f.gradient_h));
        }
    }
}
