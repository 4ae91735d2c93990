//! Startup wiring: scene, shader, textures and controller in one place

use thiserror::Error;

use crate::assets::{AssetError, SceneProvider, ShaderSourceProvider, TextureProvider};
use crate::core::{ConfigError, DissolveConfig};
use crate::render::material::{Material, ShadedSurface, ShaderModifier, SharedMaterial};
use crate::scene::{MaterialBinding, Scene};

use super::DissolveMaterialController;

/// Name given to the shared dissolve material
pub const MATERIAL_NAME: &str = "dissolve";

/// Startup failures
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A required resource is missing or broken
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Everything the host needs to run the effect
#[derive(Debug)]
pub struct DissolveSetup {
    /// Scene holding the bound surfaces
    pub scene: Scene,
    /// Shared material binding
    pub binding: MaterialBinding,
    /// Controller driving the shared material
    pub controller: DissolveMaterialController<SharedMaterial>,
}

impl DissolveSetup {
    /// Resolve every resource named by `config` and wire the effect together
    ///
    /// Nothing is bound unless all resources resolve; the first missing one is
    /// reported by name.
    pub fn build<T, Sh, Sc>(
        config: &DissolveConfig,
        textures: &mut T,
        shaders: &Sh,
        scenes: &Sc,
    ) -> Result<Self, SetupError>
    where
        T: TextureProvider + ?Sized,
        Sh: ShaderSourceProvider + ?Sized,
        Sc: SceneProvider + ?Sized,
    {
        config.validate()?;
        let assets = &config.assets;

        log::info!("Setting up dissolve effect from scene '{}'", assets.scene);
        let mut scene = scenes.scene(&assets.scene)?;

        let modifier = ShaderModifier::fragment(shaders.shader_source(&assets.shader)?);
        modifier.validate_dissolve_contract(&assets.shader)?;

        let primary = textures.texture(&assets.primary_texture)?;
        let noise = textures.texture(&assets.initial_noise_texture)?;

        let mut material = SharedMaterial::new(
            Material::new()
                .with_name(MATERIAL_NAME)
                .with_diffuse_texture(primary.clone()),
        );
        material.set_shader_modifier(modifier.entry_point, modifier.source);

        let binding = MaterialBinding::attach(&mut scene, material.clone(), assets.surfaces.iter().cloned())?;
        let controller = DissolveMaterialController::new(material, primary, noise, &config.effect);

        log::info!(
            "Dissolve effect ready on {} surface(s), {} texture(s) loaded",
            binding.surfaces().len(),
            textures.registry().texture_count()
        );
        Ok(Self { scene, binding, controller })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKind, ProceduralAssets, TextureLibrary};
    use crate::core::{AssetConfig, EffectConfig};
    use crate::render::material::{uniforms, ShaderEntryPoint};

    fn procedural() -> (TextureLibrary<ProceduralAssets>, ProceduralAssets) {
        (TextureLibrary::new(ProceduralAssets::new(8, 1)), ProceduralAssets::new(8, 1))
    }

    #[test]
    fn test_build_binds_every_surface() {
        let (mut textures, assets) = procedural();
        let setup = DissolveSetup::build(&DissolveConfig::default(), &mut textures, &assets, &assets).unwrap();

        for surface in ["sphere", "box"] {
            assert!(setup.binding.is_bound_in(&setup.scene, surface), "{surface}");
        }

        let material = setup.binding.material().borrow();
        assert_eq!(material.name.as_deref(), Some(MATERIAL_NAME));
        assert_eq!(material.float(uniforms::DISSOLVE_STAGE), Some(0.5));
        assert_eq!(material.float(uniforms::NOISE_SCALE), Some(1.0));
        assert_eq!(material.texture(uniforms::NOISE_TEXTURE).map(|t| t.name()), Some("gradientH"));
        assert!(material.shader_modifier(ShaderEntryPoint::Fragment).is_some());
        assert_eq!(setup.controller.primary_texture().name(), "earth");
    }

    #[test]
    fn test_build_respects_distinct_diffuse() {
        let (mut textures, assets) = procedural();
        let mut config = DissolveConfig::default();
        config.effect = EffectConfig::new().with_keep_distinct_diffuse(true);

        let setup = DissolveSetup::build(&config, &mut textures, &assets, &assets).unwrap();
        let diffuse = setup.binding.material().diffuse();
        assert_eq!(diffuse.contents.map(|t| t.name().to_string()), Some("earth".to_string()));
    }

    #[test]
    fn test_missing_texture_is_named() {
        let (mut textures, assets) = procedural();
        let mut config = DissolveConfig::default();
        config.assets.primary_texture = "mars".to_string();

        match DissolveSetup::build(&config, &mut textures, &assets, &assets) {
            Err(SetupError::Asset(AssetError::NotFound { kind, name })) => {
                assert_eq!(kind, AssetKind::Image);
                assert_eq!(name, "mars");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_missing_surface_and_shader_are_named() {
        let (mut textures, assets) = procedural();
        let mut config = DissolveConfig::default();
        config.assets = AssetConfig::new().with_surfaces(["sphere", "torus"]);

        let err = DissolveSetup::build(&config, &mut textures, &assets, &assets).unwrap_err();
        assert_eq!(err.to_string(), "Asset error: scene node not found: torus");

        let mut config = DissolveConfig::default();
        config.assets.shader = "toon".to_string();
        let err = DissolveSetup::build(&config, &mut textures, &assets, &assets).unwrap_err();
        assert!(matches!(
            err,
            SetupError::Asset(AssetError::NotFound { kind: AssetKind::Shader, .. })
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_loading() {
        let (mut textures, assets) = procedural();
        let mut config = DissolveConfig::default();
        config.effect.initial_threshold = 2.0;

        let err = DissolveSetup::build(&config, &mut textures, &assets, &assets).unwrap_err();
        assert!(matches!(err, SetupError::Config(ConfigError::Invalid(_))));
        assert_eq!(textures.registry().texture_count(), 0);
    }
}
