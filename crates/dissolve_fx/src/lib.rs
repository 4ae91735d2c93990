//! # Dissolve FX
//!
//! A noise-threshold dissolve material controller with a perpetual
//! reveal/conceal cycle.
//!
//! ## Features
//!
//! - **Dissolve Controller**: Threshold, noise tiling, noise texture and diffuse source
//! - **Reveal Cycle**: Frame-driven linear animation between fully shown and fully hidden
//! - **Shared Materials**: One material instance bound to several scene surfaces
//! - **Asset Providers**: Disk, procedural and fallback sources with named errors
//! - **Configuration**: TOML and RON settings files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dissolve_fx::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DissolveConfig::default();
//!     let assets = ProceduralAssets::default();
//!     let mut textures = TextureLibrary::new(ProceduralAssets::default());
//!
//!     let mut setup = DissolveSetup::build(&config, &mut textures, &assets, &assets)?;
//!     setup.controller.trigger_reveal(config.effect.reveal_duration);
//!
//!     let mut timer = Timer::fixed_rate(config.engine.target_fps);
//!     for _ in 0..120 {
//!         setup.controller.update(timer.update());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core modules
pub mod core;
pub mod foundation;
pub mod config;

// Subsystems
pub mod assets;
pub mod render;
pub mod scene;
pub mod effect;

/// Common imports for hosts of the effect
pub mod prelude {
    pub use crate::core::{AssetConfig, Config, ConfigError, DissolveConfig, EffectConfig, EngineConfig};
    pub use crate::foundation::math::{Mat4, Mat4Ext, Vec2, Vec3};
    pub use crate::foundation::time::Timer;

    pub use crate::assets::{
        AssetDirectory, AssetError, AssetKind, Fallback, ImageData, ImageSource, ProceduralAssets,
        SceneProvider, ShaderSourceProvider, TextureLibrary, TextureProvider,
    };
    pub use crate::render::{Material, ShadedSurface, SharedMaterial, TextureRef, WrapMode};
    pub use crate::scene::{MaterialBinding, Scene};
    pub use crate::effect::{
        DiffuseSource, DissolveMaterialController, DissolveSetup, NoisePattern, RevealPhase, SetupError,
    };
}
