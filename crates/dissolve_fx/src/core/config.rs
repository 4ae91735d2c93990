//! # Dissolve Configuration
//!
//! All tunables for the effect, the asset lookup and the host loop live here.
//! Every struct is serde-serializable so a whole [`DissolveConfig`] can be
//! loaded from TOML or RON through the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging and frame pacing for the host loop
//! - **Asset Config**: where assets live and which names to resolve
//! - **Effect Config**: initial uniform values and reveal timing

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Host loop behavior: log filter and target frame rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Target FPS for the frame loop
    pub target_fps: u32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: 60,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Asset Configuration
///
/// Names of every resource the effect needs at startup. Texture, shader and
/// scene names are resolved by the asset providers relative to `assets_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for assets
    pub assets_dir: String,
    /// Scene description holding the surfaces
    pub scene: String,
    /// Fragment shader modifier source
    pub shader: String,
    /// Texture shown on the surfaces while distinct diffuse mode is on
    pub primary_texture: String,
    /// Noise texture installed at startup
    pub initial_noise_texture: String,
    /// Scene nodes whose geometry shares the dissolve material
    pub surfaces: Vec<String>,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            assets_dir: "resources/art".to_string(),
            scene: "scene".to_string(),
            shader: "dissolve".to_string(),
            primary_texture: "earth".to_string(),
            initial_noise_texture: "gradientH".to_string(),
            surfaces: vec!["sphere".to_string(), "box".to_string()],
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Replace the list of bound surfaces
    pub fn with_surfaces<I, S>(mut self, surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.surfaces = surfaces.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Effect Configuration
///
/// Initial uniform values and reveal timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Dissolve threshold applied at startup (half visible)
    pub initial_threshold: f32,
    /// Noise tiling applied at startup (pattern repeated once)
    pub initial_noise_scale: f32,
    /// Lower bound for noise scale; smaller requests are raised to it
    pub min_noise_scale: f32,
    /// Length of one reveal or conceal leg in seconds
    pub reveal_duration: f32,
    /// Start with the primary texture on the diffuse channel
    pub keep_distinct_diffuse: bool,
}

impl EffectConfig {
    /// Create a new effect configuration
    pub fn new() -> Self {
        Self {
            initial_threshold: 0.5,
            initial_noise_scale: 1.0,
            min_noise_scale: 0.0,
            reveal_duration: 2.5,
            keep_distinct_diffuse: false,
        }
    }

    /// Set the reveal leg duration
    pub fn with_reveal_duration(mut self, seconds: f32) -> Self {
        self.reveal_duration = seconds;
        self
    }

    /// Set the noise scale floor
    pub fn with_min_noise_scale(mut self, min: f32) -> Self {
        self.min_noise_scale = min;
        self
    }

    /// Choose the startup diffuse mode
    pub fn with_keep_distinct_diffuse(mut self, enabled: bool) -> Self {
        self.keep_distinct_diffuse = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.initial_threshold) {
            return Err(ConfigError::Invalid(format!(
                "initial_threshold must be within [0, 1], got {}",
                self.initial_threshold
            )));
        }

        if !self.min_noise_scale.is_finite() || self.min_noise_scale < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_noise_scale must be a non-negative number, got {}",
                self.min_noise_scale
            )));
        }

        if !self.initial_noise_scale.is_finite() || self.initial_noise_scale < self.min_noise_scale {
            return Err(ConfigError::Invalid(format!(
                "initial_noise_scale must be at least {}, got {}",
                self.min_noise_scale, self.initial_noise_scale
            )));
        }

        if !self.reveal_duration.is_finite() || self.reveal_duration <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "reveal_duration must be positive, got {}",
                self.reveal_duration
            )));
        }

        Ok(())
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Configuration
///
/// Top-level configuration that encompasses every subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DissolveConfig {
    /// Host loop configuration
    pub engine: EngineConfig,
    /// Asset lookup configuration
    pub assets: AssetConfig,
    /// Effect configuration
    pub effect: EffectConfig,
}

impl DissolveConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.surfaces.is_empty() {
            return Err(ConfigError::Invalid("at least one surface must be bound".to_string()));
        }
        if self.engine.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".to_string()));
        }
        self.effect.validate()
    }
}

impl Config for DissolveConfig {}
