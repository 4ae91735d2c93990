//! # Core Module
//!
//! Shared abstractions the rest of the crate depends on.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the effect, assets and host loop
//! - **Foundation**: Low-level utilities (math, handles, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    DissolveConfig,
    EngineConfig,
    AssetConfig,
    EffectConfig,
    Config,
    ConfigError,
};
