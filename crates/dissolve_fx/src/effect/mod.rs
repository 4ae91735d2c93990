//! Dissolve effect
//!
//! The controller owns the effect state (threshold, noise scale, diffuse
//! source) and an optional reveal cycle, and forwards every change to the
//! surface it drives. [`DissolveSetup`] wires it to a scene at startup.

pub mod controller;
pub mod diffuse;
pub mod pattern;
pub mod reveal;
pub mod setup;
pub mod shading;

pub use controller::{DissolveMaterialController, DissolveState};
pub use diffuse::DiffuseSource;
pub use pattern::NoisePattern;
pub use reveal::{RevealCycle, RevealPhase, MIN_LEG_DURATION};
pub use setup::{DissolveSetup, SetupError};
