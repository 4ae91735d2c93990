//! Scene management
//!
//! A minimal scene graph and the binding that shares one material between
//! several of its surfaces.

pub mod binding;
pub mod scene_graph;

pub use binding::MaterialBinding;
pub use scene_graph::{Geometry, GeometryKind, NodeDescription, Scene, SceneDescription, SceneNode};
