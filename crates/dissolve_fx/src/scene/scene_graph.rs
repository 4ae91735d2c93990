//! Scene graph holding the surfaces that show the effect
//!
//! Only what the effect needs: a tree of named nodes, some carrying a
//! geometry with a first-material slot. Scenes are described in RON through
//! [`SceneDescription`] and instantiated with [`Scene::from_description`].

use serde::{Deserialize, Serialize};

use crate::assets::{AssetError, AssetKind};
use crate::render::material::SharedMaterial;

/// Primitive shape of a geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometryKind {
    /// Sphere with radius
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Axis-aligned box
    Cuboid {
        /// Size along X
        width: f32,
        /// Size along Y
        height: f32,
        /// Size along Z
        length: f32,
    },
}

/// Serializable node description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Node name, used for lookup
    pub name: String,
    /// Optional geometry
    #[serde(default)]
    pub geometry: Option<GeometryKind>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<NodeDescription>,
}

/// Serializable scene description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Top-level nodes
    pub nodes: Vec<NodeDescription>,
}

impl SceneDescription {
    /// Parse a RON scene description
    pub fn from_ron(name: &str, text: &str) -> Result<Self, AssetError> {
        ron::from_str(text).map_err(|e| AssetError::load_failed(AssetKind::Scene, name, e))
    }
}

/// Geometry attached to a node
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Shape
    pub kind: GeometryKind,
    /// Material used to shade the geometry
    pub first_material: Option<SharedMaterial>,
}

impl Geometry {
    /// Geometry with no material
    pub fn new(kind: GeometryKind) -> Self {
        Self { kind, first_material: None }
    }
}

/// Named scene node
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name
    pub name: String,
    /// Optional geometry
    pub geometry: Option<Geometry>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Empty node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometry: None,
            children: Vec::new(),
        }
    }

    /// Node carrying a geometry
    pub fn with_geometry(name: impl Into<String>, kind: GeometryKind) -> Self {
        Self {
            geometry: Some(Geometry::new(kind)),
            ..Self::new(name)
        }
    }

    /// Append a child node
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Direct children
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Find a descendant by name, searching the whole subtree when `recursive`
    pub fn child_node(&self, name: &str, recursive: bool) -> Option<&SceneNode> {
        if let Some(direct) = self.children.iter().find(|child| child.name == name) {
            return Some(direct);
        }
        if !recursive {
            return None;
        }
        self.children.iter().find_map(|child| child.child_node(name, true))
    }

    /// Mutable variant of [`SceneNode::child_node`]
    pub fn child_node_mut(&mut self, name: &str, recursive: bool) -> Option<&mut SceneNode> {
        if let Some(index) = self.children.iter().position(|child| child.name == name) {
            return self.children.get_mut(index);
        }
        if !recursive {
            return None;
        }
        self.children
            .iter_mut()
            .find_map(|child| child.child_node_mut(name, true))
    }

    fn from_description(description: &NodeDescription) -> Self {
        let mut node = Self::new(description.name.clone());
        node.geometry = description.geometry.map(Geometry::new);
        for child in &description.children {
            node.add_child(Self::from_description(child));
        }
        node
    }

    fn visit<'a>(&'a self, out: &mut Vec<&'a SceneNode>) {
        out.push(self);
        for child in &self.children {
            child.visit(out);
        }
    }
}

/// Scene with an unnamed root
#[derive(Debug, Clone)]
pub struct Scene {
    root: SceneNode,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene
    pub fn new() -> Self {
        Self { root: SceneNode::new("root") }
    }

    /// Instantiate a description
    pub fn from_description(description: &SceneDescription) -> Self {
        let mut scene = Self::new();
        for node in &description.nodes {
            scene.root.add_child(SceneNode::from_description(node));
        }
        scene
    }

    /// Root node
    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    /// Mutable root node
    pub fn root_mut(&mut self) -> &mut SceneNode {
        &mut self.root
    }

    /// Find a node anywhere in the scene
    pub fn find_node(&self, name: &str) -> Result<&SceneNode, AssetError> {
        self.root
            .child_node(name, true)
            .ok_or_else(|| AssetError::not_found(AssetKind::SceneNode, name))
    }

    /// Find a node anywhere in the scene for modification
    pub fn find_node_mut(&mut self, name: &str) -> Result<&mut SceneNode, AssetError> {
        self.root
            .child_node_mut(name, true)
            .ok_or_else(|| AssetError::not_found(AssetKind::SceneNode, name))
    }

    /// Geometry of a named node
    pub fn geometry(&self, name: &str) -> Result<&Geometry, AssetError> {
        self.find_node(name)?
            .geometry
            .as_ref()
            .ok_or_else(|| AssetError::not_found(AssetKind::Geometry, name))
    }

    /// Every node with geometry, depth first
    pub fn renderables(&self) -> Vec<&SceneNode> {
        let mut nodes = Vec::new();
        self.root.visit(&mut nodes);
        nodes.retain(|node| node.geometry.is_some());
        nodes
    }
}
