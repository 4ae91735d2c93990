//! Material resource and the shaded-surface capability
//!
//! A [`Material`] is the host-side mirror of what a renderer samples each
//! frame: named uniforms, a diffuse channel and per-stage shader modifiers.
//! [`SharedMaterial`] lets several geometries point at the same instance so a
//! single write is seen by all of them.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use super::{TextureRef, UniformValue, WrapMode};
use crate::foundation::math::Mat4;

/// Capability the dissolve controller drives
///
/// Implemented by [`Material`] and [`SharedMaterial`]; a GPU backend can
/// implement it directly to forward writes into its own resources.
pub trait ShadedSurface {
    /// Set a float uniform by name
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a texture sampler uniform by name
    fn set_texture(&mut self, name: &str, texture: TextureRef);

    /// Replace the texture shown on the diffuse channel
    fn set_diffuse_texture(&mut self, texture: TextureRef);

    /// Replace the diffuse contents transform and wrap modes
    fn set_diffuse_transform(&mut self, transform: Mat4, wrap_s: WrapMode, wrap_t: WrapMode);

    /// Install shader text at a pipeline stage
    fn set_shader_modifier(&mut self, entry_point: ShaderEntryPoint, source: String);
}

/// Pipeline stage a shader modifier is injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderEntryPoint {
    /// Final fragment color, where the dissolve discard runs
    Fragment,
}

/// Diffuse channel of a material
#[derive(Debug, Clone, PartialEq)]
pub struct DiffuseProperty {
    /// Texture currently shown
    pub contents: Option<TextureRef>,
    /// Texture-coordinate transform
    pub contents_transform: Mat4,
    /// Horizontal wrap mode
    pub wrap_s: WrapMode,
    /// Vertical wrap mode
    pub wrap_t: WrapMode,
}

impl Default for DiffuseProperty {
    fn default() -> Self {
        Self {
            contents: None,
            contents_transform: Mat4::identity(),
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
        }
    }
}

/// Material resource containing uniforms, diffuse channel and shader modifiers
#[derive(Debug, Clone)]
pub struct Material {
    /// Optional name for debugging
    pub name: Option<String>,
    uniforms: HashMap<String, UniformValue>,
    diffuse: DiffuseProperty,
    shader_modifiers: HashMap<ShaderEntryPoint, String>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

impl Material {
    /// Create an empty material
    pub fn new() -> Self {
        Self {
            name: None,
            uniforms: HashMap::new(),
            diffuse: DiffuseProperty::default(),
            shader_modifiers: HashMap::new(),
        }
    }

    /// Set the material name for debugging
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Start with a diffuse texture
    pub fn with_diffuse_texture(mut self, texture: TextureRef) -> Self {
        self.diffuse.contents = Some(texture);
        self
    }

    /// Raw uniform lookup
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Float uniform lookup
    pub fn float(&self, name: &str) -> Option<f32> {
        self.uniform(name).and_then(UniformValue::as_float)
    }

    /// Texture uniform lookup
    pub fn texture(&self, name: &str) -> Option<&TextureRef> {
        self.uniform(name).and_then(UniformValue::as_texture)
    }

    /// Diffuse channel
    pub fn diffuse(&self) -> &DiffuseProperty {
        &self.diffuse
    }

    /// Shader text installed at a stage
    pub fn shader_modifier(&self, entry_point: ShaderEntryPoint) -> Option<&str> {
        self.shader_modifiers.get(&entry_point).map(String::as_str)
    }

    /// Number of uniforms set on this material
    pub fn uniform_count(&self) -> usize {
        self.uniforms.len()
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl ShadedSurface for Material {
    fn set_float(&mut self, name: &str, value: f32) {
        log::trace!("{}: {} = {}", self.label(), name, value);
        self.uniforms.insert(name.to_string(), UniformValue::Float(value));
    }

    fn set_texture(&mut self, name: &str, texture: TextureRef) {
        log::trace!("{}: {} = {:?}", self.label(), name, texture);
        self.uniforms.insert(name.to_string(), UniformValue::Texture(texture));
    }

    fn set_diffuse_texture(&mut self, texture: TextureRef) {
        self.diffuse.contents = Some(texture);
    }

    fn set_diffuse_transform(&mut self, transform: Mat4, wrap_s: WrapMode, wrap_t: WrapMode) {
        self.diffuse.contents_transform = transform;
        self.diffuse.wrap_s = wrap_s;
        self.diffuse.wrap_t = wrap_t;
    }

    fn set_shader_modifier(&mut self, entry_point: ShaderEntryPoint, source: String) {
        self.shader_modifiers.insert(entry_point, source);
    }
}

/// Reference-counted handle to a material shared by several geometries
///
/// Cloning the handle shares the instance; it does not copy the material.
#[derive(Debug, Clone, Default)]
pub struct SharedMaterial(Rc<RefCell<Material>>);

impl SharedMaterial {
    /// Wrap a material for sharing
    pub fn new(material: Material) -> Self {
        Self(Rc::new(RefCell::new(material)))
    }

    /// Borrow the material for reading
    pub fn borrow(&self) -> Ref<'_, Material> {
        self.0.borrow()
    }

    /// Borrow the material for writing
    pub fn borrow_mut(&self) -> RefMut<'_, Material> {
        self.0.borrow_mut()
    }

    /// Whether two handles point at the same material instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Float uniform lookup
    pub fn float(&self, name: &str) -> Option<f32> {
        self.borrow().float(name)
    }

    /// Texture uniform lookup
    pub fn texture(&self, name: &str) -> Option<TextureRef> {
        self.borrow().texture(name).cloned()
    }

    /// Snapshot of the diffuse channel
    pub fn diffuse(&self) -> DiffuseProperty {
        self.borrow().diffuse().clone()
    }
}

impl ShadedSurface for SharedMaterial {
    fn set_float(&mut self, name: &str, value: f32) {
        self.borrow_mut().set_float(name, value);
    }

    fn set_texture(&mut self, name: &str, texture: TextureRef) {
        self.borrow_mut().set_texture(name, texture);
    }

    fn set_diffuse_texture(&mut self, texture: TextureRef) {
        self.borrow_mut().set_diffuse_texture(texture);
    }

    fn set_diffuse_transform(&mut self, transform: Mat4, wrap_s: WrapMode, wrap_t: WrapMode) {
        self.borrow_mut().set_diffuse_transform(transform, wrap_s, wrap_t);
    }

    fn set_shader_modifier(&mut self, entry_point: ShaderEntryPoint, source: String) {
        self.borrow_mut().set_shader_modifier(entry_point, source);
    }
}
