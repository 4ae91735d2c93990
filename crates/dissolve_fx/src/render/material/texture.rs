//! Texture references and registry
//!
//! Textures are owned by a [`TextureRegistry`]; everything else passes
//! [`TextureRef`]s around. A reference is an opaque typed handle plus the
//! asset name it was loaded under, which keeps logs readable.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::assets::{AssetError, ImageData};
use crate::foundation::collections::{HandleMap, TypedHandle};

/// Handle for a registered texture image
pub type TextureHandle = TypedHandle<ImageData>;

/// Opaque reference to a registered texture
#[derive(Clone)]
pub struct TextureRef {
    handle: TextureHandle,
    name: Rc<str>,
}

impl TextureRef {
    /// Registry handle
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Name the texture was registered under
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for TextureRef {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for TextureRef {}

impl fmt::Debug for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureRef({:?}, {:?})", self.name, self.handle.key())
    }
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Clamp to edge
    #[default]
    ClampToEdge,
}

/// Owns texture images and hands out [`TextureRef`]s
///
/// Registering the same name twice returns the first reference, so pattern
/// switches reuse already loaded images.
#[derive(Default)]
pub struct TextureRegistry {
    textures: HandleMap<ImageData>,
    by_name: HashMap<String, TextureRef>,
}

impl TextureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under `name`, or return the existing reference
    pub fn register(&mut self, name: &str, image: ImageData) -> TextureRef {
        if let Some(existing) = self.by_name.get(name) {
            return existing.clone();
        }

        let name: Rc<str> = Rc::from(name);
        let key = self.textures.insert(image);
        let texture = TextureRef { handle: TypedHandle::new(key), name };
        log::debug!("Registered texture {:?}", texture);
        self.by_name.insert(texture.name().to_string(), texture.clone());
        texture
    }

    /// Return the texture registered as `name`, loading it with `load` on first use
    pub fn get_or_load<F>(&mut self, name: &str, load: F) -> Result<TextureRef, AssetError>
    where
        F: FnOnce(&str) -> Result<ImageData, AssetError>,
    {
        if let Some(existing) = self.by_name.get(name) {
            return Ok(existing.clone());
        }
        let image = load(name)?;
        Ok(self.register(name, image))
    }

    /// Look up a texture by name
    pub fn find(&self, name: &str) -> Option<TextureRef> {
        self.by_name.get(name).cloned()
    }

    /// Access the image behind a reference
    pub fn image(&self, texture: &TextureRef) -> Option<&ImageData> {
        self.textures.get(texture.handle.key())
    }

    /// Number of registered textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl fmt::Debug for TextureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureRegistry")
            .field("textures", &self.by_name.keys().collect::<Vec<_>>())
            .finish()
    }
}
