//! Texture cache over an image source

use super::{AssetError, ImageSource, TextureProvider};
use crate::render::material::{TextureRef, TextureRegistry};

/// Turns images from an [`ImageSource`] into cached [`TextureRef`]s
///
/// Every texture handed out comes from the same registry, so references from
/// different requests can be compared safely.
#[derive(Debug)]
pub struct TextureLibrary<S> {
    source: S,
    registry: TextureRegistry,
}

impl<S: ImageSource> TextureLibrary<S> {
    /// Library backed by `source`
    pub fn new(source: S) -> Self {
        Self {
            source,
            registry: TextureRegistry::new(),
        }
    }

    /// Underlying image source
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: ImageSource> TextureProvider for TextureLibrary<S> {
    fn texture(&mut self, name: &str) -> Result<TextureRef, AssetError> {
        let source = &self.source;
        self.registry.get_or_load(name, |name| source.load_image(name))
    }

    fn registry(&self) -> &TextureRegistry {
        &self.registry
    }
}
