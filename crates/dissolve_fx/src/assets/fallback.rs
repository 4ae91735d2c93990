//! Chain two asset sources

use super::{AssetError, ImageData, ImageSource, SceneProvider, ShaderSourceProvider};
use crate::scene::Scene;

/// Resolves from `primary`, retrying `fallback` when the primary reports a miss
///
/// Only [`AssetError::NotFound`] triggers the fallback; a resource that exists
/// but fails to load is reported as is.
#[derive(Debug, Clone)]
pub struct Fallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Fallback<P, F> {
    /// Chain `primary` with `fallback`
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    fn resolve<T>(
        name: &str,
        primary: Result<T, AssetError>,
        fallback: impl FnOnce() -> Result<T, AssetError>,
    ) -> Result<T, AssetError> {
        match primary {
            Err(err) if err.is_not_found() => {
                log::warn!("{err}; using fallback for '{name}'");
                fallback()
            }
            other => other,
        }
    }
}

impl<P: ImageSource, F: ImageSource> ImageSource for Fallback<P, F> {
    fn load_image(&self, name: &str) -> Result<ImageData, AssetError> {
        Self::resolve(name, self.primary.load_image(name), || self.fallback.load_image(name))
    }
}

impl<P: ShaderSourceProvider, F: ShaderSourceProvider> ShaderSourceProvider for Fallback<P, F> {
    fn shader_source(&self, name: &str) -> Result<String, AssetError> {
        Self::resolve(name, self.primary.shader_source(name), || self.fallback.shader_source(name))
    }
}

impl<P: SceneProvider, F: SceneProvider> SceneProvider for Fallback<P, F> {
    fn scene(&self, name: &str) -> Result<Scene, AssetError> {
        Self::resolve(name, self.primary.scene(name), || self.fallback.scene(name))
    }
}
