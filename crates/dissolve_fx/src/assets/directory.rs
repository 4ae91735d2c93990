//! Filesystem asset provider
//!
//! Layout under the root directory:
//!
//! - `<name>.png` for images
//! - `<name>.shader` for shader modifier text
//! - `<name>.ron` for scene descriptions

use std::path::{Path, PathBuf};

use super::{AssetError, AssetKind, ImageData, ImageSource, SceneProvider, ShaderSourceProvider};
use crate::scene::{Scene, SceneDescription};

/// Reads assets from a directory on disk
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
}

impl AssetDirectory {
    /// Provider rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an asset would be read from
    pub fn asset_path(&self, name: &str, extension: &str) -> PathBuf {
        self.root.join(format!("{name}.{extension}"))
    }

    fn read_text(&self, kind: AssetKind, name: &str, extension: &str) -> Result<String, AssetError> {
        let path = self.asset_path(name, extension);
        if !path.is_file() {
            return Err(AssetError::not_found(kind, path.display().to_string()));
        }
        log::debug!("Reading {} from {:?}", kind, path);
        std::fs::read_to_string(&path).map_err(|e| AssetError::load_failed(kind, path.display().to_string(), e))
    }
}

impl ImageSource for AssetDirectory {
    fn load_image(&self, name: &str) -> Result<ImageData, AssetError> {
        ImageData::from_file(self.asset_path(name, "png"))
    }
}

impl ShaderSourceProvider for AssetDirectory {
    fn shader_source(&self, name: &str) -> Result<String, AssetError> {
        self.read_text(AssetKind::Shader, name, "shader")
    }
}

impl SceneProvider for AssetDirectory {
    fn scene(&self, name: &str) -> Result<Scene, AssetError> {
        let text = self.read_text(AssetKind::Scene, name, "ron")?;
        let description = SceneDescription::from_ron(name, &text)?;
        Ok(Scene::from_description(&description))
    }
}
