//! Attach one shared material to several scene surfaces

use crate::assets::{AssetError, AssetKind};
use crate::render::material::SharedMaterial;

use super::Scene;

/// One material instance shared by a set of named surfaces
///
/// Every bound geometry holds a handle to the same material, so a single
/// uniform write is visible on all of them in the same frame.
#[derive(Debug, Clone)]
pub struct MaterialBinding {
    material: SharedMaterial,
    surfaces: Vec<String>,
}

impl MaterialBinding {
    /// Make `material` the first material of every named surface
    ///
    /// All surfaces are resolved before any is modified, so a missing node or
    /// geometry leaves the scene untouched.
    pub fn attach<I, S>(scene: &mut Scene, material: SharedMaterial, surfaces: I) -> Result<Self, AssetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let surfaces: Vec<String> = surfaces.into_iter().map(Into::into).collect();
        if surfaces.is_empty() {
            return Err(AssetError::not_found(AssetKind::SceneNode, "<no surfaces requested>"));
        }

        for name in &surfaces {
            scene.geometry(name)?;
        }

        for name in &surfaces {
            let node = scene.find_node_mut(name)?;
            let geometry = node
                .geometry
                .as_mut()
                .ok_or_else(|| AssetError::not_found(AssetKind::Geometry, name.as_str()))?;
            geometry.first_material = Some(material.clone());
        }

        log::info!("Bound shared material to surfaces: {}", surfaces.join(", "));
        Ok(Self { material, surfaces })
    }

    /// Shared material handle
    pub fn material(&self) -> &SharedMaterial {
        &self.material
    }

    /// Names of the bound surfaces
    pub fn surfaces(&self) -> &[String] {
        &self.surfaces
    }

    /// Whether the named surface in `scene` currently uses this binding's material
    pub fn is_bound_in(&self, scene: &Scene, surface: &str) -> bool {
        scene
            .geometry(surface)
            .ok()
            .and_then(|geometry| geometry.first_material.as_ref())
            .is_some_and(|material| material.ptr_eq(&self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::material::{Material, ShadedSurface};
    use crate::scene::{GeometryKind, SceneNode};

    fn two_surface_scene() -> Scene {
        let mut scene = Scene::new();
        scene.root_mut().add_child(SceneNode::with_geometry("sphere", GeometryKind::Sphere { radius: 1.0 }));
        scene.root_mut().add_child(SceneNode::with_geometry(
            "box",
            GeometryKind::Cuboid { width: 1.0, height: 1.0, length: 1.0 },
        ));
        scene.root_mut().add_child(SceneNode::new("camera"));
        scene
    }

    #[test]
    fn test_one_write_reaches_every_surface() {
        let mut scene = two_surface_scene();
        let binding = MaterialBinding::attach(&mut scene, SharedMaterial::new(Material::new()), ["sphere", "box"]).unwrap();

        assert!(binding.is_bound_in(&scene, "sphere"));
        assert!(binding.is_bound_in(&scene, "box"));
        assert_eq!(binding.surfaces(), &["sphere".to_string(), "box".to_string()]);

        let mut material = binding.material().clone();
        material.set_float("dissolveStage", 0.3);

        for name in ["sphere", "box"] {
            let geometry = scene.geometry(name).unwrap();
            let bound = geometry.first_material.as_ref().unwrap();
            assert_eq!(bound.float("dissolveStage"), Some(0.3), "{name}");
        }
    }

    #[test]
    fn test_missing_surface_leaves_scene_untouched() {
        let mut scene = two_surface_scene();
        let err = MaterialBinding::attach(&mut scene, SharedMaterial::default(), ["sphere", "torus"]).unwrap_err();

        assert!(matches!(err, AssetError::NotFound { kind: AssetKind::SceneNode, ref name } if name == "torus"));
        assert!(scene.geometry("sphere").unwrap().first_material.is_none());
    }

    #[test]
    fn test_node_without_geometry_is_rejected() {
        let mut scene = two_surface_scene();
        let err = MaterialBinding::attach(&mut scene, SharedMaterial::default(), ["camera"]).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { kind: AssetKind::Geometry, .. }));
    }
}
