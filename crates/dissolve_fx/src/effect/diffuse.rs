//! Which texture the diffuse channel shows

use crate::render::material::TextureRef;

/// Source of the visible diffuse texture
///
/// While [`DiffuseSource::UsingNoiseTexture`] is active the surfaces show the
/// same pattern that drives the dissolve, which makes the threshold easy to
/// read. [`DiffuseSource::UsingPrimaryTexture`] keeps a distinct texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffuseSource {
    /// Diffuse mirrors the last noise texture
    #[default]
    UsingNoiseTexture,
    /// Diffuse shows the fixed primary texture
    UsingPrimaryTexture,
}

impl DiffuseSource {
    /// Map the "keep distinct diffuse texture" toggle to a source
    pub fn from_keep_distinct(keep_distinct: bool) -> Self {
        if keep_distinct {
            DiffuseSource::UsingPrimaryTexture
        } else {
            DiffuseSource::UsingNoiseTexture
        }
    }

    /// Toggle state this source corresponds to
    pub fn keeps_distinct(self) -> bool {
        matches!(self, DiffuseSource::UsingPrimaryTexture)
    }

    /// Texture the diffuse channel should show
    pub fn select<'a>(self, noise: &'a TextureRef, primary: &'a TextureRef) -> &'a TextureRef {
        match self {
            DiffuseSource::UsingNoiseTexture => noise,
            DiffuseSource::UsingPrimaryTexture => primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageData;
    use crate::render::material::TextureRegistry;

    #[test]
    fn test_toggle_mapping_round_trips() {
        for keep in [false, true] {
            assert_eq!(DiffuseSource::from_keep_distinct(keep).keeps_distinct(), keep);
        }
        assert_eq!(DiffuseSource::default(), DiffuseSource::UsingNoiseTexture);
    }

    #[test]
    fn test_select() {
        let mut registry = TextureRegistry::new();
        let noise = registry.register("noise", ImageData::solid_color(1, 1, [0; 4]));
        let earth = registry.register("earth", ImageData::solid_color(1, 1, [255; 4]));

        assert_eq!(DiffuseSource::UsingNoiseTexture.select(&noise, &earth), &noise);
        assert_eq!(DiffuseSource::UsingPrimaryTexture.select(&noise, &earth), &earth);
    }
}
