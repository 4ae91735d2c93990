//! Shader modifier text and its uniform contract

use std::collections::HashSet;

use super::{uniforms, ShaderEntryPoint};
use crate::assets::AssetError;

/// Shader text bound to a pipeline stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderModifier {
    /// Stage the text is injected into
    pub entry_point: ShaderEntryPoint,
    /// Program text
    pub source: String,
}

impl ShaderModifier {
    /// Fragment-stage modifier
    pub fn fragment(source: impl Into<String>) -> Self {
        Self {
            entry_point: ShaderEntryPoint::Fragment,
            source: source.into(),
        }
    }

    /// Identifiers appearing in the source
    fn identifiers(&self) -> HashSet<&str> {
        self.source
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Names from `required` that the source never mentions
    pub fn missing_uniforms<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        let identifiers = self.identifiers();
        required
            .iter()
            .copied()
            .filter(|name| !identifiers.contains(name))
            .collect()
    }

    /// Check the source references every dissolve uniform
    pub fn validate_dissolve_contract(&self, shader_name: &str) -> Result<(), AssetError> {
        let missing = self.missing_uniforms(&uniforms::REQUIRED_UNIFORMS);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AssetError::ShaderContract {
                shader: shader_name.to_string(),
                missing: missing.into_iter().map(str::to_string).collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISSOLVE: &str = "
        #pragma arguments
        float dissolveStage;
        float noiseScale;
        texture2d<float, access::sample> noiseTexture;
        #pragma body
        float noise = noiseTexture.sample(s, fract(_surface.diffuseTexcoord * noiseScale)).r;
        if (noise > dissolveStage) { discard_fragment(); }
    ";

    #[test]
    fn test_dissolve_shader_satisfies_contract() {
        let shader = ShaderModifier::fragment(DISSOLVE);
        assert_eq!(shader.entry_point, ShaderEntryPoint::Fragment);
        assert!(shader.validate_dissolve_contract("dissolve").is_ok());
    }

    #[test]
    fn test_partial_names_do_not_count() {
        // `noiseScaleX` must not satisfy `noiseScale`
        let shader = ShaderModifier::fragment("float dissolveStage; float noiseScaleX; sampler noiseTexture;");
        assert_eq!(shader.missing_uniforms(&uniforms::REQUIRED_UNIFORMS), vec!["noiseScale"]);

        match shader.validate_dissolve_contract("broken") {
            Err(AssetError::ShaderContract { shader, missing }) => {
                assert_eq!(shader, "broken");
                assert_eq!(missing, vec!["noiseScale".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
