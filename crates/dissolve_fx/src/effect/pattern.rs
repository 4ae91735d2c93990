//! Built-in noise patterns

use std::fmt;
use std::str::FromStr;

/// Noise textures offered by the demo controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoisePattern {
    /// Left-to-right gradient; the surface wipes horizontally
    GradientHorizontal,
    /// Top-to-bottom gradient; the surface wipes vertically
    GradientVertical,
    /// Value noise; the surface erodes in patches
    Noise,
}

impl NoisePattern {
    /// Every pattern, in control order
    pub const ALL: [NoisePattern; 3] = [
        NoisePattern::GradientHorizontal,
        NoisePattern::GradientVertical,
        NoisePattern::Noise,
    ];

    /// Texture asset name
    pub fn asset_name(self) -> &'static str {
        match self {
            NoisePattern::GradientHorizontal => "gradientH",
            NoisePattern::GradientVertical => "gradientV",
            NoisePattern::Noise => "noise",
        }
    }
}

impl fmt::Display for NoisePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_name())
    }
}

impl FromStr for NoisePattern {
    type Err = String;

    /// Accepts the asset name or the one-letter control shortcut (`h`, `v`, `n`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" | "gradientH" => Ok(NoisePattern::GradientHorizontal),
            "v" | "gradientV" => Ok(NoisePattern::GradientVertical),
            "n" | "noise" => Ok(NoisePattern::Noise),
            other => Err(format!("unknown noise pattern '{other}' (expected h, v or n)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_shortcuts() {
        for pattern in NoisePattern::ALL {
            assert_eq!(pattern.asset_name().parse::<NoisePattern>(), Ok(pattern));
            assert_eq!(pattern.to_string(), pattern.asset_name());
        }
        assert_eq!("h".parse(), Ok(NoisePattern::GradientHorizontal));
        assert_eq!("v".parse(), Ok(NoisePattern::GradientVertical));
        assert_eq!("n".parse(), Ok(NoisePattern::Noise));
        assert!("x".parse::<NoisePattern>().is_err());
    }
}
