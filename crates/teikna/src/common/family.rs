//! Model family classification.
//!
//! A model family is a coarse grouping of image-generation checkpoints
//! (SD 1.5, SDXL and its derivatives, Flux) used to pick
//! family-appropriate defaults: native resolutions, step counts, CFG
//! scales, samplers.

use serde::{Deserialize, Serialize};

/// Coarse classification of an image-generation checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Stable Diffusion 1.5 and the fallback for unrecognized names.
    #[default]
    Sd15,
    /// Stable Diffusion XL base and finetunes.
    Sdxl,
    /// Illustrious-XL and derived anime checkpoints.
    Illustrious,
    /// Pony Diffusion V6 XL and derivatives.
    Pony,
    /// Flux.1 models.
    Flux,
    /// Photorealistic SDXL-class finetunes.
    Realistic,
}

/// All known families, in registration order.
pub const ALL_FAMILIES: &[ModelFamily] = &[
    ModelFamily::Sd15,
    ModelFamily::Sdxl,
    ModelFamily::Illustrious,
    ModelFamily::Pony,
    ModelFamily::Flux,
    ModelFamily::Realistic,
];

impl ModelFamily {
    /// Short lowercase name as used in configs and payloads.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Sd15 => "sd15",
            Self::Sdxl => "sdxl",
            Self::Illustrious => "illustrious",
            Self::Pony => "pony",
            Self::Flux => "flux",
            Self::Realistic => "realistic",
        }
    }

    /// Whether this family runs at SDXL-class native resolutions (~1 MP).
    pub fn is_xl_class(&self) -> bool {
        matches!(
            self,
            Self::Sdxl | Self::Illustrious | Self::Pony | Self::Realistic | Self::Flux
        )
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.cli_name())
    }
}

/// Infer the model family from a checkpoint filename.
///
/// Ordered substring heuristics over the lowercased name. The order
/// matters: derived families are checked before their base family, so
/// "illustriousXL" maps to `Illustrious`, not `Sdxl`. Names that match
/// nothing fall back to `Sd15`.
pub fn detect_model_family(filename: &str) -> ModelFamily {
    let name = filename.to_lowercase();

    // Family markers, most specific first. The bare "xl" catch-all
    // goes last: names like "realvisXL" carry both a family marker and
    // an xl suffix, and the family marker must win.
    const PATTERNS: &[(&[&str], ModelFamily)] = &[
        (&["illustrious", "noob"], ModelFamily::Illustrious),
        (&["pony"], ModelFamily::Pony),
        (&["sdxl", "sd_xl"], ModelFamily::Sdxl),
        (&["flux"], ModelFamily::Flux),
        (&["realistic", "realvis", "photon"], ModelFamily::Realistic),
        (&["xl"], ModelFamily::Sdxl),
    ];

    for (markers, family) in PATTERNS {
        if markers.iter().any(|m| name.contains(m)) {
            return *family;
        }
    }

    ModelFamily::Sd15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_families() {
        assert_eq!(
            detect_model_family("illustriousXL_v01.safetensors"),
            ModelFamily::Illustrious
        );
        assert_eq!(
            detect_model_family("ponyDiffusionV6XL.safetensors"),
            ModelFamily::Pony
        );
        assert_eq!(
            detect_model_family("sd_xl_base_1.0.safetensors"),
            ModelFamily::Sdxl
        );
        assert_eq!(detect_model_family("flux1-dev.safetensors"), ModelFamily::Flux);
        assert_eq!(
            detect_model_family("realisticVisionV60.safetensors"),
            ModelFamily::Realistic
        );
    }

    #[test]
    fn test_detect_order_derived_before_base() {
        // Contains both "illustrious" and "xl"; the derived family wins.
        assert_eq!(
            detect_model_family("IllustriousXL.safetensors"),
            ModelFamily::Illustrious
        );
        // "pony" beats the "xl" in the same name.
        assert_eq!(
            detect_model_family("ponyRealismXL.safetensors"),
            ModelFamily::Pony
        );
    }

    #[test]
    fn test_detect_realistic_xl_finetunes_keep_family() {
        // The xl suffix must not shadow the realistic-family markers.
        assert_eq!(
            detect_model_family("realvisxlV40.safetensors"),
            ModelFamily::Realistic
        );
        assert_eq!(
            detect_model_family("realisticVisionXL.safetensors"),
            ModelFamily::Realistic
        );
        // A bare xl suffix with no other marker is still SDXL.
        assert_eq!(
            detect_model_family("dreamshaperXL.safetensors"),
            ModelFamily::Sdxl
        );
    }

    #[test]
    fn test_detect_fallback_sd15() {
        assert_eq!(
            detect_model_family("v1-5-pruned-emaonly.safetensors"),
            ModelFamily::Sd15
        );
        assert_eq!(detect_model_family(""), ModelFamily::Sd15);
        assert_eq!(detect_model_family("anything-v4.5.ckpt"), ModelFamily::Sd15);
    }

    #[test]
    fn test_detect_case_insensitive() {
        assert_eq!(detect_model_family("FLUX1-SCHNELL.SAFETENSORS"), ModelFamily::Flux);
    }

    #[test]
    fn test_cli_names_unique() {
        let names: Vec<_> = ALL_FAMILIES.iter().map(|f| f.cli_name()).collect();
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
    }
}
