//! Per-family model presets.
//!
//! These supply the global-tier sampler settings when a request names
//! neither an explicit override nor a quality preset. One preset per
//! model family; the lookup is total.

use crate::common::ModelFamily;

/// Default sampler settings for one model family.
#[derive(Debug, Clone)]
pub struct ModelPreset {
    /// The family these defaults belong to.
    pub family: ModelFamily,
    /// Default sampling step count.
    pub default_steps: u32,
    /// Default CFG scale.
    pub cfg: f32,
    /// Default sampler.
    pub sampler: &'static str,
    /// Default scheduler.
    pub scheduler: &'static str,
}

pub const MODEL_SD15: ModelPreset = ModelPreset {
    family: ModelFamily::Sd15,
    default_steps: 28,
    cfg: 7.0,
    sampler: "euler_ancestral",
    scheduler: "normal",
};

pub const MODEL_SDXL: ModelPreset = ModelPreset {
    family: ModelFamily::Sdxl,
    default_steps: 30,
    cfg: 6.0,
    sampler: "dpmpp_2m",
    scheduler: "karras",
};

pub const MODEL_ILLUSTRIOUS: ModelPreset = ModelPreset {
    family: ModelFamily::Illustrious,
    default_steps: 28,
    cfg: 5.5,
    sampler: "euler_ancestral",
    scheduler: "normal",
};

pub const MODEL_PONY: ModelPreset = ModelPreset {
    family: ModelFamily::Pony,
    default_steps: 26,
    cfg: 7.0,
    sampler: "euler_ancestral",
    scheduler: "normal",
};

// Flux ignores classic CFG; 1.0 disables it and guidance is baked into
// the distilled checkpoints.
pub const MODEL_FLUX: ModelPreset = ModelPreset {
    family: ModelFamily::Flux,
    default_steps: 20,
    cfg: 1.0,
    sampler: "euler",
    scheduler: "simple",
};

pub const MODEL_REALISTIC: ModelPreset = ModelPreset {
    family: ModelFamily::Realistic,
    default_steps: 32,
    cfg: 5.0,
    sampler: "dpmpp_2m",
    scheduler: "karras",
};

/// All model presets, one per family.
pub const ALL_MODEL_PRESETS: &[&ModelPreset] = &[
    &MODEL_SD15,
    &MODEL_SDXL,
    &MODEL_ILLUSTRIOUS,
    &MODEL_PONY,
    &MODEL_FLUX,
    &MODEL_REALISTIC,
];

/// Get the preset for a model family. Total: every family has one.
pub fn get_model_preset(family: ModelFamily) -> &'static ModelPreset {
    match family {
        ModelFamily::Sd15 => &MODEL_SD15,
        ModelFamily::Sdxl => &MODEL_SDXL,
        ModelFamily::Illustrious => &MODEL_ILLUSTRIOUS,
        ModelFamily::Pony => &MODEL_PONY,
        ModelFamily::Flux => &MODEL_FLUX,
        ModelFamily::Realistic => &MODEL_REALISTIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ALL_FAMILIES;

    #[test]
    fn test_lookup_is_total() {
        for family in ALL_FAMILIES {
            let preset = get_model_preset(*family);
            assert_eq!(preset.family, *family);
        }
    }

    #[test]
    fn test_one_preset_per_family() {
        assert_eq!(ALL_MODEL_PRESETS.len(), ALL_FAMILIES.len());
        let families: std::collections::HashSet<_> =
            ALL_MODEL_PRESETS.iter().map(|p| p.family).collect();
        assert_eq!(families.len(), ALL_FAMILIES.len());
    }

    #[test]
    fn test_all_presets_valid() {
        for preset in ALL_MODEL_PRESETS {
            assert!(preset.default_steps > 0);
            assert!(preset.cfg > 0.0);
            assert!(!preset.sampler.is_empty());
            assert!(!preset.scheduler.is_empty());
        }
    }

    #[test]
    fn test_sd15_matches_builtin_defaults() {
        // The empty request resolves through this preset; these values
        // are the documented engine defaults.
        assert_eq!(MODEL_SD15.default_steps, 28);
        assert_eq!(MODEL_SD15.cfg, 7.0);
        assert_eq!(MODEL_SD15.sampler, "euler_ancestral");
        assert_eq!(MODEL_SD15.scheduler, "normal");
    }
}
