//! Fully resolved generation configuration.
//!
//! This is what the image-generation client actually consumes. Created
//! by merging overrides, presets, slot geometry, and family defaults;
//! immutable once created, owned entirely by the caller.

use serde::{Deserialize, Serialize};

use crate::common::{ModelFamily, ResolveWarning};
use crate::resolve::request::LoraSpec;

/// The precedence tier that supplied a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTier {
    /// Caller override.
    Explicit,
    /// Named size or quality preset.
    Preset,
    /// Page-template slot geometry.
    Slot,
    /// Model-family or engine default.
    Global,
}

/// Provenance of every tracked field.
///
/// One tier per field, enforced by construction: there is no way to
/// build a resolved config with a missing or duplicated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSources {
    pub width: SourceTier,
    pub height: SourceTier,
    pub steps: SourceTier,
    pub cfg: SourceTier,
    pub sampler: SourceTier,
    pub scheduler: SourceTier,
    pub model: SourceTier,
    pub negative_prompt: SourceTier,
    pub loras: SourceTier,
}

impl FieldSources {
    /// All fields from the global tier; the starting point before any
    /// higher tier claims a field.
    pub fn all_global() -> Self {
        Self {
            width: SourceTier::Global,
            height: SourceTier::Global,
            steps: SourceTier::Global,
            cfg: SourceTier::Global,
            sampler: SourceTier::Global,
            scheduler: SourceTier::Global,
            model: SourceTier::Global,
            negative_prompt: SourceTier::Global,
            loras: SourceTier::Global,
        }
    }
}

/// A complete, internally consistent generation parameter set.
///
/// Invariants (always hold, regardless of input):
/// - `width` and `height` are multiples of 64 in `[256, 2048]`;
/// - total pixels are between 0.2 and 2.0 MP;
/// - `aspect_ratio` is recomputed from the final width/height, never
///   carried over from the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub width: u32,
    pub height: u32,
    /// Realized ratio of the final dimensions.
    pub aspect_ratio: f32,
    /// Size preset that supplied the dimensions, when one did.
    pub size_preset_used: Option<String>,

    pub steps: u32,
    pub cfg: f32,
    pub sampler: String,
    pub scheduler: String,
    /// Quality preset that supplied the sampler settings, when one was
    /// named in the request.
    pub quality_preset_used: Option<String>,
    pub hires_fix: bool,
    pub upscale: f32,

    pub model: String,
    pub model_family: ModelFamily,
    pub negative_prompt: String,
    pub loras: Vec<LoraSpec>,

    /// Which tier supplied each tracked field.
    pub sources: FieldSources,
    /// Degradations applied while reconciling the request. Empty for a
    /// clean request.
    pub warnings: Vec<ResolveWarning>,
}

impl ResolvedConfig {
    /// Total output size in megapixels.
    pub fn megapixels(&self) -> f64 {
        self.width as f64 * self.height as f64 / 1e6
    }

    /// Whether any request field had to be degraded.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}
