//! Caller-supplied resolution requests and parameter overrides.
//!
//! Overrides do NOT represent a full generation configuration. They are
//! merged with presets and family defaults at resolution time; every
//! field is optional and an empty request is valid.

use serde::{Deserialize, Serialize};

/// A LoRA to apply, with its strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoraSpec {
    /// LoRA filename or registry name.
    pub name: String,
    /// Application weight. Sane range is [-2.0, 2.0]; values outside it
    /// are clamped during resolution.
    pub weight: f32,
}

impl LoraSpec {
    pub fn new(name: impl Into<String>, weight: f32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Reference to a page-template slot, resolved to an aspect ratio by
/// the layout provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotContext {
    pub template_id: String,
    pub slot_id: String,
}

impl SlotContext {
    pub fn new(template_id: impl Into<String>, slot_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            slot_id: slot_id.into(),
        }
    }
}

/// Caller-provided overrides for individual generation parameters.
///
/// Width and height form a pair: both must be present for the pair to
/// take effect, and a half-specified pair is degraded with a warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOverrides {
    /// Explicit output width in pixels.
    pub width: Option<u32>,

    /// Explicit output height in pixels.
    pub height: Option<u32>,

    /// Sampling step count.
    pub steps: Option<u32>,

    /// CFG scale.
    pub cfg: Option<f32>,

    /// Sampler name.
    pub sampler: Option<String>,

    /// Scheduler name.
    pub scheduler: Option<String>,

    /// Checkpoint filename.
    pub model: Option<String>,

    /// Negative prompt.
    pub negative_prompt: Option<String>,

    /// LoRA stack, applied in order.
    pub loras: Option<Vec<LoraSpec>>,
}

impl GenerationOverrides {
    /// Check if any overrides are set.
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.steps.is_none()
            && self.cfg.is_none()
            && self.sampler.is_none()
            && self.scheduler.is_none()
            && self.model.is_none()
            && self.negative_prompt.is_none()
            && self.loras.is_none()
    }

    /// Whether both axes of the dimension pair are present.
    pub fn has_dimension_pair(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}

/// A partial, possibly conflicting specification of generation
/// parameters. The engine reconciles it into a [`ResolvedConfig`].
///
/// [`ResolvedConfig`]: crate::resolve::ResolvedConfig
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    /// Named size preset.
    pub size_preset: Option<String>,

    /// Named quality preset.
    pub quality_preset: Option<String>,

    /// Page-template slot to derive dimensions from (slot-aware
    /// strategy only).
    pub slot: Option<SlotContext>,

    /// Direct field overrides; always the highest precedence tier.
    #[serde(default)]
    pub overrides: GenerationOverrides,
}

impl ResolutionRequest {
    /// Request with a named size preset.
    pub fn with_size_preset(id: impl Into<String>) -> Self {
        Self {
            size_preset: Some(id.into()),
            ..Default::default()
        }
    }

    /// Request with a named quality preset.
    pub fn with_quality_preset(id: impl Into<String>) -> Self {
        Self {
            quality_preset: Some(id.into()),
            ..Default::default()
        }
    }

    /// Request targeting a template slot.
    pub fn for_slot(template_id: impl Into<String>, slot_id: impl Into<String>) -> Self {
        Self {
            slot: Some(SlotContext::new(template_id, slot_id)),
            ..Default::default()
        }
    }
}
