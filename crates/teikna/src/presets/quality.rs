//! Quality presets: sampler settings bundled by effort level.

/// A named quality preset.
#[derive(Debug, Clone)]
pub struct QualityPreset {
    /// Preset id for lookup.
    pub id: &'static str,
    /// Sampling step count.
    pub steps: u32,
    /// Classifier-free guidance scale.
    pub cfg: f32,
    /// Sampler name as the backend expects it.
    pub sampler: &'static str,
    /// Scheduler name as the backend expects it.
    pub scheduler: &'static str,
    /// Whether to run a hi-res fix pass.
    pub hires_fix: bool,
    /// Upscale factor for the hi-res pass (1.0 = none).
    pub upscale: f32,
    /// Human-readable description.
    pub description: &'static str,
}

/// Fast preview quality.
pub const QUALITY_DRAFT: QualityPreset = QualityPreset {
    id: "draft",
    steps: 12,
    cfg: 6.0,
    sampler: "euler",
    scheduler: "normal",
    hires_fix: false,
    upscale: 1.0,
    description: "Fast previews for layout iteration.",
};

/// Default quality.
pub const QUALITY_STANDARD: QualityPreset = QualityPreset {
    id: "standard",
    steps: 28,
    cfg: 7.0,
    sampler: "euler_ancestral",
    scheduler: "normal",
    hires_fix: false,
    upscale: 1.0,
    description: "Balanced quality for panel drafts.",
};

/// High quality with a hi-res pass.
pub const QUALITY_HIGH: QualityPreset = QualityPreset {
    id: "high",
    steps: 40,
    cfg: 7.5,
    sampler: "dpmpp_2m",
    scheduler: "karras",
    hires_fix: true,
    upscale: 1.5,
    description: "High quality with hi-res fix.",
};

/// Maximum quality for final renders.
pub const QUALITY_ULTRA: QualityPreset = QualityPreset {
    id: "ultra",
    steps: 60,
    cfg: 8.0,
    sampler: "dpmpp_2m_sde",
    scheduler: "karras",
    hires_fix: true,
    upscale: 2.0,
    description: "Maximum quality for final panels.",
};

/// All registered quality presets, ordered by effort.
pub const ALL_QUALITY_PRESETS: &[&QualityPreset] = &[
    &QUALITY_DRAFT,
    &QUALITY_STANDARD,
    &QUALITY_HIGH,
    &QUALITY_ULTRA,
];

/// Preset substituted when a requested id is unknown.
pub const DEFAULT_QUALITY: &QualityPreset = &QUALITY_STANDARD;

/// Find a quality preset by id (case-insensitive).
pub fn get_quality_preset(id: &str) -> Option<&'static QualityPreset> {
    let id_lower = id.to_lowercase();

    ALL_QUALITY_PRESETS
        .iter()
        .find(|p| p.id.to_lowercase() == id_lower)
        .copied()
}

/// Find a quality preset by id, falling back to [`DEFAULT_QUALITY`]
/// for unknown ids. Never fails.
pub fn get_quality_preset_safe(id: &str) -> &'static QualityPreset {
    get_quality_preset(id).unwrap_or(DEFAULT_QUALITY)
}

/// List all registered quality preset ids.
pub fn list_quality_presets() -> Vec<&'static str> {
    ALL_QUALITY_PRESETS.iter().map(|p| p.id).collect()
}
