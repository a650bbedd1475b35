//! Immutable preset catalogs and their pure lookup functions.
//!
//! Three catalogs: size presets (aspect-ratio buckets with per-family
//! dimensions), quality presets (sampler effort bundles), and model
//! presets (per-family sampler defaults). All tables are consts built
//! at compile time; concurrent reads are always safe.

mod model;
mod quality;
mod size;

pub use model::{get_model_preset, ModelPreset, ALL_MODEL_PRESETS};
pub use quality::{
    get_quality_preset, get_quality_preset_safe, list_quality_presets, QualityPreset,
    ALL_QUALITY_PRESETS, DEFAULT_QUALITY,
};
pub use size::{
    find_closest_preset, get_size_preset, list_size_presets, Dimensions, SizePreset,
    ALL_SIZE_PRESETS,
};
