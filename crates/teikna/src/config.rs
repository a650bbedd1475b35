//! Engine configuration.
//!
//! Loaded from teikna.toml, provides the global-tier values consulted
//! during resolution. Caller-supplied overrides always win over these.

use serde::{Deserialize, Serialize};

use crate::common::{TeiknaError, TeiknaResult};

/// Global configuration for the resolution engine.
///
/// Every field has a shipped default, so an empty config file (or no
/// file at all) is valid.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Checkpoint filename used when a request names no model.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Negative prompt used when a request supplies none.
    #[serde(default = "default_negative_prompt")]
    pub default_negative_prompt: String,

    /// Maximum relative aspect-ratio error for a size preset to be
    /// considered a match during nearest-preset search.
    #[serde(default = "default_preset_tolerance")]
    pub preset_tolerance: f32,
}

impl EngineConfig {
    /// Reject values a config file can express but resolution cannot
    /// use. The tolerance is a relative aspect-ratio error, so it must
    /// be a finite fraction below 1.
    pub fn validate(&self) -> TeiknaResult<()> {
        if !self.preset_tolerance.is_finite()
            || self.preset_tolerance <= 0.0
            || self.preset_tolerance >= 1.0
        {
            return Err(TeiknaError::InvalidConfig(format!(
                "preset_tolerance must be in (0, 1), got {}",
                self.preset_tolerance
            )));
        }
        if self.default_model.trim().is_empty() {
            return Err(TeiknaError::InvalidConfig(
                "default_model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_model() -> String {
    "v1-5-pruned-emaonly.safetensors".to_string()
}

fn default_negative_prompt() -> String {
    "lowres, bad anatomy, bad hands, text, error, watermark, signature".to_string()
}

fn default_preset_tolerance() -> f32 {
    0.12
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            default_negative_prompt: default_negative_prompt(),
            preset_tolerance: default_preset_tolerance(),
        }
    }
}
