//! Teikna - generation parameter resolution for image pipelines.
//!
//! Reconciles partial, possibly conflicting specifications of
//! image-generation parameters (dimensions, sampler settings, model
//! choice, LoRA stack) -- supplied as explicit overrides, named
//! presets, page-layout slot geometry, or model-family defaults -- into
//! one complete, internally consistent parameter set for a downstream
//! generation backend.
//!
//! The crate is a pure computation boundary: no persistence, no image
//! generation, no network. Resolution never fails; degraded inputs are
//! reported as warnings on the result.
//!
//! # Quick Start
//!
//! ```ignore
//! use teikna::{ResolutionEngine, ResolutionRequest};
//!
//! let engine = ResolutionEngine::default();
//! let resolved = engine
//!     .resolve(&ResolutionRequest::with_size_preset("wide"))
//!     .await;
//! assert_eq!(resolved.width % 64, 0);
//! ```

pub mod common;
pub mod config;
pub mod config_loader;
pub mod dimensions;
pub mod layout;
pub mod presets;
pub mod resolve;

// Re-export main API
pub use common::{detect_model_family, ModelFamily, ResolveWarning, TeiknaError, TeiknaResult};
pub use config::EngineConfig;
pub use config_loader::{load_config, load_config_from_path};
pub use presets::Dimensions;
pub use resolve::{
    GenerationOverrides, LoraSpec, OptimalSize, ResolutionEngine, ResolutionRequest,
    ResolvedConfig, SlotContext, SourceTier, StrategyKind,
};

// Prelude
pub mod prelude {
    pub use crate::common::{detect_model_family, ModelFamily};
    pub use crate::config::EngineConfig;
    pub use crate::presets::Dimensions;
    pub use crate::resolve::{
        GenerationOverrides, ResolutionEngine, ResolutionRequest, ResolvedConfig, SourceTier,
    };
}

/// Get the teikna version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
