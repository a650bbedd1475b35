//! Generation parameter resolution.
//!
//! Reconciles partial, possibly conflicting parameter specifications
//! (explicit overrides, named presets, page-layout slot geometry,
//! model-family defaults) into one complete configuration for the
//! image-generation backend, with per-field provenance.
//!
//! # Quick Start
//!
//! ```ignore
//! use teikna::resolve::{ResolutionEngine, ResolutionRequest};
//!
//! let engine = ResolutionEngine::default();
//! let resolved = engine
//!     .resolve(&ResolutionRequest::with_quality_preset("high"))
//!     .await;
//! assert_eq!(resolved.steps, 40);
//! ```

mod engine;
mod request;
mod resolved;
mod strategy;

pub use engine::{ResolutionEngine, StrategyKind};
pub use request::{GenerationOverrides, LoraSpec, ResolutionRequest, SlotContext};
pub use resolved::{FieldSources, ResolvedConfig, SourceTier};
pub use strategy::{
    DefaultStrategy, OptimalSize, ResolveContext, ResolveStrategy, SlotAwareStrategy, MAX_CFG,
    MAX_LORA_WEIGHT, MAX_STEPS, MIN_CFG, MIN_STEPS,
};
