//! Shared types used across the crate.

mod error;
mod family;

pub use error::{ResolveWarning, TeiknaError, TeiknaResult};
pub use family::{detect_model_family, ModelFamily, ALL_FAMILIES};
