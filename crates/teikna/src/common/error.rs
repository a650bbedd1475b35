//! Common error types for teikna.

use std::fmt;
use thiserror::Error;

/// Errors that can occur when using teikna.
///
/// Note that parameter resolution itself has no failure path: every
/// degraded input is reported through [`ResolveWarning`] on the resolved
/// config instead. These errors cover the surrounding surfaces only
/// (configuration files, future preset sources).
#[derive(Debug, Error)]
pub enum TeiknaError {
    /// Configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for teikna operations.
pub type TeiknaResult<T> = Result<T, TeiknaError>;

/// Warning emitted when a request field had to be degraded to keep the
/// resolved config usable.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolveWarning {
    /// Name of the field that was degraded.
    pub field: String,
    /// What happened and what was substituted.
    pub message: String,
}

impl ResolveWarning {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning [{}]: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = ResolveWarning::new("steps", "clamped 0 to 1");
        let msg = w.to_string();
        assert!(msg.contains("steps"));
        assert!(msg.contains("clamped"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TeiknaError>();
    }
}
