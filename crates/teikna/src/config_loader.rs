//! Configuration discovery and loading.
//!
//! A config file is never required: resolution works out of the box on
//! shipped defaults. When files exist, a project-local `teikna.toml`
//! shadows the per-user one under the platform config directory.

use std::path::Path;

use crate::common::{TeiknaError, TeiknaResult};
use crate::config::EngineConfig;

/// Load configuration with standard priority:
/// `./teikna.toml` > `~/.config/teikna/config.toml` > defaults.
///
/// A missing file at either location is not an error; a file that
/// exists but cannot be read, parsed, or validated is.
pub fn load_config() -> anyhow::Result<EngineConfig> {
    let local = Path::new("./teikna.toml");
    if local.exists() {
        return Ok(load_config_from_path(local)?);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("teikna").join("config.toml");
        if user_config.exists() {
            return Ok(load_config_from_path(&user_config)?);
        }
    }

    Ok(EngineConfig::default())
}

/// Load and validate a config file at an explicit path.
///
/// Errors carry the offending path so a caller surfacing them does not
/// have to reconstruct which of the candidate locations failed.
pub fn load_config_from_path(path: &Path) -> TeiknaResult<EngineConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| TeiknaError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;

    let config: EngineConfig =
        toml::from_str(&contents).map_err(|source| TeiknaError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("teikna-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let path = temp_config("valid.toml", "default_model = \"flux1-dev.safetensors\"\n");
        let config = load_config_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.default_model, "flux1-dev.safetensors");
    }

    #[test]
    fn test_missing_file_is_config_read_error() {
        let err = load_config_from_path(Path::new("/nonexistent/teikna.toml")).unwrap_err();
        match err {
            TeiknaError::ConfigRead { path, .. } => assert!(path.contains("nonexistent")),
            other => panic!("expected ConfigRead, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_toml_is_config_parse_error() {
        let path = temp_config("broken.toml", "default_model = [not toml\n");
        let err = load_config_from_path(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        match err {
            TeiknaError::ConfigParse { path, .. } => assert!(path.contains("broken")),
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_tolerance_is_invalid_config() {
        let path = temp_config("tolerance.toml", "preset_tolerance = -0.5\n");
        let err = load_config_from_path(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, TeiknaError::InvalidConfig(_)));
    }
}
