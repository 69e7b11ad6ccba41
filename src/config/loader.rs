//! Configuration file discovery and loading.

use crate::config::schema::SproutConfig;
use crate::error::{Result, SproutError};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the user's global config: `~/.sprout/config.yml`.
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".sprout").join("config.yml"))
}

/// Parse YAML content into a [`SproutConfig`].
///
/// `source_path` is only used for error reporting. An empty document
/// yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SproutConfig> {
    if content.trim().is_empty() {
        return Ok(SproutConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SproutError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
///
/// A missing file is not an error; the defaults are returned instead.
pub fn load_config_file(path: &Path) -> Result<SproutConfig> {
    match fs::read_to_string(path) {
        Ok(content) => parse_config(&content, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(SproutConfig::default())
        }
        Err(e) => Err(SproutError::Io(e)),
    }
}

/// Load configuration with optional path override, then apply `SPROUT_*`
/// environment overrides.
pub fn load_config(config_override: Option<&Path>) -> Result<SproutConfig> {
    let mut config = match config_override.map(Path::to_path_buf).or_else(user_config_path) {
        Some(path) => load_config_file(&path)?,
        None => SproutConfig::default(),
    };

    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}
