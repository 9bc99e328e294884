//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::TerrainConfig;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "terrain.toml";

/// Loads `<dir>/terrain.toml`, falling back to defaults when the file does not
/// exist.
pub fn load_config(dir: &Path) -> Result<TerrainConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(TerrainConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads an explicitly named configuration file, which must exist.
pub fn load_config_file(path: &Path) -> Result<TerrainConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<TerrainConfig, ConfigError> {
    let config: TerrainConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TerrainConfig) -> Result<(), ConfigError> {
    if config.state.path.trim().is_empty() {
        return Err(ConfigError::MissingField("state.path".to_string()));
    }
    Ok(())
}
