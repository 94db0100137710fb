use super::PlayerConfig;

use crate::{PlaydeckError, Result};

use std::{fs, path::Path};

use tracing::debug;

impl PlayerConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    /// Returns `PlaydeckError::TomlParseError` for malformed TOML or
    /// `PlaydeckError::InvalidConfigField` when validation fails.
    pub fn from_toml_str(content: &str) -> Result<PlayerConfig> {
        let config: PlayerConfig =
            toml::from_str(content).map_err(|e| PlaydeckError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads, parses and validates a configuration file.
    ///
    /// # Errors
    /// Returns `PlaydeckError::IoError` if the file cannot be read, or the
    /// parse/validation errors of [`PlayerConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<PlayerConfig> {
        debug!("Loading player config from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| PlaydeckError::io(e, path))?;
        let config: PlayerConfig =
            toml::from_str(&content).map_err(|e| PlaydeckError::toml_parse(e, Some(path)))?;
        config.validate()?;

        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    /// Returns `PlaydeckError::ConfigValidation` if a value has no TOML representation.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| PlaydeckError::ConfigValidation {
            component: "player".to_string(),
            details: e.to_string(),
        })
    }
}
