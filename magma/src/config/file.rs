//! Configuration file handling for ~/.magma/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use super::settings::*;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.magma/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.magma/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Checks rules that span more than one key.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        if self.panorama.narrow_radius >= self.panorama.wide_radius {
            return Err(ConfigFileError::InvalidValue {
                section: "panorama".to_string(),
                key: "narrow_radius".to_string(),
                value: self.panorama.narrow_radius.to_string(),
                reason: format!(
                    "must be less than wide_radius ({})",
                    self.panorama.wide_radius
                ),
            });
        }
        Ok(())
    }
}

/// Get the path to the config directory (~/.magma).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".magma")
}

/// Get the path to the config file (~/.magma/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panorama::{DEFAULT_NARROW_RADIUS_M, DEFAULT_WIDE_RADIUS_M};
    use crate::provider::{DEFAULT_DESCRIPTION_URL, DEFAULT_USER_AGENT};

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.description.endpoint, DEFAULT_DESCRIPTION_URL);
        assert!(config.panorama.api_key.is_none());
        assert_eq!(config.panorama.narrow_radius, DEFAULT_NARROW_RADIUS_M);
        assert_eq!(config.panorama.wide_radius, DEFAULT_WIDE_RADIUS_M);
        assert_eq!(config.network.timeout, 30);
        assert_eq!(config.network.subtask_timeout, 10);
        assert_eq!(config.network.user_agent, DEFAULT_USER_AGENT);
        assert!(config.logging.file.ends_with(".magma/magma.log"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.panorama.api_key = Some("abc123".to_string());
        config.panorama.wide_radius = 8000;
        config.network.subtask_timeout = 4;
        config.description.endpoint = "http://localhost:9000/describe".to_string();
        config.save_to(&config_path).unwrap();

        let reloaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_validate_rejects_inverted_radii() {
        let mut config = ConfigFile::default();
        config.panorama.narrow_radius = 5000;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be less than wide_radius"));
    }
}
