//! Configuration key access and validation.
//!
//! This module provides a type-safe interface for getting and setting
//! configuration values by key name, with validation via the Specification Pattern.

use std::str::FromStr;
use thiserror::Error;

use super::file::ConfigFile;
use super::parser::{expand_tilde, is_http_url};
use super::writer::path_to_string;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    // Geology settings
    GeologyUnitsUrl,
    GeologyLegendUrl,

    // Description settings
    DescriptionEndpoint,

    // Panorama settings
    PanoramaMetadataUrl,
    PanoramaApiKey,
    PanoramaNarrowRadius,
    PanoramaWideRadius,

    // Network settings
    NetworkTimeout,
    NetworkSubtaskTimeout,
    NetworkUserAgent,

    // Logging settings
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "panorama.wide_radius").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::GeologyUnitsUrl => "geology.units_url",
            ConfigKey::GeologyLegendUrl => "geology.legend_url",
            ConfigKey::DescriptionEndpoint => "description.endpoint",
            ConfigKey::PanoramaMetadataUrl => "panorama.metadata_url",
            ConfigKey::PanoramaApiKey => "panorama.api_key",
            ConfigKey::PanoramaNarrowRadius => "panorama.narrow_radius",
            ConfigKey::PanoramaWideRadius => "panorama.wide_radius",
            ConfigKey::NetworkTimeout => "network.timeout",
            ConfigKey::NetworkSubtaskTimeout => "network.subtask_timeout",
            ConfigKey::NetworkUserAgent => "network.user_agent",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "panorama").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "wide_radius").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::GeologyUnitsUrl => config.geology.units_url.clone(),
            ConfigKey::GeologyLegendUrl => config.geology.legend_url.clone(),
            ConfigKey::DescriptionEndpoint => config.description.endpoint.clone(),
            ConfigKey::PanoramaMetadataUrl => config.panorama.metadata_url.clone(),
            ConfigKey::PanoramaApiKey => config.panorama.api_key.clone().unwrap_or_default(),
            ConfigKey::PanoramaNarrowRadius => config.panorama.narrow_radius.to_string(),
            ConfigKey::PanoramaWideRadius => config.panorama.wide_radius.to_string(),
            ConfigKey::NetworkTimeout => config.network.timeout.to_string(),
            ConfigKey::NetworkSubtaskTimeout => config.network.subtask_timeout.to_string(),
            ConfigKey::NetworkUserAgent => config.network.user_agent.clone(),
            ConfigKey::LoggingFile => path_to_string(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification, and the
    /// resulting configuration as a whole, before changing anything.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;

        let mut candidate = config.clone();
        self.apply(&mut candidate, value.trim()).map_err(|reason| self.failed(reason))?;
        candidate.validate().map_err(|e| self.failed(e.to_string()))?;

        *config = candidate;
        Ok(())
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| self.failed(reason))
    }

    fn failed(&self, reason: String) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason,
        }
    }

    fn apply(&self, config: &mut ConfigFile, value: &str) -> Result<(), String> {
        match self {
            ConfigKey::GeologyUnitsUrl => config.geology.units_url = trimmed_url(value),
            ConfigKey::GeologyLegendUrl => config.geology.legend_url = trimmed_url(value),
            ConfigKey::DescriptionEndpoint => config.description.endpoint = trimmed_url(value),
            ConfigKey::PanoramaMetadataUrl => config.panorama.metadata_url = trimmed_url(value),
            ConfigKey::PanoramaApiKey => {
                config.panorama.api_key = Some(value.to_string()).filter(|v| !v.is_empty());
            }
            ConfigKey::PanoramaNarrowRadius => config.panorama.narrow_radius = parse_positive(value)?,
            ConfigKey::PanoramaWideRadius => config.panorama.wide_radius = parse_positive(value)?,
            ConfigKey::NetworkTimeout => config.network.timeout = parse_positive(value)?,
            ConfigKey::NetworkSubtaskTimeout => {
                config.network.subtask_timeout = parse_positive(value)?;
            }
            ConfigKey::NetworkUserAgent => config.network.user_agent = value.to_string(),
            ConfigKey::LoggingFile => config.logging.file = expand_tilde(value),
        }
        Ok(())
    }

    /// Get the validation specification for this key.
    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::GeologyUnitsUrl
            | ConfigKey::GeologyLegendUrl
            | ConfigKey::DescriptionEndpoint
            | ConfigKey::PanoramaMetadataUrl => Box::new(UrlSpec),
            ConfigKey::PanoramaApiKey => Box::new(AnyStringSpec),
            ConfigKey::PanoramaNarrowRadius
            | ConfigKey::PanoramaWideRadius
            | ConfigKey::NetworkTimeout
            | ConfigKey::NetworkSubtaskTimeout => Box::new(PositiveIntegerSpec),
            ConfigKey::NetworkUserAgent | ConfigKey::LoggingFile => Box::new(NonEmptySpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::GeologyUnitsUrl,
            ConfigKey::GeologyLegendUrl,
            ConfigKey::DescriptionEndpoint,
            ConfigKey::PanoramaMetadataUrl,
            ConfigKey::PanoramaApiKey,
            ConfigKey::PanoramaNarrowRadius,
            ConfigKey::PanoramaWideRadius,
            ConfigKey::NetworkTimeout,
            ConfigKey::NetworkSubtaskTimeout,
            ConfigKey::NetworkUserAgent,
            ConfigKey::LoggingFile,
        ]
    }
}

fn trimmed_url(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

fn parse_positive<T: FromStr>(value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| "must be a positive integer".to_string())
}

// ============================================================================
// Value Specifications (Specification Pattern)
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Check if the value satisfies this specification.
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Specification that accepts any string value.
struct AnyStringSpec;

impl ValueSpecification for AnyStringSpec {
    fn is_satisfied_by(&self, _value: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Specification that rejects empty values.
struct NonEmptySpec;

impl ValueSpecification for NonEmptySpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

/// Specification for integers greater than zero that fit in 32 bits.
struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u32>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

/// Specification for http(s) URLs.
struct UrlSpec;

impl ValueSpecification for UrlSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if is_http_url(value) {
            Ok(())
        } else {
            Err("must be a URL starting with http:// or https://".to_string())
        }
    }
}
