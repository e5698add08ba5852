//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Environment variable that overrides `panorama.api_key`.
pub const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Geological database endpoints
    pub geology: GeologySettings,
    /// Text-generation endpoint
    pub description: DescriptionSettings,
    /// Street-level panorama search
    pub panorama: PanoramaSettings,
    /// HTTP behaviour
    pub network: NetworkSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Geological database configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeologySettings {
    /// Map-units lookup URL, queried with `?lat=..&lng=..`
    pub units_url: String,
    /// Legend lookup URL, queried with `?lat=..&lng=..`
    pub legend_url: String,
}

/// Description service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionSettings {
    pub endpoint: String,
}

/// Panorama search configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PanoramaSettings {
    /// Street View metadata endpoint
    pub metadata_url: String,
    /// Google Maps API key; without one panoramas are always unavailable
    pub api_key: Option<String>,
    /// Tier 1 search radius in metres
    pub narrow_radius: u32,
    /// Tier 2 search radius in metres
    pub wide_radius: u32,
}

impl PanoramaSettings {
    /// API key to use, preferring a non-empty `GOOGLE_MAPS_API_KEY`.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV_VAR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

/// Network configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSettings {
    /// Per-request HTTP timeout in seconds.
    pub timeout: u64,
    /// Deadline in seconds for each probe sub-task.
    pub subtask_timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
