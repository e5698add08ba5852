//! Default values and constants for all configuration settings.
//!
//! Endpoint and radius defaults come from the components that use them so
//! the library and the config file never disagree.

use super::file::config_directory;
use super::settings::*;
use crate::panorama::{DEFAULT_NARROW_RADIUS_M, DEFAULT_WIDE_RADIUS_M};
use crate::probe::DEFAULT_SUBTASK_TIMEOUT_SECS;
use crate::provider::{
    DEFAULT_DESCRIPTION_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LEGEND_URL, DEFAULT_METADATA_URL,
    DEFAULT_UNITS_URL, DEFAULT_USER_AGENT,
};

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "magma.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            geology: GeologySettings {
                units_url: DEFAULT_UNITS_URL.to_string(),
                legend_url: DEFAULT_LEGEND_URL.to_string(),
            },
            description: DescriptionSettings {
                endpoint: DEFAULT_DESCRIPTION_URL.to_string(),
            },
            panorama: PanoramaSettings {
                metadata_url: DEFAULT_METADATA_URL.to_string(),
                api_key: None,
                narrow_radius: DEFAULT_NARROW_RADIUS_M,
                wide_radius: DEFAULT_WIDE_RADIUS_M,
            },
            network: NetworkSettings {
                timeout: DEFAULT_HTTP_TIMEOUT_SECS,
                subtask_timeout: DEFAULT_SUBTASK_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
