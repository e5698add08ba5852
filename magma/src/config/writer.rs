//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::{ConfigFile, API_KEY_ENV_VAR};

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let api_key = config.panorama.api_key.as_deref().unwrap_or("");

    format!(
        r#"[geology]
; Geological map-units lookup (Macrostrat API v2)
units_url = {}
; Legend lookup used to color units by map source (best-effort)
legend_url = {}

[description]
; Text-generation endpoint receiving {{lat, lng, geological_data}} as JSON
endpoint = {}

[panorama]
; Street View Static API metadata endpoint
metadata_url = {}
; Google Maps API key with the Street View Static API enabled
; The {} environment variable takes precedence when set
; Leave empty to disable panorama search
api_key = {}
; First search radius in metres; most clicks land near a road
narrow_radius = {}
; Fallback search radius in metres, used only when the first search misses
wide_radius = {}

[network]
; Timeout in seconds for each HTTP request (default: 30)
timeout = {}
; Deadline in seconds for each probe sub-task (default: 10)
subtask_timeout = {}
; User-Agent header sent with every request
user_agent = {}

[logging]
; Log file path, cleared at the start of each run
file = {}
"#,
        config.geology.units_url,
        config.geology.legend_url,
        config.description.endpoint,
        config.panorama.metadata_url,
        API_KEY_ENV_VAR,
        api_key,
        config.panorama.narrow_radius,
        config.panorama.wide_radius,
        config.network.timeout,
        config.network.subtask_timeout,
        config.network.user_agent,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing home dir to ~.
pub(super) fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
