//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [geology] section
    if let Some(section) = ini.section(Some("geology")) {
        if let Some(v) = url_value(section, "geology", "units_url")? {
            config.geology.units_url = v;
        }
        if let Some(v) = url_value(section, "geology", "legend_url")? {
            config.geology.legend_url = v;
        }
    }

    // [description] section
    if let Some(section) = ini.section(Some("description")) {
        if let Some(v) = url_value(section, "description", "endpoint")? {
            config.description.endpoint = v;
        }
    }

    // [panorama] section
    if let Some(section) = ini.section(Some("panorama")) {
        if let Some(v) = url_value(section, "panorama", "metadata_url")? {
            config.panorama.metadata_url = v;
        }
        if let Some(v) = section.get("api_key") {
            let v = v.trim();
            if !v.is_empty() {
                config.panorama.api_key = Some(v.to_string());
            }
        }
        if let Some(v) = positive_value(section, "panorama", "narrow_radius", "metres")? {
            config.panorama.narrow_radius = v;
        }
        if let Some(v) = positive_value(section, "panorama", "wide_radius", "metres")? {
            config.panorama.wide_radius = v;
        }
    }

    // [network] section
    if let Some(section) = ini.section(Some("network")) {
        if let Some(v) = positive_value(section, "network", "timeout", "seconds")? {
            config.network.timeout = v;
        }
        if let Some(v) = positive_value(section, "network", "subtask_timeout", "seconds")? {
            config.network.subtask_timeout = v;
        }
        if let Some(v) = section.get("user_agent") {
            let v = v.trim();
            if !v.is_empty() {
                config.network.user_agent = v.to_string();
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    config.validate()?;
    Ok(config)
}

/// Reads an http(s) URL. Empty values keep the default.
fn url_value(
    section: &Properties,
    section_name: &str,
    key: &str,
) -> Result<Option<String>, ConfigFileError> {
    let Some(v) = section.get(key).map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if !is_http_url(v) {
        return Err(ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: key.to_string(),
            value: v.to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }
    Ok(Some(v.trim_end_matches('/').to_string()))
}

/// Reads a strictly positive integer.
fn positive_value<T>(
    section: &Properties,
    section_name: &str,
    key: &str,
    unit: &str,
) -> Result<Option<T>, ConfigFileError>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(v) = section.get(key) else {
        return Ok(None);
    };
    match v.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(Some(n)),
        _ => Err(ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: key.to_string(),
            value: v.to_string(),
            reason: format!("must be a positive integer ({})", unit),
        }),
    }
}

pub(super) fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Expand `~/` prefix to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
