//! JSON export of the current session state.
//!
//! The document holds the probed location, the units rendered for it, and
//! any measurement points:
//!
//! ```json
//! {
//!   "location": { "lat": 36.1, "lng": -112.1 },
//!   "geologicalUnits": [ { "name": "Kaibab Formation", "t_age": 259.9, ... } ],
//!   "measurements": [ { "lat": 36.1, "lng": -112.1 } ]
//! }
//! ```

use crate::coord::GeoCoordinate;
use crate::geology::GeologicalUnit;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File name used when no export path is given.
pub const DEFAULT_EXPORT_FILE: &str = "geological-data.json";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Snapshot of a session ready to be written out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub location: GeoCoordinate,
    pub geological_units: Vec<GeologicalUnit>,
    pub measurements: Vec<GeoCoordinate>,
}

impl ExportDocument {
    pub fn new(
        location: GeoCoordinate,
        geological_units: &[GeologicalUnit],
        measurements: &[GeoCoordinate],
    ) -> Self {
        Self {
            location,
            geological_units: geological_units.to_vec(),
            measurements: measurements.to_vec(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            units = self.geological_units.len(),
            measurements = self.measurements.len(),
            "Exported session data"
        );
        Ok(())
    }
}
