//! Geological data fetching: mandatory units plus best-effort legend.

use crate::coord::GeoCoordinate;
use crate::provider::{GeologyProvider, ProviderError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::types::{GeologicalUnit, Legend};

/// Failure of the mandatory units lookup.
///
/// An empty unit list is not an error; see [`GeologyReport::is_empty`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Network or HTTP-level failure
    #[error("Geological data request failed: {0}")]
    Transport(String),

    /// Response arrived but could not be decoded
    #[error("Geological data could not be parsed: {0}")]
    Parse(String),

    /// No response within the sub-task deadline
    #[error("Geological data request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl From<ProviderError> for FetchError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::InvalidResponse(msg) => FetchError::Parse(msg),
            ProviderError::HttpError(msg) | ProviderError::ServiceError(msg) => {
                FetchError::Transport(msg)
            }
        }
    }
}

/// Units found at a location together with whatever legend was available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeologyReport {
    pub units: Vec<GeologicalUnit>,
    pub legend: Legend,
}

impl GeologyReport {
    /// True when the location has no mapped units ("no data" state).
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Retrieves rock units and legend for a coordinate.
///
/// Both remote calls run concurrently. The legend is decorative: when it
/// fails the report carries an empty legend and rendering falls back to
/// default colors.
pub struct GeologyFetcher<P: GeologyProvider> {
    provider: P,
}

impl<P: GeologyProvider> GeologyFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetches units and legend for `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] only when the units lookup fails.
    pub async fn fetch(&self, coordinate: GeoCoordinate) -> Result<GeologyReport, FetchError> {
        debug!(
            lat = coordinate.latitude(),
            lon = coordinate.longitude(),
            provider = self.provider.name(),
            "Fetching geological units and legend"
        );

        let (units, legend) = tokio::join!(
            self.provider.units(coordinate),
            self.provider.legend(coordinate)
        );

        let units = units.map_err(|e| {
            error!(
                lat = coordinate.latitude(),
                lon = coordinate.longitude(),
                error = %e,
                "Geological units lookup failed"
            );
            FetchError::from(e)
        })?;

        let legend = legend.unwrap_or_else(|e| {
            warn!(error = %e, "Legend unavailable, using default colors");
            Legend::default()
        });

        if units.is_empty() {
            info!(
                lat = coordinate.latitude(),
                lon = coordinate.longitude(),
                "No geological data at this location"
            );
        }

        Ok(GeologyReport { units, legend })
    }
}
