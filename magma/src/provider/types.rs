//! Provider types and traits

use crate::coord::GeoCoordinate;
use crate::geology::{GeologicalUnit, Legend};
use std::fmt;
use std::future::Future;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed (connection, timeout, non-success status)
    HttpError(String),
    /// Response body could not be decoded
    InvalidResponse(String),
    /// The remote service answered but reported a failure
    ServiceError(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ProviderError::ServiceError(msg) => write!(f, "Service error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Source of geological map units and their legend.
///
/// Both lookups are keyed by the same coordinate. Implementors return an
/// empty unit list, not an error, when the location is simply unmapped.
pub trait GeologyProvider: Send + Sync {
    /// Looks up the rock units mapped at a coordinate.
    fn units(
        &self,
        coordinate: GeoCoordinate,
    ) -> impl Future<Output = Result<Vec<GeologicalUnit>, ProviderError>> + Send;

    /// Looks up display colors for the map sources covering a coordinate.
    fn legend(
        &self,
        coordinate: GeoCoordinate,
    ) -> impl Future<Output = Result<Legend, ProviderError>> + Send;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;
}

/// Source of street-level panoramas.
pub trait PanoramaProvider: Send + Sync {
    /// Searches for the nearest panorama within `radius_m` metres.
    ///
    /// # Returns
    ///
    /// The resolved panorama position, `None` when nothing lies within the
    /// radius, or an error for transport and service faults.
    fn search(
        &self,
        coordinate: GeoCoordinate,
        radius_m: u32,
    ) -> impl Future<Output = Result<Option<GeoCoordinate>, ProviderError>> + Send;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;
}

/// Source of natural-language descriptions of a location's geology.
pub trait DescriptionProvider: Send + Sync {
    /// Requests a raw description for the given coordinate and units.
    fn describe(
        &self,
        coordinate: GeoCoordinate,
        units: &[GeologicalUnit],
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;
}
