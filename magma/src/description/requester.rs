//! Description requests against a text-generation service.

use crate::coord::GeoCoordinate;
use crate::geology::GeologicalUnit;
use crate::provider::{DescriptionProvider, ProviderError};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::normalize::{normalize, DescriptionResult};

/// Why no description is available. Never fatal to a probe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptionError {
    /// Descriptions are only requested for locations with mapped units
    #[error("No geological units to describe")]
    NoUnits,

    /// The service failed or reported `success: false`
    #[error("Description unavailable: {0}")]
    Provider(#[from] ProviderError),

    /// No answer within the sub-task deadline
    #[error("Description request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Requests and normalises descriptions for a set of units.
pub struct DescriptionRequester<D: DescriptionProvider> {
    provider: D,
}

impl<D: DescriptionProvider> DescriptionRequester<D> {
    pub fn new(provider: D) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Requests a description of `units` at `coordinate`.
    ///
    /// # Errors
    ///
    /// [`DescriptionError::NoUnits`] when `units` is empty, otherwise any
    /// provider failure.
    pub async fn request(
        &self,
        coordinate: GeoCoordinate,
        units: &[GeologicalUnit],
    ) -> Result<DescriptionResult, DescriptionError> {
        if units.is_empty() {
            return Err(DescriptionError::NoUnits);
        }

        let raw = self.provider.describe(coordinate, units).await?;
        let result = normalize(&raw);

        debug!(
            raw_chars = raw.chars().count(),
            chars = result.text.chars().count(),
            truncated = result.truncated,
            "Description normalised"
        );

        Ok(result)
    }
}
