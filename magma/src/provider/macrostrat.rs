//! Macrostrat geological map provider.
//!
//! Queries the Macrostrat v2 API for the map units under a point and for the
//! legend of the map sources covering it.
//!
//! # API Endpoints
//!
//! - Units: `https://macrostrat.org/api/v2/geologic_units/map?lat={lat}&lng={lng}`
//! - Legend: `https://macrostrat.org/api/v2/geologic_units/map/legend?lat={lat}&lng={lng}`
//!
//! Both answer with a `{"success": {"data": [...]}}` envelope. A response
//! without `success` (or with empty `data`) means the point is unmapped.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::coord::GeoCoordinate;
use crate::geology::{lenient_string, GeologicalUnit, Legend, LegendEntry};
use crate::provider::{AsyncHttpClient, GeologyProvider, ProviderError};

/// Default Macrostrat units endpoint.
pub const DEFAULT_UNITS_URL: &str = "https://macrostrat.org/api/v2/geologic_units/map";

/// Default Macrostrat legend endpoint.
pub const DEFAULT_LEGEND_URL: &str = "https://macrostrat.org/api/v2/geologic_units/map/legend";

#[derive(Deserialize)]
struct Envelope<T> {
    success: Option<SuccessBody<T>>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct SuccessBody<T> {
    data: Option<Vec<T>>,
}

#[derive(Deserialize)]
struct RawLegendEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    source_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    color: Option<String>,
}

/// Geological data provider backed by the Macrostrat API.
pub struct MacrostratProvider<C: AsyncHttpClient> {
    http_client: C,
    units_url: String,
    legend_url: String,
}

impl<C: AsyncHttpClient> MacrostratProvider<C> {
    /// Creates a provider against the public Macrostrat endpoints.
    pub fn new(http_client: C) -> Self {
        Self::with_endpoints(http_client, DEFAULT_UNITS_URL, DEFAULT_LEGEND_URL)
    }

    /// Creates a provider against custom endpoints (mirrors, test servers).
    pub fn with_endpoints(http_client: C, units_url: &str, legend_url: &str) -> Self {
        Self {
            http_client,
            units_url: units_url.trim_end_matches('/').to_string(),
            legend_url: legend_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_url(base: &str, coordinate: GeoCoordinate) -> String {
        format!(
            "{}?lat={}&lng={}",
            base,
            coordinate.latitude(),
            coordinate.longitude()
        )
    }

    fn parse_data<T: DeserializeOwned>(
        body: &[u8],
        what: &str,
    ) -> Result<Vec<T>, ProviderError> {
        let envelope: Envelope<T> = serde_json::from_slice(body)
            .map_err(|e| ProviderError::InvalidResponse(format!("{} response: {}", what, e)))?;

        if let Some(err) = envelope.error {
            warn!(error = %err, "Macrostrat reported an error, treating as no data");
        }

        Ok(envelope
            .success
            .and_then(|body| body.data)
            .unwrap_or_default())
    }
}

impl<C: AsyncHttpClient> GeologyProvider for MacrostratProvider<C> {
    async fn units(&self, coordinate: GeoCoordinate) -> Result<Vec<GeologicalUnit>, ProviderError> {
        let url = Self::build_url(&self.units_url, coordinate);
        let body = self.http_client.get(&url).await?;
        let units = Self::parse_data::<GeologicalUnit>(&body, "units")?;
        debug!(count = units.len(), "Macrostrat units received");
        Ok(units)
    }

    async fn legend(&self, coordinate: GeoCoordinate) -> Result<Legend, ProviderError> {
        let url = Self::build_url(&self.legend_url, coordinate);
        let body = self.http_client.get(&url).await?;
        let entries = Self::parse_data::<RawLegendEntry>(&body, "legend")?;

        Ok(Legend::from_entries(entries.into_iter().filter_map(|raw| {
            Some(LegendEntry {
                source_id: raw.source_id?,
                color: raw.color?,
            })
        })))
    }

    fn name(&self) -> &str {
        "Macrostrat"
    }
}
