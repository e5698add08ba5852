//! Google Street View metadata provider.
//!
//! Uses the Street View Static API metadata endpoint, which answers whether a
//! panorama exists near a point without downloading imagery.
//!
//! # API Endpoint
//!
//! `https://maps.googleapis.com/maps/api/streetview/metadata?location={lat},{lng}&radius={m}&source=default&key={API_KEY}`
//!
//! Responses carry a `status`: `OK` with the panorama `location`, or
//! `ZERO_RESULTS`/`NOT_FOUND` when nothing is within the radius. Any other
//! status (`REQUEST_DENIED`, `OVER_QUERY_LIMIT`, ...) is a service fault.

use serde::Deserialize;
use tracing::debug;

use crate::coord::GeoCoordinate;
use crate::provider::{AsyncHttpClient, PanoramaProvider, ProviderError};

/// Default Street View metadata endpoint.
pub const DEFAULT_METADATA_URL: &str = "https://maps.googleapis.com/maps/api/streetview/metadata";

#[derive(Deserialize)]
struct MetadataResponse {
    status: String,
    location: Option<MetadataLocation>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct MetadataLocation {
    lat: f64,
    lng: f64,
}

/// Panorama provider backed by the Google Street View metadata API.
///
/// Requires a Google Maps Platform API key with the Street View Static API
/// enabled.
pub struct StreetViewProvider<C: AsyncHttpClient> {
    http_client: C,
    metadata_url: String,
    api_key: String,
}

impl<C: AsyncHttpClient> StreetViewProvider<C> {
    pub fn new(http_client: C, api_key: String) -> Self {
        Self::with_endpoint(http_client, DEFAULT_METADATA_URL, api_key)
    }

    pub fn with_endpoint(http_client: C, metadata_url: &str, api_key: String) -> Self {
        Self {
            http_client,
            metadata_url: metadata_url.to_string(),
            api_key,
        }
    }

    #[cfg(test)]
    pub(crate) fn http_client(&self) -> &C {
        &self.http_client
    }

    fn build_url(&self, coordinate: GeoCoordinate, radius_m: u32) -> String {
        format!(
            "{}?location={},{}&radius={}&source=default&key={}",
            self.metadata_url,
            coordinate.latitude(),
            coordinate.longitude(),
            radius_m,
            self.api_key
        )
    }
}

impl<C: AsyncHttpClient> PanoramaProvider for StreetViewProvider<C> {
    async fn search(
        &self,
        coordinate: GeoCoordinate,
        radius_m: u32,
    ) -> Result<Option<GeoCoordinate>, ProviderError> {
        let url = self.build_url(coordinate, radius_m);
        let body = self.http_client.get(&url).await?;

        let response: MetadataResponse = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("metadata response: {}", e)))?;

        match response.status.as_str() {
            "OK" => {
                let location = response.location.ok_or_else(|| {
                    ProviderError::InvalidResponse("OK status without location".to_string())
                })?;
                let resolved = GeoCoordinate::new(location.lat, location.lng)
                    .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
                debug!(radius_m, panorama = %resolved, "Panorama found");
                Ok(Some(resolved))
            }
            "ZERO_RESULTS" | "NOT_FOUND" => Ok(None),
            other => Err(ProviderError::ServiceError(match response.error_message {
                Some(msg) => format!("{}: {}", other, msg),
                None => other.to_string(),
            })),
        }
    }

    fn name(&self) -> &str {
        "Google Street View"
    }
}

/// Panorama provider used when no Street View API key is configured.
///
/// Every search fails, so the probe renders the "unavailable" state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredPanorama;

impl PanoramaProvider for UnconfiguredPanorama {
    async fn search(
        &self,
        _coordinate: GeoCoordinate,
        _radius_m: u32,
    ) -> Result<Option<GeoCoordinate>, ProviderError> {
        Err(ProviderError::ServiceError(
            "no Street View API key configured".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "Street View (unconfigured)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    fn here() -> GeoCoordinate {
        GeoCoordinate::new(36.1, -112.1).unwrap()
    }

    #[test]
    fn test_build_url() {
        let provider =
            StreetViewProvider::new(MockAsyncHttpClient::json("{}"), "KEY123".to_string());
        assert_eq!(
            provider.build_url(here(), 100),
            "https://maps.googleapis.com/maps/api/streetview/metadata?location=36.1,-112.1&radius=100&source=default&key=KEY123"
        );
    }

    #[tokio::test]
    async fn test_ok_returns_location() {
        let provider = StreetViewProvider::new(
            MockAsyncHttpClient::json(
                r#"{"status":"OK","pano_id":"abc","location":{"lat":36.1005,"lng":-112.0998}}"#,
            ),
            "KEY".to_string(),
        );

        let found = provider.search(here(), 100).await.unwrap().unwrap();
        assert_eq!(found.latitude(), 36.1005);
        assert_eq!(found.longitude(), -112.0998);
    }

    #[tokio::test]
    async fn test_zero_results_is_miss() {
        let provider = StreetViewProvider::new(
            MockAsyncHttpClient::json(r#"{"status":"ZERO_RESULTS"}"#),
            "KEY".to_string(),
        );
        assert_eq!(provider.search(here(), 100).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_denied_is_service_error() {
        let provider = StreetViewProvider::new(
            MockAsyncHttpClient::json(
                r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#,
            ),
            "BAD".to_string(),
        );

        let err = provider.search(here(), 100).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::ServiceError(
                "REQUEST_DENIED: The provided API key is invalid.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_ok_without_location_is_invalid() {
        let provider = StreetViewProvider::new(
            MockAsyncHttpClient::json(r#"{"status":"OK"}"#),
            "KEY".to_string(),
        );
        assert!(matches!(
            provider.search(here(), 100).await,
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_always_fails() {
        assert!(UnconfiguredPanorama.search(here(), 5000).await.is_err());
    }
}
