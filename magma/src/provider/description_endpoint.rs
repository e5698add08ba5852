//! Text-generation endpoint for geological descriptions.
//!
//! The endpoint receives the clicked coordinate and the units found there and
//! answers with a free-form description:
//!
//! ```text
//! POST {endpoint}
//! {"lat": 36.1, "lng": -112.1, "geological_data": {"success": {"data": [...]}}}
//!
//! 200 {"success": true, "description": "..."}
//! 200 {"success": false, "error": "Unable to generate description"}
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coord::GeoCoordinate;
use crate::geology::GeologicalUnit;
use crate::provider::{AsyncHttpClient, DescriptionProvider, ProviderError};

/// Default endpoint of the locally hosted description service.
pub const DEFAULT_DESCRIPTION_URL: &str = "http://127.0.0.1:5000/api/description";

#[derive(Serialize)]
struct DescriptionRequestBody<'a> {
    lat: f64,
    lng: f64,
    geological_data: UnitsEnvelope<'a>,
}

#[derive(Serialize)]
struct UnitsEnvelope<'a> {
    success: UnitsData<'a>,
}

#[derive(Serialize)]
struct UnitsData<'a> {
    data: &'a [GeologicalUnit],
}

#[derive(Deserialize)]
struct DescriptionResponseBody {
    #[serde(default)]
    success: bool,
    description: Option<String>,
    error: Option<String>,
}

/// Description provider that POSTs to a JSON text-generation endpoint.
pub struct DescriptionEndpoint<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
}

impl<C: AsyncHttpClient> DescriptionEndpoint<C> {
    pub fn new(http_client: C, endpoint: &str) -> Self {
        Self {
            http_client,
            endpoint: endpoint.to_string(),
        }
    }

    fn build_body(
        coordinate: GeoCoordinate,
        units: &[GeologicalUnit],
    ) -> Result<String, ProviderError> {
        let body = DescriptionRequestBody {
            lat: coordinate.latitude(),
            lng: coordinate.longitude(),
            geological_data: UnitsEnvelope {
                success: UnitsData { data: units },
            },
        };
        serde_json::to_string(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to encode request: {}", e)))
    }
}

impl<C: AsyncHttpClient> DescriptionProvider for DescriptionEndpoint<C> {
    async fn describe(
        &self,
        coordinate: GeoCoordinate,
        units: &[GeologicalUnit],
    ) -> Result<String, ProviderError> {
        let body = Self::build_body(coordinate, units)?;
        let response = self.http_client.post_json(&self.endpoint, &body).await?;

        let parsed: DescriptionResponseBody = serde_json::from_slice(&response)
            .map_err(|e| ProviderError::InvalidResponse(format!("description response: {}", e)))?;

        if !parsed.success {
            return Err(ProviderError::ServiceError(
                parsed
                    .error
                    .unwrap_or_else(|| "description generation failed".to_string()),
            ));
        }

        let description = parsed.description.ok_or_else(|| {
            ProviderError::InvalidResponse("success response without description".to_string())
        })?;

        debug!(chars = description.chars().count(), "Description received");
        Ok(description)
    }

    fn name(&self) -> &str {
        "Description endpoint"
    }
}
