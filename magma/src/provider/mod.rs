//! Remote data providers.
//!
//! This module provides the traits the probe components depend on and their
//! HTTP-backed implementations:
//!
//! - [`GeologyProvider`] - rock units and legend ([`MacrostratProvider`])
//! - [`PanoramaProvider`] - street-level panorama search ([`StreetViewProvider`])
//! - [`DescriptionProvider`] - generated descriptions ([`DescriptionEndpoint`])
//!
//! All implementations are generic over [`AsyncHttpClient`] so tests can
//! inject a scripted client:
//!
//! ```ignore
//! use magma::provider::{AsyncReqwestClient, MacrostratProvider};
//!
//! let http_client = AsyncReqwestClient::new()?;
//! let geology = MacrostratProvider::new(http_client);
//! ```

mod description_endpoint;
mod http;
mod macrostrat;
mod streetview;
mod types;

pub use description_endpoint::{DescriptionEndpoint, DEFAULT_DESCRIPTION_URL};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use macrostrat::{MacrostratProvider, DEFAULT_LEGEND_URL, DEFAULT_UNITS_URL};
pub use streetview::{StreetViewProvider, UnconfiguredPanorama, DEFAULT_METADATA_URL};
pub use types::{DescriptionProvider, GeologyProvider, PanoramaProvider, ProviderError};

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, MockRequest};
