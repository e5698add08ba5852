//! MAGMA - geology at a point on the map
//!
//! This library resolves what lies under a map coordinate: the rock units
//! mapped there, a generated description of them, and the nearest
//! street-level panorama turned to face the spot.
//!
//! # High-Level API
//!
//! The [`probe`] module ties the pieces together:
//!
//! ```ignore
//! use magma::description::DescriptionRequester;
//! use magma::geology::GeologyFetcher;
//! use magma::panorama::PanoramaLocator;
//! use magma::probe::{ProbeConfig, ProbeOrchestrator};
//! use magma::provider::{AsyncReqwestClient, DescriptionEndpoint, MacrostratProvider,
//!     StreetViewProvider, DEFAULT_DESCRIPTION_URL};
//!
//! let http = AsyncReqwestClient::new()?;
//! let mut orchestrator = ProbeOrchestrator::new(
//!     GeologyFetcher::new(MacrostratProvider::new(http.clone())),
//!     PanoramaLocator::new(StreetViewProvider::new(http.clone(), api_key)),
//!     DescriptionRequester::new(DescriptionEndpoint::new(http, DEFAULT_DESCRIPTION_URL)),
//!     my_sink,
//!     ProbeConfig::default(),
//! );
//!
//! orchestrator.submit_probe(GeoCoordinate::new(36.1, -112.1)?);
//! orchestrator.run_until_settled().await;
//! ```

pub mod config;
pub mod coord;
pub mod description;
pub mod export;
pub mod geology;
pub mod logging;
pub mod panorama;
pub mod probe;
pub mod provider;

/// Version of the MAGMA library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
