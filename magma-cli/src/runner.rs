//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, configuration and wiring of the probe
//! orchestrator so command handlers only deal with their own flow.

use std::time::Duration;

use crate::error::CliError;
use magma::config::{ConfigFile, DEFAULT_LOG_FILE_NAME};
use magma::coord::GeoCoordinate;
use magma::description::DescriptionRequester;
use magma::geology::GeologyFetcher;
use magma::logging::{init_logging, LoggingGuard};
use magma::panorama::PanoramaLocator;
use magma::probe::{ProbeConfig, ProbeOrchestrator, RenderSink};
use magma::provider::{
    AsyncReqwestClient, DescriptionEndpoint, GeologyProvider, MacrostratProvider, PanoramaProvider,
    ProviderError, StreetViewProvider, UnconfiguredPanorama,
};
use tracing::{info, warn};

/// Orchestrator wired to the live remote services.
pub type CliOrchestrator<S> = ProbeOrchestrator<
    MacrostratProvider<AsyncReqwestClient>,
    PanoramaSource,
    DescriptionEndpoint<AsyncReqwestClient>,
    S,
>;

/// Panorama provider chosen from configuration.
pub enum PanoramaSource {
    StreetView(StreetViewProvider<AsyncReqwestClient>),
    Unconfigured(UnconfiguredPanorama),
}

impl PanoramaProvider for PanoramaSource {
    async fn search(
        &self,
        coordinate: GeoCoordinate,
        radius_m: u32,
    ) -> Result<Option<GeoCoordinate>, ProviderError> {
        match self {
            PanoramaSource::StreetView(p) => p.search(coordinate, radius_m).await,
            PanoramaSource::Unconfigured(p) => p.search(coordinate, radius_m).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            PanoramaSource::StreetView(p) => p.name(),
            PanoramaSource::Unconfigured(p) => p.name(),
        }
    }
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    /// * `verbose` - When true, mirrors log output to stderr
    pub fn new(debug_mode: bool, verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| ".".into());
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string());

        let logging_guard = init_logging(&log_dir, &log_file, verbose, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("MAGMA v{}", magma::VERSION);
        info!("MAGMA CLI: {} command", command);
    }

    /// Build an orchestrator that renders into `sink`.
    pub fn build_orchestrator<S: RenderSink>(
        &self,
        sink: S,
    ) -> Result<CliOrchestrator<S>, CliError> {
        let config = &self.config;
        let http = AsyncReqwestClient::with_options(
            config.network.timeout,
            &config.network.user_agent,
        )
        .map_err(CliError::HttpClient)?;

        let geology = MacrostratProvider::with_endpoints(
            http.clone(),
            &config.geology.units_url,
            &config.geology.legend_url,
        );

        let panorama = match config.panorama.resolved_api_key() {
            Some(key) => PanoramaSource::StreetView(StreetViewProvider::with_endpoint(
                http.clone(),
                &config.panorama.metadata_url,
                key,
            )),
            None => {
                warn!("No Street View API key configured, panoramas will be unavailable");
                PanoramaSource::Unconfigured(UnconfiguredPanorama)
            }
        };

        let description = DescriptionEndpoint::new(http, &config.description.endpoint);

        info!(
            geology = geology.name(),
            panorama = panorama.name(),
            description = %config.description.endpoint,
            "Probe sources configured"
        );

        Ok(ProbeOrchestrator::new(
            GeologyFetcher::new(geology),
            PanoramaLocator::with_radii(
                panorama,
                config.panorama.narrow_radius,
                config.panorama.wide_radius,
            ),
            DescriptionRequester::new(description),
            sink,
            ProbeConfig {
                subtask_timeout: Duration::from_secs(config.network.subtask_timeout),
            },
        ))
    }
}
