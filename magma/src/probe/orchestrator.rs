//! Probe orchestrator.
//!
//! Turns clicks into probes, fans each probe out to its sub-tasks and routes
//! completions to the render sink.
//!
//! # Architecture
//!
//! ```text
//! submit_probe(coord)
//!   │
//!   ├──► supersede previous probe
//!   │
//!   ├──► spawn ──► GeologyFetcher::fetch ──────┐
//!   └──► spawn ──► PanoramaLocator::locate ────┤
//!                                              ▼
//!                                      ProbeEvent channel
//!                                              │
//!                         handle_event ◄───────┘
//!                              │
//!                  current && active? ──no──► discard
//!                              │ yes
//!                              ▼
//!                         RenderSink
//!                              │
//!              units found ──► spawn ──► DescriptionRequester::request
//! ```
//!
//! Sub-tasks run on the Tokio runtime and report back over an unbounded
//! channel, each event tagged with the id of the probe that launched it. All
//! state lives in the orchestrator and is only touched from the task that
//! owns it, so staleness is decided by comparing ids, not arrival order.
//! Work for a superseded probe is not aborted; its results are dropped here.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

use crate::coord::GeoCoordinate;
use crate::description::{DescriptionError, DescriptionRequester, DescriptionResult};
use crate::geology::{FetchError, GeologicalUnit, GeologyFetcher, GeologyReport};
use crate::panorama::{PanoramaLocator, PanoramaResult};
use crate::provider::{DescriptionProvider, GeologyProvider, PanoramaProvider};

use super::sink::RenderSink;
use super::types::{ProbeId, ProbeRequest, ProbeStatus};

// =============================================================================
// Configuration
// =============================================================================

/// Default deadline for each sub-task.
pub const DEFAULT_SUBTASK_TIMEOUT_SECS: u64 = 10;

/// Number of settled or superseded probes kept for status queries.
pub const PROBE_HISTORY_LIMIT: usize = 32;

/// Orchestrator tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeConfig {
    /// Deadline applied to each geology, panorama and description sub-task.
    pub subtask_timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            subtask_timeout: Duration::from_secs(DEFAULT_SUBTASK_TIMEOUT_SECS),
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Result of one sub-task.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Geology(Result<GeologyReport, FetchError>),
    Panorama(PanoramaResult),
    Description(Result<DescriptionResult, DescriptionError>),
}

impl ProbeOutcome {
    fn kind(&self) -> &'static str {
        match self {
            ProbeOutcome::Geology(_) => "geology",
            ProbeOutcome::Panorama(_) => "panorama",
            ProbeOutcome::Description(_) => "description",
        }
    }
}

/// A sub-task completion tagged with the probe that launched it.
#[derive(Debug, Clone)]
pub struct ProbeEvent {
    pub probe_id: ProbeId,
    pub outcome: ProbeOutcome,
}

/// Bookkeeping for the current probe.
struct ActiveProbe {
    request: ProbeRequest,
    geology_pending: bool,
    panorama_pending: bool,
    description_pending: bool,
    geology_failed: bool,
    units: Vec<GeologicalUnit>,
}

impl ActiveProbe {
    fn new(request: ProbeRequest) -> Self {
        Self {
            request,
            geology_pending: true,
            panorama_pending: true,
            description_pending: false,
            geology_failed: false,
            units: Vec::new(),
        }
    }

    fn has_outstanding(&self) -> bool {
        self.geology_pending || self.panorama_pending || self.description_pending
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Sequences the lookups for each click and renders only the current one.
///
/// At most one probe is active at a time. Submitting a probe supersedes the
/// previous one immediately; results that later arrive for it are discarded
/// without touching the sink.
///
/// Sub-tasks are spawned with [`tokio::spawn`], so [`submit_probe`](Self::submit_probe)
/// must be called from within a Tokio runtime. Completions are applied by
/// [`handle_event`](Self::handle_event), typically from a loop over
/// [`next_event`](Self::next_event) or via [`run_until_settled`](Self::run_until_settled).
pub struct ProbeOrchestrator<G, P, D, S>
where
    G: GeologyProvider + 'static,
    P: PanoramaProvider + 'static,
    D: DescriptionProvider + 'static,
    S: RenderSink,
{
    geology: Arc<GeologyFetcher<G>>,
    panorama: Arc<PanoramaLocator<P>>,
    description: Arc<DescriptionRequester<D>>,
    sink: S,
    config: ProbeConfig,
    next_id: u64,
    current: Option<ActiveProbe>,
    history: VecDeque<ProbeRequest>,
    events_tx: mpsc::UnboundedSender<ProbeEvent>,
    events_rx: mpsc::UnboundedReceiver<ProbeEvent>,
}

impl<G, P, D, S> ProbeOrchestrator<G, P, D, S>
where
    G: GeologyProvider + 'static,
    P: PanoramaProvider + 'static,
    D: DescriptionProvider + 'static,
    S: RenderSink,
{
    pub fn new(
        geology: GeologyFetcher<G>,
        panorama: PanoramaLocator<P>,
        description: DescriptionRequester<D>,
        sink: S,
        config: ProbeConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            geology: Arc::new(geology),
            panorama: Arc::new(panorama),
            description: Arc::new(description),
            sink,
            config,
            next_id: 0,
            current: None,
            history: VecDeque::with_capacity(PROBE_HISTORY_LIMIT),
            events_tx,
            events_rx,
        }
    }

    /// Starts a probe at `coordinate`, superseding any probe still running.
    ///
    /// Launches the geology and panorama sub-tasks concurrently and returns
    /// the new probe in its `Active` state.
    pub fn submit_probe(&mut self, coordinate: GeoCoordinate) -> ProbeRequest {
        self.next_id += 1;
        let mut request = ProbeRequest::new(ProbeId(self.next_id), coordinate);

        if let Some(mut previous) = self.current.take() {
            if previous.request.is_active() {
                previous.request.status = ProbeStatus::Superseded;
                debug!(
                    probe_id = %previous.request.id,
                    superseded_by = %request.id,
                    "Probe superseded"
                );
            }
            self.remember(previous.request);
        }

        request.status = ProbeStatus::Active;
        self.current = Some(ActiveProbe::new(request));

        info!(
            probe_id = %request.id,
            lat = coordinate.latitude(),
            lon = coordinate.longitude(),
            "Probe submitted"
        );

        let timeout = self.config.subtask_timeout;

        let geology = Arc::clone(&self.geology);
        Self::spawn_subtask(&self.events_tx, request.id, async move {
            let result = match tokio::time::timeout(timeout, geology.fetch(coordinate)).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(timeout)),
            };
            ProbeOutcome::Geology(result)
        });

        let panorama = Arc::clone(&self.panorama);
        Self::spawn_subtask(&self.events_tx, request.id, async move {
            let result = match tokio::time::timeout(timeout, panorama.locate(coordinate)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        timeout_secs = timeout.as_secs(),
                        "Panorama search timed out"
                    );
                    PanoramaResult {
                        coordinate,
                        heading_degrees: 0.0,
                        found: false,
                    }
                }
            };
            ProbeOutcome::Panorama(result)
        });

        request
    }

    /// Waits for the next sub-task completion.
    ///
    /// Cancel-safe, so it can be used as a `tokio::select!` branch.
    pub async fn next_event(&mut self) -> Option<ProbeEvent> {
        self.events_rx.recv().await
    }

    /// Applies a sub-task completion.
    ///
    /// Returns `false` when the event belongs to a probe that is no longer
    /// current and active; such events are dropped without any render call.
    pub fn handle_event(&mut self, event: ProbeEvent) -> bool {
        let probe_id = event.probe_id;

        let Some(active) = self
            .current
            .as_mut()
            .filter(|p| p.request.id == probe_id && p.request.is_active())
        else {
            debug!(
                probe_id = %probe_id,
                kind = event.outcome.kind(),
                "Discarding result of superseded probe"
            );
            return false;
        };

        let coordinate = active.request.coordinate;

        match event.outcome {
            ProbeOutcome::Geology(Ok(report)) => {
                active.geology_pending = false;
                if report.is_empty() {
                    self.sink.render_no_data(coordinate);
                } else {
                    self.sink.render_units(&report.units, &report.legend);
                    active.units = report.units;
                    active.description_pending = true;

                    let description = Arc::clone(&self.description);
                    let units = active.units.clone();
                    let timeout = self.config.subtask_timeout;
                    Self::spawn_subtask(&self.events_tx, probe_id, async move {
                        let result = match tokio::time::timeout(
                            timeout,
                            description.request(coordinate, &units),
                        )
                        .await
                        {
                            Ok(result) => result,
                            Err(_) => Err(DescriptionError::Timeout(timeout)),
                        };
                        ProbeOutcome::Description(result)
                    });
                }
            }
            ProbeOutcome::Geology(Err(e)) => {
                active.geology_pending = false;
                active.geology_failed = true;
                error!(probe_id = %probe_id, error = %e, "Geological fetch failed");
                self.sink.render_fetch_error(&e.to_string());
            }
            ProbeOutcome::Panorama(result) => {
                active.panorama_pending = false;
                if result.found {
                    self.sink.render_panorama(&result);
                } else {
                    self.sink.render_panorama_unavailable(coordinate);
                }
            }
            ProbeOutcome::Description(Ok(description)) => {
                active.description_pending = false;
                self.sink.render_description(&description);
            }
            ProbeOutcome::Description(Err(e)) => {
                active.description_pending = false;
                warn!(probe_id = %probe_id, error = %e, "Description unavailable");
            }
        }

        if !active.has_outstanding() {
            active.request.status = if active.geology_failed {
                ProbeStatus::Failed
            } else {
                ProbeStatus::Completed
            };
            info!(
                probe_id = %probe_id,
                status = %active.request.status,
                units = active.units.len(),
                "Probe settled"
            );
        }

        true
    }

    /// Processes events until the current probe has settled.
    ///
    /// Returns immediately when no probe is active.
    pub async fn run_until_settled(&mut self) {
        while self.has_active_probe() {
            match self.next_event().await {
                Some(event) => {
                    self.handle_event(event);
                }
                None => break,
            }
        }
    }

    /// Applies every completion that has already arrived, without waiting.
    ///
    /// Returns the number of events that reached the sink.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.handle_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// The most recently submitted probe, whatever its status.
    pub fn current(&self) -> Option<&ProbeRequest> {
        self.current.as_ref().map(|p| &p.request)
    }

    pub fn has_active_probe(&self) -> bool {
        self.current().is_some_and(ProbeRequest::is_active)
    }

    /// Status of a probe that is current or still in history.
    pub fn status(&self, id: ProbeId) -> Option<ProbeStatus> {
        self.current()
            .into_iter()
            .chain(self.history.iter())
            .find(|p| p.id == id)
            .map(|p| p.status)
    }

    /// Earlier probes, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ProbeRequest> {
        self.history.iter()
    }

    /// Units rendered for the current probe; empty until they arrive.
    pub fn active_units(&self) -> &[GeologicalUnit] {
        self.current
            .as_ref()
            .map(|p| p.units.as_slice())
            .unwrap_or(&[])
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn remember(&mut self, request: ProbeRequest) {
        if self.history.len() == PROBE_HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(request);
    }

    fn spawn_subtask<F>(tx: &mpsc::UnboundedSender<ProbeEvent>, probe_id: ProbeId, task: F)
    where
        F: Future<Output = ProbeOutcome> + Send + 'static,
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = task.await;
            if tx.send(ProbeEvent { probe_id, outcome }).is_err() {
                trace!(probe_id = %probe_id, "Orchestrator gone, dropping sub-task result");
            }
        });
    }
}
