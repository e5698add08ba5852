//! Location probes.
//!
//! A probe is the unit of work triggered by one map click: a geological
//! lookup and a panorama search run concurrently, and a description request
//! follows once units are known. The [`ProbeOrchestrator`] owns the
//! "current probe" state and guarantees that only the most recently
//! submitted probe ever reaches the [`RenderSink`].

mod orchestrator;
mod sink;
mod types;

pub use orchestrator::{
    ProbeConfig, ProbeEvent, ProbeOrchestrator, ProbeOutcome, DEFAULT_SUBTASK_TIMEOUT_SECS,
    PROBE_HISTORY_LIMIT,
};
pub use sink::RenderSink;
pub use types::{ProbeId, ProbeRequest, ProbeStatus};
