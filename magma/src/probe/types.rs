//! Probe identity and lifecycle.

use crate::coord::GeoCoordinate;
use std::fmt;

/// Monotonically increasing probe identifier, unique per orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProbeId(pub u64);

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a probe.
///
/// ```text
/// Pending ──► Active ──┬──► Completed
///                      ├──► Failed       (units lookup errored)
///                      └──► Superseded   (a newer probe was submitted)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Pending,
    Active,
    Superseded,
    Completed,
    Failed,
}

impl ProbeStatus {
    /// True once the probe can no longer change state.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProbeStatus::Superseded | ProbeStatus::Completed | ProbeStatus::Failed
        )
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeStatus::Pending => "pending",
            ProbeStatus::Active => "active",
            ProbeStatus::Superseded => "superseded",
            ProbeStatus::Completed => "completed",
            ProbeStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One user click and its lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRequest {
    pub id: ProbeId,
    pub coordinate: GeoCoordinate,
    pub status: ProbeStatus,
}

impl ProbeRequest {
    pub fn new(id: ProbeId, coordinate: GeoCoordinate) -> Self {
        Self {
            id,
            coordinate,
            status: ProbeStatus::Pending,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProbeStatus::Active
    }
}
