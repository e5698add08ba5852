//! Render sink contract.

use crate::coord::GeoCoordinate;
use crate::description::DescriptionResult;
use crate::geology::{GeologicalUnit, Legend};
use crate::panorama::PanoramaResult;

/// Receives the results of the current probe.
///
/// The orchestrator only calls a sink for the probe that is current and still
/// active, so implementations never have to filter stale results. For each
/// settled probe exactly one of [`render_units`](Self::render_units),
/// [`render_no_data`](Self::render_no_data) or
/// [`render_fetch_error`](Self::render_fetch_error) is called, and
/// independently one of the two panorama renders.
pub trait RenderSink {
    /// Rock units at the probed location, colored through `legend`.
    fn render_units(&mut self, units: &[GeologicalUnit], legend: &Legend);

    /// The units lookup succeeded but nothing is mapped here.
    fn render_no_data(&mut self, coordinate: GeoCoordinate);

    fn render_description(&mut self, description: &DescriptionResult);

    fn render_panorama(&mut self, panorama: &PanoramaResult);

    /// No panorama within either search radius.
    fn render_panorama_unavailable(&mut self, coordinate: GeoCoordinate);

    /// The mandatory units lookup failed.
    fn render_fetch_error(&mut self, message: &str);
}
