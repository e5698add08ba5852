//! Street-level panorama lookup.
//!
//! [`PanoramaLocator`] wraps a [`PanoramaProvider`](crate::provider::PanoramaProvider)
//! with a two-tier search: a narrow radius first, since most clicks land near
//! a road, and one wider retry on a miss. The result always carries a heading
//! so the viewer opens facing the clicked point.

mod locator;

pub use locator::{
    PanoramaLocator, PanoramaResult, DEFAULT_NARROW_RADIUS_M, DEFAULT_WIDE_RADIUS_M,
    PANORAMA_PITCH_DEGREES,
};
