//! Point-to-point distance measurement.

use super::{distance_km, GeoCoordinate};

/// An ordered list of measured points.
///
/// Each point added after the first closes a segment whose great-circle
/// length is reported back, mirroring a click-to-measure map tool.
#[derive(Debug, Clone, Default)]
pub struct MeasurementPath {
    points: Vec<GeoCoordinate>,
}

impl MeasurementPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point, returning the length of the new segment in km.
    ///
    /// Returns `None` for the first point since no segment exists yet.
    pub fn add_point(&mut self, point: GeoCoordinate) -> Option<f64> {
        let segment = self.points.last().map(|&prev| distance_km(prev, point));
        self.points.push(point);
        segment
    }

    /// Total length of all segments in km.
    pub fn total_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| distance_km(pair[0], pair[1]))
            .sum()
    }

    /// Measured points in insertion order.
    pub fn points(&self) -> &[GeoCoordinate] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
