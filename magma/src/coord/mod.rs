//! Geographic coordinates and great-circle math.
//!
//! Provides the [`GeoCoordinate`] value type plus the spherical-earth helpers
//! the probe flow needs: haversine distance for the measurement tool and
//! initial bearing for orienting a panorama toward the clicked point.
//!
//! # Conventions
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Bearing: degrees true (0-360, 0=north, 90=east)
//! - Distance: kilometres

mod measure;
mod types;

pub use measure::MeasurementPath;
pub use types::{CoordError, GeoCoordinate, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

use std::f64::consts::PI;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const DEG_TO_RAD: f64 = PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Great-circle distance between two coordinates using the haversine formula.
///
/// # Example
///
/// ```
/// use magma::coord::{distance_km, GeoCoordinate};
///
/// let a = GeoCoordinate::new(0.0, 0.0).unwrap();
/// let b = GeoCoordinate::new(0.0, 1.0).unwrap();
/// assert!((distance_km(a, b) - 111.19).abs() < 0.01);
/// ```
pub fn distance_km(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let lat1_rad = a.latitude() * DEG_TO_RAD;
    let lat2_rad = b.latitude() * DEG_TO_RAD;
    let delta_lat = (b.latitude() - a.latitude()) * DEG_TO_RAD;
    let delta_lon = (b.longitude() - a.longitude()) * DEG_TO_RAD;

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Initial bearing (forward azimuth) from `from` toward `to`.
///
/// Returns degrees in `[0, 360)`. Identical points yield `0.0`.
///
/// # Example
///
/// ```
/// use magma::coord::{bearing_degrees, GeoCoordinate};
///
/// let origin = GeoCoordinate::new(0.0, 0.0).unwrap();
/// let east = GeoCoordinate::new(0.0, 1.0).unwrap();
/// assert!((bearing_degrees(origin, east) - 90.0).abs() < 0.1);
/// ```
pub fn bearing_degrees(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    let lat1_rad = from.latitude() * DEG_TO_RAD;
    let lat2_rad = to.latitude() * DEG_TO_RAD;
    let delta_lon = (to.longitude() - from.longitude()) * DEG_TO_RAD;

    let y = delta_lon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    normalize_heading(y.atan2(x) * RAD_TO_DEG)
}

/// Normalize a heading to the range `[0, 360)` degrees.
///
/// ```
/// use magma::coord::normalize_heading;
///
/// assert_eq!(normalize_heading(-90.0), 270.0);
/// assert_eq!(normalize_heading(450.0), 90.0);
/// ```
pub fn normalize_heading(heading: f64) -> f64 {
    let h = heading.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}
