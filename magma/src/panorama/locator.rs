//! Two-tier panorama search.

use crate::coord::{bearing_degrees, GeoCoordinate};
use crate::provider::PanoramaProvider;
use tracing::{debug, warn};

/// Tier 1 search radius in metres.
pub const DEFAULT_NARROW_RADIUS_M: u32 = 100;

/// Tier 2 search radius in metres.
pub const DEFAULT_WIDE_RADIUS_M: u32 = 5000;

/// Initial viewer pitch in degrees above the horizon.
pub const PANORAMA_PITCH_DEGREES: f64 = 10.0;

/// Outcome of a panorama search.
///
/// When `found` is false the coordinate is the clicked point and the heading
/// is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanoramaResult {
    pub coordinate: GeoCoordinate,
    pub heading_degrees: f64,
    pub found: bool,
}

impl PanoramaResult {
    fn found(panorama: GeoCoordinate, clicked: GeoCoordinate) -> Self {
        Self {
            coordinate: panorama,
            heading_degrees: bearing_degrees(panorama, clicked),
            found: true,
        }
    }

    fn not_found(clicked: GeoCoordinate) -> Self {
        Self {
            coordinate: clicked,
            heading_degrees: 0.0,
            found: false,
        }
    }
}

/// Finds the nearest panorama with a narrow-then-wide radius search.
///
/// Never fails: transport and service faults are logged and treated the same
/// as "nothing here", since the viewer shows one unavailable state for both.
pub struct PanoramaLocator<P: PanoramaProvider> {
    provider: P,
    narrow_radius_m: u32,
    wide_radius_m: u32,
}

impl<P: PanoramaProvider> PanoramaLocator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_radii(provider, DEFAULT_NARROW_RADIUS_M, DEFAULT_WIDE_RADIUS_M)
    }

    pub fn with_radii(provider: P, narrow_radius_m: u32, wide_radius_m: u32) -> Self {
        Self {
            provider,
            narrow_radius_m,
            wide_radius_m,
        }
    }

    pub fn radii(&self) -> (u32, u32) {
        (self.narrow_radius_m, self.wide_radius_m)
    }

    /// Locates a panorama near `clicked`, oriented toward it.
    pub async fn locate(&self, clicked: GeoCoordinate) -> PanoramaResult {
        for radius_m in [self.narrow_radius_m, self.wide_radius_m] {
            match self.provider.search(clicked, radius_m).await {
                Ok(Some(panorama)) => {
                    let result = PanoramaResult::found(panorama, clicked);
                    debug!(
                        radius_m,
                        heading = result.heading_degrees,
                        provider = self.provider.name(),
                        "Panorama located"
                    );
                    return result;
                }
                Ok(None) => {
                    debug!(radius_m, "No panorama within radius");
                }
                Err(e) => {
                    warn!(
                        radius_m,
                        provider = self.provider.name(),
                        error = %e,
                        "Panorama search failed"
                    );
                }
            }
        }

        debug!(
            lat = clicked.latitude(),
            lon = clicked.longitude(),
            "Panorama not available"
        );
        PanoramaResult::not_found(clicked)
    }
}
