//! Distance command - great-circle distance and initial bearing.

use magma::coord::{bearing_degrees, distance_km, GeoCoordinate};

use crate::error::CliError;

/// Print the distance and bearing from the first point to the second.
pub fn run(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<(), CliError> {
    let from = GeoCoordinate::new(lat1, lon1)?;
    let to = GeoCoordinate::new(lat2, lon2)?;

    println!("From:     {}", from);
    println!("To:       {}", to);
    println!("Distance: {:.3} km", distance_km(from, to));
    println!("Bearing:  {:.1}°", bearing_degrees(from, to));

    Ok(())
}
