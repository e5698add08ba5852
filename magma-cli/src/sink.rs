//! Terminal render sink.
//!
//! Prints probe results to stdout as they arrive. Formatting lives in free
//! functions so it can be tested without capturing the process output.

use magma::coord::GeoCoordinate;
use magma::description::DescriptionResult;
use magma::geology::{GeologicalUnit, Legend};
use magma::panorama::{PanoramaResult, PANORAMA_PITCH_DEGREES};
use magma::probe::RenderSink;

/// Render sink that writes each result block to stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }
}

impl RenderSink for TerminalSink {
    fn render_units(&mut self, units: &[GeologicalUnit], legend: &Legend) {
        println!("{}", format_units(units, legend));
    }

    fn render_no_data(&mut self, coordinate: GeoCoordinate) {
        println!("{}", format_no_data(coordinate));
    }

    fn render_description(&mut self, description: &DescriptionResult) {
        println!("{}", format_description(description));
    }

    fn render_panorama(&mut self, panorama: &PanoramaResult) {
        println!("{}", format_panorama(panorama));
    }

    fn render_panorama_unavailable(&mut self, coordinate: GeoCoordinate) {
        println!("{}", format_panorama_unavailable(coordinate));
    }

    fn render_fetch_error(&mut self, message: &str) {
        eprintln!("Error fetching geological data: {}", message);
    }
}

fn or_not_specified(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("Not specified")
}

/// Formats the unit list, one block per unit with its legend color.
pub fn format_units(units: &[GeologicalUnit], legend: &Legend) -> String {
    let mut out = format!("Geological Units ({})\n", units.len());
    out.push_str("====================");

    for unit in units {
        out.push_str(&format!(
            "\n\n  {} [{}]\n",
            unit.name.as_deref().unwrap_or("Unnamed unit"),
            legend.color_for(unit)
        ));
        out.push_str(&format!(
            "    Age: {} to {} Ma\n",
            unit.top_age_ma, unit.bottom_age_ma
        ));
        out.push_str(&format!(
            "    Rock types: {}\n",
            or_not_specified(&unit.lithology)
        ));
        out.push_str(&format!(
            "    Environment: {}",
            or_not_specified(&unit.environment)
        ));
        if let Some(strat) = unit.stratigraphic_name.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("\n    Stratigraphic name: {}", strat));
        }
    }

    out
}

/// Formats the friendly "no data" block for a location outside mapped areas.
pub fn format_no_data(coordinate: GeoCoordinate) -> String {
    [
        "No Geological Data Available".to_string(),
        format!("  Location: {}", coordinate),
        "  This location may be:".to_string(),
        "    - Outside mapped geological survey areas".to_string(),
        "    - In an ocean or water body".to_string(),
        "    - In an area with insufficient geological mapping".to_string(),
        "  Try clicking in a different location, preferably on land areas.".to_string(),
    ]
    .join("\n")
}

pub fn format_description(description: &DescriptionResult) -> String {
    let mut out = format!("Description\n  {}", description.text);
    if description.truncated {
        out.push_str("\n  (shortened to the last complete sentence)");
    }
    out
}

/// Formats a found panorama with its initial view and a Google Maps link.
pub fn format_panorama(panorama: &PanoramaResult) -> String {
    let lat = panorama.coordinate.latitude();
    let lon = panorama.coordinate.longitude();
    format!(
        "Street View\n  Panorama at {}, heading {:.1}°, pitch {}°\n  https://www.google.com/maps/@?api=1&map_action=pano&viewpoint={},{}&heading={:.0}&pitch={}",
        panorama.coordinate,
        panorama.heading_degrees,
        PANORAMA_PITCH_DEGREES,
        lat,
        lon,
        panorama.heading_degrees,
        PANORAMA_PITCH_DEGREES
    )
}

pub fn format_panorama_unavailable(coordinate: GeoCoordinate) -> String {
    format!(
        "Street View\n  Street View is not available at this location ({})\n  Try clicking closer to a road or populated area",
        coordinate
    )
}
