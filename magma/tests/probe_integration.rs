//! Integration tests for the probe orchestrator.
//!
//! These tests drive complete probes through scripted sources and a
//! recording sink, covering:
//! - Superseded probes never reaching the sink
//! - No-data, fetch-error and degraded sub-task states
//! - Two-tier panorama search through the orchestrator
//! - Exporting the units of the current probe

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use magma::coord::{GeoCoordinate, MeasurementPath};
use magma::description::{DescriptionRequester, DescriptionResult, FILLER_SENTENCE};
use magma::export::ExportDocument;
use magma::geology::{
    GeologicalUnit, GeologyFetcher, Legend, LegendEntry, DEFAULT_UNIT_COLOR,
};
use magma::panorama::{PanoramaLocator, PanoramaResult};
use magma::probe::{ProbeConfig, ProbeOrchestrator, ProbeStatus, RenderSink};
use magma::provider::{DescriptionProvider, GeologyProvider, PanoramaProvider, ProviderError};

// =============================================================================
// Test Helpers
// =============================================================================

fn coord(lat: f64, lon: f64) -> GeoCoordinate {
    GeoCoordinate::new(lat, lon).unwrap()
}

fn unit(name: &str, source_id: &str) -> GeologicalUnit {
    GeologicalUnit {
        name: Some(name.to_string()),
        top_age_ma: 250.0,
        bottom_age_ma: 270.0,
        source_id: Some(source_id.to_string()),
        ..Default::default()
    }
}

/// Scripted answer for one coordinate.
#[derive(Clone)]
struct GeologyScript {
    delay: Duration,
    units: Result<Vec<GeologicalUnit>, ProviderError>,
    legend: Result<Legend, ProviderError>,
}

impl GeologyScript {
    fn units(delay_secs: u64, units: Vec<GeologicalUnit>) -> Self {
        Self {
            delay: Duration::from_secs(delay_secs),
            units: Ok(units),
            legend: Ok(Legend::from_entries(vec![LegendEntry {
                source_id: "1".to_string(),
                color: "#AA5500".to_string(),
            }])),
        }
    }
}

/// Geology source answering per coordinate after a scripted delay.
struct ScriptedGeology {
    scripts: HashMap<String, GeologyScript>,
}

impl ScriptedGeology {
    fn new(scripts: Vec<(GeoCoordinate, GeologyScript)>) -> Self {
        Self {
            scripts: scripts
                .into_iter()
                .map(|(c, s)| (c.to_string(), s))
                .collect(),
        }
    }

    fn script(&self, coordinate: GeoCoordinate) -> GeologyScript {
        self.scripts
            .get(&coordinate.to_string())
            .cloned()
            .unwrap_or_else(|| GeologyScript::units(0, vec![]))
    }
}

impl GeologyProvider for ScriptedGeology {
    async fn units(
        &self,
        coordinate: GeoCoordinate,
    ) -> Result<Vec<GeologicalUnit>, ProviderError> {
        let script = self.script(coordinate);
        tokio::time::sleep(script.delay).await;
        script.units
    }

    async fn legend(&self, coordinate: GeoCoordinate) -> Result<Legend, ProviderError> {
        let script = self.script(coordinate);
        tokio::time::sleep(script.delay).await;
        script.legend
    }

    fn name(&self) -> &str {
        "scripted geology"
    }
}

/// Panorama source that only finds something within `hit_radius_m`.
struct RadiusPanorama {
    hit_radius_m: u32,
    delay: Duration,
    calls: Arc<Mutex<Vec<u32>>>,
}

impl PanoramaProvider for RadiusPanorama {
    async fn search(
        &self,
        coordinate: GeoCoordinate,
        radius_m: u32,
    ) -> Result<Option<GeoCoordinate>, ProviderError> {
        self.calls.lock().unwrap().push(radius_m);
        tokio::time::sleep(self.delay).await;
        if radius_m >= self.hit_radius_m {
            // Slightly south of the click
            let found = GeoCoordinate::new(coordinate.latitude() - 0.001, coordinate.longitude())
                .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
            Ok(Some(found))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &str {
        "radius panorama"
    }
}

/// Description source that names the first unit.
struct EchoDescriber {
    fail: bool,
}

impl DescriptionProvider for EchoDescriber {
    async fn describe(
        &self,
        _coordinate: GeoCoordinate,
        units: &[GeologicalUnit],
    ) -> Result<String, ProviderError> {
        if self.fail {
            return Err(ProviderError::ServiceError(
                "Unable to generate description".to_string(),
            ));
        }
        let name = units[0].name.clone().unwrap_or_default();
        Ok(format!("The surface here is {}.", name))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Everything the sink was asked to show.
#[derive(Debug, Clone, PartialEq)]
enum Render {
    Units { names: Vec<String>, colors: Vec<String> },
    NoData(GeoCoordinate),
    Description(DescriptionResult),
    Panorama(PanoramaResult),
    PanoramaUnavailable(GeoCoordinate),
    FetchError(String),
}

#[derive(Default)]
struct RecordingSink {
    renders: Vec<Render>,
}

impl RecordingSink {
    fn unit_names(&self) -> Vec<String> {
        self.renders
            .iter()
            .filter_map(|r| match r {
                Render::Units { names, .. } => Some(names.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn count(&self, pred: impl Fn(&Render) -> bool) -> usize {
        self.renders.iter().filter(|r| pred(r)).count()
    }
}

impl RenderSink for RecordingSink {
    fn render_units(&mut self, units: &[GeologicalUnit], legend: &Legend) {
        self.renders.push(Render::Units {
            names: units.iter().filter_map(|u| u.name.clone()).collect(),
            colors: units.iter().map(|u| legend.color_for(u).to_string()).collect(),
        });
    }

    fn render_no_data(&mut self, coordinate: GeoCoordinate) {
        self.renders.push(Render::NoData(coordinate));
    }

    fn render_description(&mut self, description: &DescriptionResult) {
        self.renders.push(Render::Description(description.clone()));
    }

    fn render_panorama(&mut self, panorama: &PanoramaResult) {
        self.renders.push(Render::Panorama(*panorama));
    }

    fn render_panorama_unavailable(&mut self, coordinate: GeoCoordinate) {
        self.renders.push(Render::PanoramaUnavailable(coordinate));
    }

    fn render_fetch_error(&mut self, message: &str) {
        self.renders.push(Render::FetchError(message.to_string()));
    }
}

type TestOrchestrator =
    ProbeOrchestrator<ScriptedGeology, RadiusPanorama, EchoDescriber, RecordingSink>;

struct Harness {
    orchestrator: TestOrchestrator,
    panorama_calls: Arc<Mutex<Vec<u32>>>,
}

fn harness(geology: ScriptedGeology, hit_radius_m: u32, describe_fails: bool) -> Harness {
    let panorama_calls = Arc::new(Mutex::new(Vec::new()));
    let orchestrator = ProbeOrchestrator::new(
        GeologyFetcher::new(geology),
        PanoramaLocator::new(RadiusPanorama {
            hit_radius_m,
            delay: Duration::from_millis(500),
            calls: Arc::clone(&panorama_calls),
        }),
        DescriptionRequester::new(EchoDescriber {
            fail: describe_fails,
        }),
        RecordingSink::default(),
        ProbeConfig::default(),
    );
    Harness {
        orchestrator,
        panorama_calls,
    }
}

// =============================================================================
// Supersession
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_superseded_probe_results_are_never_rendered() {
    let first = coord(36.1, -112.1);
    let second = coord(19.4, -155.3);
    let geology = ScriptedGeology::new(vec![
        (first, GeologyScript::units(2, vec![unit("Kaibab Formation", "1")])),
        (second, GeologyScript::units(3, vec![unit("Kilauea basalt", "1")])),
    ]);
    let mut h = harness(geology, 100, false);

    let probe1 = h.orchestrator.submit_probe(first);
    let probe2 = h.orchestrator.submit_probe(second);
    assert_eq!(h.orchestrator.status(probe1.id), Some(ProbeStatus::Superseded));

    // The first probe's units arrive a second before the second probe's.
    h.orchestrator.run_until_settled().await;
    tokio::time::sleep(Duration::from_secs(30)).await;
    h.orchestrator.drain_ready();

    let sink = h.orchestrator.sink();
    assert_eq!(sink.unit_names(), vec!["Kilauea basalt".to_string()]);
    assert_eq!(sink.count(|r| matches!(r, Render::Panorama(_))), 1);
    assert_eq!(sink.count(|r| matches!(r, Render::Description(_))), 1);
    assert_eq!(h.orchestrator.status(probe1.id), Some(ProbeStatus::Superseded));
    assert_eq!(h.orchestrator.status(probe2.id), Some(ProbeStatus::Completed));
}

#[tokio::test(start_paused = true)]
async fn test_rapid_clicks_render_only_the_last() {
    let clicks: Vec<GeoCoordinate> = (0..5).map(|i| coord(40.0 + i as f64, -105.0)).collect();
    let geology = ScriptedGeology::new(
        clicks
            .iter()
            .enumerate()
            .map(|(i, c)| {
                (
                    *c,
                    GeologyScript::units(5 - i as u64, vec![unit(&format!("Unit {}", i), "1")]),
                )
            })
            .collect(),
    );
    let mut h = harness(geology, 100, false);

    let probes: Vec<_> = clicks
        .iter()
        .map(|c| h.orchestrator.submit_probe(*c))
        .collect();
    h.orchestrator.run_until_settled().await;
    tokio::time::sleep(Duration::from_secs(30)).await;
    h.orchestrator.drain_ready();

    assert_eq!(h.orchestrator.sink().unit_names(), vec!["Unit 4".to_string()]);
    for probe in &probes[..4] {
        assert_eq!(h.orchestrator.status(probe.id), Some(ProbeStatus::Superseded));
    }
    assert_eq!(h.orchestrator.history().count(), 4);
}

// =============================================================================
// Render states
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_full_probe_renders_units_description_and_panorama() {
    let here = coord(36.1, -112.1);
    let geology = ScriptedGeology::new(vec![(
        here,
        GeologyScript::units(1, vec![unit("Kaibab Formation", "1")]),
    )]);
    let mut h = harness(geology, 100, false);

    let probe = h.orchestrator.submit_probe(here);
    h.orchestrator.run_until_settled().await;

    assert_eq!(h.orchestrator.status(probe.id), Some(ProbeStatus::Completed));
    let sink = h.orchestrator.sink();

    assert!(sink.renders.contains(&Render::Units {
        names: vec!["Kaibab Formation".to_string()],
        colors: vec!["#AA5500".to_string()],
    }));

    let description = sink
        .renders
        .iter()
        .find_map(|r| match r {
            Render::Description(d) => Some(d.clone()),
            _ => None,
        })
        .expect("description should be rendered");
    assert_eq!(
        description.text,
        format!("The surface here is Kaibab Formation. {}", FILLER_SENTENCE)
    );

    let panorama = sink
        .renders
        .iter()
        .find_map(|r| match r {
            Render::Panorama(p) => Some(*p),
            _ => None,
        })
        .expect("panorama should be rendered");
    assert!(panorama.found);
    // Panorama sits south of the click, so it should look north.
    assert!(
        panorama.heading_degrees < 1.0 || panorama.heading_degrees > 359.0,
        "Expected northward heading, got {}",
        panorama.heading_degrees
    );
}

#[tokio::test(start_paused = true)]
async fn test_empty_units_render_no_data() {
    let ocean = coord(0.0, -140.0);
    let geology = ScriptedGeology::new(vec![(ocean, GeologyScript::units(1, vec![]))]);
    let mut h = harness(geology, 100, false);

    let probe = h.orchestrator.submit_probe(ocean);
    h.orchestrator.run_until_settled().await;

    let sink = h.orchestrator.sink();
    assert_eq!(sink.count(|r| matches!(r, Render::NoData(_))), 1);
    assert_eq!(sink.count(|r| matches!(r, Render::Units { .. })), 0);
    assert_eq!(sink.count(|r| matches!(r, Render::Description(_))), 0);
    assert_eq!(h.orchestrator.status(probe.id), Some(ProbeStatus::Completed));
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_fails_probe_with_one_error_render() {
    let here = coord(51.5, -0.1);
    let geology = ScriptedGeology::new(vec![(
        here,
        GeologyScript {
            delay: Duration::from_secs(1),
            units: Err(ProviderError::HttpError("connection refused".to_string())),
            legend: Ok(Legend::default()),
        },
    )]);
    let mut h = harness(geology, 100, false);

    let probe = h.orchestrator.submit_probe(here);
    h.orchestrator.run_until_settled().await;

    assert_eq!(h.orchestrator.status(probe.id), Some(ProbeStatus::Failed));
    let sink = h.orchestrator.sink();
    assert_eq!(sink.count(|r| matches!(r, Render::FetchError(_))), 1);
    assert_eq!(sink.count(|r| matches!(r, Render::Units { .. })), 0);
    assert_eq!(sink.count(|r| matches!(r, Render::NoData(_))), 0);
    // Panorama is independent of the geology failure.
    assert_eq!(sink.count(|r| matches!(r, Render::Panorama(_))), 1);
}

#[tokio::test(start_paused = true)]
async fn test_legend_failure_renders_default_colors() {
    let here = coord(44.4, -110.6);
    let geology = ScriptedGeology::new(vec![(
        here,
        GeologyScript {
            delay: Duration::from_secs(1),
            units: Ok(vec![unit("Lava Creek Tuff", "1"), unit("Huckleberry Ridge Tuff", "2")]),
            legend: Err(ProviderError::HttpError("legend offline".to_string())),
        },
    )]);
    let mut h = harness(geology, 100, false);

    h.orchestrator.submit_probe(here);
    h.orchestrator.run_until_settled().await;

    assert!(h.orchestrator.sink().renders.contains(&Render::Units {
        names: vec![
            "Lava Creek Tuff".to_string(),
            "Huckleberry Ridge Tuff".to_string()
        ],
        colors: vec![DEFAULT_UNIT_COLOR.to_string(), DEFAULT_UNIT_COLOR.to_string()],
    }));
}

#[tokio::test(start_paused = true)]
async fn test_description_failure_is_silent() {
    let here = coord(36.1, -112.1);
    let geology = ScriptedGeology::new(vec![(
        here,
        GeologyScript::units(1, vec![unit("Kaibab Formation", "1")]),
    )]);
    let mut h = harness(geology, 100, true);

    let probe = h.orchestrator.submit_probe(here);
    h.orchestrator.run_until_settled().await;

    let sink = h.orchestrator.sink();
    assert_eq!(sink.count(|r| matches!(r, Render::Description(_))), 0);
    assert_eq!(sink.count(|r| matches!(r, Render::FetchError(_))), 0);
    assert_eq!(h.orchestrator.status(probe.id), Some(ProbeStatus::Completed));
}

// =============================================================================
// Panorama search through the orchestrator
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_panorama_falls_back_to_wide_radius() {
    let here = coord(38.9, -119.9);
    let mut h = harness(ScriptedGeology::new(vec![]), 5000, false);

    h.orchestrator.submit_probe(here);
    h.orchestrator.run_until_settled().await;

    assert_eq!(*h.panorama_calls.lock().unwrap(), vec![100, 5000]);
    assert_eq!(
        h.orchestrator
            .sink()
            .count(|r| matches!(r, Render::Panorama(p) if p.found)),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_panorama_miss_renders_unavailable() {
    let here = coord(-75.0, 0.0);
    let mut h = harness(ScriptedGeology::new(vec![]), u32::MAX, false);

    h.orchestrator.submit_probe(here);
    h.orchestrator.run_until_settled().await;

    assert!(h
        .orchestrator
        .sink()
        .renders
        .contains(&Render::PanoramaUnavailable(here)));
    assert_eq!(h.panorama_calls.lock().unwrap().len(), 2);
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_export_uses_current_probe_units() {
    let here = coord(36.1, -112.1);
    let geology = ScriptedGeology::new(vec![(
        here,
        GeologyScript::units(1, vec![unit("Kaibab Formation", "1")]),
    )]);
    let mut h = harness(geology, 100, false);

    let probe = h.orchestrator.submit_probe(here);
    h.orchestrator.run_until_settled().await;

    let mut path = MeasurementPath::new();
    path.add_point(coord(36.0, -112.0));
    path.add_point(coord(36.1, -112.0));

    let document =
        ExportDocument::new(probe.coordinate, h.orchestrator.active_units(), path.points());
    let json: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();

    assert_eq!(json["geologicalUnits"][0]["name"], "Kaibab Formation");
    assert_eq!(json["measurements"].as_array().unwrap().len(), 2);
}
