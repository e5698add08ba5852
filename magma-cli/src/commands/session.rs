//! Session command - interactive probing from stdin.
//!
//! Each line is one command. A bare `lat lon` pair acts as a map click and
//! supersedes whatever probe is still in flight; completions are rendered
//! as they arrive while the prompt stays responsive.

use std::path::PathBuf;

use magma::coord::{GeoCoordinate, MeasurementPath};
use magma::export::{ExportDocument, DEFAULT_EXPORT_FILE};
use magma::probe::{ProbeOrchestrator, RenderSink, PROBE_HISTORY_LIMIT};
use magma::provider::{DescriptionProvider, GeologyProvider, PanoramaProvider};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::error::CliError;
use crate::runner::CliRunner;
use crate::sink::TerminalSink;

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Probe(GeoCoordinate),
    Measure(GeoCoordinate),
    Clear,
    Export(Option<PathBuf>),
    Status,
    Help,
    Quit,
    Empty,
}

/// Parse one line of input.
pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(SessionCommand::Empty);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        "help" | "?" => Ok(SessionCommand::Help),
        "status" => Ok(SessionCommand::Status),
        "clear" => Ok(SessionCommand::Clear),
        "measure" => parse_coordinate(rest).map(SessionCommand::Measure),
        "export" => Ok(SessionCommand::Export(
            Some(rest).filter(|r| !r.is_empty()).map(PathBuf::from),
        )),
        _ => parse_coordinate(line).map(SessionCommand::Probe),
    }
}

/// Parse "lat lon" or "lat, lon".
fn parse_coordinate(text: &str) -> Result<GeoCoordinate, String> {
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let [lat, lon] = parts.as_slice() else {
        return Err(format!(
            "Expected a latitude and longitude, got '{}'. Type 'help' for commands.",
            text
        ));
    };

    let lat: f64 = lat
        .parse()
        .map_err(|_| format!("Invalid latitude '{}'", lat))?;
    let lon: f64 = lon
        .parse()
        .map_err(|_| format!("Invalid longitude '{}'", lon))?;

    GeoCoordinate::new(lat, lon).map_err(|e| e.to_string())
}

const HELP: &str = "\
Commands:
  <lat> <lon>          Probe a location (replaces any probe in progress)
  measure <lat> <lon>  Add a point to the measurement path
  clear                Clear the measurement path
  export [path]        Write the current location, units and path as JSON
  status               Show recent probes
  quit                 Leave the session";

/// Session state besides the orchestrator.
struct Session {
    measurement: MeasurementPath,
}

impl Session {
    /// Apply one command. Returns false when the session should end.
    fn apply<G, P, D, S>(
        &mut self,
        orchestrator: &mut ProbeOrchestrator<G, P, D, S>,
        command: SessionCommand,
    ) -> Result<bool, CliError>
    where
        G: GeologyProvider + 'static,
        P: PanoramaProvider + 'static,
        D: DescriptionProvider + 'static,
        S: RenderSink,
    {
        match command {
            SessionCommand::Empty => {}
            SessionCommand::Quit => return Ok(false),
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Probe(coordinate) => {
                let probe = orchestrator.submit_probe(coordinate);
                println!("Probe {} at {}", probe.id, coordinate);
            }
            SessionCommand::Measure(point) => match self.measurement.add_point(point) {
                Some(segment) => println!(
                    "Segment: {:.3} km, total: {:.3} km",
                    segment,
                    self.measurement.total_km()
                ),
                None => println!("Measurement started at {}", point),
            },
            SessionCommand::Clear => {
                self.measurement.clear();
                println!("Measurement cleared");
            }
            SessionCommand::Export(path) => self.export(orchestrator, path)?,
            SessionCommand::Status => print_status(orchestrator),
        }
        Ok(true)
    }

    fn export<G, P, D, S>(
        &self,
        orchestrator: &ProbeOrchestrator<G, P, D, S>,
        path: Option<PathBuf>,
    ) -> Result<(), CliError>
    where
        G: GeologyProvider + 'static,
        P: PanoramaProvider + 'static,
        D: DescriptionProvider + 'static,
        S: RenderSink,
    {
        let Some(current) = orchestrator.current() else {
            println!("Probe a location before exporting");
            return Ok(());
        };

        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
        ExportDocument::new(
            current.coordinate,
            orchestrator.active_units(),
            self.measurement.points(),
        )
        .write_to(&path)?;

        info!(path = %path.display(), "Session exported");
        println!("Exported to {}", path.display());
        Ok(())
    }
}

fn print_status<G, P, D, S>(orchestrator: &ProbeOrchestrator<G, P, D, S>)
where
    G: GeologyProvider + 'static,
    P: PanoramaProvider + 'static,
    D: DescriptionProvider + 'static,
    S: RenderSink,
{
    println!("Recent probes (up to {}):", PROBE_HISTORY_LIMIT);
    let mut any = false;
    for probe in orchestrator.history() {
        println!("  {} {} {}", probe.id, probe.coordinate, probe.status);
        any = true;
    }
    if !any {
        println!("  (none)");
    }
}

/// Run the interactive session until `quit` or end of input.
pub async fn run(debug: bool, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, verbose)?;
    runner.log_startup("session");

    let mut orchestrator = runner.build_orchestrator(TerminalSink::new())?;
    let mut session = Session {
        measurement: MeasurementPath::new(),
    };

    println!("MAGMA interactive session. Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(CliError::Input)? else {
                    debug!("End of input");
                    break;
                };
                match parse_command(&line) {
                    Ok(command) => {
                        if !session.apply(&mut orchestrator, command)? {
                            break;
                        }
                    }
                    Err(message) => println!("{}", message),
                }
            }
            Some(event) = orchestrator.next_event() => {
                orchestrator.handle_event(event);
            }
        }
    }

    info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use magma::description::{DescriptionRequester, DescriptionResult};
    use magma::geology::{GeologicalUnit, GeologyFetcher, Legend};
    use magma::panorama::{PanoramaLocator, PanoramaResult};
    use magma::probe::ProbeConfig;
    use magma::provider::ProviderError;
    use std::fs;
    use tempfile::TempDir;

    // =========================================================================
    // Fakes
    // =========================================================================

    struct KaibabGeology;

    impl GeologyProvider for KaibabGeology {
        async fn units(
            &self,
            _coordinate: GeoCoordinate,
        ) -> Result<Vec<GeologicalUnit>, ProviderError> {
            Ok(vec![GeologicalUnit {
                name: Some("Kaibab Formation".to_string()),
                source_id: Some("1".to_string()),
                ..Default::default()
            }])
        }

        async fn legend(&self, _coordinate: GeoCoordinate) -> Result<Legend, ProviderError> {
            Ok(Legend::default())
        }

        fn name(&self) -> &str {
            "kaibab"
        }
    }

    struct NoPanorama;

    impl PanoramaProvider for NoPanorama {
        async fn search(
            &self,
            _coordinate: GeoCoordinate,
            _radius_m: u32,
        ) -> Result<Option<GeoCoordinate>, ProviderError> {
            Ok(None)
        }

        fn name(&self) -> &str {
            "none"
        }
    }

    struct CannedDescriber;

    impl DescriptionProvider for CannedDescriber {
        async fn describe(
            &self,
            _coordinate: GeoCoordinate,
            _units: &[GeologicalUnit],
        ) -> Result<String, ProviderError> {
            Ok("Cross-bedded limestone.".to_string())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    #[derive(Default)]
    struct QuietSink {
        units: usize,
    }

    impl RenderSink for QuietSink {
        fn render_units(&mut self, _units: &[GeologicalUnit], _legend: &Legend) {
            self.units += 1;
        }
        fn render_no_data(&mut self, _coordinate: GeoCoordinate) {}
        fn render_description(&mut self, _description: &DescriptionResult) {}
        fn render_panorama(&mut self, _panorama: &PanoramaResult) {}
        fn render_panorama_unavailable(&mut self, _coordinate: GeoCoordinate) {}
        fn render_fetch_error(&mut self, _message: &str) {}
    }

    type QuietOrchestrator =
        ProbeOrchestrator<KaibabGeology, NoPanorama, CannedDescriber, QuietSink>;

    fn quiet_orchestrator() -> QuietOrchestrator {
        ProbeOrchestrator::new(
            GeologyFetcher::new(KaibabGeology),
            PanoramaLocator::new(NoPanorama),
            DescriptionRequester::new(CannedDescriber),
            QuietSink::default(),
            ProbeConfig::default(),
        )
    }

    fn new_session() -> Session {
        Session {
            measurement: MeasurementPath::new(),
        }
    }

    // =========================================================================
    // Command dispatch
    // =========================================================================

    #[tokio::test]
    async fn test_session_measures_and_exports_current_location() {
        let mut orchestrator = quiet_orchestrator();
        let mut session = new_session();
        let here = GeoCoordinate::new(36.1, -112.1).unwrap();

        assert!(session
            .apply(&mut orchestrator, SessionCommand::Probe(here))
            .unwrap());
        orchestrator.run_until_settled().await;
        assert_eq!(orchestrator.sink().units, 1);

        for lon in [0.0, 1.0] {
            let point = GeoCoordinate::new(0.0, lon).unwrap();
            session
                .apply(&mut orchestrator, SessionCommand::Measure(point))
                .unwrap();
        }
        assert!(
            (session.measurement.total_km() - 111.19).abs() < 0.01,
            "Unexpected total {}",
            session.measurement.total_km()
        );

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("site.json");
        session
            .apply(&mut orchestrator, SessionCommand::Export(Some(path.clone())))
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["location"]["lat"], 36.1);
        assert_eq!(json["location"]["lng"], -112.1);
        assert_eq!(json["geologicalUnits"][0]["name"], "Kaibab Formation");
        assert_eq!(json["measurements"].as_array().unwrap().len(), 2);

        session
            .apply(&mut orchestrator, SessionCommand::Clear)
            .unwrap();
        assert!(session.measurement.is_empty());
        assert_eq!(session.measurement.total_km(), 0.0);
    }

    #[tokio::test]
    async fn test_status_continues_and_quit_stops() {
        let mut orchestrator = quiet_orchestrator();
        let mut session = new_session();

        assert!(session
            .apply(&mut orchestrator, SessionCommand::Status)
            .unwrap());
        assert!(session
            .apply(&mut orchestrator, SessionCommand::Empty)
            .unwrap());
        assert!(!session
            .apply(&mut orchestrator, SessionCommand::Quit)
            .unwrap());
    }

    #[tokio::test]
    async fn test_export_before_any_location_writes_nothing() {
        let mut orchestrator = quiet_orchestrator();
        let mut session = new_session();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.json");

        assert!(session
            .apply(&mut orchestrator, SessionCommand::Export(Some(path.clone())))
            .unwrap());
        assert!(!path.exists());
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn test_bare_pair_is_probe() {
        assert_eq!(
            parse_command("36.1 -112.1").unwrap(),
            SessionCommand::Probe(GeoCoordinate::new(36.1, -112.1).unwrap())
        );
        assert_eq!(
            parse_command("  36.1, -112.1 ").unwrap(),
            SessionCommand::Probe(GeoCoordinate::new(36.1, -112.1).unwrap())
        );
    }

    #[test]
    fn test_measure_and_export() {
        assert_eq!(
            parse_command("measure 10 20").unwrap(),
            SessionCommand::Measure(GeoCoordinate::new(10.0, 20.0).unwrap())
        );
        assert_eq!(parse_command("export").unwrap(), SessionCommand::Export(None));
        assert_eq!(
            parse_command("export out/site.json").unwrap(),
            SessionCommand::Export(Some(PathBuf::from("out/site.json")))
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_command("QUIT").unwrap(), SessionCommand::Quit);
        assert_eq!(parse_command("status").unwrap(), SessionCommand::Status);
        assert_eq!(parse_command("clear").unwrap(), SessionCommand::Clear);
        assert_eq!(parse_command("   ").unwrap(), SessionCommand::Empty);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_command("hello").is_err());
        assert!(parse_command("91 0").is_err());
        assert!(parse_command("measure 10").is_err());
        assert!(parse_command("1 2 3").is_err());
    }
}
