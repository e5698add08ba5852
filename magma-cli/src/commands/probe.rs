//! Probe command - one-shot probe of a single location.

use magma::coord::GeoCoordinate;
use magma::probe::ProbeStatus;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;
use crate::sink::TerminalSink;

/// Arguments for the probe command.
pub struct ProbeArgs {
    pub lat: f64,
    pub lon: f64,
    pub debug: bool,
    pub verbose: bool,
}

/// Probe one location and wait until every lookup has reported.
pub async fn run(args: ProbeArgs) -> Result<(), CliError> {
    let coordinate = GeoCoordinate::new(args.lat, args.lon)?;

    let runner = CliRunner::new(args.debug, args.verbose)?;
    runner.log_startup("probe");

    let mut orchestrator = runner.build_orchestrator(TerminalSink::new())?;

    println!("Probing {}", coordinate);
    println!();

    let probe = orchestrator.submit_probe(coordinate);
    orchestrator.run_until_settled().await;

    let status = orchestrator.status(probe.id).unwrap_or(ProbeStatus::Failed);
    info!(probe_id = %probe.id, status = %status, "Probe finished");

    println!();
    println!("Probe {} {}", probe.id, status);

    Ok(())
}
