//! MAGMA CLI - Command-line interface
//!
//! Drives the MAGMA location probe from a terminal. The terminal stands in
//! for the map: coordinates typed or passed as arguments act as clicks, and
//! results are printed as each lookup completes.

mod commands;
mod error;
mod runner;
mod sink;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::probe::ProbeArgs;

#[derive(Parser)]
#[command(name = "magma")]
#[command(version = magma::VERSION)]
#[command(about = "Explore the geology under any point on the map", long_about = None)]
struct Cli {
    /// Enable debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    /// Mirror log output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe one location: geology, description and Street View
    Probe {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Interactive session: type coordinates to probe them one after another
    Session,

    /// Great-circle distance and bearing between two points
    Distance {
        /// Latitude of the first point
        #[arg(long, allow_negative_numbers = true)]
        lat1: f64,

        /// Longitude of the first point
        #[arg(long, allow_negative_numbers = true)]
        lon1: f64,

        /// Latitude of the second point
        #[arg(long, allow_negative_numbers = true)]
        lat2: f64,

        /// Longitude of the second point
        #[arg(long, allow_negative_numbers = true)]
        lon2: f64,
    },

    /// View and modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Probe { lat, lon } => {
            commands::probe::run(ProbeArgs {
                lat,
                lon,
                debug: cli.debug,
                verbose: cli.verbose,
            })
            .await
        }
        Commands::Session => commands::session::run(cli.debug, cli.verbose).await,
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => commands::distance::run(lat1, lon1, lat2, lon2),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
