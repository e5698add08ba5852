//! Config command - read and change settings in `~/.magma/config.ini`.

use clap::Subcommand;
use magma::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of one setting
    Get {
        /// Setting name, e.g. panorama.wide_radius
        key: String,
    },

    /// Change one setting and save the file
    Set {
        /// Setting name, e.g. panorama.wide_radius
        key: String,

        /// New value; an empty string clears optional settings
        value: String,
    },

    /// Print every setting with its current value
    List,

    /// Print where the configuration file lives
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let key = lookup(&key)?;
            let config = ConfigFile::load()?;
            println!("{}", display_value(&key.get(&config)));
        }
        ConfigCommands::Set { key, value } => {
            let key = lookup(&key)?;
            let mut config = ConfigFile::load()?;
            key.set(&mut config, &value)
                .map_err(|e| CliError::Config(e.to_string()))?;
            config.save()?;
            println!(
                "{} is now {} ({})",
                key.name(),
                display_value(&key.get(&config)),
                config_file_path().display()
            );
        }
        ConfigCommands::List => {
            let config = ConfigFile::load()?;
            println!("# {}", config_file_path().display());
            print!("{}", format_listing(&config));
        }
        ConfigCommands::Path => println!("{}", config_file_path().display()),
    }
    Ok(())
}

fn lookup(name: &str) -> Result<ConfigKey, CliError> {
    name.parse().map_err(|_| {
        let known: Vec<&str> = ConfigKey::all().iter().map(ConfigKey::name).collect();
        CliError::Config(format!(
            "no setting named '{}' (known: {})",
            name,
            known.join(", ")
        ))
    })
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "<unset>"
    } else {
        value
    }
}

/// One `name  value` line per setting, names padded to a common width.
fn format_listing(config: &ConfigFile) -> String {
    let width = ConfigKey::all()
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0);

    ConfigKey::all()
        .iter()
        .map(|key| {
            format!(
                "{:width$}  {}\n",
                key.name(),
                display_value(&key.get(config)),
                width = width
            )
        })
        .collect()
}
