//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "audiozone")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and drive audio zones published by the AudioZone platform")]
pub struct Cli {
    /// Platform or host configuration file (JSON). Required by every command but `plugins`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `audiozone_backend=trace`. Defaults to RUST_LOG, then `warn`
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the accessory description of every zone as JSON
    List,

    /// Print the registrations the plugin makes with the host
    Plugins,

    /// Read a capability of one zone
    Get {
        /// Zone id
        zone: String,
        /// Characteristic or capability name (On, power, Volume)
        capability: String,
    },

    /// Write a capability of one zone
    Set {
        /// Zone id
        zone: String,
        /// Characteristic or capability name (On, power, Volume)
        capability: String,
        /// JSON value, e.g. `true` or `75`
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set() {
        let cli = Cli::try_parse_from([
            "audiozone", "--config", "zones.json", "set", "1", "Volume", "75",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("zones.json")));
        assert!(matches!(
            cli.command,
            Command::Set { ref zone, ref capability, ref value }
                if zone == "1" && capability == "Volume" && value == "75"
        ));
    }

    #[test]
    fn test_parse_plugins_without_config() {
        let cli = Cli::try_parse_from(["audiozone", "plugins"]).unwrap();

        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Command::Plugins));
    }
}
