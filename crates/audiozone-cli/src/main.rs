//! `audiozone` command-line tool.
//!
//! Loads an AudioZone platform configuration, publishes its zones against
//! the stub backend and runs a single command:
//!
//! ```sh
//! audiozone --config zones.json list
//! audiozone --config zones.json get 1 Volume
//! audiozone --config zones.json set 1 On true
//! audiozone plugins
//! ```

#![allow(clippy::print_stdout)]

mod args;
mod commands;

use anyhow::{Context, Result};
use args::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).with_context(|| format!("invalid log filter {level:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let output = commands::execute(cli.config.as_deref(), cli.command).await?;
    println!("{output}");
    Ok(())
}
