//! Pool portal CLI
//!
//! Provides commands for:
//! - `check`: resolve every pool document and report the outcome
//! - `dump`: print the resolved configuration map as JSON

use anyhow::Result;
use clap::Parser;

use pool_common::logging::{init_logging, LogConfig};
use pool_core::cli::{Cli, Commands};

fn main() -> Result<()> {
    init_logging(LogConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => pool_core::cli::check::execute(args),
        Commands::Dump(args) => pool_core::cli::dump::execute(args),
    }
}
