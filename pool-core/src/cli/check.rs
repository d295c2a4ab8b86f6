//! `check` command: run a full resolution pass and report the outcome.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Portal settings file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let resolved = super::resolve_portal(&args.config)?;

    let mut names: Vec<_> = resolved.keys().collect();
    names.sort();
    for name in names {
        let pool = &resolved[name];
        let ports = pool
            .settings
            .get("ports")
            .and_then(|v| v.as_object())
            .map(|m| m.len())
            .unwrap_or(0);
        println!(
            "{:<12} {:<6} {:<12} {} port(s)  [{}]",
            pool.name, pool.coin.symbol, pool.coin.algorithm, ports, pool.source
        );
    }

    info!(pools = resolved.len(), "configuration resolved");
    Ok(())
}
