//! `dump` command: print the resolved configuration map as JSON.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;

/// Arguments for the dump command
#[derive(Args)]
pub struct DumpArgs {
    /// Portal settings file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Print a single coin's entry instead of the whole map
    #[arg(long)]
    pub coin: Option<String>,
}

pub fn execute(args: DumpArgs) -> Result<()> {
    let resolved = super::resolve_portal(&args.config)?;

    match args.coin {
        Some(name) => {
            let key = name.to_lowercase();
            let pool = resolved
                .get(&key)
                .ok_or_else(|| anyhow!("no resolved pool named '{key}'"))?;
            println!("{}", serde_json::to_string_pretty(pool)?);
        }
        None => println!("{}", serde_json::to_string_pretty(&resolved)?),
    }
    Ok(())
}
