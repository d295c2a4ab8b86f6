//! Command-line interface
//!
//! Operator tooling over the configuration pipeline.

pub mod check;
pub mod dump;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use pool_common::coins::{AlgorithmSet, CoinBook};

use crate::config::{discover_documents, PoolResolver, PortalSettings, ResolvedConfigMap};

/// Pool portal CLI
#[derive(Parser)]
#[command(name = "pool-core")]
#[command(about = "Multi-coin mining pool portal configuration tools")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every pool document and report the outcome
    Check(check::CheckArgs),
    /// Print the resolved configuration map as JSON
    Dump(dump::DumpArgs),
}

/// Load portal settings, the coin book and the pool documents, then run
/// one resolution pass.
pub(crate) fn resolve_portal(config_path: &Path) -> anyhow::Result<ResolvedConfigMap> {
    let settings = PortalSettings::load(config_path)
        .with_context(|| format!("loading portal settings from {}", config_path.display()))?;
    let book = CoinBook::load_dir(&settings.coins_dir)
        .with_context(|| format!("loading coin profiles from {}", settings.coins_dir))?;
    let documents = discover_documents(&settings.pool_configs_dir)
        .with_context(|| format!("discovering pool documents in {}", settings.pool_configs_dir))?;

    let algorithms = AlgorithmSet::builtin();
    let resolver = PoolResolver::new(&book, &algorithms);
    let resolved = resolver.resolve(&documents, &settings.default_pool_configs)?;
    Ok(resolved)
}
