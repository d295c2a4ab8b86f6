//! The configuration resolver.
//!
//! One resolution pass takes a batch of raw pool documents plus the portal
//! defaults, validates every document against the coin registry, rejects
//! cross-document conflicts and produces the map the portal boots from.
//! The pipeline is straight-line: per-document normalization and
//! validation first, then whole-batch conflict checks, then defaults merge
//! and the algorithm gate.
//!
//! Fatal conditions abort the pass with a [`ResolveError`] and no partial
//! map. The single recoverable condition — a coin whose algorithm the
//! mining engine does not implement — drops that one entry with a warning
//! so the rest of the fleet still starts.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use pool_common::coins::{AlgorithmCapability, CoinProfile, ProfileRegistry};
use pool_common::jsonc;

use crate::config::document::RawDocument;

/// Error type for a resolution pass.
///
/// Every variant is fatal: the pass returns no partial map, and each
/// variant carries the offending document label(s) so the operator can fix
/// the input.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveError {
    /// Document is not valid JSON even after comment stripping
    #[error("{label}: invalid pool document: {source}")]
    Parse {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    /// No usable coin name in the document or its file name
    #[error("{label}: no coin name ('coin' and 'coinName' are empty or absent, and the file name is unusable)")]
    MissingCoinName { label: String },

    /// Inferred coin name has no profile in the registry
    #[error("{label}: unknown coin '{coin}'")]
    UnknownCoin { label: String, coin: String },

    /// Two pool documents claim the same stratum port
    #[error("port {port} is declared by both {first} and {second}")]
    PortConflict {
        port: String,
        first: String,
        second: String,
    },

    /// Two pool documents resolve to the same coin
    #[error("coin '{coin}' is configured by both {first} and {second}")]
    DuplicateCoin {
        coin: String,
        first: String,
        second: String,
    },
}

/// One pool's fully resolved configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPoolConfig {
    /// Resolved lowercase coin name; also the map key.
    pub name: String,
    /// Copy of the coin profile this pool mines.
    pub coin: CoinProfile,
    /// `enabled` flag from the document (absent means enabled).
    pub enabled: bool,
    /// Source-file label for diagnostics.
    pub source: String,
    /// Document fields, with portal defaults filled in for missing keys.
    pub settings: Map<String, Value>,
}

/// Resolved configuration for the whole portal, keyed by lowercase coin
/// name. Built fresh on every pass and owned by the caller.
pub type ResolvedConfigMap = HashMap<String, ResolvedPoolConfig>;

/// Per-document survivor of the validation stage, awaiting batch checks.
struct Candidate {
    label: String,
    name: String,
    profile: CoinProfile,
    enabled: bool,
    settings: Map<String, Value>,
}

impl Candidate {
    /// Keys of the document's `ports` table.
    fn port_keys(&self) -> Vec<&String> {
        self.settings
            .get("ports")
            .and_then(Value::as_object)
            .map(|ports| ports.keys().collect())
            .unwrap_or_default()
    }
}

/// Resolves a batch of pool documents against the portal's collaborators.
pub struct PoolResolver<'a> {
    registry: &'a dyn ProfileRegistry,
    algorithms: &'a dyn AlgorithmCapability,
}

impl<'a> PoolResolver<'a> {
    pub fn new(
        registry: &'a dyn ProfileRegistry,
        algorithms: &'a dyn AlgorithmCapability,
    ) -> Self {
        Self {
            registry,
            algorithms,
        }
    }

    /// Run one resolution pass over `documents`.
    pub fn resolve(
        &self,
        documents: &[RawDocument],
        defaults: &Map<String, Value>,
    ) -> Result<ResolvedConfigMap, ResolveError> {
        let mut candidates = Vec::with_capacity(documents.len());
        for document in documents {
            if let Some(candidate) = self.validate_document(document)? {
                candidates.push(candidate);
            }
        }

        check_port_conflicts(&candidates)?;
        check_duplicate_coins(&candidates)?;

        let mut resolved = ResolvedConfigMap::with_capacity(candidates.len());
        for mut candidate in candidates {
            merge_defaults(&mut candidate.settings, defaults);

            if !self.algorithms.has_algorithm(&candidate.profile.algorithm) {
                warn!(
                    coin = %candidate.name,
                    algorithm = %candidate.profile.algorithm,
                    source = %candidate.label,
                    "dropping pool: algorithm not implemented by the mining engine"
                );
                continue;
            }

            resolved.insert(
                candidate.name.clone(),
                ResolvedPoolConfig {
                    name: candidate.name,
                    coin: candidate.profile,
                    enabled: candidate.enabled,
                    source: candidate.label,
                    settings: candidate.settings,
                },
            );
        }
        Ok(resolved)
    }

    /// Per-document stage: parse, filter disabled, infer the coin name,
    /// attach the profile, normalize casing. Returns `None` for disabled
    /// documents.
    fn validate_document(
        &self,
        document: &RawDocument,
    ) -> Result<Option<Candidate>, ResolveError> {
        let settings: Map<String, Value> =
            jsonc::from_str(&document.text).map_err(|e| ResolveError::Parse {
                label: document.label.clone(),
                source: e,
            })?;

        // Disabled pools drop out before any batch check: a pool the
        // operator switched off can neither cause nor suffer conflicts.
        let enabled = settings
            .get("enabled")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        if !enabled {
            debug!(source = %document.label, "skipping disabled pool document");
            return Ok(None);
        }

        let name = infer_coin_name(&settings, document).ok_or_else(|| {
            ResolveError::MissingCoinName {
                label: document.label.clone(),
            }
        })?;

        let mut profile = self
            .registry
            .get(&name)
            .ok_or_else(|| ResolveError::UnknownCoin {
                label: document.label.clone(),
                coin: name.clone(),
            })?;

        // From here on the map key, the document's coin name and the
        // profile name all agree on lowercase.
        profile.name = profile.name.to_lowercase();
        let name = profile.name.clone();
        debug!(coin = %name, source = %document.label, "validated pool document");

        Ok(Some(Candidate {
            label: document.label.clone(),
            name,
            profile,
            enabled,
            settings,
        }))
    }
}

/// A document names its coin via `coin`, then `coinName`, then its file
/// name stem. The result is lowercased.
fn infer_coin_name(settings: &Map<String, Value>, document: &RawDocument) -> Option<String> {
    for field in ["coin", "coinName"] {
        if let Some(name) = settings.get(field).and_then(Value::as_str) {
            if !name.is_empty() {
                return Some(name.to_lowercase());
            }
        }
    }
    let stem = document.stem();
    (!stem.is_empty()).then(|| stem.to_lowercase())
}

/// Whole-batch pairwise check: no two pools may declare the same stratum
/// port.
fn check_port_conflicts(candidates: &[Candidate]) -> Result<(), ResolveError> {
    let ports: Vec<Vec<&String>> = candidates.iter().map(Candidate::port_keys).collect();
    for i in 0..candidates.len() {
        for j in i + 1..candidates.len() {
            for port in &ports[i] {
                if ports[j].contains(port) {
                    return Err(ResolveError::PortConflict {
                        port: (*port).clone(),
                        first: candidates[i].label.clone(),
                        second: candidates[j].label.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Whole-batch check: every surviving document must resolve to a distinct
/// coin.
fn check_duplicate_coins(candidates: &[Candidate]) -> Result<(), ResolveError> {
    for i in 0..candidates.len() {
        for j in i + 1..candidates.len() {
            if candidates[i].name == candidates[j].name {
                return Err(ResolveError::DuplicateCoin {
                    coin: candidates[i].name.clone(),
                    first: candidates[i].label.clone(),
                    second: candidates[j].label.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Copy defaults into `settings` for top-level keys the document does not
/// define. `Value::clone` is a full structural copy, so later mutation of
/// a resolved entry cannot reach back into the defaults record.
fn merge_defaults(settings: &mut Map<String, Value>, defaults: &Map<String, Value>) {
    for (key, value) in defaults {
        if !settings.contains_key(key) {
            settings.insert(key.clone(), value.clone());
        }
    }
}
