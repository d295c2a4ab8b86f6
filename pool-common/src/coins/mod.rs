//! Coin profiles and mining capability lookups.
//!
//! Every supported coin ships as a small JSON document (comment-tolerant,
//! like all operator-edited files) describing its identity and network
//! parameters. At startup the portal loads those documents into a
//! [`CoinBook`] and resolves each pool document against it.
//!
//! The resolver only sees the [`ProfileRegistry`] and
//! [`AlgorithmCapability`] seams; lookups hand out owned copies so callers
//! can attach and mutate a profile without aliasing registry state.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigurationError;
use crate::jsonc;

/// Fixed descriptive record for a supported cryptocurrency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinProfile {
    /// Coin name, e.g. `"vrsc"`. Lowercased during resolution.
    pub name: String,
    /// Ticker symbol, e.g. `"VRSC"`.
    pub symbol: String,
    /// Hashing algorithm the coin is mined with.
    pub algorithm: String,
    /// Network magic bytes, hex-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_magic: Option<String>,
    /// Whether coinbase transactions carry text messages.
    #[serde(default)]
    pub tx_messages: bool,
    /// Remaining consensus/network parameters, passed through untouched.
    #[serde(flatten)]
    pub network: Map<String, Value>,
}

/// Read-only lookup of coin profiles by name.
pub trait ProfileRegistry {
    /// Fetch the profile for `name`, if the coin is known. Returns an
    /// owned copy.
    fn get(&self, name: &str) -> Option<CoinProfile>;
}

/// Capability check for mining algorithms.
pub trait AlgorithmCapability {
    /// Whether the mining engine implements `name`.
    fn has_algorithm(&self, name: &str) -> bool;
}

/// In-memory profile registry loaded from a directory of coin documents.
#[derive(Debug, Clone, Default)]
pub struct CoinBook {
    profiles: HashMap<String, CoinProfile>,
}

impl CoinBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` coin document in `dir`.
    ///
    /// Profiles are keyed by lowercase coin name. Two documents defining
    /// the same coin are rejected, naming the second file.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| ConfigurationError::read(dir, e))? {
            let entry = entry.map_err(|e| ConfigurationError::read(dir, e))?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut book = Self::new();
        for path in paths {
            let text =
                fs::read_to_string(&path).map_err(|e| ConfigurationError::read(&path, e))?;
            let profile: CoinProfile =
                jsonc::from_str(&text).map_err(|e| ConfigurationError::parse(&path, e))?;

            for (field, value) in [
                ("name", &profile.name),
                ("symbol", &profile.symbol),
                ("algorithm", &profile.algorithm),
            ] {
                if value.is_empty() {
                    return Err(ConfigurationError::invalid_value(
                        field,
                        format!("must not be empty in {}", path.display()),
                    ));
                }
            }

            let key = profile.name.to_lowercase();
            if book.profiles.contains_key(&key) {
                return Err(ConfigurationError::Duplicate {
                    name: key,
                    path: path.display().to_string(),
                });
            }
            debug!(coin = %key, file = %path.display(), "loaded coin profile");
            book.profiles.insert(key, profile);
        }
        Ok(book)
    }

    /// Register a profile under its lowercase name, replacing any previous
    /// definition.
    pub fn insert(&mut self, profile: CoinProfile) {
        self.profiles.insert(profile.name.to_lowercase(), profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileRegistry for CoinBook {
    fn get(&self, name: &str) -> Option<CoinProfile> {
        self.profiles.get(&name.to_lowercase()).cloned()
    }
}

/// Algorithms implemented by the bundled mining engine.
const BUILTIN_ALGORITHMS: &[&str] = &[
    "sha256",
    "sha1",
    "scrypt",
    "scrypt-n",
    "c11",
    "x11",
    "x13",
    "x15",
    "x16r",
    "nist5",
    "quark",
    "keccak",
    "blake",
    "skein",
    "groestl",
    "qubit",
    "lyra2re",
    "equihash",
    "verushash",
];

/// [`AlgorithmCapability`] backed by a plain name set.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmSet {
    names: HashSet<String>,
}

impl AlgorithmSet {
    /// The algorithm table compiled into the mining engine.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_ALGORITHMS.iter().copied())
    }

    /// Build a capability set from arbitrary names. Comparison is
    /// case-insensitive.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.into().to_lowercase())
                .collect(),
        }
    }
}

impl AlgorithmCapability for AlgorithmSet {
    fn has_algorithm(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }
}
