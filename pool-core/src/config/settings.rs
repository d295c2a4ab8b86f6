//! Portal-level settings.
//!
//! The portal reads a single `config.json` (comment-tolerant, like every
//! operator-edited file) naming the pool and coin document directories and
//! the pool defaults that fill gaps in individual pool documents. The
//! defaults record is handed to the resolver as an explicit value; nothing
//! here is global state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use pool_common::error::ConfigurationError;
use pool_common::jsonc;

/// Portal settings file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSettings {
    /// Directory scanned for pool documents.
    #[serde(default = "default_pool_configs_dir")]
    pub pool_configs_dir: String,
    /// Directory holding coin profile documents.
    #[serde(default = "default_coins_dir")]
    pub coins_dir: String,
    /// Defaults merged into every pool document (missing keys only).
    #[serde(default)]
    pub default_pool_configs: Map<String, Value>,
}

fn default_pool_configs_dir() -> String {
    "pool_configs".to_string()
}

fn default_coins_dir() -> String {
    "coins".to_string()
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            pool_configs_dir: default_pool_configs_dir(),
            coins_dir: default_coins_dir(),
            default_pool_configs: Map::new(),
        }
    }
}

impl PortalSettings {
    /// Load settings from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigurationError::read(path, e))?;
        jsonc::from_str(&text).map_err(|e| ConfigurationError::parse(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_take_defaults() {
        let settings: PortalSettings = jsonc::from_str("{}").unwrap();
        assert_eq!(settings.pool_configs_dir, "pool_configs");
        assert_eq!(settings.coins_dir, "coins");
        assert!(settings.default_pool_configs.is_empty());
    }

    #[test]
    fn test_settings_tolerate_comments_and_trailing_commas() {
        let settings: PortalSettings = jsonc::from_str(
            r#"{
                // where the pools live
                "poolConfigsDir": "pools",
                "defaultPoolConfigs": {
                    "redis": { "host": "127.0.0.1", "port": 6379 },
                },
            }"#,
        )
        .unwrap();
        assert_eq!(settings.pool_configs_dir, "pools");
        assert_eq!(settings.default_pool_configs["redis"]["port"], 6379);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"coinsDir": "profiles"}"#).unwrap();

        let settings = PortalSettings::load(&path).unwrap();
        assert_eq!(settings.coins_dir, "profiles");

        assert!(PortalSettings::load(dir.path().join("missing.json")).is_err());
    }
}
