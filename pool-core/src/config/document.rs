//! Pool document discovery.

use std::fs;
use std::path::Path;

use tracing::debug;

use pool_common::error::ConfigurationError;

/// One operator-edited pool document, read but not yet parsed.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Source label used in diagnostics, normally the file name.
    pub label: String,
    /// Raw comment-tolerant JSON text.
    pub text: String,
}

impl RawDocument {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Label with the `.json` suffix removed; the coin-name fallback for
    /// documents that name no coin explicitly.
    pub fn stem(&self) -> &str {
        self.label.strip_suffix(".json").unwrap_or(&self.label)
    }
}

/// Scan `dir` (non-recursively) for `*.json` pool documents.
///
/// Documents come back in file-name order so batch diagnostics are
/// deterministic across runs.
pub fn discover_documents(dir: impl AsRef<Path>) -> Result<Vec<RawDocument>, ConfigurationError> {
    let dir = dir.as_ref();
    let mut documents = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ConfigurationError::read(dir, e))? {
        let entry = entry.map_err(|e| ConfigurationError::read(dir, e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let label = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let text = fs::read_to_string(&path).map_err(|e| ConfigurationError::read(&path, e))?;
        debug!(file = %label, bytes = text.len(), "discovered pool document");
        documents.push(RawDocument { label, text });
    }
    documents.sort_by(|a, b| a.label.cmp(&b.label));
    Ok(documents)
}
