//! Common failure modes for reading and parsing configuration inputs.

use std::path::Path;

use thiserror::Error;

/// Configuration-related errors.
///
/// Use this for loading coin profiles, portal settings and pool documents
/// from disk.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// File or directory could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON even after comment stripping
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Field has an invalid value
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Two documents define the same entity
    #[error("Duplicate definition of '{name}' in {path}")]
    Duplicate { name: String, path: String },
}

impl ConfigurationError {
    /// Create a Read error
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ConfigurationError::Read {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Create a Parse error
    pub fn parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        ConfigurationError::Parse {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
