//! Standardized logging configuration for the portal.
//!
//! Provides consistent log output across the portal binaries:
//! - Human-readable console output (default)
//! - Compact single-line output for production
//! - JSON output for log aggregation
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Standard tracing filter (e.g., `info`, `pool_core=debug`)
//! - `LOG_FORMAT`: Output format - `pretty` (default), `compact`, or `json`
//! - `LOG_TIMESTAMPS`: Timestamp format - `local` (default), `utc`, or `none`
//!
//! # Usage
//!
//! ```rust,ignore
//! use pool_common::logging::{init_logging, LogConfig};
//!
//! init_logging(LogConfig::from_env())?;
//! ```

mod config;

pub use config::{init_logging, InitError, LogConfig, LogFormat, TimestampFormat};
