//! # Pool Core
//!
//! Configuration pipeline for the multi-coin mining pool portal.
//!
//! A portal mines many coins at once; each coin's pool is described by one
//! operator-edited, comment-tolerant JSON document. One resolution pass
//! discovers those documents, strips comments and trailing commas, parses
//! them strictly, validates every pool against the coin profile registry,
//! rejects cross-document conflicts (duplicate coins, duplicate stratum
//! ports), fills gaps from the portal defaults and hands the surrounding
//! orchestration a fully resolved configuration map.
//!
//! ## Architecture
//!
//! ```text
//! pool_configs/*.json ──► jsonc normalize ──► strict parse
//!                                                │
//! coins/*.json ──► CoinBook ──► profile lookup ◄─┘
//!                                                │
//!                  batch conflict checks ◄───────┤
//!                  defaults merge, algo gate ◄───┘
//!                                                │
//!                                   ResolvedConfigMap
//! ```

pub mod cli;
pub mod config;

// Re-export commonly used types
pub use config::{
    discover_documents, PoolResolver, PortalSettings, RawDocument, ResolveError,
    ResolvedConfigMap, ResolvedPoolConfig,
};
