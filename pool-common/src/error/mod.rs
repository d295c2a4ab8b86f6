//! Shared error types for configuration loading.
//!
//! Everything here is a permanent condition: the operator has to fix an
//! input file before a retry can succeed. Crate-specific errors (such as
//! the resolver's fatal taxonomy) live next to the code that raises them
//! and wrap these where useful.

mod common;

pub use common::*;
