// pool-common: Shared building blocks for the mining pool portal
// Used by pool-core (portal pipeline and CLI) and operator tooling

pub mod coins;
pub mod error;
pub mod jsonc;
pub mod logging;
