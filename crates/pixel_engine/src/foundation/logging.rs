//! Logging bootstrap
//!
//! Thin wrapper over `env_logger` so binaries get a consistent default
//! level without repeating builder code.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// Respects `RUST_LOG`, defaulting to `info` when unset. Call once,
/// early in `main`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
