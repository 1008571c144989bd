//! Logging utilities
//!
//! The library only logs through the `log` facade. Binaries pick the backend;
//! these helpers install `env_logger`.

pub use log::{debug, info, warn, error, trace};

use log::LevelFilter;
use std::str::FromStr;

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging, falling back to `level` when `RUST_LOG` is unset
///
/// Returns `false` if a logger was already installed (tests often race on this).
pub fn init_with_level(level: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init()
        .is_ok()
}

/// Parse a textual log level ("off", "error", "warn", "info", "debug", "trace")
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level).ok()
}
