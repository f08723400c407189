//! Logging infrastructure for SugarPilot.
//!
//! Centralized tracing setup shared by the CLI binary and tests.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging at the default `info` level.
///
/// The `RUST_LOG` environment variable overrides the level.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level (debug, info, warn,
/// error), still overridable through `RUST_LOG`.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
