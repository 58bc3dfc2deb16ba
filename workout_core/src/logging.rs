//! Logging infrastructure for the workout system
//!
//! Uses the tracing crate for structured logging.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging with default INFO level
///
/// Respects RUST_LOG environment variable for filtering.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level
///
/// The RUST_LOG environment variable still overrides it.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
