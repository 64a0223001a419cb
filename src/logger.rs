// src/logger.rs

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

/// Tracing init; level comes from RUST_LOG, defaulting to INFO.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
