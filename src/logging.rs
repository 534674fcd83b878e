//! Tracing subscriber setup for the runner.

use std::io;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a JSON subscriber writing to stderr.
///
/// Respects `RUST_LOG` and falls back to `info`. Calling it twice keeps the first
/// subscriber.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stderr)
        .try_init();
}
