//! Tracing and logging initialization

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// Respects `RUST_LOG`; defaults to `info` when unset or unparsable.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
