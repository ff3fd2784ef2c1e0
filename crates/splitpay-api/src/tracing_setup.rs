//! Structured logging setup for the binary.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "splitpay=debug,info";

/// Installs a JSON subscriber filtered by `RUST_LOG`, or [`DEFAULT_FILTER`].
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .json()
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}
