//! Tracing subscriber setup for the command-line entry point.

use crate::cli::LogLevel;
use std::io;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber filtered at `level` unless `RUST_LOG` says
/// otherwise. A subscriber installed earlier stays in place.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}
