//! Process-wide tracing backend initialization.

use tracing_subscriber::EnvFilter;

use crate::level::LogLevel;

/// Initialize the tracing backend at `level`. An explicit `RUST_LOG` wins
/// over the level passed in. Safe to call more than once: later calls leave
/// the already-installed subscriber in place.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
