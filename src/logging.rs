//! Tracing setup shared by the binaries.
//!
//! Logs go to stderr: stdout carries the RPC protocol.

use tracing_subscriber::EnvFilter;

/// Overrides the configured level, using `EnvFilter` directive syntax.
pub const ENV_LOG: &str = "LINKDECK_LOG";

/// Installs the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
