//! # Logging
//!
//! Installs the `tracing` subscriber. Output goes to stderr so the IR can be
//! piped from stdout.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Installs a global subscriber. `verbose` lowers the default level to `debug`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
