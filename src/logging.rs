//! Tracing subscriber setup
//!
//! Logs go to stderr so command output on stdout stays clean for piping.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter used when the configured one does not parse
pub const DEFAULT_FILTER: &str = "finboard=warn";

/// Filter used by `--verbose`
pub const VERBOSE_FILTER: &str = "finboard=debug";

/// Pick the filter: `RUST_LOG` wins, then `--verbose`, then the configured default
pub fn build_filter(default_filter: &str, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let directives = if verbose { VERBOSE_FILTER } else { default_filter };
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing(default_filter: &str, verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = build_filter(default_filter, verbose);
        // Another subscriber may already be installed (tests); keep it.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
