//! Diagnostic logging to stderr
//!
//! Operator-facing output goes through `ui`; this is for `-v` and `RUST_LOG`.

use std::io::stderr;

use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

/// Directives used when `RUST_LOG` is unset
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    format!("snowy_lab_installer={level},warn")
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = registry()
        .with(filter)
        .with(fmt::layer().with_writer(stderr).with_target(false))
        .try_init();
}
