//! Logging setup for embedders of the verification core.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with the default `info` filter.
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with a custom default filter, overridable via
/// `RUST_LOG`.
///
/// Repeated calls are no-ops: the first installed subscriber wins, so
/// gateways and test harnesses can call this unconditionally.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init();
}
