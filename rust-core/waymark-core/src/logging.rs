//! # Logging
//!
//! Installs a JSON `tracing` subscriber for hosts that don't bring their own.
//! Both functions are idempotent: a second call (or an already installed
//! global subscriber) is a no-op.

use tracing_subscriber::EnvFilter;

/// Default filter directive
pub const DEFAULT_DIRECTIVE: &str = "waymark_core=info";

/// Initialize tracing with `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVE`]
///
/// Returns `true` if this call installed the subscriber.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    install(filter)
}

/// Initialize tracing with an explicit filter directive
///
/// Returns `true` if this call installed the subscriber.
pub fn init_tracing_with(directive: &str) -> bool {
    install(EnvFilter::new(directive))
}

fn install(filter: EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .is_ok()
}
