//! Logging setup for hosts that do not install their own subscriber

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `filter`, or `RUST_LOG`, or `info`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing(filter: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter))
        .with_target(true)
        .try_init()
        .is_ok()
}

fn env_filter(filter: Option<&str>) -> EnvFilter {
    match filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}
