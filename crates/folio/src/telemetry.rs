//! Tracing setup for host applications.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,folio=debug";

/// Install a console subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info,folio=debug` when `RUST_LOG` is unset or invalid. Does
/// nothing if a global subscriber is already installed.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(env_filter);
}

/// Install a console subscriber with an explicit filter directive.
pub fn init_tracing_with_filter(directives: &str) {
    install(EnvFilter::new(directives));
}

fn install(env_filter: EnvFilter) {
    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    match result {
        Ok(()) => tracing::debug!("Tracing initialized"),
        Err(e) => tracing::debug!(error = %e, "Tracing already initialized"),
    }
}
