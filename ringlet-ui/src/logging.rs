//! Tracing setup for ringlet hosts.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "error,ringlet_ui=info,ringlet_components=info";

/// Installs a global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` when set and valid, otherwise from a
/// default that keeps ringlet crates at `info`. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_new(DEFAULT_FILTER) {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
