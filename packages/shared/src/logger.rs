//! Logging setup utilities for the zazen binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Sets up logging for both the library crates and the binary. The level can
/// be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "zazen-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use zazen_shared::logger::setup_logger;
///
/// setup_logger("zazen-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "zazen_shared={lvl},zazen_client={lvl},zazen_server={lvl},{bin}={lvl}",
                    lvl = default_log_level,
                    bin = binary_name.replace('-', "_"),
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
