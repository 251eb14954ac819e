//! Tracing initialization.
//!
//! Console subscriber with `EnvFilter`; exporter wiring (OTLP, Prometheus)
//! belongs to the host process embedding the connector.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level filter (default: info)

use tracing_subscriber::EnvFilter;

/// Initialize console tracing.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}
