//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (stderr, `RUST_LOG`-aware)
//! - Upstream configuration logging at startup

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::core::config::{RelayKind, Settings};

/// Initialize the logger.
///
/// Library code logs through the `log` facade; records are bridged into a
/// `tracing` fmt subscriber writing to stderr so stdout stays free for
/// rendered output. `RUST_LOG` wins over `default_level`.
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Bad filter or a logger was already installed
pub fn init_logger(default_level: &str) -> Result<()> {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), default_level)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
    tracing_log::LogTracer::init().map_err(|e| anyhow::anyhow!("Failed to bridge log records: {}", e))?;

    Ok(())
}

/// Filter from `RUST_LOG` directives, falling back to `default_level` when
/// they are unset, blank or invalid. An invalid `default_level` is an error.
fn log_filter(rust_log: Option<&str>, default_level: &str) -> Result<EnvFilter> {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return Ok(filter);
        }
    }
    EnvFilter::try_new(default_level).map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", default_level, e))
}

/// Logs the upstream configuration at startup.
pub fn log_upstream_configuration(settings: &Settings) {
    log::info!("Extraction endpoint: {}", settings.upstream.endpoint);
    match settings.relay.kind {
        RelayKind::Direct => log::info!("Relay: direct (no relay)"),
        kind => log::info!("Relay: {} via {}", kind, settings.relay.base),
    }

    match settings.request_timeout() {
        Some(timeout) => log::info!("Request timeout: {:?}", timeout),
        None => log::debug!("Request timeout: none"),
    }

    if settings.relay.kind != RelayKind::Direct && settings.relay.base.trim().is_empty() {
        log::warn!("Relay '{}' configured without a base URL, requests will fail", settings.relay.kind);
    }
}
