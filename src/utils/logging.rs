//! # Logging
//!
//! The codec emits `tracing` events (`debug`/`trace` on the hot path, `warn`
//! on rejected input). Libraries embedding the crate usually install their own
//! subscriber; binaries and tests can use [`init_logging`].

use crate::config::LoggingConfig;
use crate::error::{constants, HeaderError, Result};
use tracing::info;

/// Install a global fmt subscriber configured by `config`.
///
/// Fails with `ConfigError` if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| {
        HeaderError::ConfigError(format!("{}: {e}", constants::ERR_LOGGING_INIT))
    })?;

    info!(app = %config.app_name, level = %config.log_level, "logging initialized");
    Ok(())
}
