//! Shared components for CLI commands
//!
//! Logging setup and configuration loading used by every command.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::DecoderConfig;

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("csvparse={}", log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration using layered approach (defaults -> file -> args)
///
/// `apply_overrides` receives the loaded configuration before it is validated.
pub fn load_configuration(
    config_file: Option<&Path>,
    apply_overrides: impl FnOnce(&mut DecoderConfig),
) -> Result<DecoderConfig> {
    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, checking the user config directory"),
    }

    let mut config = DecoderConfig::load(config_file).context("Failed to load configuration")?;
    apply_overrides(&mut config);
    config.validate().context("Invalid decoder settings")?;

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}
