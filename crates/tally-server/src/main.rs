//! Tally server binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tally-config.yaml` (or `TALLY_CONFIG`),
//!    falling back to defaults, with `HTTP_ADDRESS` applied on top
//! 2. Initialize structured logging (tracing)
//! 3. Build the shared session registry
//! 4. Serve HTTP until a shutdown signal arrives

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tally_core::config::{LoggingConfig, TallyConfig, DEFAULT_CONFIG_FILE};
use tally_server::{start_server, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable naming an alternative config file.
const CONFIG_PATH_VAR: &str = "TALLY_CONFIG";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails to
/// bind or serve.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = load_config()?;
    init_tracing(&config.logging);

    match config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        host = config.server.host,
        port = config.server.port,
        token_length = config.sessions.token_length,
        "tally-server starting"
    );

    let state = Arc::new(AppState::from_config(&config));
    start_server(&config.server, state)
        .await
        .context("server failed")?;

    Ok(())
}

/// Load configuration, returning the path it came from if a file was used.
fn load_config() -> anyhow::Result<(TallyConfig, Option<PathBuf>)> {
    let path = std::env::var(CONFIG_PATH_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);

    if path.exists() {
        let config = TallyConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        Ok((config, Some(path)))
    } else {
        let config = TallyConfig::from_env().context("applying environment overrides")?;
        Ok((config, None))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
