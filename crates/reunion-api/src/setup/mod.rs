//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use reunion_core::Config;
use reunion_sources::{build_http_client, GoogleDriveSource, GoogleSheetsSource};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    reunion_infra::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let http = build_http_client(config.upstream_timeout_secs())?;
    let media = GoogleDriveSource::from_config(&config, http.clone());
    let contacts = GoogleSheetsSource::from_config(&config, http);

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(media),
        Arc::new(contacts),
    ));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
