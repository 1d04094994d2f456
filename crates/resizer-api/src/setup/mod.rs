//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use resizer_core::{Config, FormatPolicy};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config)
        .context("Failed to initialize telemetry")?;

    tracing::info!("Configuration loaded and validated successfully");

    let unmapped = FormatPolicy::default().unmapped_extensions();
    if !unmapped.is_empty() {
        tracing::warn!(
            extensions = %unmapped.join(","),
            "Allowed extensions without an output format will be rejected"
        );
    }

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(&config, storage));

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
