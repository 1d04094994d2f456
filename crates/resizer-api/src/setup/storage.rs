//! Storage setup and initialization

use anyhow::{Context, Result};
use resizer_core::Config;
use resizer_storage::{create_storage_pair, StoragePair};

/// Create the source and destination handles shared by every request
pub async fn setup_storage(config: &Config) -> Result<StoragePair> {
    tracing::info!("Initializing storage...");
    let storage = create_storage_pair(config)
        .await
        .context("Failed to initialize storage")?;

    tracing::info!(
        backend = ?storage.source.backend_type(),
        source_bucket = %storage.source.bucket(),
        destination_bucket = %storage.destination.bucket(),
        "Storage initialized successfully"
    );

    Ok(storage)
}
