#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use resizer_core::Config;
use std::sync::Arc;

/// Long-lived storage handles for the source and destination buckets.
///
/// When both buckets are the same, both fields point at one handle.
#[derive(Clone)]
pub struct StoragePair {
    pub source: Arc<dyn Storage>,
    pub destination: Arc<dyn Storage>,
}

/// Create a storage backend for one bucket based on configuration
pub async fn create_storage(config: &Config, bucket: &str) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let storage = S3Storage::new(
                bucket.to_string(),
                config.s3_region.clone(),
                config.s3_endpoint.clone(),
            )?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.as_deref().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_path = std::path::Path::new(base_path).join(bucket);

            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

/// Create the source and destination handles once at startup
pub async fn create_storage_pair(config: &Config) -> StorageResult<StoragePair> {
    let source = create_storage(config, &config.source_bucket).await?;
    let destination = if config.uses_separate_destination() {
        create_storage(config, &config.destination_bucket).await?
    } else {
        source.clone()
    };

    Ok(StoragePair {
        source,
        destination,
    })
}
