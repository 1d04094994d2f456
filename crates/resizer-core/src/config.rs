//! Configuration module
//!
//! Service configuration read from the environment (and `.env` when present).
//! The extension allow-list and format mapping are fixed data in
//! [`crate::formats`] and deliberately not configurable here.

use std::env;

use crate::constants::{
    DEFAULT_JPEG_QUALITY, DEFAULT_MAX_BODY_BYTES, DEFAULT_REGION, DEFAULT_SERVER_PORT,
    DEFAULT_SOURCE_BUCKET,
};
use crate::storage_types::StorageBackend;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub max_body_bytes: usize,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub source_bucket: String,
    pub destination_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: Option<String>,
    // Derivatives
    pub public_base_url: String,
    pub jpeg_quality: u8,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_SERVER_PORT,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => StorageBackend::S3,
        };

        let source_bucket =
            lookup("SOURCE_BUCKET").unwrap_or_else(|| DEFAULT_SOURCE_BUCKET.to_string());
        let destination_bucket =
            lookup("DESTINATION_BUCKET").unwrap_or_else(|| source_bucket.clone());

        let s3_region = lookup("S3_REGION")
            .or_else(|| lookup("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let public_base_url = lookup("PUBLIC_BASE_URL").unwrap_or_else(|| {
            format!(
                "http://{}.s3-website-{}.amazonaws.com/",
                destination_bucket, s3_region
            )
        });

        let jpeg_quality = match lookup("JPEG_QUALITY") {
            Some(quality) => quality
                .parse()
                .map_err(|_| anyhow::anyhow!("JPEG_QUALITY must be a number between 1 and 100"))?,
            None => DEFAULT_JPEG_QUALITY,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(limit) => limit
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a valid number of bytes"))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Config {
            server_port,
            environment,
            max_body_bytes,
            storage_backend,
            source_bucket,
            destination_bucket,
            s3_region,
            s3_endpoint: lookup("S3_ENDPOINT"),
            local_storage_path: lookup("LOCAL_STORAGE_PATH"),
            public_base_url,
            jpeg_quality,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(anyhow::anyhow!(
                "JPEG_QUALITY must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }

        if self.public_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("PUBLIC_BASE_URL cannot be empty"));
        }

        if self.source_bucket.trim().is_empty() || self.destination_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("Bucket names cannot be empty"));
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using the local storage backend"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn uses_separate_destination(&self) -> bool {
        self.source_bucket != self.destination_bucket
    }
}
