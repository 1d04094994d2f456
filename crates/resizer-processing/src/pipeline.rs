//! Resize pipeline: download the original, fit it to the box, upload the
//! derivative under the requested name.

use crate::image::{ImageTransformer, TransformError};
use crate::location::derivative_location;
use resizer_core::constants::DEFAULT_JPEG_QUALITY;
use resizer_core::{ErrorMetadata, LogLevel, ParsedRequest};
use resizer_storage::{Storage, StorageError};
use std::sync::Arc;
use std::time::Instant;

/// Failure of one pipeline stage, carrying the key involved
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to download source image {key}: {source}")]
    DownloadFailed {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Failed to transform image {key}: {source}")]
    TransformFailed {
        key: String,
        #[source]
        source: TransformError,
    },

    #[error("Failed to upload derivative {key}: {source}")]
    UploadFailed {
        key: String,
        #[source]
        source: StorageError,
    },
}

impl PipelineError {
    fn is_missing_source(&self) -> bool {
        matches!(self, PipelineError::DownloadFailed { source, .. } if source.is_not_found())
    }
}

impl ErrorMetadata for PipelineError {
    fn http_status_code(&self) -> u16 {
        match self {
            PipelineError::DownloadFailed { .. } if self.is_missing_source() => 404,
            PipelineError::DownloadFailed { .. } => 502,
            PipelineError::TransformFailed { .. } => 422,
            PipelineError::UploadFailed { .. } => 502,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PipelineError::DownloadFailed { .. } => "DOWNLOAD_FAILED",
            PipelineError::TransformFailed { .. } => "TRANSFORM_FAILED",
            PipelineError::UploadFailed { .. } => "UPLOAD_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            PipelineError::DownloadFailed { .. } => !self.is_missing_source(),
            PipelineError::TransformFailed { source, .. } => {
                matches!(source, TransformError::Interrupted(_))
            }
            PipelineError::UploadFailed { .. } => true,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            PipelineError::DownloadFailed { .. } if self.is_missing_source() => LogLevel::Warn,
            PipelineError::TransformFailed { .. } => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

/// Sequential download → transform → upload
///
/// Holds long-lived storage handles; one instance serves every request.
#[derive(Clone)]
pub struct ResizePipeline {
    source: Arc<dyn Storage>,
    destination: Arc<dyn Storage>,
    public_base_url: String,
    jpeg_quality: u8,
}

impl ResizePipeline {
    pub fn new(
        source: Arc<dyn Storage>,
        destination: Arc<dyn Storage>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            source,
            destination,
            public_base_url: public_base_url.into(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.jpeg_quality = jpeg_quality;
        self
    }

    /// Run all three stages for a validated request and return the public
    /// location of the derivative. The first failing stage aborts the run.
    pub async fn process(&self, request: &ParsedRequest) -> Result<String, PipelineError> {
        let start = Instant::now();

        let original = self.download(&request.source_key).await?;
        let derivative = self.transform(request, original).await?;
        self.upload(request, derivative).await?;

        let location = derivative_location(&self.public_base_url, &request.requested_name);

        tracing::info!(
            key = %request.requested_name,
            source_key = %request.source_key,
            location = %location,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Resize pipeline completed"
        );

        Ok(location)
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, PipelineError> {
        let start = Instant::now();

        let data = self
            .source
            .download(key)
            .await
            .map_err(|source| PipelineError::DownloadFailed {
                key: key.to_string(),
                source,
            })?;

        tracing::debug!(
            key = %key,
            bucket = %self.source.bucket(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Downloaded source image"
        );

        Ok(data)
    }

    async fn transform(
        &self,
        request: &ParsedRequest,
        original: Vec<u8>,
    ) -> Result<Vec<u8>, PipelineError> {
        let start = Instant::now();
        let (width, height, format) = (request.width, request.height, request.output_format);
        let quality = self.jpeg_quality;
        let input_size = original.len();

        // Decoding and resampling are CPU bound
        let result = tokio::task::spawn_blocking(move || {
            ImageTransformer::resize_to_fit(&original, width, height, format, quality)
        })
        .await
        .map_err(|e| TransformError::Interrupted(e.to_string()))
        .and_then(|result| result);

        let transformed = result.map_err(|source| PipelineError::TransformFailed {
            key: request.source_key.clone(),
            source,
        })?;

        tracing::debug!(
            key = %request.source_key,
            input_size_bytes = input_size,
            size_bytes = transformed.data.len(),
            width = transformed.width,
            height = transformed.height,
            format = %transformed.format,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Transformed image"
        );

        Ok(transformed.data)
    }

    async fn upload(&self, request: &ParsedRequest, data: Vec<u8>) -> Result<(), PipelineError> {
        let start = Instant::now();
        let key = request.derivative_key();
        let size = data.len();

        self.destination
            .upload_with_key(key, data, request.content_type())
            .await
            .map_err(|source| PipelineError::UploadFailed {
                key: key.to_string(),
                source,
            })?;

        tracing::debug!(
            key = %key,
            bucket = %self.destination.bucket(),
            content_type = %request.content_type(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Uploaded derivative"
        );

        Ok(())
    }
}
