//! Resize request handler
//!
//! Entry point shared by every invocation surface: validates the requested
//! name, then runs the pipeline.

use crate::pipeline::{PipelineError, ResizePipeline};
use resizer_core::{ErrorMetadata, LogLevel, ParseError, RequestParser};
use serde::{Deserialize, Serialize};

/// Incoming event: the percent-encoded requested name
#[derive(Debug, Clone, Deserialize)]
pub struct ResizeRequest {
    pub name: String,
}

/// Public URL of the stored derivative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeResponse {
    pub location: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ErrorMetadata for ResizeError {
    fn http_status_code(&self) -> u16 {
        match self {
            ResizeError::Parse(e) => e.http_status_code(),
            ResizeError::Pipeline(e) => e.http_status_code(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ResizeError::Parse(e) => e.error_code(),
            ResizeError::Pipeline(e) => e.error_code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            ResizeError::Parse(e) => e.is_recoverable(),
            ResizeError::Pipeline(e) => e.is_recoverable(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ResizeError::Parse(e) => e.log_level(),
            ResizeError::Pipeline(e) => e.log_level(),
        }
    }
}

#[derive(Clone)]
pub struct ResizeHandler {
    parser: RequestParser,
    pipeline: ResizePipeline,
}

impl ResizeHandler {
    pub fn new(pipeline: ResizePipeline) -> Self {
        Self {
            parser: RequestParser::new(),
            pipeline,
        }
    }

    pub fn with_parser(mut self, parser: RequestParser) -> Self {
        self.parser = parser;
        self
    }

    pub async fn handle(&self, request: ResizeRequest) -> Result<ResizeResponse, ResizeError> {
        tracing::info!(name = %request.name, "Received resize request");

        let parsed = self.parser.parse(&request.name)?;

        tracing::debug!(
            key = %parsed.requested_name,
            source_key = %parsed.source_key,
            width = parsed.width,
            height = parsed.height,
            format = %parsed.output_format,
            "Parsed requested name"
        );

        let location = self.pipeline.process(&parsed).await?;
        Ok(ResizeResponse { location })
    }
}
