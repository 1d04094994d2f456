//! Error types module
//!
//! Request-name validation errors live here, together with the `ErrorMetadata`
//! trait that every error in the workspace implements so the HTTP layer can
//! render and log failures uniformly.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for caller-side problems like a missing source image
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DIMENSION_NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether re-invoking with identical input could succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Requested-name validation failures. Each carries the offending value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid percent-encoding in requested name: {0}")]
    InvalidEncoding(String),

    #[error("Dimension not found in requested name: {0}")]
    DimensionNotFound(String),

    #[error("Unable to infer image type for key {0}")]
    TypeInferenceFailed(String),

    #[error("Unsupported file {0}")]
    UnsupportedFileType(String),

    #[error("Missing mime type mapping for extension {0}")]
    MissingMimeMapping(String),

    #[error("Invalid image size. width={width}. height={height}")]
    InvalidDimensions { width: u64, height: u64 },
}

impl ErrorMetadata for ParseError {
    fn http_status_code(&self) -> u16 {
        400
    }

    fn error_code(&self) -> &'static str {
        match self {
            ParseError::InvalidEncoding(_) => "INVALID_ENCODING",
            ParseError::DimensionNotFound(_) => "DIMENSION_NOT_FOUND",
            ParseError::TypeInferenceFailed(_) => "TYPE_INFERENCE_FAILED",
            ParseError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            ParseError::MissingMimeMapping(_) => "MISSING_MIME_MAPPING",
            ParseError::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}
