//! Resizer Core Library
//!
//! Requested-name parsing and validation, the fixed extension tables, error
//! metadata and configuration shared by the storage, processing and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod formats;
pub mod request;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorMetadata, LogLevel, ParseError};
pub use formats::{FormatPolicy, OutputFormat, ALLOWED_EXTENSIONS, EXTENSION_FORMATS};
pub use request::{parse_requested_name, ParsedRequest, RequestParser};
pub use storage_types::StorageBackend;
