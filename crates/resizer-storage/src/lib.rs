//! Resizer Storage Library
//!
//! Storage abstraction for the resize pipeline with implementations for S3
//! (via `object_store`) and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are flat object names: the source image lives at its original name
//! (`logo.png`) and derivatives at the full requested name (`logo200x100.png`).
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_storage, create_storage_pair, StoragePair};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use resizer_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
