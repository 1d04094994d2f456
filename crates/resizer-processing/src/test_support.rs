//! Shared fixtures for processing tests

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use resizer_core::StorageBackend;
use resizer_storage::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const BASE_URL: &str = "http://hackathon-img.s3-website-us-east-1.amazonaws.com/";

/// A stored object: bytes and the content type it was uploaded with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-memory storage that records every call
#[derive(Default)]
pub struct RecordingStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
    downloads: AtomicUsize,
    uploads: AtomicUsize,
    fail_uploads: bool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, key: &str, data: Vec<u8>, content_type: &str) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        self.get(storage_key)
            .map(|object| object.data)
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads {
            return Err(StorageError::UploadFailed("access denied".to_string()));
        }
        self.insert(storage_key, data, content_type);
        Ok(())
    }

    fn bucket(&self) -> &str {
        "hackathon-img"
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Encode a solid-colour image of the given size
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([0, 128, 255, 255]),
    ));
    // JPEG has no alpha channel
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// Decode bytes back into (width, height, sniffed format)
pub fn decode(data: &[u8]) -> (u32, u32, Option<ImageFormat>) {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .unwrap();
    let format = reader.format();
    let img = reader.decode().unwrap();
    (img.width(), img.height(), format)
}
