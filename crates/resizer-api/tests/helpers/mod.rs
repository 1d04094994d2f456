//! Test helpers: build AppState and router for integration tests.
//!
//! Storage is the local backend rooted in a temporary directory, so the
//! source bucket is just `<temp>/hackathon-img`.

use axum_test::TestServer;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use resizer_api::constants;
use resizer_api::setup::routes;
use resizer_api::AppState;
use resizer_core::Config;
use resizer_storage::create_storage_pair;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const PUBLIC_BASE_URL: &str = "http://localhost:4000/media/";
pub const BUCKET: &str = "hackathon-img";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
    pub bucket_dir: PathBuf,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Place an original image in the source bucket
    pub fn put_source(&self, key: &str, data: &[u8]) {
        std::fs::write(self.bucket_dir.join(key), data).unwrap();
    }

    pub fn read_object(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.bucket_dir.join(key)).ok()
    }
}

/// Setup test app with local storage in a temporary directory.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage_path = temp_dir.path().to_string_lossy().to_string();

    let config = Config::from_lookup(|key| match key {
        "STORAGE_BACKEND" => Some("local".to_string()),
        "LOCAL_STORAGE_PATH" => Some(storage_path.clone()),
        "SOURCE_BUCKET" => Some(BUCKET.to_string()),
        "PUBLIC_BASE_URL" => Some(PUBLIC_BASE_URL.to_string()),
        "MAX_BODY_BYTES" => Some("1024".to_string()),
        _ => None,
    })
    .unwrap();
    config.validate().unwrap();

    let storage = create_storage_pair(&config).await.unwrap();
    let state = Arc::new(AppState::new(&config, storage));
    let router = routes::setup_routes(&config, state);

    TestApp {
        server: TestServer::new(router).unwrap(),
        bucket_dir: temp_dir.path().join(BUCKET),
        _temp_dir: temp_dir,
    }
}

/// Encode a solid-colour image of the given size
pub fn create_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([200, 40, 40, 255]),
    ));
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// Decode stored bytes into (width, height, sniffed format)
pub fn decode(data: &[u8]) -> (u32, u32, Option<ImageFormat>) {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .unwrap();
    let format = reader.format();
    let img = reader.decode().unwrap();
    (img.width(), img.height(), format)
}
