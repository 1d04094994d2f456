//! Application state shared by every request

use resizer_core::Config;
use resizer_processing::{ResizeHandler, ResizePipeline};
use resizer_storage::StoragePair;

pub struct AppState {
    pub resize: ResizeHandler,
}

impl AppState {
    /// Wire the resize handler to long-lived storage handles
    pub fn new(config: &Config, storage: StoragePair) -> Self {
        let pipeline = ResizePipeline::new(
            storage.source,
            storage.destination,
            config.public_base_url.clone(),
        )
        .with_jpeg_quality(config.jpeg_quality);

        Self {
            resize: ResizeHandler::new(pipeline),
        }
    }
}
