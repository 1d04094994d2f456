//! Defaults shared by configuration and the processing crate.

pub const DEFAULT_SERVER_PORT: u16 = 4000;

pub const DEFAULT_SOURCE_BUCKET: &str = "hackathon-img";

pub const DEFAULT_REGION: &str = "us-east-1";

/// JPEG encode quality (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Invocation payloads only carry a name
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
