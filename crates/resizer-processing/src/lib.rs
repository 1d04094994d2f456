//! Resizer Processing Library
//!
//! Image transformation (decode, fit-within resize, re-encode) and the
//! download → transform → upload pipeline behind the resize request handler.

pub mod handler;
pub mod image;
pub mod location;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use handler::{ResizeError, ResizeHandler, ResizeRequest, ResizeResponse};
pub use self::image::{
    calculate_fit_dimensions, ImageResize, ImageTransformer, TransformError, TransformedImage,
};
pub use location::derivative_location;
pub use pipeline::{PipelineError, ResizePipeline};
