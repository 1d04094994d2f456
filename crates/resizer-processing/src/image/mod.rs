//! Image processing module
//!
//! - Bounding-box dimension math and resampling (resize)
//! - Decode / resize / encode orchestration (transformer)

pub mod resize;
pub mod transformer;

pub use resize::{calculate_fit_dimensions, ImageResize};
pub use transformer::{ImageTransformer, TransformError, TransformedImage};
