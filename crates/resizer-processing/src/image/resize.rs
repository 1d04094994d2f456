use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Largest size that fits inside the `box_w × box_h` bounding box while
/// keeping the aspect ratio. Never larger than the source, never below 1px.
pub fn calculate_fit_dimensions(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }

    let scale_w = box_w as f64 / src_w as f64;
    let scale_h = box_h as f64 / src_h as f64;
    // withoutEnlargement
    let scale = scale_w.min(scale_h).min(1.0);

    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Shrink an image to fit within the bounding box.
    ///
    /// Returns the input untouched when it already fits.
    pub fn fit_within(img: DynamicImage, box_width: u32, box_height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) =
            calculate_fit_dimensions(orig_width, orig_height, box_width, box_height);

        if (width, height) == (orig_width, orig_height) {
            return img;
        }

        let filter = Self::select_filter(orig_width, orig_height, width, height);
        tracing::debug!(
            orig_width,
            orig_height,
            width,
            height,
            filter = ?filter,
            "Resizing image to fit bounding box"
        );
        img.resize_exact(width, height, filter)
    }
}
