//! Image transformer - decode, fit-within resize, re-encode

use crate::image::resize::ImageResize;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use resizer_core::OutputFormat;
use std::io::Cursor;

/// Image transformation errors
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode {format} image: {message}")]
    Encode {
        format: OutputFormat,
        message: String,
    },

    #[error("Transform task did not complete: {0}")]
    Interrupted(String),
}

/// Encoded derivative plus its final dimensions
#[derive(Debug, Clone)]
pub struct TransformedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl TransformedImage {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Main image transformer
pub struct ImageTransformer;

impl ImageTransformer {
    /// Decode `data`, shrink it to fit within `width × height` and encode it
    /// as `format`. CPU bound; call from a blocking context.
    pub fn resize_to_fit(
        data: &[u8],
        width: u32,
        height: u32,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<TransformedImage, TransformError> {
        let img = Self::decode(data)?;
        let resized = ImageResize::fit_within(img, width, height);
        let (out_width, out_height) = resized.dimensions();
        let encoded = Self::encode(&resized, format, jpeg_quality)?;

        Ok(TransformedImage {
            data: encoded,
            width: out_width,
            height: out_height,
            format,
        })
    }

    fn decode(data: &[u8]) -> Result<DynamicImage, TransformError> {
        ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| TransformError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| TransformError::Decode(e.to_string()))
    }

    /// Encode an image into the requested output format
    pub fn encode(
        img: &DynamicImage,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<Vec<u8>, TransformError> {
        let mut buffer = Cursor::new(Vec::new());

        let result = match format {
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel
                let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality);
                img.to_rgb8().write_with_encoder(encoder)
            }
            OutputFormat::Png => img.write_to(&mut buffer, ImageFormat::Png),
            OutputFormat::Gif => {
                DynamicImage::ImageRgba8(img.to_rgba8()).write_to(&mut buffer, ImageFormat::Gif)
            }
        };

        result.map_err(|e| TransformError::Encode {
            format,
            message: e.to_string(),
        })?;

        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn create_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, format)
            .unwrap();
        buffer
    }

    fn decoded_dimensions(data: &[u8]) -> (u32, u32, Option<ImageFormat>) {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .unwrap();
        let format = reader.format();
        let img = reader.decode().unwrap();
        (img.width(), img.height(), format)
    }

    #[test]
    fn test_resize_png_to_fit() {
        let source = create_test_image(400, 400, ImageFormat::Png);

        let result =
            ImageTransformer::resize_to_fit(&source, 200, 100, OutputFormat::Png, 80).unwrap();

        assert_eq!((result.width, result.height), (100, 100));
        assert_eq!(result.content_type(), "image/png");
        assert_eq!(&result.data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(
            decoded_dimensions(&result.data),
            (100, 100, Some(ImageFormat::Png))
        );
    }

    #[test]
    fn test_reencode_png_source_as_jpeg() {
        let source = create_test_image(300, 150, ImageFormat::Png);

        let result =
            ImageTransformer::resize_to_fit(&source, 100, 100, OutputFormat::Jpeg, 80).unwrap();

        assert_eq!((result.width, result.height), (100, 50));
        assert_eq!(&result.data[0..2], &[0xFF, 0xD8]);
        assert_eq!(
            decoded_dimensions(&result.data),
            (100, 50, Some(ImageFormat::Jpeg))
        );
    }

    #[test]
    fn test_encode_gif() {
        let source = create_test_image(64, 32, ImageFormat::Png);

        let result =
            ImageTransformer::resize_to_fit(&source, 32, 32, OutputFormat::Gif, 80).unwrap();

        assert_eq!((result.width, result.height), (32, 16));
        assert_eq!(&result.data[0..3], b"GIF");
    }

    #[test]
    fn test_small_source_is_not_upscaled() {
        let source = create_test_image(50, 40, ImageFormat::Png);

        let result =
            ImageTransformer::resize_to_fit(&source, 500, 500, OutputFormat::Png, 80).unwrap();

        assert_eq!((result.width, result.height), (50, 40));
    }

    #[test]
    fn test_corrupt_input_fails_to_decode() {
        let result =
            ImageTransformer::resize_to_fit(b"not an image", 10, 10, OutputFormat::Png, 80);
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_truncated_png_fails_to_decode() {
        let source = create_test_image(20, 20, ImageFormat::Png);
        let truncated = &source[..source.len() / 2];

        let result = ImageTransformer::resize_to_fit(truncated, 10, 10, OutputFormat::Png, 80);
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }
}
