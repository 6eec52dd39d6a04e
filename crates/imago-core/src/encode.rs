//! Image encoding for output.
//!
//! Two output formats: JPEG (lossy, quality 1-100) and PNG (lossless). The
//! format name arrives as a string from the command line and is normalized
//! case-insensitively, with `jpg` accepted as an alias for `jpeg`.

use std::io::Cursor;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur while selecting a format or encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The format name is not one of the supported formats.
    #[error("unknown output format {0:?}: expected \"jpeg\" (or \"jpg\") or \"png\"")]
    UnknownFormat(String),

    /// Width or height is zero.
    #[error("invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the stated dimensions.
    #[error("invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The underlying codec failed.
    #[error("encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossy JPEG; honors the quality parameter.
    #[default]
    Jpeg,
    /// Lossless PNG; the quality parameter is ignored.
    Png,
}

impl FromStr for OutputFormat {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(EncodeError::UnknownFormat(s.to_string())),
        }
    }
}

/// Encode a cropped image to bytes in the selected format.
///
/// # Arguments
///
/// * `image` - RGB pixel data to encode
/// * `format` - output format selector
/// * `quality` - JPEG quality (clamped to 1-100); ignored for PNG
///
/// # Errors
///
/// Returns an [`EncodeError`] when the dimensions or buffer length are
/// inconsistent, or when the codec itself fails.
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = (image.width as usize) * (image.height as usize) * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
            encoder
                .write_image(
                    &image.pixels,
                    image.width,
                    image.height,
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            encoder
                .write_image(
                    &image.pixels,
                    image.width,
                    image.height,
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("jpeg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
    }

    #[test]
    fn test_format_jpg_alias() {
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("JPG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
    }

    #[test]
    fn test_format_case_insensitive() {
        assert_eq!("JPEG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("Png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
    }

    #[test]
    fn test_format_unknown() {
        for bad in ["gif", "webp", "jpeg2000", ""] {
            assert!(matches!(
                bad.parse::<OutputFormat>(),
                Err(EncodeError::UnknownFormat(_))
            ));
        }
    }

    #[test]
    fn test_encode_jpeg_magic_bytes() {
        let jpeg = encode_image(&gray_image(100, 100), OutputFormat::Jpeg, 85).unwrap();

        // SOI marker at the start, EOI at the end.
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_png_magic_bytes() {
        let png = encode_image(&gray_image(100, 100), OutputFormat::Png, 85).unwrap();
        assert_eq!(&png[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_jpeg_quality_affects_size() {
        // A gradient gives the quality setting something to work with.
        let width = 100u32;
        let height = 100u32;
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(128u8);
            }
        }
        let img = DecodedImage::new(width, height, pixels);

        let low = encode_image(&img, OutputFormat::Jpeg, 10).unwrap();
        let high = encode_image(&img, OutputFormat::Jpeg, 95).unwrap();
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_encode_quality_clamped() {
        let img = gray_image(10, 10);
        assert!(encode_image(&img, OutputFormat::Jpeg, 0).is_ok());
        assert!(encode_image(&img, OutputFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let img = DecodedImage {
            width: 0,
            height: 100,
            pixels: vec![],
        };
        assert!(matches!(
            encode_image(&img, OutputFormat::Jpeg, 85),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_short_pixel_buffer() {
        let img = DecodedImage {
            width: 100,
            height: 100,
            pixels: vec![128u8; 99 * 100 * 3],
        };
        assert!(matches!(
            encode_image(&img, OutputFormat::Png, 85),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_single_pixel() {
        let img = DecodedImage::new(1, 1, vec![255, 0, 0]);
        assert!(encode_image(&img, OutputFormat::Jpeg, 85).is_ok());
        assert!(encode_image(&img, OutputFormat::Png, 85).is_ok());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    proptest! {
        /// Property: Valid input always produces a correctly-framed JPEG.
        #[test]
        fn prop_jpeg_framing(
            (width, height) in dimensions_strategy(),
            quality in 1u8..=100,
        ) {
            let img = DecodedImage::new(
                width,
                height,
                vec![128u8; (width * height * 3) as usize],
            );
            let jpeg = encode_image(&img, OutputFormat::Jpeg, quality).unwrap();

            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Valid input always produces a PNG with the right header.
        #[test]
        fn prop_png_framing((width, height) in dimensions_strategy()) {
            let img = DecodedImage::new(
                width,
                height,
                vec![77u8; (width * height * 3) as usize],
            );
            let png = encode_image(&img, OutputFormat::Png, 85).unwrap();
            prop_assert_eq!(&png[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        }

        /// Property: Format names parse independently of ASCII case.
        #[test]
        fn prop_format_case_insensitive(upper in proptest::bool::ANY) {
            for (name, format) in [
                ("jpeg", OutputFormat::Jpeg),
                ("jpg", OutputFormat::Jpeg),
                ("png", OutputFormat::Png),
            ] {
                let s = if upper { name.to_ascii_uppercase() } else { name.to_string() };
                prop_assert_eq!(s.parse::<OutputFormat>().unwrap(), format);
            }
        }

        /// Property: Mismatched buffer lengths are always rejected.
        #[test]
        fn prop_bad_buffer_rejected(
            (width, height) in (2u32..=20, 2u32..=20),
            delta in 1usize..=8,
        ) {
            let expected = (width * height * 3) as usize;
            let img = DecodedImage {
                width,
                height,
                pixels: vec![0u8; expected - delta],
            };
            // Bound separately: prop_assert! reuses its condition as a
            // format string, which a struct pattern would break.
            let rejected = matches!(
                encode_image(&img, OutputFormat::Jpeg, 85),
                Err(EncodeError::InvalidPixelData { .. })
            );
            prop_assert!(rejected, "short buffer must be rejected");
        }
    }
}
