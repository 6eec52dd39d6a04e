//! Image decoding.
//!
//! The input format (JPEG, PNG, or GIF) is auto-detected from the byte
//! stream, so callers never name it. JPEG inputs additionally get their EXIF
//! orientation applied before the pixels are returned; edge offsets therefore
//! always refer to the image as displayed, not as stored.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};
use thiserror::Error;

use crate::geometry::ImageDimensions;

/// Errors that can occur while decoding an input image.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a recognized image format.
    #[error("invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length is width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height * 3) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Dimensions in the form the geometry engine consumes.
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }
}

/// Decode an image from bytes, auto-detecting the format.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidFormat`] when the bytes are not a supported
/// image format and [`DecodeError::CorruptedFile`] when decoding fails
/// partway through.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    // Orientation has to come off the raw bytes before the decoder
    // consumes them.
    let orientation = exif_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let img = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Read the EXIF orientation tag (1-8), defaulting to 1 (normal) when the
/// stream carries no usable EXIF data.
fn exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1),
        Err(_) => 1,
    }
}

/// Apply an EXIF orientation value to the decoded pixels.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        // 1 is normal; values outside 1-8 are invalid EXIF and left untouched.
        _ => img,
    }
}
