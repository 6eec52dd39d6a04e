//! Pixel copy for a validated crop rectangle.
//!
//! All decisions were made upstream: the resolver turned strings into pixel
//! offsets and the geometry engine validated the rectangle. This module only
//! moves bytes. The one check left is [`CropRect::origin`], which refuses a
//! rectangle whose min-width redistribution pushed an offset negative.

use crate::decode::DecodedImage;
use crate::geometry::{CropRect, GeometryError};

/// Copy the crop window out of the source image into a fresh buffer.
///
/// The window spans columns `[left, W - right)` and rows `[top, H - bottom)`
/// of the source. Rows are copied as contiguous RGB8 slices.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateCropRect`] if the rectangle carries a
/// negative offset and therefore reaches outside the source image.
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> Result<DecodedImage, GeometryError> {
    let (left, top) = rect.origin()?;

    let out_width = rect.width;
    let out_height = rect.height;

    // Fast path: the full image comes back as a plain clone.
    if left == 0 && top == 0 && out_width == image.width && out_height == image.height {
        return Ok(image.clone());
    }

    let src_stride = (image.width * 3) as usize;
    let row_bytes = (out_width * 3) as usize;
    let mut output = vec![0u8; row_bytes * out_height as usize];

    for y in 0..out_height as usize {
        let src_start = (top as usize + y) * src_stride + left as usize * 3;
        let dst_start = y * row_bytes;
        output[dst_start..dst_start + row_bytes]
            .copy_from_slice(&image.pixels[src_start..src_start + row_bytes]);
    }

    Ok(DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
