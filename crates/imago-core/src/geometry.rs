//! Crop rectangle computation and validation.
//!
//! Resolved pixel offsets plus the source dimensions go in; a validated
//! [`CropRect`] comes out. Two rules live here:
//!
//! 1. **Min-width redistribution** - when the requested margins leave the
//!    output narrower than `min_width`, left and right are each pulled back
//!    by half the deficit (truncating division, so an odd deficit recovers
//!    one pixel less than asked). Height is never adjusted.
//! 2. **Degeneracy check** - a rectangle whose final width or height is not
//!    positive is rejected rather than silently clamped.
//!
//! Redistribution subtracts from the offsets unguarded, so it can push left
//! or right below zero; [`compute_crop`] reports such a rectangle as long as
//! its area is positive, and the pixel-copy stage rejects it before any
//! out-of-bounds read. The offsets are signed for exactly this reason.
//!
//! # Coordinate System
//!
//! Offsets are margins trimmed from each edge of the source: `left`/`top`
//! locate the crop window's top-left corner in source coordinates, and
//! `right`/`bottom` are measured inward from the far edges.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while computing or consuming a crop rectangle.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The offsets leave no usable image area, or an offset went negative.
    #[error(
        "degenerate crop rectangle: {width}x{height} \
         (left={left}, top={top}, right={right}, bottom={bottom})"
    )]
    DegenerateCropRect {
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
        width: i64,
        height: i64,
    },
}

/// Pixel dimensions of the decoded source image. Both axes are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A crop window with positive area, anchored at the source image's origin.
///
/// Constructed only by [`compute_crop`]. `width` and `height` are always
/// positive and consistent with the four edge offsets; the offsets themselves
/// are signed because min-width redistribution can pull left/right below
/// zero. [`origin`](CropRect::origin) is the gate that refuses such a window
/// before pixels are touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Pixels trimmed from the left edge (x of the window's top-left corner).
    pub left: i64,
    /// Pixels trimmed from the top edge (y of the window's top-left corner).
    pub top: i64,
    /// Pixels trimmed from the right edge.
    pub right: i64,
    /// Pixels trimmed from the bottom edge.
    pub bottom: i64,
    /// Output width: source width - left - right.
    pub width: u32,
    /// Output height: source height - top - bottom.
    pub height: u32,
}

impl CropRect {
    /// The window's top-left corner in source coordinates, or an error if
    /// redistribution pushed an offset negative.
    pub fn origin(&self) -> Result<(u32, u32), GeometryError> {
        if self.left < 0 || self.top < 0 || self.right < 0 || self.bottom < 0 {
            return Err(GeometryError::DegenerateCropRect {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
                width: i64::from(self.width),
                height: i64::from(self.height),
            });
        }
        Ok((self.left as u32, self.top as u32))
    }
}

// Resolved offsets carry no upper bound, but the signed arithmetic below
// must not overflow. Any offset past this cap is already thousands of times
// wider than the largest possible image axis and fails the width/height
// check identically.
const OFFSET_CAP: i64 = 1 << 40;

fn cap_offset(offset: u64) -> i64 {
    offset.min(OFFSET_CAP as u64) as i64
}

/// Compute the final crop rectangle from resolved pixel offsets.
///
/// # Arguments
///
/// * `left`, `top`, `right`, `bottom` - resolved margins in pixels
/// * `min_width` - floor on output width; 0 means unconstrained
/// * `dims` - source image dimensions
///
/// # Min-Width Redistribution
///
/// When `min_width > 0` and the provisional width falls short, the deficit is
/// split evenly between left and right with truncating division. An odd
/// deficit therefore leaves the result one pixel under `min_width`; this
/// rounding is part of the contract and must not be "fixed". The constraint
/// never touches top/bottom.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateCropRect`] when the final width or
/// height is not positive. Individually oversized offsets are not rejected up
/// front; a single offset at or beyond its axis extent always surfaces here
/// through the width/height check.
pub fn compute_crop(
    left: u64,
    top: u64,
    right: u64,
    bottom: u64,
    min_width: u32,
    dims: ImageDimensions,
) -> Result<CropRect, GeometryError> {
    // Signed arithmetic: intermediate widths and adjusted offsets may
    // legitimately go negative before validation.
    let src_w = i64::from(dims.width);
    let src_h = i64::from(dims.height);
    let mut left = cap_offset(left);
    let mut right = cap_offset(right);
    let top = cap_offset(top);
    let bottom = cap_offset(bottom);

    let provisional_width = src_w - left - right;
    if min_width > 0 && provisional_width < i64::from(min_width) {
        let deficit = i64::from(min_width) - provisional_width;
        left -= deficit / 2;
        right -= deficit / 2;
    }

    let width = src_w - left - right;
    let height = src_h - top - bottom;

    if width <= 0 || height <= 0 {
        return Err(GeometryError::DegenerateCropRect {
            left,
            top,
            right,
            bottom,
            width,
            height,
        });
    }

    Ok(CropRect {
        left,
        top,
        right,
        bottom,
        width: width as u32,
        height: height as u32,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
