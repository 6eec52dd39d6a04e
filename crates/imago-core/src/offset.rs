//! Edge offset parsing and resolution.
//!
//! Each of the four crop edges (left, top, right, bottom) is specified on the
//! command line as a string: either a bare pixel count (`"120"`) or a
//! percentage of the relevant axis (`"12.5%"`). The string is parsed once at
//! the input boundary into an [`OffsetSpec`], then resolved against the
//! decoded image's width (left/right) or height (top/bottom).
//!
//! # Example
//!
//! ```ignore
//! let spec: OffsetSpec = "10%".parse().unwrap();
//! assert_eq!(spec.resolve(800), 80);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing an offset string.
#[derive(Debug, Error)]
pub enum OffsetError {
    /// The string is neither a non-negative integer nor a percentage.
    #[error("invalid offset {0:?}: expected a pixel count or a percentage like \"12.5%\"")]
    Malformed(String),

    /// A percentage parsed outside the closed range [0, 100].
    #[error("percentage {0} out of range: must be between 0 and 100")]
    PercentOutOfRange(f64),
}

/// A single edge offset, decided once at parse time.
///
/// The pixel form carries no upper bound of its own: an offset larger than
/// the image is caught later by the geometry validation, not here. The wide
/// integer type keeps counts far beyond any real image parseable so that the
/// geometry check stays the only gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OffsetSpec {
    /// Absolute distance in pixels.
    Pixel(u64),
    /// Fraction of the axis extent, in percent (0 to 100 inclusive).
    Percent(f64),
}

impl FromStr for OffsetSpec {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // An empty spec means "leave this edge alone".
        if s.is_empty() {
            return Ok(OffsetSpec::Pixel(0));
        }

        if let Some(number) = s.strip_suffix('%') {
            let percent: f64 = number
                .parse()
                .map_err(|_| OffsetError::Malformed(s.to_string()))?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(OffsetError::PercentOutOfRange(percent));
            }
            return Ok(OffsetSpec::Percent(percent));
        }

        let pixels: u64 = s.parse().map_err(|_| OffsetError::Malformed(s.to_string()))?;
        Ok(OffsetSpec::Pixel(pixels))
    }
}

impl OffsetSpec {
    /// Resolve this spec against an axis extent (image width for left/right,
    /// height for top/bottom), yielding a pixel offset.
    ///
    /// Percentages use `floor(extent * percent / 100)`. Pure function: no
    /// side effects, same inputs always give the same result.
    pub fn resolve(&self, extent: u32) -> u64 {
        match *self {
            OffsetSpec::Pixel(pixels) => pixels,
            OffsetSpec::Percent(percent) => (f64::from(extent) * percent / 100.0).floor() as u64,
        }
    }
}

/// Parse and resolve an offset string in one step.
///
/// # Errors
///
/// Returns [`OffsetError`] if the string is malformed or a percentage is
/// outside [0, 100].
pub fn resolve_offset(spec: &str, extent: u32) -> Result<u64, OffsetError> {
    Ok(spec.parse::<OffsetSpec>()?.resolve(extent))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
