//! Imago Core - fixed-margin image cropping
//!
//! This crate implements the pipeline behind the `imago-crop` tool: resolve
//! the four edge-offset strings against the decoded image's dimensions,
//! compute and validate the crop rectangle (including the min-width
//! redistribution rule), copy the pixels out, and re-encode.
//!
//! The stages are deliberately separate and pure:
//!
//! 1. [`offset`] - parse `"120"` / `"12.5%"` strings into [`OffsetSpec`]s and
//!    resolve them to pixel counts.
//! 2. [`geometry`] - turn resolved offsets into a validated [`CropRect`].
//! 3. [`crop`] - the unconditional pixel copy.
//! 4. [`decode`] / [`encode`] - codec wrappers around the `image` crate.
//!
//! Nothing here touches the filesystem or holds state between calls; the
//! binary crate owns I/O and flag parsing.

pub mod crop;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod offset;

pub use crop::apply_crop;
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode_image, EncodeError, OutputFormat};
pub use geometry::{compute_crop, CropRect, GeometryError, ImageDimensions};
pub use offset::{resolve_offset, OffsetError, OffsetSpec};
