//! Image decoding and resampling.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, WebP and GIF uploads into RGBA pixels
//! - Applying EXIF orientation the way browsers do
//! - Resampling by a uniform scale factor for the fit search
//!
//! All operations are synchronous and single-threaded; the WASM bindings
//! call them from a Web Worker.

mod raster;
mod resize;
mod types;

pub use raster::decode_image;
pub use resize::{resample, resize, scaled_dimensions};
pub use types::{DecodeError, FilterType, SourceImage};
pub(crate) use types::{is_opaque_rgba, Orientation};
