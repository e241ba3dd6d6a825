//! Bounded-size image re-encoding.
//!
//! Given uploaded image bytes and a byte budget, produce a WebP that fits
//! the budget with as little visible loss as the search allows:
//!
//! 1. Decode the upload once.
//! 2. For each scale factor (1.0 down to 0.5), try each quality level
//!    (0.9 down to 0.3) and return the first encoding within budget.
//! 3. Otherwise return one forced encoding at scale 0.4, quality 0.3,
//!    even if it is still too large.
//!
//! At most 43 encoder calls happen per request. A candidate that fails to
//! encode is skipped; only a search where nothing encodes at all is an error.
//!
//! # Examples
//!
//! ```ignore
//! use linkfolio_core::fit::{fit, DEFAULT_MAX_BYTES};
//!
//! let upload = std::fs::read("avatar.png").unwrap();
//! let fitted = fit(&upload, DEFAULT_MAX_BYTES).unwrap();
//! println!("{}x{} at q{} -> {} bytes", fitted.width, fitted.height, fitted.quality, fitted.len());
//! ```

mod codec;
mod fitter;
mod options;

pub use codec::{Codec, WebpCodec};
pub use fitter::{fit, FittedImage, ImageFitter};
pub use options::{
    FitOptions, DEFAULT_MAX_BYTES, DEFAULT_QUALITIES, DEFAULT_SCALES, FALLBACK_QUALITY,
    FALLBACK_SCALE,
};

#[cfg(test)]
pub(crate) use fitter::test_support;
