//! Top-level error for the upload pipeline.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::intake::IntakeError;

/// Everything that can stop an image from being fitted.
///
/// None of these are retried internally; the caller decides what to show.
#[derive(Debug, Error)]
pub enum FitError {
    /// Declared media type is outside the allow-list.
    #[error(transparent)]
    UnsupportedType(#[from] IntakeError),

    /// Bytes are not a decodable raster image.
    #[error("Could not decode image: {0}")]
    Decode(#[from] DecodeError),

    /// No candidate in the whole search could be encoded.
    #[error("Could not encode image: {0}")]
    Encode(#[from] EncodeError),

    /// Fit options violate their invariants.
    #[error("Invalid fit options: {0}")]
    InvalidOptions(String),
}
