//! Image encoding for uploads.
//!
//! Every upload is re-encoded to lossy WebP; the quality level is the knob
//! the fit search turns.

mod webp;

pub use self::webp::{encode_image, encode_webp, EncodeError};
