//! The decode/encode capability handed to the fitter.

use crate::decode::{self, DecodeError, FilterType, SourceImage};
use crate::encode::{self, EncodeError};

/// Decoding, resampling and encoding used by the fit search.
///
/// Passed explicitly so the search never reaches for a global encoder and
/// tests can script candidate sizes.
pub trait Codec {
    /// Decode uploaded bytes into a source image.
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError>;

    /// Resample by a uniform scale factor.
    fn resample(
        &self,
        image: &SourceImage,
        scale: f64,
        filter: FilterType,
    ) -> Result<SourceImage, DecodeError> {
        decode::resample(image, scale, filter)
    }

    /// Encode at a quality level in `(0, 1]`.
    fn encode(&self, image: &SourceImage, quality: f32) -> Result<Vec<u8>, EncodeError>;
}

/// Production codec: `image` crate decoders in, lossy WebP out.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebpCodec;

impl Codec for WebpCodec {
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError> {
        decode::decode_image(bytes)
    }

    fn encode(&self, image: &SourceImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        encode::encode_image(image, quality)
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError> {
        (**self).decode(bytes)
    }

    fn resample(
        &self,
        image: &SourceImage,
        scale: f64,
        filter: FilterType,
    ) -> Result<SourceImage, DecodeError> {
        (**self).resample(image, scale, filter)
    }

    fn encode(&self, image: &SourceImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, quality)
    }
}
