//! Lossy WebP encoding for uploads.
//!
//! Uses libwebp through the `webp` crate. The `image` crate's own WebP
//! encoder is lossless-only, so it cannot honour a quality setting.

use std::borrow::Cow;

use thiserror::Error;

use crate::decode::{is_opaque_rgba, SourceImage};

/// Errors that can occur during WebP encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the input or produced no output
    #[error("WebP encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGBA pixel data to lossy WebP bytes.
///
/// `quality` is a fidelity level in `0.0..=1.0` (values outside are
/// clamped), mapped onto libwebp's `0..=100` scale. Fully opaque images are
/// encoded without an alpha plane.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize * SourceImage::CHANNELS;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = if quality.is_nan() {
        0.0
    } else {
        quality.clamp(0.0, 1.0)
    };

    let opaque = is_opaque_rgba(pixels);
    let rgb: Cow<'_, [u8]> = if opaque {
        Cow::Owned(
            pixels
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        )
    } else {
        Cow::Borrowed(pixels)
    };

    let encoder = if opaque {
        ::webp::Encoder::from_rgb(&rgb, width, height)
    } else {
        ::webp::Encoder::from_rgba(&rgb, width, height)
    };

    let memory = encoder
        .encode_simple(false, quality * 100.0)
        .map_err(|e| EncodeError::EncodingFailed(format!("{:?}", e)))?;

    if memory.is_empty() {
        return Err(EncodeError::EncodingFailed("empty output".to_string()));
    }

    Ok(memory.to_vec())
}

/// Encode a whole source image. See [`encode_webp`].
pub fn encode_image(image: &SourceImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    encode_webp(&image.pixels, image.width, image.height, quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(((x + y) * 127 / (width + height)) as u8);
                pixels.push(alpha);
            }
        }
        pixels
    }

    fn is_webp(bytes: &[u8]) -> bool {
        bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
    }

    #[test]
    fn test_encode_webp_basic() {
        let pixels = gradient(64, 64, 255);
        let bytes = encode_webp(&pixels, 64, 64, 0.8).unwrap();
        assert!(is_webp(&bytes));
    }

    #[test]
    fn test_encode_webp_with_alpha() {
        let pixels = gradient(32, 32, 100);
        let bytes = encode_webp(&pixels, 32, 32, 0.8).unwrap();
        assert!(is_webp(&bytes));
    }

    #[test]
    fn test_encode_webp_quality_affects_size() {
        let pixels = gradient(128, 128, 255);

        let low = encode_webp(&pixels, 128, 128, 0.1).unwrap();
        let high = encode_webp(&pixels, 128, 128, 1.0).unwrap();

        assert!(high.len() >= low.len());
    }

    #[test]
    fn test_encode_webp_quality_clamping() {
        let pixels = vec![128u8; 8 * 8 * 4];
        assert!(encode_webp(&pixels, 8, 8, -3.0).is_ok());
        assert!(encode_webp(&pixels, 8, 8, 7.5).is_ok());
        assert!(encode_webp(&pixels, 8, 8, f32::NAN).is_ok());
    }

    #[test]
    fn test_encode_webp_invalid_pixel_data() {
        let pixels = vec![128u8; 10 * 9 * 4];
        let result = encode_webp(&pixels, 10, 10, 0.9);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 360
            })
        ));
    }

    #[test]
    fn test_encode_webp_zero_dimensions() {
        assert!(matches!(
            encode_webp(&[], 0, 10, 0.9),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_webp(&[], 10, 0, 0.9),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_image_single_pixel() {
        let image = SourceImage::new(1, 1, vec![255, 0, 0, 255]);
        let bytes = encode_image(&image, 0.9).unwrap();
        assert!(is_webp(&bytes));
    }
}
