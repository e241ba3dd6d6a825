//! Resampling of source images for the fit search.
//!
//! All functions return new `SourceImage` instances without modifying the input.

use super::{DecodeError, FilterType, SourceImage};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for zero target dimensions and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared dimensions.
pub fn resize(
    image: &SourceImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<SourceImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image.as_rgba_view().ok_or_else(|| {
        DecodeError::CorruptedFile("pixel buffer does not match dimensions".to_string())
    })?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());
    Ok(SourceImage::from_rgba_image(resized))
}

/// Resample by a uniform scale factor.
///
/// Output dimensions come from [`scaled_dimensions`].
pub fn resample(
    image: &SourceImage,
    scale: f64,
    filter: FilterType,
) -> Result<SourceImage, DecodeError> {
    let (width, height) = scaled_dimensions(image.width, image.height, scale);
    resize(image, width, height, filter)
}

/// Dimensions after multiplying both sides by `scale`.
///
/// Each side is `floor(side * scale)`, clamped to at least one pixel so tiny
/// images survive aggressive downscaling.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (scale_side(width, scale), scale_side(height, scale))
}

fn scale_side(side: u32, scale: f64) -> u32 {
    let scaled = (f64::from(side) * scale).floor();
    if scaled < 1.0 {
        1
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: scaling never upsizes and never reaches zero.
        #[test]
        fn prop_scaled_dimensions_bounded(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            scale in 0.01f64..=1.0,
        ) {
            let (w, h) = scaled_dimensions(width, height, scale);
            prop_assert!(w >= 1 && w <= width);
            prop_assert!(h >= 1 && h <= height);
        }

        /// Property: a smaller scale never yields a larger side.
        #[test]
        fn prop_scaled_dimensions_monotonic(
            side in 1u32..=10_000,
            a in 0.01f64..=1.0,
            b in 0.01f64..=1.0,
        ) {
            let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
            prop_assert!(scaled_dimensions(side, side, lo).0 <= scaled_dimensions(side, side, hi).0);
        }
    }
}
