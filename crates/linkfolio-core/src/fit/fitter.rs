//! Bounded-size re-encoding search.

use std::borrow::Cow;

use log::{debug, info, warn};

use super::codec::{Codec, WebpCodec};
use super::options::FitOptions;
use crate::decode::SourceImage;
use crate::encode::EncodeError;
use crate::error::FitError;

/// The encoded image chosen by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedImage {
    /// Encoded bytes, never empty.
    pub bytes: Vec<u8>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Scale factor the candidate was produced at.
    pub scale: f64,
    /// Quality level the candidate was produced at.
    pub quality: f32,
    /// Encoder calls made, including failed ones.
    pub attempts: usize,
    /// False only when the forced fallback still exceeds the budget.
    pub within_budget: bool,
}

impl FittedImage {
    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a returned result; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Searches scale and quality for the first encoding that fits a byte budget.
///
/// Scale is the outer axis and quality the inner one, both descending, so
/// compression artefacts are traded before resolution. The first candidate
/// within budget wins. If none does, one forced candidate at the fallback
/// scale and quality is returned regardless of size.
#[derive(Debug, Clone)]
pub struct ImageFitter<C = WebpCodec> {
    codec: C,
    options: FitOptions,
}

impl ImageFitter<WebpCodec> {
    /// Fitter with the WebP codec.
    pub fn new(options: FitOptions) -> Result<Self, FitError> {
        Self::with_codec(WebpCodec, options)
    }
}

impl<C: Codec> ImageFitter<C> {
    /// Fitter with an explicit codec. Options are validated here.
    pub fn with_codec(codec: C, options: FitOptions) -> Result<Self, FitError> {
        options.validate()?;
        Ok(Self { codec, options })
    }

    /// Decode `bytes` and run the search.
    pub fn fit(&self, bytes: &[u8]) -> Result<FittedImage, FitError> {
        let source = self.codec.decode(bytes)?;
        debug!(
            "decoded {}x{} source ({} input bytes, budget {})",
            source.width,
            source.height,
            bytes.len(),
            self.options.max_bytes
        );
        self.fit_source(&source)
    }

    /// Run the search on an already decoded image.
    pub fn fit_source(&self, source: &SourceImage) -> Result<FittedImage, FitError> {
        let max_bytes = self.options.max_bytes;
        let mut attempts = 0;
        let mut last_encoded: Option<FittedImage> = None;
        let mut last_error: Option<EncodeError> = None;

        for &scale in &self.options.scales {
            let image = self.scaled(source, scale)?;

            for &quality in &self.options.qualities {
                attempts += 1;
                let bytes = match self.encode_candidate(&image, quality) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        warn!("skipping candidate scale={scale} quality={quality}: {err}");
                        last_error = Some(err);
                        continue;
                    }
                };

                let within_budget = bytes.len() <= max_bytes;
                debug!(
                    "candidate scale={scale} quality={quality} {}x{}: {} bytes (budget {max_bytes})",
                    image.width,
                    image.height,
                    bytes.len()
                );

                let candidate = FittedImage {
                    bytes,
                    width: image.width,
                    height: image.height,
                    scale,
                    quality,
                    attempts,
                    within_budget,
                };

                if within_budget {
                    info!(
                        "fitted at scale={scale} quality={quality}: {} bytes after {attempts} attempts",
                        candidate.len()
                    );
                    return Ok(candidate);
                }
                last_encoded = Some(candidate);
            }
        }

        self.forced_fallback(source, attempts, last_encoded, last_error)
    }

    fn forced_fallback(
        &self,
        source: &SourceImage,
        mut attempts: usize,
        last_encoded: Option<FittedImage>,
        last_error: Option<EncodeError>,
    ) -> Result<FittedImage, FitError> {
        let max_bytes = self.options.max_bytes;
        let scale = self.options.fallback_scale;
        let quality = self.options.fallback_quality;

        let image = self.scaled(source, scale)?;
        attempts += 1;

        match self.encode_candidate(&image, quality) {
            Ok(bytes) => {
                let within_budget = bytes.len() <= max_bytes;
                if !within_budget {
                    warn!(
                        "no candidate fits {max_bytes} bytes; forced fallback is {} bytes",
                        bytes.len()
                    );
                }
                Ok(FittedImage {
                    bytes,
                    width: image.width,
                    height: image.height,
                    scale,
                    quality,
                    attempts,
                    within_budget,
                })
            }
            Err(err) => {
                warn!("forced fallback failed to encode: {err}");
                match last_encoded {
                    Some(mut candidate) => {
                        candidate.attempts = attempts;
                        Ok(candidate)
                    }
                    None => Err(FitError::Encode(last_error.unwrap_or(err))),
                }
            }
        }
    }

    fn scaled<'a>(
        &self,
        source: &'a SourceImage,
        scale: f64,
    ) -> Result<Cow<'a, SourceImage>, FitError> {
        if scale >= 1.0 {
            return Ok(Cow::Borrowed(source));
        }
        let image = self.codec.resample(source, scale, self.options.filter)?;
        Ok(Cow::Owned(image))
    }

    fn encode_candidate(&self, image: &SourceImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        let bytes = self.codec.encode(image, quality)?;
        if bytes.is_empty() {
            return Err(EncodeError::EncodingFailed("empty output".to_string()));
        }
        Ok(bytes)
    }
}

/// Fit `image_bytes` into `max_bytes` with the default search and WebP codec.
pub fn fit(image_bytes: &[u8], max_bytes: usize) -> Result<FittedImage, FitError> {
    ImageFitter::new(FitOptions::with_max_bytes(max_bytes))?.fit(image_bytes)
}


#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::test_support::ScriptedCodec;
    use super::*;
    use crate::decode::{scaled_dimensions, DecodeError};
    use crate::fit::options::{DEFAULT_QUALITIES, DEFAULT_SCALES};

    fn fitter<F: Fn(u32, f32) -> Option<usize>>(
        codec: &ScriptedCodec<F>,
        max_bytes: usize,
    ) -> ImageFitter<&ScriptedCodec<F>> {
        ImageFitter::with_codec(codec, FitOptions::with_max_bytes(max_bytes)).unwrap()
    }

    #[test]
    fn test_first_candidate_fits_without_resampling() {
        let codec = ScriptedCodec::new(|_, _| Some(10));
        let result = fitter(&codec, 100).fit(b"img").unwrap();

        assert_eq!(result.scale, 1.0);
        assert_eq!(result.quality, 0.9);
        assert_eq!(result.attempts, 1);
        assert_eq!((result.width, result.height), (100, 100));
        assert!(result.within_budget);
        assert!(codec.resamples.borrow().is_empty());
    }

    #[test]
    fn test_quality_reduced_before_scale() {
        let codec = ScriptedCodec::new(|_, q| Some(if q <= 0.5 { 50 } else { 500 }));
        let result = fitter(&codec, 100).fit(b"img").unwrap();

        assert_eq!(result.scale, 1.0);
        assert_eq!(result.quality, 0.5);
        assert_eq!(result.attempts, 5);
        assert!(codec.resamples.borrow().is_empty());
    }

    #[test]
    fn test_scale_reduced_after_qualities_exhausted() {
        let codec = ScriptedCodec::new(|w, _| Some(if w <= 80 { 10 } else { 1000 }));
        let result = fitter(&codec, 100).fit(b"img").unwrap();

        assert_eq!(result.scale, 0.8);
        assert_eq!(result.quality, 0.9);
        assert_eq!(result.attempts, 2 * DEFAULT_QUALITIES.len() + 1);
        assert_eq!(*codec.resamples.borrow(), vec![0.9, 0.8]);
    }

    #[test]
    fn test_first_fit_not_best_fit() {
        // Every quality fits; lower ones would be smaller.
        let codec = ScriptedCodec::new(|_, q| Some((q * 1000.0) as usize));
        let result = fitter(&codec, 1000).fit(b"img").unwrap();

        assert_eq!(result.quality, 0.9);
        assert_eq!(result.attempts, 1);
        assert!(result.len() > 800);
    }

    #[test]
    fn test_forced_fallback_returned_over_budget() {
        let codec = ScriptedCodec::new(|_, _| Some(10_000));
        let result = fitter(&codec, 100).fit(b"img").unwrap();

        assert_eq!(result.scale, 0.4);
        assert_eq!(result.quality, 0.3);
        assert_eq!((result.width, result.height), (40, 40));
        assert_eq!(result.len(), 10_000);
        assert_eq!(result.attempts, 43);
        assert!(!result.within_budget);
    }

    #[test]
    fn test_zero_budget_runs_full_search_then_fallback() {
        let codec = ScriptedCodec::new(|_, _| Some(1));
        let result = fitter(&codec, 0).fit(b"img").unwrap();

        assert_eq!((result.scale, result.quality), (0.4, 0.3));
        assert_eq!(result.attempts, 43);
        assert_eq!(result.len(), 1);
        assert!(!result.within_budget);
    }

    #[test]
    fn test_search_order_is_scale_major_quality_minor() {
        let codec = ScriptedCodec::new(|_, _| Some(10_000));
        fitter(&codec, 100).fit(b"img").unwrap();

        let mut expected = Vec::new();
        for scale in DEFAULT_SCALES {
            let (w, h) = scaled_dimensions(100, 100, scale);
            for quality in DEFAULT_QUALITIES {
                expected.push((w, h, quality));
            }
        }
        expected.push((40, 40, 0.3));

        assert_eq!(*codec.encodes.borrow(), expected);
    }

    #[test]
    fn test_encode_failures_are_skipped() {
        let codec = ScriptedCodec::new(|_, q| if q >= 0.6 { None } else { Some(50) });
        let result = fitter(&codec, 100).fit(b"img").unwrap();

        assert_eq!(result.scale, 1.0);
        assert_eq!(result.quality, 0.5);
        assert_eq!(result.attempts, 5);
    }

    #[test]
    fn test_empty_output_is_a_failed_candidate() {
        let codec = ScriptedCodec::new(|_, q| Some(if q > 0.85 { 0 } else { 20 }));
        let result = fitter(&codec, 100).fit(b"img").unwrap();

        assert_eq!(result.quality, 0.8);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_every_candidate_failing_is_fatal() {
        let codec = ScriptedCodec::new(|_, _| None);
        let result = fitter(&codec, 100).fit(b"img");

        assert!(matches!(result, Err(FitError::Encode(_))));
        assert_eq!(codec.encodes.borrow().len(), 43);
    }

    #[test]
    fn test_failed_fallback_returns_last_encoded_candidate() {
        let codec = ScriptedCodec::new(|w, _| if w == 40 { None } else { Some(10_000) });
        let result = fitter(&codec, 100).fit(b"img").unwrap();

        assert_eq!(result.scale, 0.5);
        assert_eq!(result.quality, 0.3);
        assert_eq!(result.attempts, 43);
        assert!(!result.within_budget);
    }

    #[test]
    fn test_decode_failure_stops_before_encoding() {
        let codec = ScriptedCodec::new(|_, _| Some(1));
        let result = fitter(&codec, 100).fit(b"bad");

        assert!(matches!(
            result,
            Err(FitError::Decode(DecodeError::InvalidFormat))
        ));
        assert!(codec.encodes.borrow().is_empty());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let codec = ScriptedCodec::new(|_, _| Some(1));
        let mut options = FitOptions::default();
        options.scales = vec![0.5, 1.0];

        assert!(matches!(
            ImageFitter::with_codec(&codec, options),
            Err(FitError::InvalidOptions(_))
        ));
    }

    fn noise_png(width: u32, height: u32) -> Vec<u8> {
        let mut state: u32 = 0x1234_5678;
        let img = image::RgbImage::from_fn(width, height, |_, _| {
            let mut next = || {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            };
            image::Rgb([next(), next(), next()])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_webp_fit_small_image_first_try() {
        let bytes = noise_png(32, 32);
        let result = fit(&bytes, 500 * 1024).unwrap();

        assert_eq!((result.scale, result.quality), (1.0, 0.9));
        assert_eq!((result.width, result.height), (32, 32));
        assert_eq!(&result.bytes[0..4], b"RIFF");
        assert_eq!(&result.bytes[8..12], b"WEBP");
        assert!(result.within_budget);
    }

    #[test]
    fn test_webp_fit_impossible_budget_forces_fallback() {
        let bytes = noise_png(200, 100);
        let result = fit(&bytes, 16).unwrap();

        assert_eq!((result.width, result.height), (80, 40));
        assert_eq!((result.scale, result.quality), (0.4, 0.3));
        assert!(!result.within_budget);
        assert!(result.len() > 16);
    }

    #[test]
    fn test_webp_fit_zero_budget() {
        let bytes = noise_png(8, 8);
        let result = fit(&bytes, 0).unwrap();

        assert_eq!((result.width, result.height), (3, 3));
        assert_eq!((result.scale, result.quality), (0.4, 0.3));
        assert!(!result.is_empty());
        assert!(!result.within_budget);
    }

    #[test]
    fn test_webp_fit_rejects_garbage() {
        assert!(matches!(
            fit(&[1, 2, 3, 4, 5], 1024),
            Err(FitError::Decode(_))
        ));
    }
}
