//! Upload image fitting WASM bindings.
//!
//! Exposes the core fit search and upload intake to the dashboard's avatar
//! and link-card image pickers. Run these from a Web Worker: a large photo
//! can take dozens of encodes.
//!
//! # Functions
//!
//! - [`fit_image`] - Fit image bytes into a byte budget as WebP
//! - [`prepare_image_upload`] - Validate type, fit and rename in one call
//! - [`validate_media_type`] - Check a declared type against the allow-list
//! - [`webp_file_name`] - Derive the `.webp` upload name
//! - [`allowed_media_types`] - The allow-list, for the file input's `accept`
//! - [`default_max_bytes`] - The default 500 KiB budget
//!
//! # Example
//!
//! ```typescript
//! import { prepare_image_upload, allowed_media_types } from '@linkfolio/wasm';
//!
//! input.accept = allowed_media_types().join(',');
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const upload = prepare_image_upload(bytes, file.name, file.type, { maxBytes: 300 * 1024 });
//! ```

use crate::types::{options_from_js, JsFittedImage, JsPreparedUpload};
use linkfolio_core::{fit, intake, upload};
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Fit image bytes into `max_bytes` as WebP using the default search.
///
/// # Errors
///
/// Throws if the bytes cannot be decoded or nothing could be encoded.
/// Running over budget is not an error: check `within_budget` on the result.
#[wasm_bindgen]
pub fn fit_image(bytes: &[u8], max_bytes: usize) -> Result<JsFittedImage, JsValue> {
    fit::fit(bytes, max_bytes)
        .map(JsFittedImage::from_fitted)
        .map_err(to_js_error)
}

/// Validate the declared type, fit the image and derive its upload name.
///
/// # Arguments
///
/// * `bytes` - File contents
/// * `file_name` - Original file name, e.g. `File.name`
/// * `media_type` - Declared type, e.g. `File.type`
/// * `options` - Optional `{ maxBytes, scales, qualities, fallbackScale, fallbackQuality, filter }`
///
/// # Errors
///
/// Throws for an unsupported type (before decoding), undecodable bytes,
/// invalid options, or when no candidate could be encoded.
#[wasm_bindgen]
pub fn prepare_image_upload(
    bytes: &[u8],
    file_name: &str,
    media_type: &str,
    options: JsValue,
) -> Result<JsPreparedUpload, JsValue> {
    let options = options_from_js(options)?;
    upload::prepare_upload(file_name, media_type, bytes, &options)
        .map(JsPreparedUpload::from_prepared)
        .map_err(to_js_error)
}

/// Check a declared media type; returns its canonical form.
#[wasm_bindgen]
pub fn validate_media_type(media_type: &str) -> Result<String, JsValue> {
    intake::validate_media_type(media_type)
        .map(|ty| ty.mime().to_string())
        .map_err(to_js_error)
}

/// `photo.jpeg` -> `photo.webp`
#[wasm_bindgen]
pub fn webp_file_name(name: &str) -> String {
    upload::webp_file_name(name)
}

/// Accepted upload types as an array of MIME strings.
#[wasm_bindgen]
pub fn allowed_media_types() -> js_sys::Array {
    intake::MediaType::ALL
        .iter()
        .map(|ty| JsValue::from_str(ty.mime()))
        .collect()
}

/// Default byte budget (500 KiB).
#[wasm_bindgen]
pub fn default_max_bytes() -> usize {
    fit::DEFAULT_MAX_BYTES
}
