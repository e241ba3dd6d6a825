//! WASM-compatible wrapper types for fit results.
//!
//! These wrap the core result types and copy bytes out to JavaScript on
//! request, so a result can be inspected without moving its buffer.

use linkfolio_core::fit::{FitOptions, FittedImage};
use linkfolio_core::upload::PreparedUpload;
use wasm_bindgen::prelude::*;

/// A fitted WebP image.
///
/// # Memory Management
///
/// The encoded bytes stay in WASM memory until `bytes()` copies them into a
/// `Uint8Array`. Call `free()` once the upload has been handed off, or let
/// wasm-bindgen's finalizer reclaim it.
#[wasm_bindgen]
pub struct JsFittedImage {
    inner: FittedImage,
}

#[wasm_bindgen]
impl JsFittedImage {
    /// Encoded WebP bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// Encoded length in bytes.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Scale factor of the chosen candidate.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.scale
    }

    /// Quality level of the chosen candidate, 0-1.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.quality
    }

    /// Encoder calls made during the search.
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> usize {
        self.inner.attempts
    }

    /// False when even the forced fallback is over budget.
    #[wasm_bindgen(getter)]
    pub fn within_budget(&self) -> bool {
        self.inner.within_budget
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsFittedImage {
    pub(crate) fn from_fitted(inner: FittedImage) -> Self {
        Self { inner }
    }
}

/// A fitted image plus the name and type to upload it under.
///
/// # Example
///
/// ```typescript
/// const upload = prepare_image_upload(bytes, file.name, file.type, undefined);
/// await storage.upload(`avatars/${userId}/${upload.file_name}`, upload.bytes(), {
///   contentType: upload.content_type,
/// });
/// upload.free();
/// ```
#[wasm_bindgen]
pub struct JsPreparedUpload {
    inner: PreparedUpload,
}

#[wasm_bindgen]
impl JsPreparedUpload {
    /// `<original stem>.webp`
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.inner.file_name.clone()
    }

    /// Always `image/webp`.
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        self.inner.content_type.to_string()
    }

    /// Declared type of the original file.
    #[wasm_bindgen(getter)]
    pub fn source_type(&self) -> String {
        self.inner.source_type.mime().to_string()
    }

    /// Encoded WebP bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    /// Fit details (dimensions, scale, quality, budget flag).
    pub fn image(&self) -> JsFittedImage {
        JsFittedImage::from_fitted(self.inner.image.clone())
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPreparedUpload {
    pub(crate) fn from_prepared(inner: PreparedUpload) -> Self {
        Self { inner }
    }
}

/// Read fit options from an optional plain JS object.
///
/// `undefined` and `null` mean defaults; missing fields take their defaults.
pub(crate) fn options_from_js(value: JsValue) -> Result<FitOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(FitOptions::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid fit options: {}", e)))
}
