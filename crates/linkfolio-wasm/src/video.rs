//! Video link WASM bindings.
//!
//! Lets the link-card editor turn a pasted YouTube or Vimeo URL into an
//! embeddable player without a network round trip.

use linkfolio_core::video;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Parse a video URL.
///
/// # Returns
///
/// `{ platform, id, embedUrl, thumbnailUrl, isValid }` where `platform` is
/// `"youtube"`, `"vimeo"` or `"unknown"`. Missing values are `null`.
///
/// # Example
///
/// ```typescript
/// const info = parse_video_url('https://youtu.be/dQw4w9WgXcQ');
/// if (info.isValid) {
///   iframe.src = info.embedUrl;
/// }
/// ```
#[wasm_bindgen]
pub fn parse_video_url(url: &str) -> Result<JsValue, JsValue> {
    let info = video::parse_video_url(url);
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
    info.serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Embed URL for a video link, or `undefined` if it is not one.
#[wasm_bindgen]
pub fn video_embed_url(url: &str) -> Option<String> {
    video::parse_video_url(url).embed_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_embed_url() {
        assert_eq!(
            video_embed_url("https://vimeo.com/76979871").as_deref(),
            Some("https://player.vimeo.com/video/76979871")
        );
        assert_eq!(video_embed_url("https://example.com"), None);
    }
}
