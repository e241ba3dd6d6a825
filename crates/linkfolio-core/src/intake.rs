//! Declared media type allow-list for uploads.
//!
//! Runs before any decoding. Only the type string the browser reports for
//! the selected file is inspected; the bytes are never sniffed here.

use thiserror::Error;

/// Rejection raised for media types outside the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Unsupported file type: {media_type:?} (expected JPEG, PNG, WebP or GIF)")]
    UnsupportedType { media_type: String },
}

/// Raster formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl MediaType {
    /// Every accepted type, in the order shown to users.
    pub const ALL: [MediaType; 4] = [
        MediaType::Jpeg,
        MediaType::Png,
        MediaType::Webp,
        MediaType::Gif,
    ];

    /// Canonical MIME string.
    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Webp => "image/webp",
            MediaType::Gif => "image/gif",
        }
    }

    fn from_essence(essence: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.mime().eq_ignore_ascii_case(essence))
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

/// Check a declared media type against the allow-list.
///
/// Comparison ignores ASCII case, surrounding whitespace and any
/// `;`-separated parameters, so `"Image/PNG; charset=binary"` is accepted.
pub fn validate_media_type(declared: &str) -> Result<MediaType, IntakeError> {
    let essence = declared.split(';').next().unwrap_or_default().trim();

    MediaType::from_essence(essence).ok_or_else(|| IntakeError::UnsupportedType {
        media_type: declared.to_string(),
    })
}
