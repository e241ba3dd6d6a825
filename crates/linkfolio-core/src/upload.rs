//! Turning a selected file into bytes ready for storage upload.
//!
//! The storage client itself lives outside this crate; it receives a
//! [`PreparedUpload`] and writes `bytes` under `file_name`.

use log::info;

use crate::error::FitError;
use crate::fit::{Codec, FitOptions, FittedImage, ImageFitter};
use crate::intake::{validate_media_type, MediaType};

/// Content type of every prepared upload.
pub const WEBP_CONTENT_TYPE: &str = "image/webp";

/// Logical file name for the re-encoded upload.
///
/// A trailing extension (a `.` followed by at least one character that is
/// neither `.` nor `/`) is replaced by `.webp`; names without one just get
/// `.webp` appended.
pub fn webp_file_name(name: &str) -> String {
    let stem = match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    };
    format!("{stem}.webp")
}

/// A fitted image plus the metadata the upload step needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedUpload {
    pub file_name: String,
    pub content_type: &'static str,
    /// Type the file was declared as before re-encoding.
    pub source_type: MediaType,
    pub image: FittedImage,
}

impl PreparedUpload {
    pub fn bytes(&self) -> &[u8] {
        &self.image.bytes
    }
}

/// Validate, fit and rename one upload using the WebP codec.
pub fn prepare_upload(
    file_name: &str,
    media_type: &str,
    bytes: &[u8],
    options: &FitOptions,
) -> Result<PreparedUpload, FitError> {
    let fitter = ImageFitter::new(options.clone())?;
    prepare_upload_with(&fitter, file_name, media_type, bytes)
}

/// [`prepare_upload`] with a caller-supplied fitter.
///
/// The declared media type is checked before any byte is decoded.
pub fn prepare_upload_with<C: Codec>(
    fitter: &ImageFitter<C>,
    file_name: &str,
    media_type: &str,
    bytes: &[u8],
) -> Result<PreparedUpload, FitError> {
    let source_type = validate_media_type(media_type)?;
    let image = fitter.fit(bytes)?;
    let file_name = webp_file_name(file_name);

    info!(
        "prepared {file_name} from {source_type}: {} -> {} bytes",
        bytes.len(),
        image.len()
    );

    Ok(PreparedUpload {
        file_name,
        content_type: WEBP_CONTENT_TYPE,
        source_type,
        image,
    })
}
