//! Linkfolio Core - media utilities for the link-in-bio app
//!
//! This crate provides the pieces of the front end that do real work on
//! user content: fitting uploaded images into a byte budget as WebP,
//! checking declared upload types, and recognising video links for
//! embedded link cards.
//!
//! # Module Structure
//!
//! - `intake` - Declared media type allow-list
//! - `decode` - Raster decoding, EXIF orientation and resampling
//! - `encode` - Lossy WebP encoding
//! - `fit` - Scale/quality search for the first encoding within budget
//! - `upload` - Validate, fit and rename in one call
//! - `video` - YouTube/Vimeo link parsing

pub mod decode;
pub mod encode;
pub mod error;
pub mod fit;
pub mod intake;
pub mod upload;
pub mod video;

pub use error::FitError;
pub use fit::{fit, FitOptions, FittedImage, ImageFitter, DEFAULT_MAX_BYTES};
pub use intake::{validate_media_type, MediaType};
pub use upload::{prepare_upload, webp_file_name, PreparedUpload};
pub use video::{parse_video_url, VideoInfo, VideoPlatform};
