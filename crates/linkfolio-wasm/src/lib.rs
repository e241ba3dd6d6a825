//! Linkfolio WASM - WebAssembly bindings for Linkfolio
//!
//! This crate exposes linkfolio-core to the dashboard front end.
//!
//! # Module Structure
//!
//! - `fit` - Upload intake and bounded-size WebP fitting
//! - `video` - YouTube/Vimeo link parsing for video cards
//! - `types` - WASM-compatible wrappers for fit results
//! - `logging` - Console sink for the core's `log` records
//!
//! # Usage
//!
//! ```typescript
//! import init, { prepare_image_upload } from '@linkfolio/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const upload = prepare_image_upload(bytes, file.name, file.type, { maxBytes: 300 * 1024 });
//! console.log(`${upload.file_name}: ${upload.image().byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod fit;
mod logging;
mod types;
mod video;

// Re-export public types
pub use fit::{
    allowed_media_types, default_max_bytes, fit_image, prepare_image_upload, validate_media_type,
    webp_file_name,
};
pub use logging::set_log_level;
pub use types::{JsFittedImage, JsPreparedUpload};
pub use video::{parse_video_url, video_embed_url};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
