//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two operations that touch the
//! filesystem: decoding a sheet into RGBA pixels and encoding a sprite as PNG.
//! Everything between those two steps is pure (see
//! [`operations`](super::operations)).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the
//! `MockBackend` below to run the pipeline without real files.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
}

/// A decoded sheet, always normalized to RGBA8.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixels: RgbaImage,
    /// Color type of the file as stored (e.g. `"Rgba8"`, `"Rgb8"`), before
    /// normalization.
    pub color: String,
    /// Whether the stored file carried an alpha channel. When false, the
    /// alpha of `pixels` was filled fully opaque.
    pub has_alpha: bool,
}

impl LoadedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Trait for image I/O backends.
///
/// `Sync` so a single backend can be shared by rayon workers.
pub trait ImageBackend: Sync {
    /// Decode an image file into RGBA8 pixels.
    fn load(&self, path: &Path) -> Result<LoadedImage, BackendError>;

    /// Encode pixels as a PNG file.
    fn save_png(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError>;
}
