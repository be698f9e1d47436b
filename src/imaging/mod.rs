//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader`, normalized to RGBA8 |
//! | **Content bounds** | alpha mask projected onto rows and columns |
//! | **Crop** | `image::imageops::crop_imm` |
//! | **Encode** | PNG via `image::codecs::png` |
//!
//! The module is split into:
//! - **Geometry**: [`Rect`] and padding/clamping math (unit testable)
//! - **Parameters**: [`Threshold`] and the default padding
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: the transparency-bounds cropper

pub mod backend;
mod geometry;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, LoadedImage};
pub use geometry::Rect;
pub use operations::{
    SpriteCut, compute_content_bounds, crop_to_content, crop_with_padding, cut_sprite,
};
pub use params::{DEFAULT_PADDING, Threshold};
pub use rust_backend::{RustBackend, is_supported_image, supported_input_extensions};
