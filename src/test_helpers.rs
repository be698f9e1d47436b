//! Shared test utilities for the sprite-cutter test suite.
//!
//! Builds small in-memory sheets with known content so tests can assert exact
//! bounds and crop sizes.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut sheet = transparent_sheet(100, 100);
//! paint(&mut sheet, Rect::new(40, 40, 10, 10), 255);
//! assert_eq!(compute_content_bounds(&sheet, Threshold::default()), Some(Rect::new(40, 40, 10, 10)));
//! ```

use crate::imaging::Rect;
use image::{Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Sheet builders
// =========================================================================

/// Fully transparent sheet.
pub fn transparent_sheet(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
}

/// Transparent sheet with one opaque red `size`x`size` square at (x, y).
pub fn sheet_with_square(width: u32, height: u32, x: u32, y: u32, size: u32) -> RgbaImage {
    let mut sheet = transparent_sheet(width, height);
    paint(&mut sheet, Rect::new(x, y, size, size), 255);
    sheet
}

/// Fill `rect` with red at the given alpha. Pixels outside the sheet are ignored.
pub fn paint(sheet: &mut RgbaImage, rect: Rect, alpha: u8) {
    let (width, height) = sheet.dimensions();
    for y in rect.y..rect.y.saturating_add(rect.height).min(height) {
        for x in rect.x..rect.x.saturating_add(rect.width).min(width) {
            sheet.put_pixel(x, y, Rgba([255, 0, 0, alpha]));
        }
    }
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Create an empty file (and its parents). The mock backend never reads it.
pub fn create_dummy_source(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

/// Write `sheet` as a real PNG (and create parents).
pub fn write_png(path: &Path, sheet: &RgbaImage) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    sheet.save(path).unwrap();
}
