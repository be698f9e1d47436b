//! Transparency-bounds cropping.
//!
//! These functions are pure: they read an [`RgbaImage`] and return a new one
//! (or a rectangle). Nothing here touches the filesystem; loading and saving
//! go through the [`ImageBackend`](super::ImageBackend).
//!
//! | Function | What it does |
//! |---|---|
//! | [`compute_content_bounds`] | tightest rectangle around pixels with `alpha > threshold` |
//! | [`crop_to_content`] | crop an image to those bounds (unchanged if there is no content) |
//! | [`crop_with_padding`] | crop to a rectangle grown by a margin, clamped to the image |
//! | [`cut_sprite`] | `crop_with_padding` then `crop_to_content`, keeping sheet coordinates |

use super::geometry::Rect;
use super::params::Threshold;
use image::{RgbaImage, imageops};

/// Locate the bounding rectangle of all content pixels.
///
/// A pixel is content when its alpha exceeds `threshold`. Rows and columns
/// containing at least one content pixel are projected out of the mask; the
/// result spans from the first to the last of each, inclusive.
///
/// Returns `None` when no pixel is content (fully transparent image, or an
/// empty one). That is a valid outcome, not an error.
pub fn compute_content_bounds(image: &RgbaImage, threshold: Threshold) -> Option<Rect> {
    let (width, height) = image.dimensions();
    let mut rows = vec![false; height as usize];
    let mut cols = vec![false; width as usize];

    for (x, y, pixel) in image.enumerate_pixels() {
        if threshold.is_content(pixel[3]) {
            rows[y as usize] = true;
            cols[x as usize] = true;
        }
    }

    let row_min = rows.iter().position(|&r| r)?;
    let row_max = rows.iter().rposition(|&r| r)?;
    let col_min = cols.iter().position(|&c| c)?;
    let col_max = cols.iter().rposition(|&c| c)?;

    Some(Rect::from_inclusive(
        col_min as u32,
        row_min as u32,
        col_max as u32,
        row_max as u32,
    ))
}

/// Copy out the pixels covered by `rect`.
///
/// `rect` must lie inside the image; callers get it from
/// [`compute_content_bounds`] or [`Rect::padded_within`].
pub(crate) fn crop_rect(image: &RgbaImage, rect: Rect) -> RgbaImage {
    imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image()
}

/// Trim transparent edges.
///
/// Returns an unchanged copy when the image has no content at all, so the
/// result is never a zero-sized image. Applying it twice gives the same
/// image as applying it once.
pub fn crop_to_content(image: &RgbaImage, threshold: Threshold) -> RgbaImage {
    match compute_content_bounds(image, threshold) {
        Some(bounds) => crop_rect(image, bounds),
        None => image.clone(),
    }
}

/// Crop to `rect` grown by `padding` pixels on every side.
///
/// The grown rectangle is clamped to the image, so this never reads outside
/// `[0, width) × [0, height)`. Returns `None` only when the rectangle and the
/// image do not overlap at all.
pub fn crop_with_padding(image: &RgbaImage, rect: Rect, padding: u32) -> Option<RgbaImage> {
    let (width, height) = image.dimensions();
    let padded = rect.padded_within(padding, width, height)?;
    Some(crop_rect(image, padded))
}

/// A sprite cut out of a sheet, with its placement in sheet coordinates.
#[derive(Debug, Clone)]
pub struct SpriteCut {
    pub image: RgbaImage,
    /// Region after padding and clamping.
    pub padded: Rect,
    /// Final sprite rectangle. Equal to `padded` when no content was found.
    pub trimmed: Rect,
    /// False when every pixel of the padded region was below the threshold
    /// and the untrimmed padded image was kept instead.
    pub has_content: bool,
}

/// Pad, crop, then trim a single region of a sheet.
pub fn cut_sprite(
    sheet: &RgbaImage,
    region: Rect,
    padding: u32,
    threshold: Threshold,
) -> Option<SpriteCut> {
    let (width, height) = sheet.dimensions();
    let padded = region.padded_within(padding, width, height)?;
    let padded_image = crop_rect(sheet, padded);

    let cut = match compute_content_bounds(&padded_image, threshold) {
        Some(bounds) => SpriteCut {
            image: crop_rect(&padded_image, bounds),
            padded,
            trimmed: bounds.offset_by(padded),
            has_content: true,
        },
        None => SpriteCut {
            image: padded_image,
            padded,
            trimmed: padded,
            has_content: false,
        },
    };
    Some(cut)
}
