//! Parameter types for the cropper.
//!
//! - [`Threshold`]: opacity cutoff separating transparent pixels from content.
//! - [`DEFAULT_PADDING`]: margin added around a region before it is trimmed.

/// Default margin, in pixels, added around each region before trimming.
///
/// Large enough to keep anti-aliased edges and drop shadows that spill
/// slightly outside a hand-measured region.
pub const DEFAULT_PADDING: u32 = 20;

/// Opacity cutoff on the 0–255 scale.
///
/// A pixel counts as content when its alpha is strictly greater than the
/// threshold, so `Threshold(0)` treats every non-zero alpha as content and
/// `Threshold(255)` treats nothing as content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(pub u8);

impl Threshold {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_content(self, alpha: u8) -> bool {
        alpha > self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(10)
    }
}
