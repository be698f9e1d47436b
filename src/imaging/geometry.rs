//! Pure rectangle math.
//!
//! All functions here are pure and testable without any I/O or images.
//! Coordinates are pixel indices with the origin at the top-left corner.

/// Axis-aligned pixel rectangle in `x, y, width, height` form.
///
/// The inclusive corner form used by content bounds (`x_min..=x_max`) is
/// available through [`Rect::from_inclusive`], [`Rect::right`] and
/// [`Rect::bottom`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from inclusive corners.
    ///
    /// `from_inclusive(40, 40, 49, 49)` is the 10x10 rectangle at (40, 40).
    pub fn from_inclusive(x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Self {
        debug_assert!(x_min <= x_max && y_min <= y_max);
        Self {
            x: x_min,
            y: y_min,
            width: x_max - x_min + 1,
            height: y_max - y_min + 1,
        }
    }

    /// Inclusive right edge. Only meaningful for non-empty rectangles.
    pub fn right(&self) -> u32 {
        self.x + self.width.saturating_sub(1)
    }

    /// Inclusive bottom edge. Only meaningful for non-empty rectangles.
    pub fn bottom(&self) -> u32 {
        self.y + self.height.saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `[x, y, width, height]`, the shape used in metadata JSON.
    pub fn to_array(self) -> [u32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Whether the pixel at `(px, py)` lies inside the rectangle.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && py >= self.y
            && (px - self.x) < self.width
            && (py - self.y) < self.height
    }

    /// Translate a rectangle expressed relative to `origin` into the
    /// coordinate space `origin` itself lives in.
    pub fn offset_by(self, origin: Rect) -> Rect {
        Rect {
            x: self.x + origin.x,
            y: self.y + origin.y,
            ..self
        }
    }

    /// Expand by `padding` on every side, then clamp to `[0, width) × [0, height)`.
    ///
    /// Returns `None` when the clamped rectangle is empty, i.e. the padded
    /// rectangle does not intersect the image at all.
    ///
    /// ```
    /// # use sprite_cutter::imaging::Rect;
    /// let region = Rect::new(30, 30, 40, 40);
    /// // Padding 20 asks for (10, 10)..(90, 90), which fits a 100x100 image.
    /// assert_eq!(region.padded_within(20, 100, 100), Some(Rect::new(10, 10, 80, 80)));
    /// // Near the edge the padding is clipped.
    /// assert_eq!(Rect::new(5, 5, 10, 10).padded_within(20, 100, 100), Some(Rect::new(0, 0, 35, 35)));
    /// ```
    pub fn padded_within(&self, padding: u32, width: u32, height: u32) -> Option<Rect> {
        let x1 = self.x.saturating_sub(padding);
        let y1 = self.y.saturating_sub(padding);
        let x2 = self
            .x
            .saturating_add(self.width)
            .saturating_add(padding)
            .min(width);
        let y2 = self
            .y
            .saturating_add(self.height)
            .saturating_add(padding)
            .min(height);

        if x1 >= x2 || y1 >= y2 {
            return None;
        }

        Some(Rect {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        })
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}
