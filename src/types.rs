//! Types serialized by the extraction stage.
//!
//! [`Manifest`] is written verbatim as `metadata.json`:
//!
//! ```json
//! {
//!   "source": "processed-assets/ui-extracted/ui-master-highres.png",
//!   "elements": [
//!     {
//!       "name": "icon_heart",
//!       "original_box": [4779, 187, 516, 450],
//!       "cropped_size": [402, 388],
//!       "file": "processed-assets/ui-elements/icon_heart.png"
//!     }
//!   ],
//!   "total": 1
//! }
//! ```

use crate::imaging::Rect;
use serde::{Deserialize, Serialize};

/// Where a sprite came from on the sheet. Not part of `metadata.json`; the
/// atlas is built from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    /// Region after padding and clamping, in sheet coordinates.
    pub padded: Rect,
    /// Written sprite, in sheet coordinates.
    pub trimmed: Rect,
    pub has_content: bool,
}

/// One written sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedElement {
    pub name: String,
    /// Region as resolved from the region table, before padding: `[x, y, w, h]`.
    pub original_box: [u32; 4],
    /// Pixel size of the written PNG: `[w, h]`.
    pub cropped_size: [u32; 2],
    /// Path of the written PNG.
    pub file: String,
    #[serde(skip)]
    pub placement: Placement,
}

/// Extraction metadata for one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub source: String,
    pub elements: Vec<ExtractedElement>,
    pub total: usize,
}

impl Manifest {
    pub fn new(source: impl Into<String>, elements: Vec<ExtractedElement>) -> Self {
        Self {
            source: source.into(),
            total: elements.len(),
            elements,
        }
    }
}
