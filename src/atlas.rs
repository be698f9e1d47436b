//! Phaser texture atlas for the source sheet.
//!
//! The extracted PNGs are convenient for editing, but a game can also load
//! the original sheet once and address sprites by frame. This module writes
//! that frame table in the "JSON hash" format Phaser, PixiJS and
//! TexturePacker share:
//!
//! ```json
//! {
//!   "frames": {
//!     "icon_heart": {
//!       "frame": { "x": 4790, "y": 201, "w": 402, "h": 388 },
//!       "rotated": false,
//!       "trimmed": true,
//!       "spriteSourceSize": { "x": 31, "y": 34, "w": 402, "h": 388 },
//!       "sourceSize": { "w": 556, "h": 490 }
//!     }
//!   },
//!   "meta": { "app": "sprite-cutter", "image": "ui-master-highres.png", ... }
//! }
//! ```
//!
//! `frame` is the trimmed sprite on the sheet. `sourceSize` is the padded
//! region it was trimmed from, and `spriteSourceSize` places the sprite
//! inside that region, so an engine can restore the untrimmed layout.

use crate::imaging::Rect;
use crate::types::Manifest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl From<Rect> for FrameRect {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            w: r.width,
            h: r.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub frame: FrameRect,
    pub rotated: bool,
    pub trimmed: bool,
    pub sprite_source_size: FrameRect,
    pub source_size: Size,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub app: String,
    pub version: String,
    pub image: String,
    pub format: String,
    pub size: Size,
    pub scale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atlas {
    pub frames: BTreeMap<String, Frame>,
    pub meta: Meta,
}

/// Frame entry for one sprite placement.
pub fn frame_for(padded: Rect, trimmed: Rect) -> Frame {
    Frame {
        frame: trimmed.into(),
        rotated: false,
        trimmed: trimmed != padded,
        sprite_source_size: FrameRect {
            x: trimmed.x - padded.x,
            y: trimmed.y - padded.y,
            w: trimmed.width,
            h: trimmed.height,
        },
        source_size: Size {
            w: padded.width,
            h: padded.height,
        },
    }
}

/// Build the atlas for `manifest`'s sheet.
///
/// `image` is the sheet file name as the engine will load it and
/// `sheet_size` its pixel dimensions.
pub fn build_atlas(manifest: &Manifest, image: &str, sheet_size: (u32, u32)) -> Atlas {
    let frames = manifest
        .elements
        .iter()
        .map(|el| {
            (
                el.name.clone(),
                frame_for(el.placement.padded, el.placement.trimmed),
            )
        })
        .collect();

    Atlas {
        frames,
        meta: Meta {
            app: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            image: image.to_string(),
            format: "RGBA8888".to_string(),
            size: Size {
                w: sheet_size.0,
                h: sheet_size.1,
            },
            scale: "1".to_string(),
        },
    }
}

/// Write the atlas as pretty-printed JSON.
pub fn write_atlas(path: &Path, atlas: &Atlas) -> Result<(), AtlasError> {
    let json = serde_json::to_string_pretty(atlas)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExtractedElement, Placement};

    fn element(name: &str, padded: Rect, trimmed: Rect) -> ExtractedElement {
        ExtractedElement {
            name: name.to_string(),
            original_box: [0, 0, 0, 0],
            cropped_size: [trimmed.width, trimmed.height],
            file: format!("{name}.png"),
            placement: Placement {
                padded,
                trimmed,
                has_content: true,
            },
        }
    }

    #[test]
    fn frame_offsets_are_relative_to_padded_region() {
        let frame = frame_for(Rect::new(10, 10, 80, 80), Rect::new(40, 40, 10, 10));
        assert_eq!(frame.frame, FrameRect { x: 40, y: 40, w: 10, h: 10 });
        assert_eq!(frame.sprite_source_size, FrameRect { x: 30, y: 30, w: 10, h: 10 });
        assert_eq!(frame.source_size, Size { w: 80, h: 80 });
        assert!(frame.trimmed);
        assert!(!frame.rotated);
    }

    #[test]
    fn untrimmed_frame() {
        let r = Rect::new(5, 5, 30, 30);
        let frame = frame_for(r, r);
        assert!(!frame.trimmed);
        assert_eq!(frame.sprite_source_size, FrameRect { x: 0, y: 0, w: 30, h: 30 });
    }

    #[test]
    fn build_atlas_keys_frames_by_name() {
        let manifest = Manifest::new(
            "sheet.png",
            vec![
                element("star", Rect::new(0, 0, 20, 20), Rect::new(2, 2, 16, 16)),
                element("coin", Rect::new(20, 0, 20, 20), Rect::new(24, 3, 12, 12)),
            ],
        );
        let atlas = build_atlas(&manifest, "sheet.png", (40, 20));

        let names: Vec<&str> = atlas.frames.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["coin", "star"]);
        assert_eq!(atlas.meta.image, "sheet.png");
        assert_eq!(atlas.meta.size, Size { w: 40, h: 20 });
        assert_eq!(atlas.meta.app, "sprite-cutter");
    }

    #[test]
    fn atlas_json_uses_phaser_field_names() {
        let manifest = Manifest::new(
            "sheet.png",
            vec![element("a", Rect::new(0, 0, 4, 4), Rect::new(1, 1, 2, 2))],
        );
        let json = serde_json::to_value(build_atlas(&manifest, "sheet.png", (4, 4))).unwrap();
        let frame = &json["frames"]["a"];
        assert_eq!(frame["spriteSourceSize"]["x"], 1);
        assert_eq!(frame["sourceSize"]["w"], 4);
        assert_eq!(frame["frame"]["w"], 2);
        assert_eq!(json["meta"]["format"], "RGBA8888");
        assert_eq!(json["meta"]["scale"], "1");
    }

    #[test]
    fn write_atlas_creates_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("atlas.json");
        let atlas = build_atlas(&Manifest::new("s.png", vec![]), "s.png", (1, 1));
        write_atlas(&path, &atlas).unwrap();

        let parsed: Atlas = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, atlas);
    }
}
