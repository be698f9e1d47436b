//! # Sprite Cutter
//!
//! Cuts UI sprites out of a large transparent sprite sheet. Each region of a
//! region table is padded, cropped, trimmed to its visible pixels and written
//! as its own PNG, along with a JSON manifest and a Phaser texture atlas.
//!
//! # Architecture
//!
//! ```text
//! sheet.png ──load──▶ RGBA8 ──content check──▶ regions (parallel) ──▶ {name}.png
//!                                                                  ├─▶ metadata.json
//!                                                                  └─▶ atlas.json
//! ```
//!
//! Everything that touches pixels is a pure function over `image::RgbaImage`;
//! decoding and encoding sit behind the [`imaging::ImageBackend`] trait so
//! the pipeline can be tested without real files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Rect math, content bounds, pad/crop/trim, and the image backend |
//! | [`regions`] | Named regions in pixels or sheet fractions, plus the stock UI layout |
//! | [`config`] | `sprite-cutter.toml` loading, validation and stock config generation |
//! | [`extract`] | The extraction pipeline and its progress events |
//! | [`atlas`] | Phaser "JSON hash" atlas for the source sheet |
//! | [`inspect`] | Sheet size, color type and content bounds, for a file or directory |
//! | [`types`] | Serialized manifest types (`metadata.json`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Strict Threshold
//!
//! A pixel is content when its alpha is strictly greater than the threshold
//! (default 10). Faint glow and compression noise below that level are treated
//! as transparent, so trimmed sprites don't keep a near-invisible halo.
//!
//! ## Pad, Then Trim
//!
//! Region boxes are measured by hand and often clip anti-aliased edges. Each
//! box is grown by a padding margin (default 20px, clamped to the sheet) before
//! trimming, so the final sprite is the tight bounds of what is actually there
//! rather than of what was measured.
//!
//! ## Regions Never Abort a Run
//!
//! A region that lies off the sheet or fails to save is reported and skipped.
//! A region with no visible pixels is written untrimmed. Only a missing or
//! undecodable sheet stops extraction.

pub mod atlas;
pub mod config;
pub mod extract;
pub mod imaging;
pub mod inspect;
pub mod output;
pub mod regions;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
