//! Sprite extraction.
//!
//! Takes one sprite sheet and a region table, and writes one trimmed PNG per
//! region plus the metadata (and optionally atlas) JSON.
//!
//! ## Per-region pipeline
//!
//! ```text
//! region box ──resolve──▶ pixel rect ──pad + clamp──▶ padded crop ──trim──▶ {name}.png
//! ```
//!
//! Padding keeps anti-aliased edges that spill past a hand-measured box;
//! trimming then removes whatever transparent margin is left. A region whose
//! padded crop has no content is written untrimmed rather than failing.
//!
//! ## Output Structure
//!
//! ```text
//! ui-elements/
//! ├── metadata.json      # source, elements[], total
//! ├── atlas.json         # Phaser JSON-hash frames on the source sheet
//! ├── panel_victory.png
//! ├── star_filled_01.png
//! └── ...
//! ```
//!
//! ## Parallel Processing
//!
//! Regions are independent pure functions of the read-only sheet, so they
//! are cut and encoded in parallel with [rayon](https://docs.rs/rayon).
//! Results are collected in region-table order regardless of which worker
//! finishes first. A failing region is reported and skipped; it never aborts
//! the run.

use crate::atlas::{AtlasError, build_atlas, write_atlas};
use crate::config::CutterConfig;
use crate::imaging::{
    BackendError, ImageBackend, Rect, RustBackend, Threshold, compute_content_bounds, cut_sprite,
};
use crate::regions::{Region, validate_regions};
use crate::types::{ExtractedElement, Manifest, Placement};
use image::RgbaImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, warn};

pub const METADATA_FILE: &str = "metadata.json";
pub const ATLAS_FILE: &str = "atlas.json";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Atlas generation failed: {0}")]
    Atlas(#[from] AtlasError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Invalid region table: {0}")]
    InvalidRegions(String),
}

/// Settings for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub threshold: Threshold,
    pub padding: u32,
    pub regions: Vec<Region>,
    pub write_atlas: bool,
}

impl ExtractConfig {
    /// Build an ExtractConfig from CutterConfig values.
    pub fn from_cutter_config(config: &CutterConfig) -> Self {
        Self {
            threshold: Threshold::new(config.extract.threshold),
            padding: config.extract.padding,
            regions: config.regions.clone(),
            write_atlas: config.extract.atlas,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::from_cutter_config(&CutterConfig::default())
    }
}

/// Progress events emitted while extracting.
///
/// Sent over an optional channel so the CLI can print as work happens while
/// the library stays free of stdout writes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    SheetLoaded {
        source: String,
        width: u32,
        height: u32,
        color: String,
        has_alpha: bool,
    },
    /// Bounding box of all content on the sheet.
    ContentFound { bounds: Rect },
    /// Nothing on the sheet is above the threshold; no regions are processed.
    NoContent,
    RegionExtracted {
        /// 1-based position in the region table.
        index: usize,
        name: String,
        width: u32,
        height: u32,
        /// False when the region had no content and was written untrimmed.
        trimmed: bool,
    },
    RegionSkipped {
        index: usize,
        name: String,
        reason: String,
    },
}

/// A region that produced no file.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRegion {
    pub name: String,
    pub reason: String,
}

/// Outcome of a full extraction run.
#[derive(Debug)]
pub struct ExtractResult {
    pub manifest: Manifest,
    pub skipped: Vec<SkippedRegion>,
    /// `None` for a fully transparent sheet.
    pub content_bounds: Option<Rect>,
    pub metadata_path: PathBuf,
    pub atlas_path: Option<PathBuf>,
}

enum RegionOutcome {
    Extracted(ExtractedElement),
    Skipped(SkippedRegion),
}

fn emit(progress: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        // Receiver gone means nobody is listening; extraction carries on.
        tx.send(event).ok();
    }
}

pub fn extract(
    input: &Path,
    output_dir: &Path,
    config: &ExtractConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ExtractResult, ExtractError> {
    let backend = RustBackend::new();
    extract_with_backend(&backend, input, output_dir, config, progress)
}

/// Extract using a specific backend (allows testing with mock).
pub fn extract_with_backend(
    backend: &impl ImageBackend,
    input: &Path,
    output_dir: &Path,
    config: &ExtractConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ExtractResult, ExtractError> {
    // Names become file stems; checked before anything is written.
    validate_regions(&config.regions).map_err(ExtractError::InvalidRegions)?;
    if !input.exists() {
        return Err(ExtractError::SourceNotFound(input.to_path_buf()));
    }

    let sheet = backend.load(input)?;
    let (width, height) = sheet.dimensions();
    debug!(source = %input.display(), width, height, color = %sheet.color, "sheet loaded");
    emit(
        &progress,
        ProcessEvent::SheetLoaded {
            source: input.display().to_string(),
            width,
            height,
            color: sheet.color.clone(),
            has_alpha: sheet.has_alpha,
        },
    );

    std::fs::create_dir_all(output_dir)?;

    let content_bounds = compute_content_bounds(&sheet.pixels, config.threshold);
    let outcomes: Vec<RegionOutcome> = match content_bounds {
        None => {
            emit(&progress, ProcessEvent::NoContent);
            Vec::new()
        }
        Some(bounds) => {
            emit(&progress, ProcessEvent::ContentFound { bounds });
            config
                .regions
                .par_iter()
                .enumerate()
                .map_with(progress.clone(), |tx, (i, region)| {
                    extract_region(backend, &sheet.pixels, region, i + 1, output_dir, config, tx)
                })
                .collect()
        }
    };

    let mut elements = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            RegionOutcome::Extracted(element) => elements.push(element),
            RegionOutcome::Skipped(region) => skipped.push(region),
        }
    }

    let manifest = Manifest::new(input.display().to_string(), elements);

    let metadata_path = output_dir.join(METADATA_FILE);
    std::fs::write(&metadata_path, serde_json::to_string_pretty(&manifest)?)?;

    let atlas_path = if config.write_atlas {
        let image_name = input
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let atlas = build_atlas(&manifest, &image_name, (width, height));
        let path = output_dir.join(ATLAS_FILE);
        write_atlas(&path, &atlas)?;
        Some(path)
    } else {
        None
    };

    Ok(ExtractResult {
        manifest,
        skipped,
        content_bounds,
        metadata_path,
        atlas_path,
    })
}

fn extract_region(
    backend: &impl ImageBackend,
    sheet: &RgbaImage,
    region: &Region,
    index: usize,
    output_dir: &Path,
    config: &ExtractConfig,
    progress: &Option<Sender<ProcessEvent>>,
) -> RegionOutcome {
    let (width, height) = sheet.dimensions();
    let original = region.resolve(width, height);

    let skip = |reason: String| {
        warn!(region = %region.name, "skipped: {reason}");
        emit(
            progress,
            ProcessEvent::RegionSkipped {
                index,
                name: region.name.clone(),
                reason: reason.clone(),
            },
        );
        RegionOutcome::Skipped(SkippedRegion {
            name: region.name.clone(),
            reason,
        })
    };

    let Some(cut) = cut_sprite(sheet, original, config.padding, config.threshold) else {
        let reason = if original.is_empty() {
            format!("box {original} resolved to an empty box on the {width}x{height} sheet")
        } else {
            format!("box {original} lies outside the {width}x{height} sheet")
        };
        return skip(reason);
    };

    if !cut.has_content {
        warn!(
            region = %region.name,
            padded = %cut.padded,
            "no pixels above threshold, keeping the untrimmed region"
        );
    }

    let path = output_dir.join(format!("{}.png", region.name));
    if let Err(e) = backend.save_png(&cut.image, &path) {
        return skip(e.to_string());
    }

    let (sprite_w, sprite_h) = cut.image.dimensions();
    debug!(region = %region.name, trimmed = %cut.trimmed, "sprite written");
    emit(
        progress,
        ProcessEvent::RegionExtracted {
            index,
            name: region.name.clone(),
            width: sprite_w,
            height: sprite_h,
            trimmed: cut.has_content,
        },
    );

    RegionOutcome::Extracted(ExtractedElement {
        name: region.name.clone(),
        original_box: original.to_array(),
        cropped_size: [sprite_w, sprite_h],
        file: path.display().to_string(),
        placement: Placement {
            padded: cut.padded,
            trimmed: cut.trimmed,
            has_content: cut.has_content,
        },
    })
}
