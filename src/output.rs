//! CLI output formatting for all commands.
//!
//! # Region Display Contract
//!
//! Every region line leads with its 1-based position in the region table and
//! its name, so output lines up with the config file. Sizes and reasons
//! follow on the same line; paths go on indented context lines.
//!
//! # Output Format
//!
//! ## Extract
//!
//! ```text
//! Sheet: processed-assets/ui-extracted/ui-master-highres.png
//!     5464x3072 Rgba8, alpha
//! Content bounds: (12, 40) 5400x3000
//! 001 panel_victory → 1602x1020
//! 007 star_empty_01 → 300x290 (untrimmed)
//! 012 icon_lock: skipped
//!     box (9000, 9000) 100x100 lies outside the 5464x3072 sheet
//!
//! Extracted 25 of 26 regions → processed-assets/ui-elements
//!     Metadata: processed-assets/ui-elements/metadata.json
//!     Atlas: processed-assets/ui-elements/atlas.json
//! ```
//!
//! ## Inspect
//!
//! ```text
//! 001 ui-master-highres.png
//!     Size: 5464x3072
//!     Color: Rgba8, alpha
//!     Content: (12, 40) 5400x3000
//! 002 broken.png
//!     Unreadable: Failed to decode broken.png: ...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::extract::{ExtractResult, ProcessEvent};
use crate::imaging::Rect;
use crate::inspect::{SheetReport, SheetStatus};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn color_label(color: &str, has_alpha: bool) -> String {
    if has_alpha {
        format!("{color}, alpha")
    } else {
        format!("{color}, opaque")
    }
}

fn bounds_label(bounds: Option<Rect>) -> String {
    match bounds {
        Some(rect) => rect.to_string(),
        None => "none".to_string(),
    }
}

// ============================================================================
// Extract
// ============================================================================

/// Format a single extraction progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::SheetLoaded {
            source,
            width,
            height,
            color,
            has_alpha,
        } => vec![
            format!("Sheet: {source}"),
            format!(
                "{}{width}x{height} {}",
                indent(1),
                color_label(color, *has_alpha)
            ),
        ],
        ProcessEvent::ContentFound { bounds } => vec![format!("Content bounds: {bounds}")],
        ProcessEvent::NoContent => vec!["No content above threshold, nothing to extract".to_string()],
        ProcessEvent::RegionExtracted {
            index,
            name,
            width,
            height,
            trimmed,
        } => {
            let suffix = if *trimmed { "" } else { " (untrimmed)" };
            vec![format!(
                "{} {name} → {width}x{height}{suffix}",
                format_index(*index)
            )]
        }
        ProcessEvent::RegionSkipped {
            index,
            name,
            reason,
        } => vec![
            format!("{} {name}: skipped", format_index(*index)),
            format!("{}{reason}", indent(1)),
        ],
    }
}

/// Format the end-of-run summary.
pub fn format_extract_summary(result: &ExtractResult, output_dir: &Path) -> Vec<String> {
    let extracted = result.manifest.total;
    let attempted = extracted + result.skipped.len();

    let mut lines = vec![
        String::new(),
        format!(
            "Extracted {extracted} of {attempted} regions → {}",
            output_dir.display()
        ),
        format!("{}Metadata: {}", indent(1), result.metadata_path.display()),
    ];
    if let Some(atlas) = &result.atlas_path {
        lines.push(format!("{}Atlas: {}", indent(1), atlas.display()));
    }
    lines
}

pub fn print_extract_summary(result: &ExtractResult, output_dir: &Path) {
    for line in format_extract_summary(result, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Content bounds in both corner and size form.
///
/// ```text
/// Content bounds: x 40..=49, y 40..=49 (10x10)
/// ```
pub fn format_bounds(bounds: Option<Rect>) -> Vec<String> {
    match bounds {
        Some(r) => vec![format!(
            "Content bounds: x {}..={}, y {}..={} ({}x{})",
            r.x,
            r.right(),
            r.y,
            r.bottom(),
            r.width,
            r.height
        )],
        None => vec!["No content above threshold".to_string()],
    }
}

pub fn print_bounds(bounds: Option<Rect>) {
    for line in format_bounds(bounds) {
        println!("{}", line);
    }
}

// ============================================================================
// Inspect
// ============================================================================

/// Format inspection reports, one block per sheet.
///
/// Paths are shown relative to `root` when they live under it.
pub fn format_inspect(reports: &[SheetReport], root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        let display = match report.path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
            _ => report
                .path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| report.path.display().to_string()),
        };
        lines.push(format!("{} {display}", format_index(i + 1)));

        match &report.status {
            SheetStatus::Ok {
                width,
                height,
                color,
                has_alpha,
                bounds,
            } => {
                lines.push(format!("{}Size: {width}x{height}", indent(1)));
                lines.push(format!("{}Color: {}", indent(1), color_label(color, *has_alpha)));
                lines.push(format!("{}Content: {}", indent(1), bounds_label(*bounds)));
            }
            SheetStatus::Unreadable(reason) => {
                lines.push(format!("{}Unreadable: {reason}", indent(1)));
            }
        }
    }
    if reports.is_empty() {
        lines.push("No images found".to_string());
    }
    lines
}

pub fn print_inspect(reports: &[SheetReport], root: &Path) {
    for line in format_inspect(reports, root) {
        println!("{}", line);
    }
}
