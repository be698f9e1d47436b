//! Sheet inspection.
//!
//! Reports dimensions, color type, alpha presence and content bounds for a
//! single image, or for every supported image under a directory. Used to
//! check a sheet before writing its region table.

use crate::imaging::{
    BackendError, ImageBackend, Rect, Threshold, compute_content_bounds, is_supported_image,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Path not found: {0}")]
    NotFound(PathBuf),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    pub path: PathBuf,
    pub status: SheetStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetStatus {
    Ok {
        width: u32,
        height: u32,
        color: String,
        has_alpha: bool,
        /// `None` when nothing is above the threshold.
        bounds: Option<Rect>,
    },
    /// Only produced while walking a directory.
    Unreadable(String),
}

/// Inspect a file, or every supported image below a directory.
///
/// A single file that fails to load is an error. Inside a directory, failures
/// are recorded per file and the walk continues.
pub fn inspect(
    backend: &impl ImageBackend,
    path: &Path,
    threshold: Threshold,
) -> Result<Vec<SheetReport>, InspectError> {
    if !path.exists() {
        return Err(InspectError::NotFound(path.to_path_buf()));
    }

    if path.is_file() {
        let status = inspect_sheet(backend, path, threshold)?;
        return Ok(vec![SheetReport {
            path: path.to_path_buf(),
            status,
        }]);
    }

    let mut reports = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
            continue;
        }
        let status = inspect_sheet(backend, entry.path(), threshold)
            .unwrap_or_else(|e| SheetStatus::Unreadable(e.to_string()));
        reports.push(SheetReport {
            path: entry.into_path(),
            status,
        });
    }
    debug!(dir = %path.display(), sheets = reports.len(), "inspected directory");
    Ok(reports)
}

fn inspect_sheet(
    backend: &impl ImageBackend,
    path: &Path,
    threshold: Threshold,
) -> Result<SheetStatus, BackendError> {
    let sheet = backend.load(path)?;
    let (width, height) = sheet.dimensions();
    Ok(SheetStatus::Ok {
        width,
        height,
        bounds: compute_content_bounds(&sheet.pixels, threshold),
        color: sheet.color,
        has_alpha: sheet.has_alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{create_dummy_source, sheet_with_square, transparent_sheet, write_png};
    use tempfile::TempDir;

    #[test]
    fn single_file_reports_bounds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ui.png");
        create_dummy_source(&path);
        let backend = MockBackend::with_sheet(sheet_with_square(100, 100, 40, 40, 10));

        let reports = inspect(&backend, &path, Threshold::default()).unwrap();

        assert_eq!(
            reports,
            vec![SheetReport {
                path: path.clone(),
                status: SheetStatus::Ok {
                    width: 100,
                    height: 100,
                    color: "Rgba8".to_string(),
                    has_alpha: true,
                    bounds: Some(Rect::new(40, 40, 10, 10)),
                },
            }]
        );
    }

    #[test]
    fn transparent_file_has_no_bounds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blank.png");
        create_dummy_source(&path);
        let backend = MockBackend::with_sheet(transparent_sheet(50, 50));

        let reports = inspect(&backend, &path, Threshold::default()).unwrap();
        assert!(matches!(reports[0].status, SheetStatus::Ok { bounds: None, .. }));
    }

    #[test]
    fn unreadable_single_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        create_dummy_source(&path);

        let result = inspect(&MockBackend::new(), &path, Threshold::default());
        assert!(matches!(result, Err(InspectError::Imaging(_))));
    }

    #[test]
    fn missing_path_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = inspect(
            &MockBackend::new(),
            &tmp.path().join("nope"),
            Threshold::default(),
        );
        assert!(matches!(result, Err(InspectError::NotFound(_))));
    }

    #[test]
    fn directory_walk_is_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        write_png(&tmp.path().join("b.png"), &sheet_with_square(20, 20, 5, 5, 4));
        write_png(&tmp.path().join("a.png"), &transparent_sheet(8, 8));
        write_png(&tmp.path().join("nested/c.png"), &sheet_with_square(30, 10, 0, 0, 2));
        std::fs::write(tmp.path().join("notes.txt"), "not an image").unwrap();

        let reports = inspect(&RustBackend::new(), tmp.path(), Threshold::default()).unwrap();

        let names: Vec<String> = reports
            .iter()
            .map(|r| {
                r.path
                    .strip_prefix(tmp.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "nested/c.png"]);
        assert!(matches!(
            reports[1].status,
            SheetStatus::Ok {
                width: 20,
                height: 20,
                bounds: Some(Rect { x: 5, y: 5, width: 4, height: 4 }),
                ..
            }
        ));
    }

    #[test]
    fn unreadable_file_in_directory_is_recorded() {
        let tmp = TempDir::new().unwrap();
        write_png(&tmp.path().join("good.png"), &sheet_with_square(10, 10, 1, 1, 2));
        std::fs::write(tmp.path().join("junk.png"), b"definitely not a png").unwrap();

        let reports = inspect(&RustBackend::new(), tmp.path(), Threshold::default()).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(matches!(reports[0].status, SheetStatus::Ok { .. }));
        assert!(matches!(reports[1].status, SheetStatus::Unreadable(_)));
    }
}
