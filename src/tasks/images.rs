//! Menu task 1: move every image file out of a folder.
//!
//! Scans one directory level, then hands each file to the relocator in name
//! order. Failures are collected, never fatal.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::errors::TaskError;
use crate::relocate::{
    CLOUD_SIGNATURE, MoveOutcome, MoveRequest, RetryPolicy, StdFs, io_error_with_help,
    relocate_with,
};
use crate::shutdown;

/// Failures listed in the summary before "... and N more".
pub const MAX_LISTED_FAILURES: usize = 5;

/// Shown when any failure looks like a cloud-sync placeholder problem.
pub const CLOUD_TIPS: [&str; 4] = [
    "Check if OneDrive (or your sync client) is running properly",
    "Try moving files from a different folder",
    "Restart the sync client or your computer",
    "Try copying instead of moving files",
];

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImageMoveReport {
    pub found: usize,
    pub jpg_count: usize,
    pub png_count: usize,
    pub moved: Vec<(String, PathBuf)>,
    pub failed: Vec<(String, String)>,
    /// Set when Ctrl-C stopped the run between files.
    pub interrupted: bool,
}

impl ImageMoveReport {
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    /// True when any failure reason mentions the cloud signature.
    pub fn needs_cloud_hint(&self) -> bool {
        self.failed
            .iter()
            .any(|(_, reason)| reason.to_lowercase().contains(CLOUD_SIGNATURE))
    }

    /// Summary lines for the failures: at most `MAX_LISTED_FAILURES`, then a
    /// trailing "... and N more" when some were left out.
    pub fn failure_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .failed
            .iter()
            .take(MAX_LISTED_FAILURES)
            .map(|(name, reason)| format!("• {name}: {reason}"))
            .collect();
        if self.failed.len() > MAX_LISTED_FAILURES {
            lines.push(format!(
                "... and {} more",
                self.failed.len() - MAX_LISTED_FAILURES
            ));
        }
        lines
    }
}

fn lower_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Regular files directly inside `folder` whose extension (case-insensitive)
/// is one of `extensions`, sorted by name.
pub fn scan_images(folder: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("scan folder '{}'", folder.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if lower_extension(&name).is_some_and(|ext| extensions.iter().any(|e| *e == ext)) {
            found.push(path.to_path_buf());
        }
    }
    Ok(found)
}

/// Move every image in `folder` into `destination`.
///
/// Errors with `TaskError::FolderNotFound` when `folder` is not a directory.
/// Per-file problems end up in `ImageMoveReport::failed`.
pub fn move_images(
    folder: &Path,
    destination: &Path,
    extensions: &[String],
    policy: &RetryPolicy,
) -> Result<ImageMoveReport> {
    if !folder.is_dir() {
        return Err(TaskError::FolderNotFound(folder.to_path_buf()).into());
    }

    std::fs::create_dir_all(destination)
        .map_err(io_error_with_help("create destination", destination))?;

    let files = scan_images(folder, extensions)?;
    let mut report = ImageMoveReport {
        found: files.len(),
        ..ImageMoveReport::default()
    };
    for f in &files {
        match lower_extension(&f.to_string_lossy()).as_deref() {
            Some("jpg") | Some("jpeg") => report.jpg_count += 1,
            Some("png") => report.png_count += 1,
            _ => {}
        }
    }
    info!(
        folder = %folder.display(),
        found = report.found,
        jpg = report.jpg_count,
        png = report.png_count,
        "Scanned for images"
    );

    for src in files {
        if shutdown::is_requested() {
            warn!("Interrupted; leaving remaining images in place");
            report.interrupted = true;
            break;
        }
        let Some(request) = MoveRequest::for_file(&src, destination) else {
            continue;
        };
        let name = request.display_name();
        match relocate_with(&StdFs, policy, &request) {
            MoveOutcome::Success { final_path, .. } => report.moved.push((name, final_path)),
            MoveOutcome::Failure { reason, .. } => report.failed.push((name, reason)),
        }
    }

    info!(
        moved = report.moved_count(),
        failed = report.failed.len(),
        dest = %destination.display(),
        "Image move finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn exts() -> Vec<String> {
        vec!["jpg".into(), "jpeg".into(), "png".into()]
    }

    #[test]
    fn scan_is_case_insensitive_sorted_and_shallow() {
        let td = tempdir().unwrap();
        for name in ["b.PNG", "a.jpg", "c.Jpeg", "notes.txt", "jpg"] {
            fs::write(td.path().join(name), b"x").unwrap();
        }
        fs::create_dir(td.path().join("nested")).unwrap();
        fs::write(td.path().join("nested").join("deep.png"), b"x").unwrap();

        let names: Vec<String> = scan_images(td.path(), &exts())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.Jpeg"]);
    }

    #[test]
    fn missing_folder_is_a_typed_error() {
        let td = tempdir().unwrap();
        let err = move_images(
            &td.path().join("nope"),
            &td.path().join("out"),
            &exts(),
            &RetryPolicy::new(1, Duration::ZERO),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::FolderNotFound(_))
        ));
    }

    #[test]
    fn failure_lines_are_capped() {
        let report = ImageMoveReport {
            failed: (0..7).map(|i| (format!("f{i}.png"), "boom".into())).collect(),
            ..ImageMoveReport::default()
        };
        let lines = report.failure_lines();
        assert_eq!(lines.len(), MAX_LISTED_FAILURES + 1);
        assert_eq!(lines.last().unwrap(), "... and 2 more");
    }

    #[test]
    fn cloud_hint_follows_reasons() {
        let mut report = ImageMoveReport::default();
        report.failed.push(("a.png".into(), "Permission denied for file: a.png".into()));
        assert!(!report.needs_cloud_hint());
        report
            .failed
            .push(("b.png".into(), "Cloud file error for b.png: provider offline".into()));
        assert!(report.needs_cloud_hint());
    }
}
