//! Menu task 1: move image files.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::output as out;
use crate::session::{SessionState, TaskKind};
use crate::tasks::expand_tilde;
use crate::tasks::images::{CLOUD_TIPS, ImageMoveReport, move_images};

/// `image_destination` as-is when absolute, else under the working directory.
pub fn default_destination(cwd: &Path, image_destination: &Path) -> PathBuf {
    if image_destination.is_absolute() {
        image_destination.to_path_buf()
    } else {
        cwd.join(image_destination)
    }
}

pub fn run(cfg: &Config, theme: &ColorfulTheme, session: &mut SessionState) -> Result<()> {
    out::print_banner("MOVE IMAGE FILES");
    let cwd = super::working_dir()?;

    let source: String = Input::with_theme(theme)
        .with_prompt("Source folder")
        .default(cwd.display().to_string())
        .interact_text()?;
    let source = expand_tilde(&source);
    if !source.is_dir() {
        out::print_error(&format!("Folder '{}' not found!", source.display()));
        session.record_failure(
            TaskKind::MoveImages,
            format!("folder not found: {}", source.display()),
        );
        return Ok(());
    }

    let dest: String = Input::with_theme(theme)
        .with_prompt("Destination folder")
        .default(default_destination(&cwd, &cfg.image_destination).display().to_string())
        .interact_text()?;
    let dest = expand_tilde(&dest);

    let shown = dunce::canonicalize(&source).unwrap_or_else(|_| source.clone());
    out::print_info(&format!("Source:      {}", shown.display()));
    out::print_info(&format!("Destination: {}", dest.display()));

    let proceed = Confirm::with_theme(theme)
        .with_prompt("Proceed with moving image files?")
        .default(true)
        .interact()
        .unwrap_or(false);
    if !proceed {
        out::print_warn("Operation cancelled.");
        return Ok(());
    }

    execute(cfg, &source, &dest, session).map(|_| ())
}

/// Move, print the report and record the outcome.
pub fn execute(
    cfg: &Config,
    source: &Path,
    dest: &Path,
    session: &mut SessionState,
) -> Result<ImageMoveReport> {
    let report = match move_images(source, dest, &cfg.image_extensions, &cfg.retry_policy()) {
        Ok(r) => r,
        Err(e) => {
            session.record_failure(TaskKind::MoveImages, format!("{e:#}"));
            return Err(e);
        }
    };
    print_report(&report, dest);

    let summary = format!("moved {} of {} image(s)", report.moved_count(), report.found);
    if report.failed.is_empty() && !report.interrupted {
        session.record(TaskKind::MoveImages, summary);
    } else {
        session.record_failure(TaskKind::MoveImages, summary);
    }
    Ok(report)
}

fn print_report(report: &ImageMoveReport, dest: &Path) {
    if report.found == 0 {
        out::print_warn("No image files found in the source folder.");
        return;
    }
    out::print_info(&format!(
        "Found {} image(s): {} JPG, {} PNG",
        report.found, report.jpg_count, report.png_count
    ));

    if report.moved_count() > 0 {
        out::print_success(&format!(
            "Moved {} file(s) to {}",
            report.moved_count(),
            dest.display()
        ));
    }
    if !report.failed.is_empty() {
        out::print_error(&format!("Failed to move {} file(s):", report.failed.len()));
        for line in report.failure_lines() {
            out::print_user(&format!("  {line}"));
        }
        if report.needs_cloud_hint() {
            out::print_warn("Some files look like cloud placeholders. Try:");
            for tip in CLOUD_TIPS {
                out::print_user(&format!("  - {tip}"));
            }
        }
    }
    if report.interrupted {
        out::print_warn("Stopped early: interrupted by user.");
    }
}
