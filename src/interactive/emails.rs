//! Menu task 2: extract email addresses.

use anyhow::Result;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use std::path::Path;

use crate::output as out;
use crate::session::{SessionState, TaskKind};
use crate::tasks::emails::{DEFAULT_OUTPUT_FILE, EmailRun, SAMPLE_FILE_NAME, extract_to_file};
use crate::tasks::expand_tilde;

/// Addresses echoed to the terminal after a run.
const PREVIEW_COUNT: usize = 5;

pub fn run(theme: &ColorfulTheme, session: &mut SessionState) -> Result<()> {
    out::print_banner("EXTRACT EMAIL ADDRESSES");
    let input: String = Input::with_theme(theme)
        .with_prompt("Input text file")
        .default(SAMPLE_FILE_NAME.to_string())
        .interact_text()?;
    let output: String = Input::with_theme(theme)
        .with_prompt("Output file")
        .default(DEFAULT_OUTPUT_FILE.to_string())
        .interact_text()?;

    execute(&expand_tilde(&input), &expand_tilde(&output), session).map(|_| ())
}

pub fn execute(input: &Path, output: &Path, session: &mut SessionState) -> Result<EmailRun> {
    let run = match extract_to_file(input, output) {
        Ok(r) => r,
        Err(e) => {
            session.record_failure(TaskKind::ExtractEmails, format!("{e:#}"));
            return Err(e);
        }
    };

    if run.sample_created {
        out::print_info(&format!("Created sample file: {}", input.display()));
    }
    let ex = &run.extraction;
    out::print_success(&format!(
        "Found {} email(s), {} unique. Saved to {}",
        ex.total_found,
        ex.unique.len(),
        run.output.display()
    ));
    out::print_user("Domains:");
    for (domain, count) in ex.domain_breakdown() {
        out::print_user(&format!("  {domain:<30} {count}"));
    }
    out::print_user("First addresses:");
    for (i, email) in ex.unique.iter().take(PREVIEW_COUNT).enumerate() {
        out::print_user(&format!("  {:>2}. {email}", i + 1));
    }
    if ex.unique.len() > PREVIEW_COUNT {
        out::print_user(&format!("  ... and {} more", ex.unique.len() - PREVIEW_COUNT));
    }

    session.record(
        TaskKind::ExtractEmails,
        format!("{} unique address(es) from {}", ex.unique.len(), input.display()),
    );
    Ok(run)
}
