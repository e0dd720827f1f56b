//! Menu task 2: pull email addresses out of a text file.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::errors::TaskError;

pub const SAMPLE_FILE_NAME: &str = "sample_emails.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "extracted_emails.txt";

/// Written to `sample_emails.txt` when the default input is requested but missing.
pub const SAMPLE_CONTENT: &str = "Sample Email Addresses:
support@example.com
john.doe@company.org
jane_smith123@gmail.com
contact_us@domain.co.uk
sales-department@business.com
info@test-domain.net

Contact us at: help@support.com or call 123-456-7890.
For inquiries: admin@organization.edu, webmaster@site.io

Multiple duplicates: support@example.com, john.doe@company.org";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is a valid regex")
});

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailExtraction {
    /// Matches before de-duplication.
    pub total_found: usize,
    /// First spelling of each address, in order of appearance.
    pub unique: Vec<String>,
}

impl EmailExtraction {
    /// Count of unique addresses per domain, ordered by domain.
    pub fn domain_breakdown(&self) -> BTreeMap<String, usize> {
        let mut domains = BTreeMap::new();
        for email in &self.unique {
            let domain = email
                .split_once('@')
                .map(|(_, d)| d.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            *domains.entry(domain).or_insert(0) += 1;
        }
        domains
    }
}

/// Everything the email task did, for the caller to present.
#[derive(Debug, Clone)]
pub struct EmailRun {
    pub extraction: EmailExtraction,
    pub output: PathBuf,
    pub sample_created: bool,
}

/// Find every address in `text`; duplicates are dropped case-insensitively,
/// keeping the first spelling.
pub fn extract_emails(text: &str) -> EmailExtraction {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();
    let mut total_found = 0;
    for m in EMAIL_RE.find_iter(text) {
        total_found += 1;
        if seen.insert(m.as_str().to_lowercase()) {
            unique.push(m.as_str().to_string());
        }
    }
    EmailExtraction {
        total_found,
        unique,
    }
}

/// Text of the saved report.
pub fn render_report(source: &Path, extraction: &EmailExtraction, at: DateTime<Local>) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let source_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "EXTRACTED EMAIL ADDRESSES");
    let _ = writeln!(out, "{rule}\n");
    let _ = writeln!(out, "Source file: {source_name}");
    let _ = writeln!(out, "Extraction date: {}", at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Total unique emails: {}", extraction.unique.len());
    let _ = writeln!(out, "{}\n", "-".repeat(RULE_WIDTH));
    for (i, email) in extraction.unique.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {email}", i + 1);
    }
    out
}

/// Create the sample input when `input` is the default sample name and is
/// missing. Returns true when the file was written.
pub fn ensure_sample_file(input: &Path) -> Result<bool> {
    if input != Path::new(SAMPLE_FILE_NAME) || input.exists() {
        return Ok(false);
    }
    fs::write(input, SAMPLE_CONTENT)
        .with_context(|| format!("create sample file '{}'", input.display()))?;
    info!(path = %input.display(), "Created sample email file");
    Ok(true)
}

/// Read `input`, extract addresses, and write the report to `output`.
pub fn extract_to_file(input: &Path, output: &Path) -> Result<EmailRun> {
    let sample_created = ensure_sample_file(input)?;
    if !input.is_file() {
        return Err(TaskError::InputNotFound(input.to_path_buf()).into());
    }

    let bytes = fs::read(input).with_context(|| format!("read '{}'", input.display()))?;
    let content = String::from_utf8_lossy(&bytes);
    let extraction = extract_emails(&content);
    debug!(total = extraction.total_found, unique = extraction.unique.len(), "Scanned for emails");
    if extraction.unique.is_empty() {
        return Err(TaskError::NoEmailsFound(input.to_path_buf()).into());
    }

    let report = render_report(input, &extraction, Local::now());
    fs::write(output, report).with_context(|| format!("write report '{}'", output.display()))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        unique = extraction.unique.len(),
        "Saved extracted emails"
    );

    Ok(EmailRun {
        extraction,
        output: output.to_path_buf(),
        sample_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dedupe_keeps_first_spelling_in_order() {
        let got = extract_emails("Bob@X.com, alice@y.org; bob@x.COM and ALICE@y.org");
        assert_eq!(got.total_found, 4);
        assert_eq!(got.unique, vec!["Bob@X.com", "alice@y.org"]);
    }

    #[test]
    fn rejects_single_letter_tld_and_pipes() {
        let got = extract_emails("a@b.c x@y.c|m ok@fine.io");
        assert_eq!(got.unique, vec!["ok@fine.io"]);
    }

    #[test]
    fn sample_content_has_nine_unique_addresses() {
        let got = extract_emails(SAMPLE_CONTENT);
        assert_eq!(got.total_found, 11);
        assert_eq!(got.unique.len(), 9);
    }

    #[test]
    fn breakdown_is_sorted_by_domain() {
        let got = extract_emails("z@b.com a@a.com y@b.com");
        let domains: Vec<(String, usize)> = got.domain_breakdown().into_iter().collect();
        assert_eq!(domains, vec![("a.com".into(), 1), ("b.com".into(), 2)]);
    }

    #[test]
    fn report_layout() {
        let extraction = extract_emails("one@a.com two@b.com");
        let at = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let text = render_report(Path::new("/tmp/in/list.txt"), &extraction, at);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], "EXTRACTED EMAIL ADDRESSES");
        assert_eq!(lines[4], "Source file: list.txt");
        assert_eq!(lines[5], "Extraction date: 2024-05-06 07:08:09");
        assert_eq!(lines[6], "Total unique emails: 2");
        assert_eq!(lines[9], "  1. one@a.com");
        assert_eq!(lines[10], "  2. two@b.com");
    }
}
