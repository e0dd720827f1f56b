//! The three menu tasks: image mover, email extractor, webpage scraper.
//!
//! Each task is a plain function returning a report; prompting and printing
//! live in `interactive`.

pub mod emails;
pub mod images;
pub mod scrape;

use std::path::PathBuf;

/// Expand a leading `~` (alone or followed by a separator) to the home directory.
/// Input is trimmed; anything else is returned unchanged.
pub fn expand_tilde(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if let Some(rest) = trimmed.strip_prefix('~') {
        if (rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\'))
            && let Some(home) = dirs::home_dir()
        {
            let rest = rest.trim_start_matches(['/', '\\']);
            return if rest.is_empty() { home } else { home.join(rest) };
        }
    }
    PathBuf::from(trimmed)
}
