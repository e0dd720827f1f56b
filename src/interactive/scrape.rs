//! Menu task 3: scrape a webpage's title and meta tags.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::path::Path;

use crate::config::Config;
use crate::output as out;
use crate::session::{SessionState, TaskKind};
use crate::tasks::scrape::{
    HttpFetcher, PRESET_URLS, PageFetcher, ScrapeRun, scrape_to_file, thousands,
};

const DEFAULT_CUSTOM_URL: &str = "https://example.com";

/// Preset labels followed by the custom entry.
pub fn choices() -> Vec<String> {
    let mut items: Vec<String> = PRESET_URLS
        .iter()
        .map(|(name, url)| format!("{name} ({url})"))
        .collect();
    items.push("Custom URL".to_string());
    items
}

pub fn run(cfg: &Config, theme: &ColorfulTheme, session: &mut SessionState) -> Result<()> {
    out::print_banner("WEBPAGE SCRAPER");
    let pick = Select::with_theme(theme)
        .with_prompt("Choose a page")
        .items(&choices())
        .default(0)
        .interact()?;

    let url = match PRESET_URLS.get(pick) {
        Some((_, url)) => url.to_string(),
        None => Input::with_theme(theme)
            .with_prompt("Custom URL")
            .default(DEFAULT_CUSTOM_URL.to_string())
            .interact_text()?,
    };

    let cwd = super::working_dir()?;
    let fetcher = HttpFetcher::new(cfg.http_timeout)?;
    execute(&fetcher, &url, &cwd, session).map(|_| ())
}

pub fn execute<F: PageFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    out_dir: &Path,
    session: &mut SessionState,
) -> Result<ScrapeRun> {
    out::print_info(&format!("Fetching {url} ..."));
    let run = match scrape_to_file(fetcher, url, out_dir) {
        Ok(r) => r,
        Err(e) => {
            session.record_failure(TaskKind::ScrapePage, format!("{e:#}"));
            return Err(e);
        }
    };

    let info = &run.info;
    out::print_success(&format!("{} {}", info.status, info.reason));
    out::print_user(&format!("Title:       {}", out::truncate(&info.meta.title, 80)));
    out::print_user(&format!("Description: {}", out::truncate(&info.meta.description, 80)));
    out::print_user(&format!("Keywords:    {}", out::truncate(&info.meta.keywords, 80)));
    out::print_user(&format!("Size:        {} bytes", thousands(info.content_length)));
    out::print_success(&format!("Saved report to {}", run.output.display()));

    session.record(TaskKind::ScrapePage, format!("{} -> {}", info.url, run.output.display()));
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_entry_comes_last() {
        let items = choices();
        assert_eq!(items.len(), PRESET_URLS.len() + 1);
        assert_eq!(items.last().map(String::as_str), Some("Custom URL"));
        assert!(items[0].starts_with("Example.com"));
    }
}
