//! Menu task 3: fetch a page and report its title and meta tags.
//!
//! Fetching sits behind `PageFetcher` so the parsing and report code can be
//! exercised without a network. One request per run; no retries.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::ScrapeError;

/// Sent with every request; some sites refuse clients without one.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Menu presets as (label, url).
pub const PRESET_URLS: [(&str, &str); 4] = [
    ("Example.com", "https://example.com/"),
    ("Wikipedia", "https://en.wikipedia.org/wiki/Web_scraping"),
    ("Google", "https://www.google.com/"),
    ("Fast Test", "https://httpbin.org/html"),
];

pub const NO_TITLE: &str = "No title found";
pub const NO_DESCRIPTION: &str = "No description found";
pub const NO_KEYWORDS: &str = "No keywords found";

const RULE_WIDTH: usize = 60;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("title pattern is a valid regex")
});
static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("meta pattern is a valid regex"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("attribute pattern is a valid regex")
});

/// Raw HTTP response as far as the scraper cares.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub reason: String,
    pub body: String,
    pub content_type: Option<String>,
    pub server: Option<String>,
}

/// Anything that can turn a URL into a page.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError>;
}

/// Blocking reqwest client with a browser-like User-Agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::Request(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    fn map_error(&self, url: &str, e: reqwest::Error) -> ScrapeError {
        if e.is_timeout() {
            ScrapeError::Timeout(self.timeout.as_secs())
        } else if e.is_connect() {
            ScrapeError::Connect(url.to_string())
        } else {
            ScrapeError::Request(e.to_string())
        }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_error(url, e))?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
                reason,
            });
        }

        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(reqwest::header::CONTENT_TYPE);
        let server = header(reqwest::header::SERVER);
        let final_url = response.url().to_string();

        let bytes = response.bytes().map_err(|e| self.map_error(url, e))?;
        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            reason,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            content_type,
            server,
        })
    }
}

/// Title and meta information extracted from HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// Everything written to the report.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    pub url: String,
    pub status: u16,
    pub reason: String,
    pub meta: PageMeta,
    pub content_type: Option<String>,
    pub content_length: usize,
    pub server: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScrapeRun {
    pub info: PageInfo,
    pub output: PathBuf,
}

/// Prefix `https://` unless the input already carries an http(s) scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Content of the first `<meta name="...">` whose name matches (case-insensitive).
fn meta_content(html: &str, wanted: &str) -> Option<String> {
    for tag in META_RE.find_iter(html) {
        let mut name = None;
        let mut content = None;
        for cap in ATTR_RE.captures_iter(tag.as_str()) {
            let key = cap[1].to_ascii_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match key.as_str() {
                "name" => name = Some(value.trim().to_string()),
                "content" => content = Some(value.to_string()),
                _ => {}
            }
        }
        if name.is_some_and(|n| n.eq_ignore_ascii_case(wanted)) {
            return content.map(|c| decode_entities(c.trim()));
        }
    }
    None
}

/// Pull the title, description and keywords out of `html`; missing pieces
/// get their "No ... found" placeholders.
pub fn parse_page(html: &str) -> PageMeta {
    let title = TITLE_RE
        .captures(html)
        .map(|c| collapse_whitespace(&decode_entities(&c[1])))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());
    let description =
        meta_content(html, "description").unwrap_or_else(|| NO_DESCRIPTION.to_string());
    let keywords = meta_content(html, "keywords").unwrap_or_else(|| NO_KEYWORDS.to_string());
    PageMeta {
        title,
        description,
        keywords,
    }
}

/// Host of `url` without `www.`, reduced to alphanumerics, `-` and `_`.
pub fn safe_domain(url: &str) -> String {
    let after_scheme = url.split_once("//").map(|(_, rest)| rest).unwrap_or(url);
    let host = after_scheme.split('/').next().unwrap_or_default();
    host.replace("www.", "")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// `webpage_{safe_domain}_{YYYYmmdd_HHMMSS}.txt`
pub fn output_file_name(url: &str, at: DateTime<Local>) -> String {
    format!(
        "webpage_{}_{}.txt",
        safe_domain(url),
        at.format("%Y%m%d_%H%M%S")
    )
}

pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_report(info: &PageInfo, at: DateTime<Local>) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "WEBPAGE INFORMATION SCRAPER");
    let _ = writeln!(out, "{rule}\n");
    let _ = writeln!(out, "URL: {}", info.url);
    let _ = writeln!(out, "Scraped at: {}", at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Status: {} {}\n", info.status, info.reason);
    let _ = writeln!(out, "{rule}\n");
    let _ = writeln!(out, "PAGE TITLE:\n{}\n", info.meta.title);
    let _ = writeln!(out, "{rule}\n");
    let _ = writeln!(out, "META DESCRIPTION:\n{}\n", info.meta.description);
    let _ = writeln!(out, "{rule}\n");
    let _ = writeln!(out, "META KEYWORDS:\n{}\n", info.meta.keywords);
    let _ = writeln!(out, "{rule}\n");
    let _ = writeln!(out, "TECHNICAL DETAILS:");
    let _ = writeln!(
        out,
        "- Content Type: {}",
        info.content_type.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(out, "- Content Length: {} bytes", thousands(info.content_length));
    let _ = writeln!(out, "- Server: {}\n", info.server.as_deref().unwrap_or("Unknown"));
    let _ = write!(out, "{rule}");
    out
}

/// Fetch `url` (normalized first), parse it, and save the report in `out_dir`.
pub fn scrape_to_file<F: PageFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    out_dir: &Path,
) -> Result<ScrapeRun> {
    let url = normalize_url(url);
    let page = fetcher.fetch(&url)?;
    let meta = parse_page(&page.body);
    let info = PageInfo {
        url: url.clone(),
        status: page.status,
        reason: page.reason,
        meta,
        content_type: page.content_type,
        content_length: page.body.len(),
        server: page.server,
    };

    let now = Local::now();
    let output = out_dir.join(output_file_name(&url, now));
    fs::write(&output, render_report(&info, now))
        .with_context(|| format!("write report '{}'", output.display()))?;
    info!(url = %url, status = info.status, output = %output.display(), "Saved page report");

    Ok(ScrapeRun { info, output })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn scheme_is_added_only_when_missing() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url(" http://a.b/c "), "http://a.b/c");
        assert_eq!(normalize_url("HTTPS://A.B"), "HTTPS://A.B");
    }

    #[test]
    fn meta_attributes_in_any_order_and_case() {
        let html = r#"<html><head>
            <TITLE>  Hello
               World </TITLE>
            <meta content="About things" NAME="Description">
            <meta name='keywords' content='a, b &amp; c'/>
        </head></html>"#;
        let meta = parse_page(html);
        assert_eq!(meta.title, "Hello World");
        assert_eq!(meta.description, "About things");
        assert_eq!(meta.keywords, "a, b & c");
    }

    #[test]
    fn missing_tags_get_placeholders() {
        let meta = parse_page("<html><head><meta charset=utf-8><title> </title></head></html>");
        assert_eq!(meta.title, NO_TITLE);
        assert_eq!(meta.description, NO_DESCRIPTION);
        assert_eq!(meta.keywords, NO_KEYWORDS);
    }

    #[test]
    fn og_description_is_not_the_description() {
        let html = r#"<meta property="og:description" content="nope"><meta name="description" content="yes">"#;
        assert_eq!(parse_page(html).description, "yes");
    }

    #[test]
    fn file_name_is_sanitized() {
        let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            output_file_name("https://www.en.wiki-pedia.org:8080/wiki/X", at),
            "webpage_enwiki-pediaorg8080_20240102_030405.txt"
        );
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1256), "1,256");
        assert_eq!(thousands(1234567), "1,234,567");
    }
}
