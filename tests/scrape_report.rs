//! Scraper flow with a canned fetcher; no network.

use std::cell::RefCell;
use std::fs;
use tempfile::tempdir;

use taskmate::ScrapeError;
use taskmate::tasks::scrape::{FetchedPage, NO_KEYWORDS, PageFetcher, scrape_to_file};

struct Canned {
    result: Result<FetchedPage, ScrapeError>,
    asked: RefCell<Vec<String>>,
}

impl PageFetcher for Canned {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        self.asked.borrow_mut().push(url.to_string());
        match &self.result {
            Ok(page) => Ok(page.clone()),
            Err(ScrapeError::Http { status, reason }) => Err(ScrapeError::Http {
                status: *status,
                reason: reason.clone(),
            }),
            Err(_) => Err(ScrapeError::Request("canned".into())),
        }
    }
}

fn page(body: &str) -> FetchedPage {
    FetchedPage {
        url: "https://example.com".into(),
        status: 200,
        reason: "OK".into(),
        body: body.into(),
        content_type: Some("text/html; charset=UTF-8".into()),
        server: None,
    }
}

#[test]
fn saves_report_named_after_domain() {
    let td = tempdir().unwrap();
    let body = r#"<html><head><title>Example Domain</title>
        <meta name="description" content="Just an example"></head></html>"#;
    let fetcher = Canned {
        result: Ok(page(body)),
        asked: RefCell::new(Vec::new()),
    };

    let run = scrape_to_file(&fetcher, "example.com", td.path()).unwrap();

    assert_eq!(fetcher.asked.borrow().as_slice(), ["https://example.com"]);
    assert_eq!(run.info.meta.title, "Example Domain");
    assert_eq!(run.info.meta.keywords, NO_KEYWORDS);
    assert_eq!(run.info.content_length, body.len());

    let name = run.output.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("webpage_examplecom_"), "{name}");
    assert!(name.ends_with(".txt"));

    let text = fs::read_to_string(&run.output).unwrap();
    assert!(text.contains("URL: https://example.com"));
    assert!(text.contains("Status: 200 OK"));
    assert!(text.contains("PAGE TITLE:\nExample Domain"));
    assert!(text.contains("- Server: Unknown"));
}

#[test]
fn http_error_writes_nothing() {
    let td = tempdir().unwrap();
    let fetcher = Canned {
        result: Err(ScrapeError::Http {
            status: 404,
            reason: "Not Found".into(),
        }),
        asked: RefCell::new(Vec::new()),
    };

    let err = scrape_to_file(&fetcher, "http://example.com/missing", td.path()).unwrap_err();

    assert_eq!(err.to_string(), "HTTP Error 404: Not Found");
    assert_eq!(fs::read_dir(td.path()).unwrap().count(), 0);
}
