//! Where current prices come from.

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Opaque quote provider.
pub trait PriceSource {
    /// Latest price for an upper-case symbol, if known.
    fn current_price(&self, symbol: &str) -> Option<f64>;
}

/// Fixed prices used offline and whenever a live quote is unavailable.
pub const DEFAULT_PRICES: [(&str, f64); 10] = [
    ("AAPL", 180.50),
    ("TSLA", 250.75),
    ("GOOGL", 135.20),
    ("MSFT", 330.42),
    ("AMZN", 145.60),
    ("META", 350.25),
    ("NVDA", 450.30),
    ("JPM", 155.80),
    ("V", 240.90),
    ("WMT", 165.35),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPrices;

impl PriceSource for FallbackPrices {
    fn current_price(&self, symbol: &str) -> Option<f64> {
        DEFAULT_PRICES
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, p)| *p)
    }
}

/// Price for `symbol`, or 0.0 when no source knows it.
pub fn price_or_zero<P: PriceSource + ?Sized>(prices: &P, symbol: &str) -> f64 {
    prices.current_price(symbol).unwrap_or(0.0)
}

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Live quotes from the public Yahoo chart endpoint, falling back to
/// `FallbackPrices` on any error.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    client: reqwest::blocking::Client,
    fallback: FallbackPrices,
}

impl HttpPriceSource {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(crate::tasks::scrape::USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            fallback: FallbackPrices,
        })
    }

    fn fetch(&self, symbol: &str) -> Option<f64> {
        let url = format!("{CHART_URL}/{symbol}?range=1d&interval=1d");
        let response = match self.client.get(&url).send() {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!(symbol, status = r.status().as_u16(), "Quote request refused");
                return None;
            }
            Err(e) => {
                warn!(symbol, error = %e, "Quote request failed; using fallback price");
                return None;
            }
        };
        let body = response.text().ok()?;
        parse_chart_price(&body)
    }
}

impl PriceSource for HttpPriceSource {
    fn current_price(&self, symbol: &str) -> Option<f64> {
        self.fetch(symbol)
            .or_else(|| self.fallback.current_price(symbol))
    }
}

/// `chart.result[0].meta.regularMarketPrice` from a chart response body.
pub fn parse_chart_price(body: &str) -> Option<f64> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.pointer("/chart/result/0/meta/regularMarketPrice")?
        .as_f64()
        .filter(|p| p.is_finite() && *p > 0.0)
}
