use chrono::{Local, NaiveDate, TimeZone};
use std::fs;
use tempfile::tempdir;

use taskmate::portfolio::{ExportFormat, FallbackPrices, Portfolio, export};

fn sample() -> Portfolio {
    let at = NaiveDate::from_ymd_opt(2024, 2, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap();
    let mut p = Portfolio::new();
    p.buy("AAPL", 10.0, Some(150.0), &FallbackPrices, at).unwrap();
    p.buy("msft", 2.0, None, &FallbackPrices, at).unwrap();
    p.sell("AAPL", 4.0, &FallbackPrices, at).unwrap();
    p
}

#[test]
fn csv_has_header_and_one_row_per_holding() {
    let td = tempdir().unwrap();
    let at = Local.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();

    let path = export(&sample(), &FallbackPrices, ExportFormat::Csv, td.path(), at).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "portfolio_export_20240201_100000.csv"
    );
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "symbol,quantity,avg_price,current_price,cost_basis,current_value,gain,gain_percentage"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("AAPL,6.0,150.0,180.5,"), "{}", lines[1]);
    assert!(lines[2].starts_with("MSFT,2.0,330.42,330.42,"), "{}", lines[2]);
}

#[test]
fn empty_portfolio_csv_is_just_the_header() {
    let td = tempdir().unwrap();
    let at = Local.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
    let empty = Portfolio::new();
    let path = export(&empty, &FallbackPrices, ExportFormat::Csv, td.path(), at).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
}

#[test]
fn json_carries_summary_holdings_and_transactions() {
    let td = tempdir().unwrap();
    let at = Local.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();

    let path = export(&sample(), &FallbackPrices, ExportFormat::Json, td.path(), at).unwrap();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["export_date"], "20240201_100000");
    assert_eq!(doc["holdings"].as_array().unwrap().len(), 2);
    let txs = doc["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[2]["action"], "SELL");
    assert_eq!(txs[2]["date"], "2024-02-01 09:30:00");

    let total = doc["portfolio_summary"]["total_value"].as_f64().unwrap();
    assert!((total - (6.0 * 180.5 + 2.0 * 330.42)).abs() < 1e-6);
}
