//! CSV / JSON export of a portfolio valuation.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use super::{HoldingValue, Portfolio, PriceSource, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Holdings table only.
    Csv,
    /// Summary, holdings and transactions.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => bail!("unknown export format '{other}' (expected csv or json)"),
        }
    }
}

#[derive(Serialize)]
struct Summary {
    total_value: f64,
    total_cost: f64,
    total_gain: f64,
    gain_percentage: f64,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    export_date: String,
    portfolio_summary: Summary,
    holdings: &'a [HoldingValue],
    transactions: &'a [Transaction],
}

/// `portfolio_export_{YYYYmmdd_HHMMSS}.{csv|json}`
pub fn export_file_name(format: ExportFormat, at: DateTime<Local>) -> String {
    format!(
        "portfolio_export_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Write the export into `dir` and return the file path.
pub fn export<P: PriceSource + ?Sized>(
    portfolio: &Portfolio,
    prices: &P,
    format: ExportFormat,
    dir: &Path,
    at: DateTime<Local>,
) -> Result<PathBuf> {
    let valuation = portfolio.valuation(prices);
    let path = dir.join(export_file_name(format, at));

    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_path(&path)
                .with_context(|| format!("create '{}'", path.display()))?;
            if valuation.holdings.is_empty() {
                wtr.write_record([
                    "symbol",
                    "quantity",
                    "avg_price",
                    "current_price",
                    "cost_basis",
                    "current_value",
                    "gain",
                    "gain_percentage",
                ])?;
            }
            for row in &valuation.holdings {
                wtr.serialize(row)?;
            }
            wtr.flush()
                .with_context(|| format!("write '{}'", path.display()))?;
        }
        ExportFormat::Json => {
            let doc = JsonExport {
                export_date: at.format("%Y%m%d_%H%M%S").to_string(),
                portfolio_summary: Summary {
                    total_value: valuation.total_value,
                    total_cost: valuation.total_cost,
                    total_gain: valuation.total_gain,
                    gain_percentage: valuation.gain_percentage,
                },
                holdings: &valuation.holdings,
                transactions: portfolio.transactions(),
            };
            let file =
                File::create(&path).with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut w, &doc)
                .with_context(|| format!("write '{}'", path.display()))?;
            w.flush()
                .with_context(|| format!("write '{}'", path.display()))?;
        }
    }

    info!(
        path = %path.display(),
        %format,
        holdings = valuation.holdings.len(),
        "Exported portfolio"
    );
    Ok(path)
}
