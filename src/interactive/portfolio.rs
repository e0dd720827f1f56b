//! Portfolio command prompt.
//!
//! Commands: `buy SYMBOL QTY [PRICE]`, `sell SYMBOL QTY`, `show`,
//! `export csv|json`, `snapshot`, `history`, `help`, `quit`.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

use crate::config::Config;
use crate::output as out;
use crate::portfolio::{
    ExportFormat, FallbackPrices, HttpPriceSource, Portfolio, PriceSource, Valuation, export,
};
use crate::session::{SessionState, TaskKind};
use crate::shutdown;

const USAGE: [&str; 8] = [
    "buy SYMBOL QTY [PRICE]  add shares (current price when PRICE is omitted)",
    "sell SYMBOL QTY         remove shares at the current price",
    "show                    holdings and gains",
    "export csv|json         write the portfolio to a file",
    "snapshot                store today's total value",
    "history                 list stored snapshots",
    "help                    this list",
    "quit                    leave the tracker",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Buy {
        symbol: String,
        quantity: f64,
        price: Option<f64>,
    },
    Sell {
        symbol: String,
        quantity: f64,
    },
    Show,
    Export(ExportFormat),
    Snapshot,
    History,
    Help,
    Quit,
}

fn number(field: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .with_context(|| format!("{field} must be a number, got '{raw}'"))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((head, rest)) = parts.split_first() else {
            bail!("empty command");
        };
        match (head.to_ascii_lowercase().as_str(), rest) {
            ("buy", [symbol, qty]) => Ok(Command::Buy {
                symbol: symbol.to_string(),
                quantity: number("quantity", qty)?,
                price: None,
            }),
            ("buy", [symbol, qty, price]) => Ok(Command::Buy {
                symbol: symbol.to_string(),
                quantity: number("quantity", qty)?,
                price: Some(number("price", price)?),
            }),
            ("sell", [symbol, qty]) => Ok(Command::Sell {
                symbol: symbol.to_string(),
                quantity: number("quantity", qty)?,
            }),
            ("show", []) => Ok(Command::Show),
            ("export", [fmt]) => Ok(Command::Export(fmt.parse()?)),
            ("snapshot", []) => Ok(Command::Snapshot),
            ("history", []) => Ok(Command::History),
            ("help" | "?", []) => Ok(Command::Help),
            ("quit" | "exit" | "q", []) => Ok(Command::Quit),
            ("buy" | "sell" | "export", _) => {
                Err(anyhow!("wrong arguments; type 'help' for usage"))
            }
            (other, _) => Err(anyhow!("unknown command '{other}'; type 'help' for usage")),
        }
    }
}

fn print_valuation(v: &Valuation) {
    if v.holdings.is_empty() {
        out::print_info("Portfolio is empty.");
        return;
    }
    out::print_user(&format!(
        "  {:<8} {:>10} {:>10} {:>10} {:>12} {:>12} {:>8}",
        "Symbol", "Qty", "Avg", "Price", "Value", "Gain", "Gain %"
    ));
    for h in &v.holdings {
        out::print_user(&format!(
            "  {:<8} {:>10.2} {:>10.2} {:>10.2} {:>12.2} {:>12.2} {:>7.2}%",
            h.symbol,
            h.quantity,
            h.avg_price,
            h.current_price,
            h.current_value,
            h.gain,
            h.gain_percentage
        ));
    }
    out::print_user(&format!(
        "  Total value {:.2}, cost {:.2}, gain {:.2} ({:.2}%)",
        v.total_value, v.total_cost, v.total_gain, v.gain_percentage
    ));
}

/// Apply one command. Returns false when the loop should stop.
pub fn apply<P: PriceSource + ?Sized>(
    portfolio: &mut Portfolio,
    prices: &P,
    cmd: Command,
    export_dir: &Path,
) -> Result<bool> {
    let now = Local::now();
    match cmd {
        Command::Buy {
            symbol,
            quantity,
            price,
        } => {
            let t = portfolio.buy(&symbol, quantity, price, prices, now.naive_local())?;
            out::print_success(&format!(
                "Bought {} {} at {:.2} (total {:.2})",
                t.quantity, t.symbol, t.price, t.total
            ));
        }
        Command::Sell { symbol, quantity } => {
            let t = portfolio.sell(&symbol, quantity, prices, now.naive_local())?;
            out::print_success(&format!(
                "Sold {} {} at {:.2} (total {:.2})",
                t.quantity, t.symbol, t.price, t.total
            ));
        }
        Command::Show => print_valuation(&portfolio.valuation(prices)),
        Command::Export(format) => {
            let path = export(portfolio, prices, format, export_dir, now)?;
            out::print_success(&format!("Exported to {}", path.display()));
        }
        Command::Snapshot => {
            if portfolio.record_snapshot(now.date_naive(), prices) {
                out::print_success("Snapshot stored.");
            } else {
                out::print_info("Today's snapshot already exists.");
            }
        }
        Command::History => {
            if portfolio.history().is_empty() {
                out::print_info("No snapshots yet.");
            }
            for (date, value) in portfolio.history() {
                out::print_user(&format!("  {date}  {value:.2}"));
            }
        }
        Command::Help => {
            for line in USAGE {
                out::print_user(&format!("  {line}"));
            }
        }
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn price_source(cfg: &Config, offline: bool) -> Box<dyn PriceSource> {
    if offline {
        return Box::new(FallbackPrices);
    }
    match HttpPriceSource::new(cfg.http_timeout) {
        Ok(src) => Box::new(src),
        Err(e) => {
            warn!(error = %e, "Live prices unavailable; using built-in table");
            Box::new(FallbackPrices)
        }
    }
}

pub fn run(
    cfg: &Config,
    offline: bool,
    theme: &ColorfulTheme,
    session: &mut SessionState,
) -> Result<()> {
    out::print_banner("PORTFOLIO TRACKER");
    out::print_info("Type 'help' for commands.");
    let prices = price_source(cfg, offline);
    let export_dir = super::working_dir()?;
    let mut portfolio = Portfolio::new();

    while !shutdown::is_requested() {
        let line: String = Input::with_theme(theme)
            .with_prompt("portfolio")
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            continue;
        }
        let keep_going = line
            .parse::<Command>()
            .and_then(|cmd| apply(&mut portfolio, prices.as_ref(), cmd, &export_dir));
        match keep_going {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => out::print_error(&format!("{e:#}")),
        }
    }

    session.record(
        TaskKind::Portfolio,
        format!(
            "{} transaction(s), {} holding(s)",
            portfolio.transactions().len(),
            portfolio.holdings().len()
        ),
    );
    Ok(())
}
