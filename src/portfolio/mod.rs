//! Stock holdings ledger.
//!
//! Holdings are keyed by upper-case symbol. Every buy and sell appends a
//! `Transaction`; valuation asks a `PriceSource` for current prices.

pub mod export;
pub mod prices;

pub use export::{ExportFormat, export, export_file_name};
pub use prices::{DEFAULT_PRICES, FallbackPrices, HttpPriceSource, PriceSource, price_or_zero};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::errors::PortfolioError;

/// Quantities closer than this count as equal when selling everything.
const QTY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holding {
    pub quantity: f64,
    pub avg_price: f64,
    pub purchase_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// `YYYY-mm-dd HH:MM:SS`
    pub date: String,
    pub symbol: String,
    pub action: Action,
    pub quantity: f64,
    pub price: f64,
    pub total: f64,
}

/// One row of a valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingValue {
    pub symbol: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub current_price: f64,
    pub cost_basis: f64,
    pub current_value: f64,
    pub gain: f64,
    pub gain_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain: f64,
    pub gain_percentage: f64,
    pub holdings: Vec<HoldingValue>,
}

#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    holdings: BTreeMap<String, Holding>,
    transactions: Vec<Transaction>,
    history: BTreeMap<NaiveDate, f64>,
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

fn percent(gain: f64, cost: f64) -> f64 {
    if cost > 0.0 { gain / cost * 100.0 } else { 0.0 }
}

fn check_quantity(quantity: f64) -> Result<(), PortfolioError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(PortfolioError::InvalidQuantity(quantity))
    }
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holdings(&self) -> &BTreeMap<String, Holding> {
        &self.holdings
    }

    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.get(&normalize_symbol(symbol))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Daily snapshots of total value.
    pub fn history(&self) -> &BTreeMap<NaiveDate, f64> {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Buy `quantity` of `symbol`. Without an explicit `price` the current
    /// price is used (0.0 if no source knows the symbol). Adding to an
    /// existing holding updates its quantity-weighted average price.
    pub fn buy<P: PriceSource + ?Sized>(
        &mut self,
        symbol: &str,
        quantity: f64,
        price: Option<f64>,
        prices: &P,
        at: NaiveDateTime,
    ) -> Result<&Transaction, PortfolioError> {
        check_quantity(quantity)?;
        let symbol = normalize_symbol(symbol);
        let price = match price {
            Some(p) if p.is_finite() && p > 0.0 => p,
            Some(p) => return Err(PortfolioError::InvalidPrice(p)),
            None => {
                let p = price_or_zero(prices, &symbol);
                if p == 0.0 {
                    warn!(symbol = %symbol, "No price known; recording purchase at 0.00");
                }
                p
            }
        };

        self.holdings
            .entry(symbol.clone())
            .and_modify(|h| {
                let new_qty = h.quantity + quantity;
                h.avg_price = (h.quantity * h.avg_price + quantity * price) / new_qty;
                h.quantity = new_qty;
            })
            .or_insert(Holding {
                quantity,
                avg_price: price,
                purchase_date: at.date(),
            });

        info!(symbol = %symbol, quantity, price, "Bought");
        Ok(self.record(symbol, Action::Buy, quantity, price, at))
    }

    /// Sell `quantity` of `symbol` at its current price. Selling the whole
    /// position removes the holding.
    pub fn sell<P: PriceSource + ?Sized>(
        &mut self,
        symbol: &str,
        quantity: f64,
        prices: &P,
        at: NaiveDateTime,
    ) -> Result<&Transaction, PortfolioError> {
        check_quantity(quantity)?;
        let symbol = normalize_symbol(symbol);
        let held = match self.holdings.get(&symbol) {
            Some(h) => h.quantity,
            None => return Err(PortfolioError::NotHeld(symbol)),
        };
        if quantity > held + QTY_EPSILON {
            return Err(PortfolioError::InsufficientQuantity {
                held,
                requested: quantity,
            });
        }

        let price = price_or_zero(prices, &symbol);
        if (held - quantity).abs() <= QTY_EPSILON {
            self.holdings.remove(&symbol);
        } else if let Some(h) = self.holdings.get_mut(&symbol) {
            h.quantity -= quantity;
        }

        info!(symbol = %symbol, quantity, price, "Sold");
        Ok(self.record(symbol, Action::Sell, quantity, price, at))
    }

    fn record(
        &mut self,
        symbol: String,
        action: Action,
        quantity: f64,
        price: f64,
        at: NaiveDateTime,
    ) -> &Transaction {
        self.transactions.push(Transaction {
            date: at.format("%Y-%m-%d %H:%M:%S").to_string(),
            symbol,
            action,
            quantity,
            price,
            total: quantity * price,
        });
        &self.transactions[self.transactions.len() - 1]
    }

    /// Current value, cost basis and gain per holding plus totals.
    pub fn valuation<P: PriceSource + ?Sized>(&self, prices: &P) -> Valuation {
        let mut holdings = Vec::with_capacity(self.holdings.len());
        let mut total_cost = 0.0;
        let mut total_value = 0.0;

        for (symbol, h) in &self.holdings {
            let current_price = price_or_zero(prices, symbol);
            let current_value = h.quantity * current_price;
            let cost_basis = h.quantity * h.avg_price;
            let gain = current_value - cost_basis;
            holdings.push(HoldingValue {
                symbol: symbol.clone(),
                quantity: h.quantity,
                avg_price: h.avg_price,
                current_price,
                cost_basis,
                current_value,
                gain,
                gain_percentage: percent(gain, cost_basis),
            });
            total_cost += cost_basis;
            total_value += current_value;
        }

        let total_gain = total_value - total_cost;
        Valuation {
            total_value,
            total_cost,
            total_gain,
            gain_percentage: percent(total_gain, total_cost),
            holdings,
        }
    }

    /// Store today's total value unless a snapshot for `date` already exists.
    /// Returns true when a new snapshot was stored.
    pub fn record_snapshot<P: PriceSource + ?Sized>(
        &mut self,
        date: NaiveDate,
        prices: &P,
    ) -> bool {
        if self.history.contains_key(&date) {
            return false;
        }
        let value = self.valuation(prices).total_value;
        self.history.insert(date, value);
        true
    }
}
