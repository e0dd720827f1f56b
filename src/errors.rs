//! Typed error definitions for taskmate.
//! Provides a small set of well-known failure modes for better logs and tests.
//! Relocation failures are not errors; see `relocate::MoveOutcome`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Source folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("No email addresses found in {0}")]
    NoEmailsFound(PathBuf),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl TaskError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            TaskError::FolderNotFound(_) => 10,
            TaskError::InputNotFound(_) => 11,
            TaskError::NoEmailsFound(_) => 12,
            TaskError::Interrupted => 130,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP Error {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Connection error: could not reach {0}")]
    Connect(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum PortfolioError {
    #[error("{0} not found in portfolio")]
    NotHeld(String),

    #[error("Cannot remove more than current quantity ({held})")]
    InsufficientQuantity { held: f64, requested: f64 },

    #[error("Quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),

    #[error("Price must be a positive number, got {0}")]
    InvalidPrice(f64),
}
