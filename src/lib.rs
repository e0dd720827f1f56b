//! Core library for `taskmate`.
//!
//! Contains the task logic: the resilient file relocator and the image mover
//! built on it, email extraction, page scraping, the chat bot, hangman and the
//! portfolio ledger, plus config loading and the prompt-driven front end.
//! The binary only adds logging setup and dispatch.

pub mod chat;
pub mod cli;
pub mod config;
pub mod errors;
pub mod hangman;
pub mod interactive;
pub mod output;
pub mod platform;
pub mod portfolio;
pub mod relocate;
pub mod session;
pub mod shutdown;
pub mod tasks;

pub use config::{
    Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor,
};
pub use errors::{PortfolioError, ScrapeError, TaskError};
pub use relocate::{FailureKind, MoveOutcome, MoveRequest, RetryPolicy, relocate, relocate_with};

/// Convenience re-exports for callers that want the common surface in one import.
pub mod prelude {
    pub use crate::config::{Config, LogLevel, default_config_path, load_or_init};
    pub use crate::errors::{PortfolioError, ScrapeError, TaskError};
    pub use crate::portfolio::{FallbackPrices, Portfolio, PriceSource};
    pub use crate::relocate::{
        FailureKind, FsBackend, MoveOutcome, MoveRequest, RetryPolicy, StdFs, relocate,
        relocate_with,
    };
    pub use crate::session::{SessionState, TaskKind};
    pub use crate::shutdown::{is_requested as shutdown_requested, request as request_shutdown};
    pub use crate::tasks::scrape::PageFetcher;
    pub type TMResult<T> = anyhow::Result<T>;
}
