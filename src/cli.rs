//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - No subcommand means the interactive menu.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Small terminal tools: image mover, email extractor, page scraper and extras.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Automate small everyday tasks from the terminal")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(
        long,
        global = true,
        value_hint = ValueHint::FilePath,
        help = "Write logs to this file as well"
    )]
    pub log_file: Option<PathBuf>,

    /// Print where taskmate will look for the config file (or TASKMATE_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by taskmate and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive menu (the default).
    Menu,
    /// Move image files out of a folder.
    MoveImages {
        #[arg(long, value_hint = ValueHint::DirPath)]
        source: PathBuf,
        /// Defaults to the configured image destination.
        #[arg(long, value_hint = ValueHint::DirPath)]
        dest: Option<PathBuf>,
    },
    /// Extract email addresses from a text file.
    ExtractEmails {
        #[arg(long, value_hint = ValueHint::FilePath, default_value = "sample_emails.txt")]
        input: PathBuf,
        #[arg(long, value_hint = ValueHint::FilePath, default_value = "extracted_emails.txt")]
        output: PathBuf,
    },
    /// Save a page's title and meta tags to a report file.
    Scrape {
        #[arg(value_hint = ValueHint::Url)]
        url: String,
    },
    /// Talk to the rule-based chat bot.
    Chat,
    /// Play hangman.
    Hangman,
    /// Track a stock portfolio.
    Portfolio {
        /// Use the built-in price table instead of live quotes.
        #[arg(long)]
        offline: bool,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
    }

    /// The subcommand to run, `Menu` when none was given.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

pub fn parse() -> Args {
    Args::parse()
}
