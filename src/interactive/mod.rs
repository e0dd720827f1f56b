//! Prompt-driven front end.
//!
//! Each task module exposes a `run` that asks its questions with `dialoguer`
//! and an `execute` (where it makes sense) that does the work and prints the
//! result, so the subcommands can skip the prompts.

pub mod chat;
pub mod emails;
pub mod hangman;
pub mod images;
pub mod portfolio;
pub mod scrape;

use anyhow::Result;
use chrono::Local;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::config::Config;
use crate::errors::{PortfolioError, ScrapeError, TaskError};
use crate::output as out;
use crate::relocate::io_error_with_help;
use crate::session::{self, SessionState};
use crate::shutdown;

pub const MENU_ITEMS: [&str; 5] = [
    "Move image files",
    "Extract email addresses",
    "Scrape webpage",
    "Help",
    "Exit",
];

const HELP_LINES: [&str; 8] = [
    "This tool automates three common tasks:",
    "  1. Move image files (JPG, PNG) from one folder into another",
    "  2. Extract email addresses from a text file",
    "  3. Scrape a webpage's title and meta information",
    "Tips:",
    "  - Press Enter to accept the suggested default",
    "  - Avoid OneDrive or other synced folders if moves report cloud errors",
    "  - `taskmate chat`, `taskmate hangman` and `taskmate portfolio` start the extras",
];

/// Directory reports and exports are written to.
pub(crate) fn working_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(io_error_with_help("read working directory", Path::new(".")))
}

/// Log a task failure with its stable code when it has one.
pub fn log_error(err: &anyhow::Error) {
    if let Some(te) = err.downcast_ref::<TaskError>() {
        error!(code = te.code(), error = %te, "Task failed");
    } else if let Some(se) = err.downcast_ref::<ScrapeError>() {
        error!(kind = "scrape", error = %se, "Task failed");
    } else if let Some(pe) = err.downcast_ref::<PortfolioError>() {
        error!(kind = "portfolio", error = %pe, "Task failed");
    } else {
        error!(error = ?err, "Task failed");
    }
}

/// Log the failure and tell the user; the session keeps going.
pub fn report_error(err: &anyhow::Error) {
    log_error(err);
    out::print_error(&format!("{err:#}"));
}

/// Print the session summary and a farewell.
pub fn say_goodbye(session: &SessionState) {
    if !session.events().is_empty() {
        for line in session.summary_lines(Local::now()) {
            out::print_user(&line);
        }
    }
    out::print_success(session::farewell(&mut rand::thread_rng()));
}

fn print_help() {
    out::print_banner("HELP & INSTRUCTIONS");
    for line in HELP_LINES {
        out::print_user(line);
    }
}

/// Main menu loop. Returns when the user picks Exit, presses Esc, or Ctrl-C
/// was pressed.
pub fn run_menu(cfg: &Config) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut session = SessionState::default();

    loop {
        if shutdown::is_requested() {
            out::print_warn("Operation cancelled by user.");
            break;
        }
        out::print_banner("TASK AUTOMATION MENU");
        let picked = Select::with_theme(&theme)
            .with_prompt("Enter your choice")
            .items(&MENU_ITEMS)
            .default(0)
            .interact_opt();
        let choice = match picked {
            Ok(Some(i)) => i,
            Ok(None) => break,
            Err(e) if shutdown::is_requested() => {
                debug!(error = %e, "Prompt ended by interrupt");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        debug!(choice = MENU_ITEMS[choice], "Menu selection");

        let result = match choice {
            0 => images::run(cfg, &theme, &mut session),
            1 => emails::run(&theme, &mut session),
            2 => scrape::run(cfg, &theme, &mut session),
            3 => {
                print_help();
                Ok(())
            }
            _ => break,
        };
        if let Err(e) = result {
            report_error(&e);
        }
    }

    say_goodbye(&session);
    Ok(())
}
