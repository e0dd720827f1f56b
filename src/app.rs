//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler and
//! dispatches to the chosen task.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use std::sync::{Arc, Mutex};
use tracing::debug;

use taskmate::cli::{Args, Command};
use taskmate::config::{CONFIG_ENV_VAR, LoadResult, load_or_init};
use taskmate::interactive::{self, log_error, say_goodbye};
use taskmate::output as out;
use taskmate::session::SessionState;
use taskmate::tasks::scrape::HttpFetcher;
use taskmate::{default_config_path, shutdown};

use crate::logging::init_tracing;

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV_VAR)
        && !cfg_env.is_empty()
    {
        out::print_info(&format!("Using {CONFIG_ENV_VAR} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV_VAR} or set it to another file."
        ));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default taskmate config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info(
                    "No config file exists there yet. Run without --print-config to create a template.",
                );
            }
        }
        Err(e) => {
            out::print_error(&format!("Could not determine a default config path: {e}"));
        }
    }
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let loaded = load_or_init()?;
    if let LoadResult::CreatedTemplate(path) = &loaded {
        out::print_success(&format!(
            "A template taskmate config was written to: {}",
            path.display()
        ));
        out::print_info("Built-in defaults apply for now; edit the file to change them.");
    }
    let mut cfg = loaded.into_config();
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current step...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })?;
    }

    debug!(?args, "Starting taskmate");
    let command = args.resolved_command();
    let says_goodbye = matches!(
        command,
        Command::Chat | Command::Hangman | Command::Portfolio { .. }
    );
    let theme = ColorfulTheme::default();
    let mut session = SessionState::default();

    let result = match command {
        Command::Menu => interactive::run_menu(&cfg),
        Command::MoveImages { source, dest } => {
            let dest = dest.unwrap_or_else(|| cfg.image_destination.clone());
            interactive::images::execute(&cfg, &source, &dest, &mut session).map(|_| ())
        }
        Command::ExtractEmails { input, output } => {
            interactive::emails::execute(&input, &output, &mut session).map(|_| ())
        }
        Command::Scrape { url } => HttpFetcher::new(cfg.http_timeout)
            .map_err(anyhow::Error::from)
            .and_then(|fetcher| {
                let here = std::path::Path::new(".");
                interactive::scrape::execute(&fetcher, &url, here, &mut session)
            })
            .map(|_| ()),
        Command::Chat => interactive::chat::run(&theme, &mut session),
        Command::Hangman => interactive::hangman::run(&theme, &mut session),
        Command::Portfolio { offline } => {
            interactive::portfolio::run(&cfg, offline, &theme, &mut session)
        }
    };

    if let Err(e) = &result {
        log_error(e);
    } else if says_goodbye {
        say_goodbye(&session);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
