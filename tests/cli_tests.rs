use clap::Parser;
use std::path::PathBuf;

use taskmate::cli::{Args, Command};
use taskmate::config::types::{Config, LogLevel};

#[test]
fn no_subcommand_means_menu() {
    let args = Args::parse_from(["taskmate"]);
    assert_eq!(args.command, None);
    assert_eq!(args.resolved_command(), Command::Menu);
}

#[test]
fn subcommands_parse_with_defaults() {
    let args = Args::parse_from(["taskmate", "move-images", "--source", "/pics"]);
    assert_eq!(
        args.resolved_command(),
        Command::MoveImages {
            source: PathBuf::from("/pics"),
            dest: None
        }
    );

    let args = Args::parse_from(["taskmate", "extract-emails"]);
    assert_eq!(
        args.resolved_command(),
        Command::ExtractEmails {
            input: PathBuf::from("sample_emails.txt"),
            output: PathBuf::from("extracted_emails.txt"),
        }
    );

    let args = Args::parse_from(["taskmate", "portfolio", "--offline"]);
    assert_eq!(args.resolved_command(), Command::Portfolio { offline: true });

    let args = Args::parse_from(["taskmate", "scrape", "example.com"]);
    assert_eq!(
        args.resolved_command(),
        Command::Scrape {
            url: "example.com".into()
        }
    );
}

#[test]
fn move_images_requires_source() {
    assert!(Args::try_parse_from(["taskmate", "move-images"]).is_err());
    assert!(Args::try_parse_from(["taskmate", "dance"]).is_err());
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["taskmate", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["taskmate", "chat", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["taskmate", "--log-level", "bogus"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_level_and_log_file() {
    let args = Args::parse_from([
        "taskmate",
        "--log-level",
        "quiet",
        "--log-file",
        "/tmp/tm.log",
        "hangman",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/tm.log")));
    assert_eq!(args.resolved_command(), Command::Hangman);
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["taskmate", "menu"]);
    let mut cfg = Config::default();
    cfg.log_level = LogLevel::Info;
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg, {
        let mut c = Config::default();
        c.log_level = LogLevel::Info;
        c
    });
}
