//! Chat loop around `ChatBot`.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use owo_colors::AnsiColors;

use crate::chat::{BOT_NAME, ChatBot, HELP_COMMANDS, Intent, USER_NAME};
use crate::output as out;
use crate::session::{SessionState, TaskKind};
use crate::shutdown;

fn print_help_table() {
    out::print_user(&format!("  {:<16} {:<30} {}", "Command", "Description", "Example"));
    for (cmd, desc, example) in HELP_COMMANDS {
        out::print_user(&format!("  {cmd:<16} {desc:<30} {example}"));
    }
}

fn print_history(bot: &ChatBot) {
    out::print_banner("CONVERSATION HISTORY");
    for (speaker, text) in bot.history() {
        let color = if speaker == BOT_NAME {
            bot.theme().ansi()
        } else {
            AnsiColors::White
        };
        out::print_themed(speaker, &out::truncate(text, 70), color);
    }
}

pub fn run(theme: &ColorfulTheme, session: &mut SessionState) -> Result<()> {
    out::print_banner(&format!("CHAT WITH {}", BOT_NAME.to_uppercase()));
    let mut bot = ChatBot::new();
    out::print_themed(
        BOT_NAME,
        "Hello! Type 'help' to see what I can do, or 'bye' to leave.",
        bot.theme().ansi(),
    );

    let mut turns = 0usize;
    loop {
        if shutdown::is_requested() {
            break;
        }
        let line: String = Input::with_theme(theme)
            .with_prompt(USER_NAME)
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            continue;
        }
        turns += 1;

        let reply = bot.respond(&line);
        out::print_themed(BOT_NAME, &reply.text, bot.theme().ansi());
        if reply.intent == Intent::Help {
            print_help_table();
        }
        if reply.ends_session {
            break;
        }
    }

    if turns > 0
        && Confirm::with_theme(theme)
            .with_prompt("Show conversation history?")
            .default(false)
            .interact()
            .unwrap_or(false)
    {
        print_history(&bot);
    }
    session.record(TaskKind::Chat, format!("{turns} message(s) exchanged"));
    Ok(())
}
