//! Hangman game loop.

use anyhow::Result;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use crate::hangman::{Game, GuessOutcome, Status};
use crate::output as out;
use crate::session::{SessionState, TaskKind};
use crate::shutdown;

pub fn run(theme: &ColorfulTheme, session: &mut SessionState) -> Result<()> {
    out::print_banner("HANGMAN");
    let mut game = Game::random(&mut rand::thread_rng());

    while game.status() == Status::InProgress {
        if shutdown::is_requested() {
            out::print_warn("Game abandoned.");
            session.record_failure(TaskKind::Hangman, "abandoned");
            return Ok(());
        }
        out::print_user(&format!(
            "\nWord: {}   (misses left: {})",
            game.masked(),
            game.remaining()
        ));
        let guess: String = Input::with_theme(theme)
            .with_prompt("Guess a letter")
            .allow_empty(true)
            .interact_text()?;

        match game.guess(&guess) {
            GuessOutcome::Invalid => out::print_warn("Please enter a single letter."),
            GuessOutcome::Repeated => out::print_warn("You already guessed that letter."),
            GuessOutcome::Correct => out::print_success("Good guess!"),
            GuessOutcome::Wrong { remaining } => {
                out::print_error(&format!("Wrong guess. {remaining} attempt(s) left."))
            }
            GuessOutcome::Finished => break,
        }
    }

    let secret = game.secret().to_string();
    if game.status() == Status::Won {
        out::print_success(&format!("You won! The word was '{secret}'."));
        session.record(TaskKind::Hangman, format!("won with '{secret}'"));
    } else {
        out::print_error(&format!("Game over! The word was '{secret}'."));
        session.record(TaskKind::Hangman, format!("lost on '{secret}'"));
    }
    Ok(())
}
