//! Text hangman: guess the word one letter at a time.

use rand::Rng;
use rand::seq::SliceRandom;

pub const WORDS: [&str; 5] = ["python", "coding", "intern", "program", "developer"];
pub const MAX_INCORRECT: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Not exactly one alphabetic character; nothing changes.
    Invalid,
    /// Letter already tried; nothing changes.
    Repeated,
    Correct,
    Wrong { remaining: u32 },
    /// The game was already won or lost.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct Game {
    secret: String,
    guessed: Vec<char>,
    incorrect: u32,
    max_incorrect: u32,
}

impl Game {
    /// Start with an explicit secret (lowercased).
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_lowercase(),
            guessed: Vec::new(),
            incorrect: 0,
            max_incorrect: MAX_INCORRECT,
        }
    }

    /// Start with a word drawn from `WORDS`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(WORDS.choose(rng).copied().unwrap_or(WORDS[0]))
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn remaining(&self) -> u32 {
        self.max_incorrect.saturating_sub(self.incorrect)
    }

    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    /// Secret with unguessed letters as `_`, space separated: `p _ t _ o n`.
    pub fn masked(&self) -> String {
        self.secret
            .chars()
            .map(|c| {
                if self.guessed.contains(&c) {
                    c.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn status(&self) -> Status {
        if self.secret.chars().all(|c| self.guessed.contains(&c)) {
            Status::Won
        } else if self.incorrect >= self.max_incorrect {
            Status::Lost
        } else {
            Status::InProgress
        }
    }

    pub fn guess(&mut self, input: &str) -> GuessOutcome {
        if self.status() != Status::InProgress {
            return GuessOutcome::Finished;
        }
        let mut chars = input.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => c.to_lowercase().next().unwrap_or(c),
            _ => return GuessOutcome::Invalid,
        };
        if self.guessed.contains(&letter) {
            return GuessOutcome::Repeated;
        }
        self.guessed.push(letter);
        if self.secret.contains(letter) {
            GuessOutcome::Correct
        } else {
            self.incorrect += 1;
            GuessOutcome::Wrong {
                remaining: self.remaining(),
            }
        }
    }
}
