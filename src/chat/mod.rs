//! Rule-based chat responder ("Jarvis").
//!
//! `ChatBot::respond_with` classifies the input with the ordered rules in
//! [`rules`], picks a reply from a fixed pool and records both sides in the
//! history. Randomness and the clock are passed in so replies are testable.

pub mod rules;

use chrono::{DateTime, Local};
use owo_colors::AnsiColors;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

pub use rules::{Intent, classify};

pub const BOT_NAME: &str = "Jarvis";
pub const USER_NAME: &str = "You";

const GREETINGS: &[&str] = &[
    "Hi there! Great to meet you!",
    "Hello! I'm excited to chat with you!",
    "Hey! Welcome to our conversation!",
];

const MOODS: &[&str] = &[
    "I'm fantastic! Running on pure Rust power!",
    "I'm doing great! Thanks for asking! How about you?",
    "I'm wonderful! Chatting with you makes my circuits happy!",
];

const GOODBYES: &[&str] = &[
    "Goodbye! Hope to chat with you again soon!",
    "Farewell! This was fun! Come back anytime!",
    "See you later! Don't be a stranger!",
];

const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "Why did the scarecrow win an award? He was outstanding in his field!",
    "What do you call a fish with no eyes? Fsh!",
    "Why don't eggs tell jokes? They'd crack each other up!",
    "What do you call a factory that makes okay products? A satisfactory!",
];

const QUOTES: &[&str] = &[
    "The only way to do great work is to love what you do. - Steve Jobs",
    "Life is what happens to you while you're busy making other plans. - John Lennon",
    "The future belongs to those who believe in the beauty of their dreams. - Eleanor Roosevelt",
    "It is during our darkest moments that we must focus to see the light. - Aristotle",
    "Whoever is happy will make others happy too. - Anne Frank",
];

const WEATHER_KINDS: &[&str] = &["sunny", "rainy", "cloudy", "snowy", "windy"];
const TEMPERATURES: &[&str] = &[
    "72°F (22°C)",
    "65°F (18°C)",
    "80°F (27°C)",
    "55°F (13°C)",
    "68°F (20°C)",
];
const LOCATIONS: &[&str] = &["your area", "the city", "outside your window"];

const THANKS_REPLY: &str = "You're welcome! I'm always happy to help!";
const HELP_REPLY: &str = "Here are all the things I can help with! Try any of these commands!";

/// (command, description, example) rows for the help table.
pub const HELP_COMMANDS: [(&str, &str, &str); 9] = [
    ("hello/hi/hey", "Greet the chatbot", "'hello' or 'hi there'"),
    ("how are you", "Ask about the chatbot's mood", "'how are you?'"),
    ("joke", "Hear a funny joke", "'tell me a joke'"),
    ("weather", "Get weather information", "'what's the weather?'"),
    ("time", "Check current time", "'what time is it?'"),
    ("quote", "Get an inspirational quote", "'give me a quote'"),
    ("help", "Show this help table", "'help'"),
    ("bye/exit", "End the conversation", "'bye' or 'exit'"),
    ("color", "Change chat color theme", "'change color'"),
];

/// Color the bot's messages are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Cyan,
    Green,
    Magenta,
    Yellow,
    Blue,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Cyan,
        Theme::Green,
        Theme::Magenta,
        Theme::Yellow,
        Theme::Blue,
    ];

    pub fn ansi(self) -> AnsiColors {
        match self {
            Theme::Cyan => AnsiColors::Cyan,
            Theme::Green => AnsiColors::Green,
            Theme::Magenta => AnsiColors::Magenta,
            Theme::Yellow => AnsiColors::Yellow,
            Theme::Blue => AnsiColors::Blue,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Cyan => "cyan",
            Theme::Green => "green",
            Theme::Magenta => "magenta",
            Theme::Yellow => "yellow",
            Theme::Blue => "blue",
        };
        f.write_str(s)
    }
}

/// The bot's answer to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
    /// True for Exit: the caller should close the session.
    pub ends_session: bool,
}

#[derive(Debug, Clone)]
pub struct ChatBot {
    theme: Theme,
    history: Vec<(String, String)>,
}

impl Default for ChatBot {
    fn default() -> Self {
        Self::new()
    }
}

fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

impl ChatBot {
    pub fn new() -> Self {
        Self {
            theme: Theme::Cyan,
            history: Vec::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// `(speaker, text)` pairs in order; bot entries hold a short summary
    /// for long replies.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    /// Answer using the thread RNG and the local clock.
    pub fn respond(&mut self, input: &str) -> Reply {
        self.respond_with(input, Local::now(), &mut rand::thread_rng())
    }

    pub fn respond_with<R: Rng + ?Sized>(
        &mut self,
        input: &str,
        now: DateTime<Local>,
        rng: &mut R,
    ) -> Reply {
        self.history.push((USER_NAME.to_string(), input.to_string()));
        let intent = classify(input);

        let (text, summary) = match intent {
            Intent::Exit => {
                let t = pick(GOODBYES, rng).to_string();
                (t.clone(), t)
            }
            Intent::Help => (HELP_REPLY.to_string(), "Displayed help table".to_string()),
            Intent::Greeting => {
                let t = pick(GREETINGS, rng).to_string();
                (t.clone(), t)
            }
            Intent::HowAreYou => {
                let t = pick(MOODS, rng).to_string();
                (t.clone(), t)
            }
            Intent::Joke => (
                format!("Here's a joke for you:\n\n{}", pick(JOKES, rng)),
                "Told a joke".to_string(),
            ),
            Intent::Weather => (
                format!(
                    "Weather Report:\n\nThe weather in {} is {} with a temperature of {}. Perfect for chatting!",
                    pick(LOCATIONS, rng),
                    pick(WEATHER_KINDS, rng),
                    pick(TEMPERATURES, rng)
                ),
                "Gave weather report".to_string(),
            ),
            Intent::Time => {
                let t = now.format("%I:%M %p").to_string();
                (format!("Current Time:\n\nIt's {t}"), format!("Told time: {t}"))
            }
            Intent::Quote => (
                format!("Inspirational Quote:\n\n{}", pick(QUOTES, rng)),
                "Shared a quote".to_string(),
            ),
            Intent::ColorChange => {
                let others: Vec<Theme> = Theme::ALL
                    .iter()
                    .copied()
                    .filter(|t| *t != self.theme)
                    .collect();
                if let Some(next) = others.choose(rng) {
                    self.theme = *next;
                }
                (
                    format!("Color theme changed to {}!", self.theme),
                    format!("Changed color to {}", self.theme),
                )
            }
            Intent::Thanks => (THANKS_REPLY.to_string(), THANKS_REPLY.to_string()),
            Intent::Fallback => (
                fallback_text(input, rng),
                "Didn't understand input".to_string(),
            ),
        };

        self.history.push((BOT_NAME.to_string(), summary));
        Reply {
            intent,
            text,
            ends_session: intent == Intent::Exit,
        }
    }
}

fn fallback_text<R: Rng + ?Sized>(input: &str, rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!(
            "Hmm, I'm not sure about '{input}'\n\nTry asking about the weather, tell me a joke, or ask for a quote!"
        ),
        1 => format!(
            "That's interesting: '{input}'\n\nYou can type 'help' to see all the things I can do!"
        ),
        _ => "I'm still learning about phrases like that!\n\nMaybe ask me about the time or how I'm feeling today!"
            .to_string(),
    }
}
