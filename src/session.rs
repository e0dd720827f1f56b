//! Per-run session state.
//!
//! The menu driver owns one `SessionState` and hands `&mut` to each task
//! handler; handlers append a `SessionEvent` when they finish.

use chrono::{DateTime, Local};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

pub const FAREWELLS: [&str; 4] = [
    "Thank you for using taskmate!",
    "Hope it made your tasks easier!",
    "Goodbye and have a great day!",
    "Keep automating! See you next time!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    MoveImages,
    ExtractEmails,
    ScrapePage,
    Chat,
    Hangman,
    Portfolio,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskKind::MoveImages => "move images",
            TaskKind::ExtractEmails => "extract emails",
            TaskKind::ScrapePage => "scrape webpage",
            TaskKind::Chat => "chat",
            TaskKind::Hangman => "hangman",
            TaskKind::Portfolio => "portfolio",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub task: TaskKind,
    pub summary: String,
    pub ok: bool,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    started_at: DateTime<Local>,
    events: Vec<SessionEvent>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl SessionState {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            events: Vec::new(),
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn record(&mut self, task: TaskKind, summary: impl Into<String>) {
        self.push(task, summary.into(), true);
    }

    pub fn record_failure(&mut self, task: TaskKind, summary: impl Into<String>) {
        self.push(task, summary.into(), false);
    }

    fn push(&mut self, task: TaskKind, summary: String, ok: bool) {
        tracing::debug!(%task, ok, summary = %summary, "Session event");
        self.events.push(SessionEvent { task, summary, ok });
    }

    /// One line per event, prefixed `+` (ok) or `!` (failed), plus a header
    /// with the run duration measured up to `now`.
    pub fn summary_lines(&self, now: DateTime<Local>) -> Vec<String> {
        let mins = (now - self.started_at).num_minutes().max(0);
        let failed = self.events.iter().filter(|e| !e.ok).count();
        let mut lines = vec![format!(
            "Session: {} task(s), {} failed, {} min",
            self.events.len(),
            failed,
            mins
        )];
        for e in &self.events {
            let mark = if e.ok { '+' } else { '!' };
            lines.push(format!("  {mark} {}: {}", e.task, e.summary));
        }
        lines
    }
}

pub fn farewell<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FAREWELLS.choose(rng).copied().unwrap_or(FAREWELLS[0])
}
