//! The single sink every command result and error passes through.
//!
//! Entries are kept in order for the front-end to display and are mirrored into the
//! `log` facade so `RUST_LOG=debug` shows them alongside subprocess tracing.

use crate::core::git::CommandOutput;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub text: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    entries: Vec<LogEntry>,
    /// Entries already handed to the front-end
    cursor: usize,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        log::debug!("{text}");
        self.entries.push(LogEntry {
            level: LogLevel::Info,
            text,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("error: {text}");
        self.entries.push(LogEntry {
            level: LogLevel::Error,
            text,
        });
    }

    /// Record what a git command printed; silent commands leave no entry
    pub fn command(&mut self, output: &CommandOutput) {
        let text = output.combined();
        if output.is_success() {
            self.info(text);
        } else {
            self.error(format!("{} failed:\n{}", output.command, text));
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.level == LogLevel::Error)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Entries added since the previous call
    pub fn take_new(&mut self) -> Vec<LogEntry> {
        let fresh = self.entries[self.cursor..].to_vec();
        self.cursor = self.entries.len();
        fresh
    }
}
