//! Operator-visible scrollback log.
//!
//! Mirrors every entry to the tracing channel; the scrollback itself is what
//! the surrounding UI renders, timestamped and leveled.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use tracing::{error, info};

/// Severity marker for a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Routine progress message.
    Info,
    /// An operation completed successfully.
    Success,
    /// An operation failed.
    Error,
}

impl LogLevel {
    /// Short label used when rendering an entry.
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Error => "error",
        }
    }
}

/// One timestamped scrollback entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// When the entry was appended.
    pub at: DateTime<Local>,
    /// Severity marker.
    pub level: LogLevel,
    /// Entry text.
    pub message: String,
}

impl LogEntry {
    /// Render the entry the way the widget displays it.
    pub fn render(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.at.format("%H:%M:%S"),
            self.level.label(),
            self.message
        )
    }
}

/// Bounded scrollback of widget log entries, oldest first.
#[derive(Debug)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl ActivityLog {
    /// Create a scrollback holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, dropping the oldest once at capacity, and mirror it
    /// to the tracing channel.
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();

        match level {
            LogLevel::Error => error!("{}", message),
            LogLevel::Success => info!("SUCCESS: {}", message),
            LogLevel::Info => info!("{}", message),
        }

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            at: Local::now(),
            level,
            message,
        });
    }

    /// Entries currently in the scrollback, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the scrollback is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the newest `count` entries, oldest of them first.
    pub fn render_tail(&self, count: usize) -> String {
        let skip = self.entries.len().saturating_sub(count);
        self.entries
            .iter()
            .skip(skip)
            .map(LogEntry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
