//! Per-call record metadata — everything a pattern can render besides the
//! message body itself.

use crate::level::Level;
use chrono::{DateTime, Local};
use std::thread::{self, ThreadId};

/// Rendered fallback when a record carries no caller information.
pub const UNKNOWN_CALLER: &str = "unknown function";
/// Rendered fallback when a record carries no source location.
pub const UNKNOWN_FILE: &str = "unknown file";

/// Source position of the log call, as produced by `file!()`/`line!()`/`column!()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

/// Carries all metadata a formatter needs to render one record — created once
/// per log call, borrowed read-only by every formatter and sink during the
/// broadcast, discarded at call end.
#[derive(Debug, Clone)]
pub struct Record {
    /// Name of the category the record was emitted through.
    pub category: String,
    pub level: Level,
    /// Wall-clock time captured at call start, not at render time, so every
    /// formatter of one record prints the same timestamp.
    pub timestamp: DateTime<Local>,
    /// Identity of the emitting thread.
    pub thread: ThreadId,
    /// Calling function name, when the call site supplies one.
    pub caller: Option<&'static str>,
    pub location: Option<Location>,
}

impl Record {
    /// Captures now() and the current thread; caller and location are opt-in.
    #[must_use]
    pub fn new(category: impl Into<String>, level: Level) -> Self {
        Self {
            category: category.into(),
            level,
            timestamp: Local::now(),
            thread: thread::current().id(),
            caller: None,
            location: None,
        }
    }

    /// The `%C`/`%M` conversions need a name even for anonymous call sites.
    #[must_use]
    pub fn caller_name(&self) -> &str {
        self.caller.unwrap_or(UNKNOWN_CALLER)
    }

    /// The `%F` conversion needs a file name even for anonymous call sites.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.location.map_or(UNKNOWN_FILE, |l| l.file)
    }
}
