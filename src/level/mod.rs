//! Severity levels that gate which records reach which sinks.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so a formatter can compare a record's level against its
/// configured threshold. `All` is the permissive minimum: no record level
/// sorts below it, so an `All` threshold passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Passes every threshold check; useful as a threshold, not a record level.
    #[default]
    All = 0,
    /// High-volume instrumentation that would be too noisy outside of development.
    Trace = 1,
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    Debug = 2,
    /// Normal operational milestones.
    Info = 3,
    /// Non-fatal anomalies that may need attention.
    Warn = 4,
    /// Failures that prevent the current operation from completing.
    Error = 5,
    /// Failures after which the process cannot meaningfully continue.
    Fatal = 6,
}

impl Level {
    /// Uppercase because the `%p` conversion emits these labels verbatim.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Convenience for iteration — used by tests and config diagnostics.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::All,
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Fatal,
        ]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = crate::Error;

    /// Case-insensitive because config files conventionally write lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" | "ERR" => Ok(Self::Error),
            "FATAL" => Ok(Self::Fatal),
            _ => Err(crate::Error::UnknownLevel(s.to_string())),
        }
    }
}
