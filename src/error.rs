//! Unified error type for all streamlog operations.

/// Error type for streamlog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from a sink's underlying stream.
    Io(std::io::Error),
    /// Malformed pattern template — unknown conversion code, unterminated `%`,
    /// bad width/precision, or an unclosed `{...}` modifier.
    PatternSyntax(String),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Structurally valid TOML with an unusable value (bad kind, bad mode).
    InvalidConfig(String),
    /// Invalid log level string.
    UnknownLevel(String),
    /// A category references an appender name that was never declared.
    UnknownAppender(String),
    /// A file appender was declared without a `path`.
    MissingPath(String),
    /// `begin_record` called on a sink the calling thread is already mid-record on.
    NestedRecord,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::PatternSyntax(s) => write!(f, "pattern syntax error: {s}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::InvalidConfig(s) => write!(f, "invalid configuration: {s}"),
            Self::UnknownLevel(level) => write!(f, "unknown log level: '{level}'"),
            Self::UnknownAppender(name) => write!(f, "unknown appender: '{name}'"),
            Self::MissingPath(name) => write!(f, "file appender '{name}' has no path"),
            Self::NestedRecord => write!(f, "nested record on one sink from the same thread"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
