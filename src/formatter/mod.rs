//! A formatter binds one compiled pattern to one sink and one severity
//! threshold. Filtering happens once per record: a thresholded-out formatter
//! never touches its sink, not even to acquire the lock.

use crate::error::Error;
use crate::level::Level;
use crate::pattern::Pattern;
use crate::record::Record;
use crate::sink::{Sink, SinkGuard};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// One (pattern, sink, threshold) binding. Immutable after construction; the
/// sink is shared, the compiled pattern is this formatter's own.
#[derive(Debug)]
pub struct Formatter {
    pattern: Pattern,
    sink: Arc<Sink>,
    threshold: Level,
}

impl Formatter {
    /// Compiles `pattern` and binds it to `sink`.
    ///
    /// # Errors
    /// [`Error::PatternSyntax`] when the template is malformed; the sink is
    /// untouched and no partial formatter exists.
    pub fn new(sink: Arc<Sink>, pattern: &str, threshold: Level) -> Result<Self, Error> {
        Ok(Self {
            pattern: Pattern::parse(pattern)?,
            sink,
            threshold,
        })
    }

    /// Records strictly below this level are skipped entirely.
    #[must_use]
    pub const fn threshold(&self) -> Level {
        self.threshold
    }

    /// The sink this formatter writes to. Exposed so callers can verify
    /// sink sharing across formatters.
    #[must_use]
    pub const fn sink(&self) -> &Arc<Sink> {
        &self.sink
    }

    /// Starts one record against this formatter. Returns `None` without any
    /// sink interaction when the record's level is below the threshold;
    /// otherwise locks the sink, emits the pattern prefix, and returns the
    /// active handle that owns the sink for the rest of the record.
    pub(crate) fn begin<'a>(&'a self, record: &Record) -> Result<Option<ActiveFormatter<'a>>, Error> {
        if record.level < self.threshold {
            return Ok(None);
        }
        let mut guard = self.sink.begin_record(record)?;
        self.pattern.emit_prefix(&mut guard, record)?;
        Ok(Some(ActiveFormatter {
            pattern: &self.pattern,
            guard,
        }))
    }
}

/// A formatter mid-record: holds the sink lock until finished or dropped.
pub(crate) struct ActiveFormatter<'a> {
    pattern: &'a Pattern,
    guard: SinkGuard<'a>,
}

impl ActiveFormatter<'_> {
    pub(crate) fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.guard.write_all(s.as_bytes())
    }

    pub(crate) fn write_args(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.guard.write_fmt(args)
    }

    /// Emits the pattern suffix and the sink's end-of-record hook, then
    /// releases the lock.
    pub(crate) fn finish(mut self, record: &Record) -> io::Result<()> {
        self.pattern.emit_suffix(&mut self.guard, record)?;
        self.guard.end(record)
    }
}
