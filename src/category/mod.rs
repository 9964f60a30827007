//! A category is a named source of records with its own multiplexer; a
//! [`Logger`] is the scoped handle that brackets one record's writes between
//! the begin and end events.

use crate::error::Error;
use crate::formatter::Formatter;
use crate::level::Level;
use crate::mux::{Multiplexer, RecordGuard};
use crate::record::{Location, Record};
use crate::sink::Sink;
use std::fmt;
use std::sync::Arc;

/// Named source of log records. Appenders are added at configuration time;
/// afterwards the category is only read, so loggers can borrow it freely
/// from any thread.
#[derive(Debug)]
pub struct Category {
    name: String,
    mux: Multiplexer,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mux: Multiplexer::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds `pattern` and `threshold` to `sink` as one more destination for
    /// this category's records.
    ///
    /// # Errors
    /// [`Error::PatternSyntax`] when the template is malformed; existing
    /// appenders are unaffected.
    pub fn add_appender(
        &mut self,
        sink: Arc<Sink>,
        pattern: &str,
        threshold: Level,
    ) -> Result<(), Error> {
        self.mux.push(Formatter::new(sink, pattern, threshold)?);
        Ok(())
    }

    /// The fan-out this category broadcasts through.
    #[must_use]
    pub const fn multiplexer(&self) -> &Multiplexer {
        &self.mux
    }

    /// Opens one record at `level` with no caller information.
    ///
    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn logger(&self, level: Level) -> Result<Logger<'_>, Error> {
        self.logger_at(level, None, None)
    }

    /// Opens one record carrying the call site, typically
    /// `logger_at(level, Some("main"), Some(Location { file: file!(), line: line!(), column: column!() }))`.
    ///
    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn logger_at(
        &self,
        level: Level,
        caller: Option<&'static str>,
        location: Option<Location>,
    ) -> Result<Logger<'_>, Error> {
        let mut record = Record::new(self.name.clone(), level);
        record.caller = caller;
        record.location = location;
        let active = self.mux.begin(&record)?;
        Ok(Logger {
            record,
            active: Some(active),
            deferred: None,
        })
    }

    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn trace(&self) -> Result<Logger<'_>, Error> {
        self.logger(Level::Trace)
    }

    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn debug(&self) -> Result<Logger<'_>, Error> {
        self.logger(Level::Debug)
    }

    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn info(&self) -> Result<Logger<'_>, Error> {
        self.logger(Level::Info)
    }

    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn warn(&self) -> Result<Logger<'_>, Error> {
        self.logger(Level::Warn)
    }

    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn error(&self) -> Result<Logger<'_>, Error> {
        self.logger(Level::Error)
    }

    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn fatal(&self) -> Result<Logger<'_>, Error> {
        self.logger(Level::Fatal)
    }
}

/// One open record. Construction captured the metadata and broadcast the
/// begin event; every write lands between the pattern prefix and suffix.
/// Dropping the logger ends the record even on an early return — call
/// [`Logger::finish`] instead when write errors matter.
pub struct Logger<'a> {
    record: Record,
    active: Option<RecordGuard<'a>>,
    /// First error swallowed by the `fmt::Write` impl, surfaced by `finish`.
    deferred: Option<Error>,
}

impl Logger<'_> {
    /// Metadata of the record this logger is writing.
    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.record
    }

    /// How many formatters are actually receiving this record.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.as_ref().map_or(0, RecordGuard::active_len)
    }

    /// Pushes one displayable value as a message fragment.
    ///
    /// # Errors
    /// The first sink error; delivery to the remaining formatters stops.
    pub fn value(&mut self, v: impl fmt::Display) -> Result<&mut Self, Error> {
        if let Some(active) = self.active.as_mut() {
            active.value(v)?;
        }
        Ok(self)
    }

    /// Ends the record explicitly, surfacing any error the `write!` path had
    /// to defer as well as errors from the suffixes and end hooks.
    ///
    /// # Errors
    /// The first deferred or end-of-record error.
    pub fn finish(mut self) -> Result<(), Error> {
        if let Some(e) = self.deferred.take() {
            // Guards still release and end-frame through the drop path.
            return Err(e);
        }
        match self.active.take() {
            Some(active) => active.finish(&self.record),
            None => Ok(()),
        }
    }
}

/// Lets callers use `write!(logger, ...)`. `fmt::Error` carries no payload,
/// so the underlying sink error is parked and re-raised by [`Logger::finish`].
impl fmt::Write for Logger<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.deferred.is_some() {
            return Err(fmt::Error);
        }
        if let Some(active) = self.active.as_mut()
            && let Err(e) = active.write_str(s)
        {
            self.deferred = Some(e);
            return Err(fmt::Error);
        }
        Ok(())
    }
}

impl Drop for Logger<'_> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            let _ = active.finish(&self.record);
        }
    }
}
