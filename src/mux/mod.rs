//! Fan-out of one logical record to every formatter of a category, in
//! registration order. Broadcasting is synchronous: a call returns only after
//! every non-skipping formatter (and its sink) has processed the event, and
//! the first sink error aborts delivery to the formatters after it.

use crate::error::Error;
use crate::formatter::{ActiveFormatter, Formatter};
use crate::record::Record;
use std::fmt;

/// Ordered collection of formatter bindings. Insertion order is broadcast
/// order; it is fixed after configuration.
#[derive(Debug, Default)]
pub struct Multiplexer {
    formatters: Vec<Formatter>,
}

impl Multiplexer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a formatter; it will receive every subsequent record last.
    pub fn push(&mut self, formatter: Formatter) {
        self.formatters.push(formatter);
    }

    /// Registered formatter bindings, in broadcast order.
    #[must_use]
    pub fn formatters(&self) -> &[Formatter] {
        &self.formatters
    }

    /// Starts one record on every formatter whose threshold the record
    /// passes. The returned guard holds each of their sink locks; drop it (or
    /// call [`RecordGuard::finish`]) to end the record everywhere.
    ///
    /// # Errors
    /// The first formatter error aborts the broadcast; formatters already
    /// begun are released through their guards' drop path.
    pub fn begin<'a>(&'a self, record: &Record) -> Result<RecordGuard<'a>, Error> {
        let mut active = Vec::with_capacity(self.formatters.len());
        for formatter in &self.formatters {
            if let Some(handle) = formatter.begin(record)? {
                active.push(handle);
            }
        }
        Ok(RecordGuard { active })
    }
}

/// One record in flight across a multiplexer's formatters. The scoped
/// counterpart of a begin/end event pair: creating it emitted every prefix,
/// finishing (or dropping) it emits every suffix and end hook exactly once.
pub struct RecordGuard<'a> {
    active: Vec<ActiveFormatter<'a>>,
}

impl RecordGuard<'_> {
    /// How many formatters passed their threshold for this record.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Broadcasts one plain-text field.
    ///
    /// # Errors
    /// The first sink error aborts delivery to the remaining formatters.
    pub fn write_str(&mut self, s: &str) -> Result<(), Error> {
        for handle in &mut self.active {
            handle.write_str(s)?;
        }
        Ok(())
    }

    /// Broadcasts one formatted field; `fmt::Arguments` is `Copy`, so each
    /// formatter renders the same value.
    ///
    /// # Errors
    /// The first sink error aborts delivery to the remaining formatters.
    pub fn write_args(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        for handle in &mut self.active {
            handle.write_args(args)?;
        }
        Ok(())
    }

    /// Broadcasts one displayable value.
    ///
    /// # Errors
    /// The first sink error aborts delivery to the remaining formatters.
    pub fn value(&mut self, v: impl fmt::Display) -> Result<(), Error> {
        self.write_args(format_args!("{v}"))
    }

    /// Ends the record on every formatter in order, surfacing the first
    /// error. Formatters not yet ended when an error occurs are still
    /// released (with their end hooks) through the drop path.
    ///
    /// # Errors
    /// The first suffix or end-of-record I/O error.
    pub fn finish(mut self, record: &Record) -> Result<(), Error> {
        for handle in self.active.drain(..) {
            handle.finish(record)?;
        }
        Ok(())
    }
}
