//! One compiled emit operation: a small tagged value interpreted by a single
//! emit routine, instead of a heap-allocated closure per specifier.

use crate::record::{Record, UNKNOWN_FILE};
use std::fmt::Write as _;
use std::io::{self, Write};

/// What a single conversion specifier renders.
#[derive(Debug, Clone)]
pub(crate) enum OpKind {
    /// Text copied verbatim from the template between specifiers.
    Literal(String),
    /// A `%%` escape.
    Percent,
    Category,
    Caller,
    /// Carries the resolved chrono strftime format string.
    Timestamp(String),
    Severity,
    File,
    Line,
    Location,
    LineBreak,
}

/// A compiled operation with its captured width semantics: `min_width < 0`
/// left-justifies to `|min_width|`, `> 0` right-justifies, `0` pads nothing;
/// a nonzero `max_width` truncates before padding applies.
#[derive(Debug, Clone)]
pub(crate) struct Op {
    kind: OpKind,
    min_width: i32,
    max_width: usize,
}

impl Op {
    pub(crate) const fn new(kind: OpKind, min_width: i32, max_width: usize) -> Self {
        Self {
            kind,
            min_width,
            max_width,
        }
    }

    /// Literals and `%%` escapes never carry widths.
    pub(crate) const fn plain(kind: OpKind) -> Self {
        Self::new(kind, 0, 0)
    }

    /// Renders this operation's text for `record` into `out`.
    pub(crate) fn emit<W: Write>(&self, out: &mut W, record: &Record) -> io::Result<()> {
        match &self.kind {
            OpKind::Literal(text) => out.write_all(text.as_bytes()),
            OpKind::Percent => out.write_all(b"%"),
            OpKind::Category => self.write_text(out, &record.category),
            OpKind::Caller => self.write_text(out, record.caller_name()),
            OpKind::Severity => self.write_text(out, record.level.as_str()),
            OpKind::File => self.write_text(out, record.file_name()),
            OpKind::Line => match record.location {
                Some(loc) => self.write_text(out, &loc.line.to_string()),
                None => self.write_text(out, "?"),
            },
            OpKind::Location => {
                let text = record.location.map_or_else(
                    || format!("{UNKNOWN_FILE}:?:?"),
                    |loc| format!("{}:{}:{}", loc.file, loc.line, loc.column),
                );
                self.write_text(out, &text)
            }
            OpKind::Timestamp(format) => {
                let mut text = String::new();
                // chrono reports bad specifiers through fmt::Error at render
                // time; surface that instead of panicking via to_string().
                if write!(text, "{}", record.timestamp.format(format)).is_err() {
                    return Err(io::Error::other(format!(
                        "invalid timestamp format '{format}'"
                    )));
                }
                self.write_text(out, &text)
            }
            OpKind::LineBreak => self.write_text(out, "\n"),
        }
    }

    /// Applies truncation then padding, counting characters rather than bytes
    /// so multi-byte text pads to the intended column width.
    fn write_text<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        let text = if self.max_width > 0 {
            match text.char_indices().nth(self.max_width) {
                Some((cut, _)) => &text[..cut],
                None => text,
            }
        } else {
            text
        };

        let width = self.min_width.unsigned_abs() as usize;
        let pad = width.saturating_sub(text.chars().count());
        if pad == 0 {
            return out.write_all(text.as_bytes());
        }

        let padding = " ".repeat(pad);
        if self.min_width < 0 {
            out.write_all(text.as_bytes())?;
            out.write_all(padding.as_bytes())
        } else {
            out.write_all(padding.as_bytes())?;
            out.write_all(text.as_bytes())
        }
    }
}
