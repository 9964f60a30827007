//! The `%`-conversion template compiler. A template like
//! `"[%d] %-5p [%-10c] %m%n"` is scanned once at configuration time into an
//! ordered list of emit operations, so rendering a record never re-parses the
//! template — parse once, emit many.
//!
//! Grammar per specifier: `%` `-`?digits? (`.`digits)? CODE (`{`modifier`}`)?
//! where a leading `-` on the minimum width means left-justify. Recognized
//! codes: `c` category, `C`/`M` caller, `d` timestamp (modifier is a chrono
//! strftime string, default `%F %T`), `p` severity label, `F` file, `L` line,
//! `l` composite `file:line:col`, `n` line break, `m` message-body marker,
//! `%%` a literal percent. Anything else is a syntax error.

mod op;

use crate::error::Error;
use crate::record::Record;
use op::{Op, OpKind};
use std::io::{self, Write};

/// A compiled template: the operations before the `%m` marker and the
/// operations after it. Immutable after [`Pattern::parse`]; each formatter
/// compiles its own copy.
#[derive(Debug, Clone)]
pub struct Pattern {
    prefix: Vec<Op>,
    suffix: Vec<Op>,
}

impl Pattern {
    /// Compiles `template` in a single left-to-right pass.
    ///
    /// # Errors
    /// [`Error::PatternSyntax`] on an unrecognized conversion code, a `%` at
    /// end of input, a `-` or `.` without digits, a width or precision too
    /// large to represent, or an unclosed `{modifier}`.
    pub fn parse(template: &str) -> Result<Self, Error> {
        let mut chars = template.chars().peekable();
        let mut prefix = Vec::new();
        let mut suffix = Vec::new();
        let mut body_seen = false;
        let mut literal = String::new();

        let truncated = |what: &str| {
            Error::PatternSyntax(format!("template ends inside a {what}: \"{template}\""))
        };

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let dest = if body_seen { &mut suffix } else { &mut prefix };
            if !literal.is_empty() {
                dest.push(Op::plain(OpKind::Literal(std::mem::take(&mut literal))));
            }

            let mut c = chars.next().ok_or_else(|| truncated("conversion"))?;
            if c == '%' {
                dest.push(Op::plain(OpKind::Percent));
                continue;
            }

            // '-'?[0-9]* minimum width; negative means left-justify.
            let negative = c == '-';
            if negative {
                c = chars.next().ok_or_else(|| truncated("conversion"))?;
                if !c.is_ascii_digit() {
                    return Err(Error::PatternSyntax(format!(
                        "'-' must be followed by a width in \"{template}\""
                    )));
                }
            }
            let mut min_width: i32 = 0;
            while c.is_ascii_digit() {
                min_width = min_width
                    .checked_mul(10)
                    .and_then(|w| w.checked_add(i32::from(c as u8 - b'0')))
                    .ok_or_else(|| {
                        Error::PatternSyntax(format!("width too large in \"{template}\""))
                    })?;
                c = chars.next().ok_or_else(|| truncated("conversion"))?;
            }
            if negative {
                min_width = -min_width;
            }

            // '.'[0-9]+ maximum width (truncation).
            let mut max_width: usize = 0;
            if c == '.' {
                c = chars.next().ok_or_else(|| truncated("conversion"))?;
                if !c.is_ascii_digit() {
                    return Err(Error::PatternSyntax(format!(
                        "'.' must be followed by a precision in \"{template}\""
                    )));
                }
                while c.is_ascii_digit() {
                    max_width = max_width
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(usize::from(c as u8 - b'0')))
                        .ok_or_else(|| {
                            Error::PatternSyntax(format!("precision too large in \"{template}\""))
                        })?;
                    c = chars.next().ok_or_else(|| truncated("conversion"))?;
                }
            }

            let code = c;

            let mut modifier = String::new();
            if chars.peek() == Some(&'{') {
                chars.next();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => modifier.push(ch),
                        None => return Err(truncated("{modifier}")),
                    }
                }
            }

            let kind = match code {
                'c' => OpKind::Category,
                // 'M' is an alias for 'C'; both mean the calling function.
                'C' | 'M' => OpKind::Caller,
                'd' => OpKind::Timestamp(if modifier.is_empty() {
                    String::from("%F %T")
                } else {
                    modifier
                }),
                'p' => OpKind::Severity,
                'F' => OpKind::File,
                'L' => OpKind::Line,
                'l' => OpKind::Location,
                'n' => OpKind::LineBreak,
                'm' => {
                    body_seen = true;
                    continue;
                }
                other => {
                    return Err(Error::PatternSyntax(format!(
                        "unrecognized conversion '%{other}' in \"{template}\""
                    )));
                }
            };
            dest.push(Op::new(kind, min_width, max_width));
        }

        if !literal.is_empty() {
            let dest = if body_seen { &mut suffix } else { &mut prefix };
            dest.push(Op::plain(OpKind::Literal(literal)));
        }

        Ok(Self { prefix, suffix })
    }

    /// Runs every pre-body operation against `out`.
    pub(crate) fn emit_prefix<W: Write>(&self, out: &mut W, record: &Record) -> io::Result<()> {
        for op in &self.prefix {
            op.emit(out, record)?;
        }
        Ok(())
    }

    /// Runs every post-body operation against `out`.
    pub(crate) fn emit_suffix<W: Write>(&self, out: &mut W, record: &Record) -> io::Result<()> {
        for op in &self.suffix {
            op.emit(out, record)?;
        }
        Ok(())
    }

    /// Tests verify where the `%m` marker split the operation list.
    #[must_use]
    pub fn prefix_len(&self) -> usize {
        self.prefix.len()
    }

    /// Tests verify where the `%m` marker split the operation list.
    #[must_use]
    pub fn suffix_len(&self) -> usize {
        self.suffix.len()
    }
}
