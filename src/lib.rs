#![forbid(unsafe_code)]

//! `streamlog` - Pattern-driven stream logging with per-sink record atomicity.
//!
//! Records are emitted through named categories, rendered by printf-like
//! conversion patterns, and fanned out to any number of destinations, with
//! the guarantee that one record's output is never interleaved with another
//! thread's on the same sink:
//! - A [`Sink`] owns one output stream and serializes whole records on it.
//! - A [`Pattern`] is a template like `"[%d] %-5p [%-10c] %m"`, compiled once
//!   into emit operations split around the `%m` message marker.
//! - A [`Formatter`] binds a pattern, a sink, and a severity threshold.
//! - A [`Multiplexer`] broadcasts each record event to its formatters in
//!   registration order.
//! - A [`Category`] names a record source; its [`Logger`] handle brackets a
//!   sequence of writes into one atomic record.
//!
//! # Example
//!
//! ```
//! use streamlog::{Category, Level, SinkRegistry};
//! use std::fmt::Write as _;
//!
//! let sinks = SinkRegistry::new();
//! let mut cat = Category::new("base");
//! cat.add_appender(sinks.console(), "[%d] %-5p [%-10c] %m %% >>>", Level::All)?;
//!
//! let mut log = cat.info()?;
//! write!(log, "Hello my little friend {}", 42)?;
//! log.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Categories can equally be built from a TOML file via [`Config`] and
//! [`Registry`], which also deduplicates file sinks by path so two appenders
//! naming the same file share one stream and one lock.

pub mod category;
pub mod config;
pub mod error;
pub mod formatter;
pub mod level;
pub mod mux;
pub mod pattern;
pub mod record;
pub mod sink;

// Re-exports for convenience
pub use category::{Category, Logger};
pub use config::{Config, Registry};
pub use error::Error;
pub use formatter::Formatter;
pub use level::Level;
pub use mux::{Multiplexer, RecordGuard};
pub use pattern::Pattern;
pub use record::{Location, Record};
pub use sink::{FileMode, Sink, SinkGuard, SinkRegistry};
