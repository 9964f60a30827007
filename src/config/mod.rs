//! TOML configuration loading and the category registry built from it.
//!
//! Separated from the struct definitions so the composition logic (sink
//! sharing, additivity, ancestor fallback) stays independent of the serde
//! schema.
//!
//! ```toml
//! [appender.console]
//! kind = "console"
//! pattern = "[%d] %-5p [%-10c] %m"
//!
//! [appender.errors]
//! kind = "file"
//! path = "errors.log"
//! pattern = "<%-8.8c> %m"
//! threshold = "warn"
//!
//! [root]
//! appenders = ["console"]
//!
//! [category.base]
//! appenders = ["errors"]
//! additive = true
//! ```

mod structs;

pub use structs::{AppenderConfig, CategoryConfig, Config, RootConfig};

use crate::category::{Category, Logger};
use crate::error::Error;
use crate::level::Level;
use crate::sink::{FileMode, Sink, SinkRegistry};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// [`Error::ConfigParse`] when the document is not valid TOML.
    pub fn from_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    /// [`Error::Io`] when the file cannot be read, [`Error::ConfigParse`]
    /// when it is not valid TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}

/// A fully resolved appender: sink opened, threshold parsed, pattern kept as
/// source text because each category binding compiles its own copy.
struct ResolvedAppender {
    sink: Arc<Sink>,
    pattern: String,
    threshold: Level,
}

/// Name-to-category lookup built from a [`Config`]. Explicitly constructed
/// and owned by the caller; all sinks it opens live in its own
/// [`SinkRegistry`], so two appenders naming the same file share one sink.
#[derive(Debug)]
pub struct Registry {
    sinks: SinkRegistry,
    root: Category,
    categories: HashMap<String, Category>,
}

impl Registry {
    /// Builds every category up front: opens sinks, parses thresholds, and
    /// compiles one pattern per (category, appender) binding. Additive
    /// categories also receive their ancestors' appenders, own appenders
    /// first, walking rootward until a non-additive ancestor stops the chain.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] for an unknown appender kind or mode,
    /// [`Error::MissingPath`] for a file appender without a path,
    /// [`Error::UnknownAppender`] for a dangling appender reference, plus any
    /// sink-open or pattern-compile error.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let sinks = SinkRegistry::new();

        let mut resolved: HashMap<&str, ResolvedAppender> = HashMap::new();
        for (name, appender) in &config.appender {
            let sink = match appender.kind.as_str() {
                "console" => sinks.console(),
                "stderr" => sinks.stderr(),
                "file" => {
                    let path = appender
                        .path
                        .as_ref()
                        .ok_or_else(|| Error::MissingPath(name.clone()))?;
                    let mode = match appender.mode.as_str() {
                        "append" => FileMode::Append,
                        "truncate" => FileMode::Truncate,
                        other => {
                            return Err(Error::InvalidConfig(format!(
                                "appender '{name}' has unknown mode '{other}'"
                            )));
                        }
                    };
                    sinks.file(path, mode)?
                }
                other => {
                    return Err(Error::InvalidConfig(format!(
                        "appender '{name}' has unknown kind '{other}'"
                    )));
                }
            };
            resolved.insert(
                name,
                ResolvedAppender {
                    sink,
                    pattern: appender.pattern.clone(),
                    threshold: appender.threshold.parse()?,
                },
            );
        }

        let mut categories = HashMap::new();
        for (name, category_config) in &config.category {
            let mut category = Category::new(name.clone());
            attach(&mut category, &category_config.appenders, &resolved)?;

            let mut cursor = name.as_str();
            let mut additive = category_config.additive;
            while additive {
                match cursor.rsplit_once('.') {
                    Some((parent, _)) => {
                        if let Some(parent_config) = config.category.get(parent) {
                            attach(&mut category, &parent_config.appenders, &resolved)?;
                            additive = parent_config.additive;
                        }
                        cursor = parent;
                    }
                    None => {
                        attach(&mut category, &config.root.appenders, &resolved)?;
                        break;
                    }
                }
            }
            categories.insert(name.clone(), category);
        }

        let mut root = Category::new("");
        attach(&mut root, &config.root.appenders, &resolved)?;

        Ok(Self {
            sinks,
            root,
            categories,
        })
    }

    /// Convenience for [`Config::from_str`] + [`Registry::from_config`].
    ///
    /// # Errors
    /// See [`Registry::from_config`].
    pub fn from_toml(s: &str) -> Result<Self, Error> {
        Self::from_config(&Config::from_str(s)?)
    }

    /// Convenience for [`Config::from_path`] + [`Registry::from_config`].
    ///
    /// # Errors
    /// See [`Registry::from_config`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_config(&Config::from_path(path)?)
    }

    /// Looks up `name`, falling back to the nearest configured ancestor and
    /// finally the root category.
    #[must_use]
    pub fn category(&self, name: &str) -> &Category {
        let mut cursor = name;
        loop {
            if let Some(category) = self.categories.get(cursor) {
                return category;
            }
            match cursor.rsplit_once('.') {
                Some((parent, _)) => cursor = parent,
                None => return &self.root,
            }
        }
    }

    /// The root category — the target of every unconfigured name.
    #[must_use]
    pub const fn root(&self) -> &Category {
        &self.root
    }

    /// The sink sharing this registry's appenders were built through.
    #[must_use]
    pub const fn sinks(&self) -> &SinkRegistry {
        &self.sinks
    }

    /// Opens one record on the named (or nearest ancestor) category.
    ///
    /// # Errors
    /// Sink errors from emitting the pattern prefixes.
    pub fn logger(&self, category: &str, level: Level) -> Result<Logger<'_>, Error> {
        self.category(category).logger(level)
    }
}

/// Binds each named appender to `category`, compiling a fresh pattern per
/// binding.
fn attach(
    category: &mut Category,
    names: &[String],
    resolved: &HashMap<&str, ResolvedAppender>,
) -> Result<(), Error> {
    for name in names {
        let appender = resolved
            .get(name.as_str())
            .ok_or_else(|| Error::UnknownAppender(name.clone()))?;
        category.add_appender(
            Arc::clone(&appender.sink),
            &appender.pattern,
            appender.threshold,
        )?;
    }
    Ok(())
}
