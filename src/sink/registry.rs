//! Explicitly owned sink sharing. Two configuration entries naming the same
//! file path must share one sink (and therefore one lock), otherwise their
//! records could interleave mid-line through separate file handles.

use super::{FileMode, Sink};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Hands out shared sink instances. Console and stderr are created once per
/// registry; file sinks are deduplicated by their path string. The registry is
/// an ordinary owned value — whoever configures logging decides its lifetime.
#[derive(Debug)]
pub struct SinkRegistry {
    console: Arc<Sink>,
    stderr: Arc<Sink>,
    files: Mutex<HashMap<PathBuf, Arc<Sink>>>,
}

impl SinkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            console: Sink::console(),
            stderr: Sink::stderr(),
            files: Mutex::new(HashMap::new()),
        }
    }

    /// The shared standard-output sink.
    #[must_use]
    pub fn console(&self) -> Arc<Sink> {
        Arc::clone(&self.console)
    }

    /// The shared standard-error sink.
    #[must_use]
    pub fn stderr(&self) -> Arc<Sink> {
        Arc::clone(&self.stderr)
    }

    /// The shared sink for `path`, created on first request. Creation happens
    /// under the registry lock so two threads racing on the same path cannot
    /// end up with two file handles.
    ///
    /// # Errors
    /// [`crate::Error::Io`] when the file cannot be opened.
    pub fn file(&self, path: impl AsRef<Path>, mode: FileMode) -> Result<Arc<Sink>, crate::Error> {
        let path = path.as_ref();
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sink) = files.get(path) {
            return Ok(Arc::clone(sink));
        }
        let sink = Sink::file(path, mode)?;
        files.insert(path.to_path_buf(), Arc::clone(&sink));
        Ok(sink)
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
