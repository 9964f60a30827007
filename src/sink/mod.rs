//! A sink owns one output stream and the mutual exclusion that keeps one
//! record's output contiguous: `begin_record` takes the stream lock and hands
//! it back as a [`SinkGuard`], so every field written before the guard is
//! released lands on the stream without another thread's output in between.

mod registry;

pub use registry::SinkRegistry;

use crate::record::Record;
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Whether a file sink starts from the existing content or from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    #[default]
    Append,
    Truncate,
}

/// Closed set of sink variants, distinguished only by their begin/end hooks.
/// All current variants have an empty begin hook and a line-break end hook.
#[derive(Debug, Clone, Copy)]
enum SinkKind {
    Console,
    Stderr,
    File,
}

thread_local! {
    /// Sinks the current thread is mid-record on, so a reentrant
    /// `begin_record` fails loudly instead of deadlocking on its own lock.
    static HELD: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// One output destination. Shared by any number of formatters and categories
/// via `Arc`; the stream behind the mutex is the only mutable state.
pub struct Sink {
    kind: SinkKind,
    stream: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink").field("kind", &self.kind).finish()
    }
}

impl Sink {
    fn new(kind: SinkKind, stream: Box<dyn Write + Send>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            stream: Mutex::new(stream),
        })
    }

    /// Sink writing to the process's standard output.
    #[must_use]
    pub fn console() -> Arc<Self> {
        Self::new(SinkKind::Console, Box::new(io::stdout()))
    }

    /// Sink writing to the process's standard error.
    #[must_use]
    pub fn stderr() -> Arc<Self> {
        Self::new(SinkKind::Stderr, Box::new(io::stderr()))
    }

    /// Opens `path` for writing. No partial sink exists on failure.
    ///
    /// # Errors
    /// [`crate::Error::Io`] when the file cannot be created or opened.
    pub fn file(path: impl AsRef<Path>, mode: FileMode) -> Result<Arc<Self>, crate::Error> {
        let mut options = OpenOptions::new();
        options.write(true).create(true);
        match mode {
            FileMode::Append => options.append(true),
            FileMode::Truncate => options.truncate(true),
        };
        let file = options.open(path)?;
        Ok(Self::new(SinkKind::File, Box::new(file)))
    }

    /// Starts one record: runs the variant's begin hook and acquires the
    /// stream lock, which the returned guard holds until the record ends.
    /// Blocks while another thread is mid-record on this sink.
    ///
    /// # Errors
    /// [`crate::Error::NestedRecord`] when the calling thread is already
    /// mid-record on this sink; the design forbids nested records.
    pub fn begin_record(&self, record: &Record) -> Result<SinkGuard<'_>, crate::Error> {
        let key = std::ptr::from_ref(self) as usize;
        let nested = HELD.with(|held| held.borrow().contains(&key));
        if nested {
            return Err(crate::Error::NestedRecord);
        }

        // A poisoned mutex only means another thread panicked mid-record;
        // the stream itself is still writable.
        let stream = self.stream.lock().unwrap_or_else(PoisonError::into_inner);
        HELD.with(|held| held.borrow_mut().push(key));

        let mut guard = SinkGuard {
            key,
            kind: self.kind,
            stream,
            ended: false,
        };
        guard.begin_hook(record)?;
        Ok(guard)
    }
}

/// Exclusive access to a sink's stream for the duration of one record.
/// Dropping the guard releases the lock and, if [`SinkGuard::end`] was never
/// called, still runs the end hook so a dropped record stays well-framed.
pub struct SinkGuard<'a> {
    key: usize,
    kind: SinkKind,
    stream: MutexGuard<'a, Box<dyn Write + Send>>,
    ended: bool,
}

impl SinkGuard<'_> {
    #[allow(clippy::unused_self)]
    fn begin_hook(&mut self, _record: &Record) -> Result<(), crate::Error> {
        // No current variant writes anything at record start.
        Ok(())
    }

    fn end_hook(&mut self) -> io::Result<()> {
        match self.kind {
            SinkKind::Console | SinkKind::Stderr | SinkKind::File => {
                self.stream.write_all(b"\n")?;
                self.stream.flush()
            }
        }
    }

    /// Ends the record: runs the end hook exactly once, then releases the lock.
    ///
    /// # Errors
    /// I/O errors from the end-of-record write.
    pub fn end(mut self, _record: &Record) -> io::Result<()> {
        self.ended = true;
        self.end_hook()
    }
}

impl Write for SinkGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl Drop for SinkGuard<'_> {
    fn drop(&mut self) {
        if !self.ended {
            let _ = self.end_hook();
        }
        HELD.with(|held| {
            let mut held = held.borrow_mut();
            if let Some(pos) = held.iter().rposition(|&k| k == self.key) {
                held.remove(pos);
            }
        });
    }
}
