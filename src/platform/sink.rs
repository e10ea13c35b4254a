// sevlog - platform/sink.rs
//
// Append-only file sink.
//
// Each append opens the file in append mode, writes the line and its
// terminator with a single `write_all`, and drops the handle before
// returning, on the error path too. Appends to the same path are serialised
// through a per-path mutex shared by every `LogSink` in the process, so two
// logger instances pointed at one file still never interleave lines.
//
// Paths are keyed as given (not canonicalised): `log.txt` and `./log.txt`
// get separate locks. The single-buffer append keeps lines whole even then.

use crate::util::error::SinkError;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

type LockMap = HashMap<PathBuf, Arc<Mutex<()>>>;

/// Process-wide map of sink path to its serialisation lock.
fn registry() -> &'static Mutex<LockMap> {
    static LOCKS: OnceLock<Mutex<LockMap>> = OnceLock::new();
    LOCKS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Lock for `path`, shared with every append currently targeting it.
///
/// Entries no append holds are dropped first, so the map only tracks paths
/// in active use instead of every path ever written.
fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    let mut locks = registry().lock().unwrap_or_else(PoisonError::into_inner);
    locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    Arc::clone(locks.entry(path.to_path_buf()).or_default())
}

/// Serialised line appender.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }

    /// Append `line` plus a newline to the file at `path`, creating it if
    /// needed.
    pub fn append(&self, line: &str, path: &Path) -> Result<(), SinkError> {
        let lock = path_lock(path);
        // A producer that panicked mid-append left no partial state behind
        // the lock (the handle is already dropped), so poisoning is ignored.
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let write_err = |e: std::io::Error| SinkError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;
        file.write_all(buf.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        tracing::trace!(path = %path.display(), bytes = buf.len(), "Entry appended");
        Ok(())
    }
}
