// sevlog - core/logger.rs
//
// Leveled logger: threshold check, timestamping, formatting, and hand-off
// to the sink.
//
// Architecture:
//   - `LoggerState` (threshold + sink path) sits behind one `RwLock`, so a
//     `log` call always sees a consistent pair. The lock is released before
//     any file I/O.
//   - Explicit instances are shared as `Arc<Logger>`. `Logger::global()` is
//     the process-wide instance, built exactly once through `OnceLock`.
//   - `try_log` returns the sink error; `log` reports it through tracing and
//     carries on, so a failed write never reaches the producer.

use crate::core::clock::{Clock, SystemClock};
use crate::core::model::{format_entry, Severity};
use crate::platform::config::{self, ConfigRecord};
use crate::platform::sink::LogSink;
use crate::util::constants::DEFAULT_SINK_PATH;
use crate::util::error::{ConfigError, SinkError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Mutable settings shared by every caller of one logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerState {
    /// Minimum severity that gets persisted.
    pub threshold: Severity,
    /// File receiving accepted entries.
    pub sink_path: PathBuf,
}

impl Default for LoggerState {
    fn default() -> Self {
        Self {
            threshold: Severity::Info,
            sink_path: PathBuf::from(DEFAULT_SINK_PATH),
        }
    }
}

/// What happened to a message handed to `try_log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    /// The entry was appended to the sink.
    Written,
    /// The severity was below the threshold; nothing was written.
    Filtered,
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();
static GLOBAL_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

pub struct Logger {
    state: RwLock<LoggerState>,
    sink: LogSink,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Logger with default settings and the local wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Logger with default settings and the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(LoggerState::default()),
            sink: LogSink::new(),
            clock,
        }
    }

    /// The process-wide logger, constructed on first access.
    ///
    /// Concurrent first calls all receive the same instance and only one
    /// construction runs.
    pub fn global() -> &'static Logger {
        GLOBAL.get_or_init(|| {
            GLOBAL_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Global logger constructed");
            Logger::new()
        })
    }

    /// How many times `global()` has built its instance (0 or 1).
    pub fn global_constructions() -> usize {
        GLOBAL_CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Snapshot of the current settings.
    pub fn state(&self) -> LoggerState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn level(&self) -> Severity {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .threshold
    }

    pub fn sink_path(&self) -> PathBuf {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sink_path
            .clone()
    }

    /// Replace the threshold. Applies to `log` calls that start afterwards.
    pub fn set_level(&self, level: Severity) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .threshold = level;
        tracing::debug!(%level, "Threshold changed");
    }

    pub fn set_sink_path(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::debug!(path = %path.display(), "Sink path changed");
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .sink_path = path;
    }

    /// Apply whatever settings `record` carries, under one write lock.
    pub fn apply_config(&self, record: &ConfigRecord) {
        if record.is_empty() {
            return;
        }
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(level) = record.level {
            state.threshold = level;
        }
        if let Some(ref path) = record.sink_path {
            state.sink_path = path.clone();
        }
    }

    /// Load the config file at `path` and apply it.
    ///
    /// On `ConfigError` the current settings are left untouched; the caller
    /// chooses whether to continue.
    pub fn load_config(&self, path: &Path) -> Result<ConfigRecord, ConfigError> {
        let record = config::load_config(path)?;
        self.apply_config(&record);
        Ok(record)
    }

    // -------------------------------------------------------------------------
    // Logging
    // -------------------------------------------------------------------------

    /// Persist `message` if `severity` meets the threshold.
    ///
    /// Below-threshold calls return `Filtered` without touching the clock or
    /// the file system.
    pub fn try_log(&self, message: &str, severity: Severity) -> Result<LogOutcome, SinkError> {
        let (threshold, sink_path) = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if severity < state.threshold {
                return Ok(LogOutcome::Filtered);
            }
            (state.threshold, state.sink_path.clone())
        };

        let line = format_entry(self.clock.now(), severity, message);
        self.sink.append(&line, &sink_path)?;

        tracing::trace!(%severity, %threshold, "Entry logged");
        Ok(LogOutcome::Written)
    }

    /// Like `try_log`, but a sink failure is reported and swallowed.
    pub fn log(&self, message: &str, severity: Severity) {
        if let Err(e) = self.try_log(message, severity) {
            tracing::error!(error = %e, %severity, "Failed to write log entry");
        }
    }

    pub fn info(&self, message: &str) {
        self.log(message, Severity::Info);
    }

    pub fn warning(&self, message: &str) {
        self.log(message, Severity::Warning);
    }

    pub fn error(&self, message: &str) {
        self.log(message, Severity::Error);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::NaiveDate;

    fn fixed_logger(dir: &Path) -> Logger {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let logger = Logger::with_clock(Arc::new(FixedClock(ts)));
        logger.set_sink_path(dir.join("log.txt"));
        logger
    }

    #[test]
    fn test_defaults() {
        let state = Logger::new().state();
        assert_eq!(state.threshold, Severity::Info);
        assert_eq!(state.sink_path, PathBuf::from("log.txt"));
    }

    #[test]
    fn test_below_threshold_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let logger = fixed_logger(dir.path());
        logger.set_level(Severity::Warning);

        let outcome = logger.try_log("x", Severity::Info).unwrap();
        assert_eq!(outcome, LogOutcome::Filtered);
        assert!(!logger.sink_path().exists());
    }

    #[test]
    fn test_threshold_filter_for_every_pair() {
        for &threshold in Severity::all() {
            for &severity in Severity::all() {
                let dir = tempfile::tempdir().unwrap();
                let logger = fixed_logger(dir.path());
                logger.set_level(threshold);

                let outcome = logger.try_log("m", severity).unwrap();
                let written = std::fs::read_to_string(logger.sink_path()).unwrap_or_default();
                if severity >= threshold {
                    assert_eq!(outcome, LogOutcome::Written);
                    assert_eq!(written, format!("[2024-01-01 00:00:00] [{severity}] m\n"));
                } else {
                    assert_eq!(outcome, LogOutcome::Filtered);
                    assert!(written.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_sink_failure_is_returned_by_try_log() {
        let dir = tempfile::tempdir().unwrap();
        let logger = fixed_logger(dir.path());
        logger.set_sink_path(dir.path().join("missing").join("log.txt"));

        assert!(matches!(
            logger.try_log("x", Severity::Error),
            Err(SinkError::Write { .. })
        ));
        // `log` swallows the same failure.
        logger.log("x", Severity::Error);
    }

    #[test]
    fn test_apply_config_keeps_unset_fields() {
        let logger = Logger::new();
        let record = ConfigRecord {
            level: Some(Severity::Error),
            ..ConfigRecord::default()
        };
        logger.apply_config(&record);
        assert_eq!(logger.level(), Severity::Error);
        assert_eq!(logger.sink_path(), PathBuf::from("log.txt"));
    }

    #[test]
    fn test_load_config_missing_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new();
        logger.set_level(Severity::Warning);

        let result = logger.load_config(&dir.path().join("absent.txt"));
        assert!(result.is_err());
        assert_eq!(logger.level(), Severity::Warning);
    }

    #[test]
    fn test_global_is_single_instance() {
        let ptrs: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..32)
                .map(|_| s.spawn(|| Logger::global() as *const Logger as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(Logger::global_constructions(), 1);
    }
}
