// sevlog - app/bootstrap.rs
//
// Demo pipeline: configure one shared logger, run concurrent producers,
// wait for all of them, then read the log back.
//
// Config problems are reported and the defaults are kept. Read-back
// problems are returned to the caller.

use crate::core::logger::Logger;
use crate::core::model::Severity;
use crate::core::reader;
use crate::util::constants::DEFAULT_CONFIG_FILE;
use crate::util::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Messages logged by the producers, one producer each.
pub const PRODUCER_MESSAGES: &[(&str, Severity)] = &[
    ("Message from Thread 1", Severity::Info),
    ("Warning from Thread 2", Severity::Warning),
    ("Error from Thread 3", Severity::Error),
];

/// Inputs for one bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Config file applied before producers start.
    pub config_path: PathBuf,
    /// Severity whose entries are read back at the end.
    pub read_level: Severity,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            read_level: Severity::Error,
        }
    }
}

/// Run the pipeline with a fresh logger.
pub fn run(options: &BootstrapOptions) -> Result<Vec<String>> {
    run_with(Arc::new(Logger::new()), options)
}

/// Run the pipeline with the given logger.
///
/// Returns the read-back lines, taken from the logger's sink path after
/// every producer has finished.
pub fn run_with(logger: Arc<Logger>, options: &BootstrapOptions) -> Result<Vec<String>> {
    match logger.load_config(&options.config_path) {
        Ok(record) => {
            for warning in &record.warnings {
                tracing::warn!(warning = %warning, "Config warning");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Config not loaded; using current settings");
        }
    }

    let state = logger.state();
    tracing::info!(
        threshold = %state.threshold,
        sink = %state.sink_path.display(),
        producers = PRODUCER_MESSAGES.len(),
        "Starting producers"
    );

    // The scope joins every producer before returning.
    std::thread::scope(|s| {
        for &(message, severity) in PRODUCER_MESSAGES {
            let logger = Arc::clone(&logger);
            s.spawn(move || logger.log(message, severity));
        }
    });

    let sink_path = logger.sink_path();
    let lines = reader::read_logs(&sink_path, options.read_level)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::info!(
        level = %options.read_level,
        matched = lines.len(),
        "Read-back complete"
    );

    Ok(lines)
}
