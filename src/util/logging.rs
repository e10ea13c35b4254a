// sevlog - util/logging.rs
//
// Diagnostic output for the logger itself (config warnings, sink write
// failures, bootstrap progress). Entries written by `core::logger` go to the
// sink file; everything here goes to stderr through `tracing`.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - CLI flag: --log-level <directive>
//
// Never logs the content of user messages above debug level.

use tracing_subscriber::EnvFilter;

/// Pick the filter directive.
///
/// Priority: RUST_LOG value > `debug_flag` > `level` > default "warn".
fn filter_directive(rust_log: Option<String>, debug_flag: bool, level: Option<&str>) -> String {
    if let Some(env) = rust_log {
        env
    } else if debug_flag {
        "debug".to_string()
    } else if let Some(level) = level {
        level.to_string()
    } else {
        super::constants::DEFAULT_LOG_LEVEL.to_string()
    }
}

/// Initialise the diagnostic subscriber.
///
/// Calling this more than once is harmless: later calls are ignored.
pub fn init(debug_flag: bool, level: Option<&str>) {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), debug_flag, level);
    let filter = EnvFilter::new(directive);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            app = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            "Diagnostics initialised"
        );
    }
}
