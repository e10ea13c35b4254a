// sevlog - util/constants.rs
//
// Single source of truth for named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "sevlog";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Logger defaults
// =============================================================================

/// Sink file used until configuration says otherwise.
pub const DEFAULT_SINK_PATH: &str = "log.txt";

/// Config file read by the bootstrap when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "loggerConfig.txt";

/// chrono format for entry timestamps (`yyyy-MM-dd HH:mm:ss`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Config keys
// =============================================================================

/// Key selecting the severity threshold.
pub const CONFIG_KEY_LEVEL: &str = "logLevel";

/// Key selecting the sink file path.
pub const CONFIG_KEY_PATH: &str = "logFilePath";

/// Separator between key and value on a config line.
pub const CONFIG_SEPARATOR: char = '=';

// =============================================================================
// Diagnostics
// =============================================================================

/// Default filter for the crate's own diagnostic output.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
