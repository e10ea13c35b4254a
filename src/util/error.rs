// sevlog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every I/O failure keeps the offending path and the underlying io::Error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all sevlog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SevlogError {
    /// A severity name could not be parsed.
    Severity(SeverityError),

    /// Configuration could not be loaded.
    Config(ConfigError),

    /// An entry could not be appended to the sink.
    Sink(SinkError),

    /// Read-back of a persisted log failed.
    Read(ReadError),
}

impl fmt::Display for SevlogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Severity(e) => write!(f, "Severity error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Sink(e) => write!(f, "Sink error: {e}"),
            Self::Read(e) => write!(f, "Read error: {e}"),
        }
    }
}

impl std::error::Error for SevlogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Severity(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Sink(e) => Some(e),
            Self::Read(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Severity errors
// ---------------------------------------------------------------------------

/// Errors related to severity names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeverityError {
    /// The text does not name a known severity.
    Invalid { raw: String },
}

impl fmt::Display for SeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { raw } => write!(
                f,
                "'{raw}' is not a valid severity. Expected one of INFO, WARNING, ERROR"
            ),
        }
    }
}

impl std::error::Error for SeverityError {}

impl From<SeverityError> for SevlogError {
    fn from(e: SeverityError) -> Self {
        Self::Severity(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The config source is missing or unreadable.
    Unavailable { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { path, source } => {
                write!(f, "Config '{}' is unavailable: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for SevlogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

/// Errors related to appending entries to the sink file.
#[derive(Debug)]
pub enum SinkError {
    /// Opening or writing the sink file failed.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write { path, source } => {
                write!(f, "Failed to append to '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<SinkError> for SevlogError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

// ---------------------------------------------------------------------------
// Read errors
// ---------------------------------------------------------------------------

/// Errors related to reading a persisted log back.
#[derive(Debug)]
pub enum ReadError {
    /// The log file could not be opened.
    SourceUnavailable { path: PathBuf, source: io::Error },

    /// Reading failed part-way through the file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable { path, source } => {
                write!(f, "Log file '{}' is unavailable: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnavailable { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ReadError> for SevlogError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

/// Convenience type alias for sevlog results.
pub type Result<T> = std::result::Result<T, SevlogError>;
