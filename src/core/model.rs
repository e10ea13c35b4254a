// sevlog - core/model.rs
//
// Core data model types: severity and the formatted entry line.
// Pure definitions with no I/O.

use crate::util::constants::TIMESTAMP_FORMAT;
use crate::util::error::SeverityError;
use chrono::NaiveDateTime;
use std::str::FromStr;

// =============================================================================
// Severity
// =============================================================================

/// Log importance, ordered from least to most severe.
///
/// The derived `Ord` follows declaration order, so `Info < Warning < Error`
/// and threshold checks are plain comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Returns all variants, least severe first.
    pub fn all() -> &'static [Severity] {
        &[Severity::Info, Severity::Warning, Severity::Error]
    }

    /// Canonical uppercase name, used in entry lines and config values.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }

    /// Ordinal rank; higher is more severe.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Bracketed tag as it appears in an entry line, e.g. `[ERROR]`.
    pub fn tag(&self) -> String {
        format!("[{}]", self.name())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = SeverityError;

    /// Case-insensitive parse of a canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::all()
            .iter()
            .copied()
            .find(|sev| sev.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SeverityError::Invalid { raw: s.to_string() })
    }
}

// =============================================================================
// Entry formatting
// =============================================================================

/// Format one entry as `[yyyy-MM-dd HH:mm:ss] [SEVERITY] message`.
///
/// No trailing newline; the sink adds the terminator.
pub fn format_entry(timestamp: NaiveDateTime, severity: Severity, message: &str) -> String {
    format!(
        "[{}] [{}] {message}",
        timestamp.format(TIMESTAMP_FORMAT),
        severity.name()
    )
}

/// Extract the severity tag from a formatted entry line.
///
/// Returns `None` for lines that do not follow the entry layout.
pub fn parse_entry_severity(line: &str) -> Option<Severity> {
    let rest = line.strip_prefix('[')?;
    let (_, rest) = rest.split_once("] [")?;
    let (name, _) = rest.split_once(']')?;
    name.parse().ok()
}
