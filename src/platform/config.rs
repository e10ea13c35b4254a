// sevlog - platform/config.rs
//
// Flat `key=value` config loading.
//
// Format: one pair per line, no quoting, no escaping, no comments.
// Recognised keys are `logLevel` (case-insensitive severity name) and
// `logFilePath` (taken verbatim). Lines without exactly one `=`, with an
// empty key or value, or with an unknown key are skipped silently. A
// recognised key with a bad value is skipped with a warning; the rest of the
// file is still applied.
//
// The file is decoded as lossy UTF-8. A path value that did not decode
// cleanly cannot name the intended file, so it is skipped with a warning.

use crate::core::model::Severity;
use crate::util::constants::{CONFIG_KEY_LEVEL, CONFIG_KEY_PATH, CONFIG_SEPARATOR};
use crate::util::error::ConfigError;
use std::path::{Path, PathBuf};

/// Result of parsing a config source.
///
/// `level` and `sink_path` hold the last valid occurrence of each key;
/// `None` means the source left that setting alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRecord {
    /// Recognised `(key, value)` pairs in source order.
    pub entries: Vec<(String, String)>,
    /// Threshold selected by `logLevel`.
    pub level: Option<Severity>,
    /// Sink path selected by `logFilePath`.
    pub sink_path: Option<PathBuf>,
    /// Non-fatal problems found while parsing.
    pub warnings: Vec<String>,
}

impl ConfigRecord {
    /// True when the source changed neither setting.
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.sink_path.is_none()
    }
}

/// Split a line into `(key, value)` if it has exactly one separator and
/// both sides are non-empty.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(CONFIG_SEPARATOR)?;
    if key.is_empty() || value.is_empty() || value.contains(CONFIG_SEPARATOR) {
        return None;
    }
    Some((key, value))
}

/// Parse config text. Never fails; bad lines are skipped.
pub fn parse_config(content: &str) -> ConfigRecord {
    let mut record = ConfigRecord::default();

    // `lines()` also strips the '\r' of CRLF endings.
    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let Some((key, value)) = split_pair(line) else {
            tracing::trace!(line_number, "Skipping malformed config line");
            continue;
        };

        match key {
            CONFIG_KEY_LEVEL => match value.parse::<Severity>() {
                Ok(level) => {
                    record.level = Some(level);
                    record.entries.push((key.to_string(), value.to_string()));
                }
                Err(e) => {
                    let msg = format!("line {line_number}: {CONFIG_KEY_LEVEL} ignored: {e}");
                    tracing::warn!(line_number, value, "Ignoring invalid logLevel");
                    record.warnings.push(msg);
                }
            },
            CONFIG_KEY_PATH if value.contains(char::REPLACEMENT_CHARACTER) => {
                let msg = format!("line {line_number}: {CONFIG_KEY_PATH} ignored: not valid UTF-8");
                tracing::warn!(line_number, "Ignoring logFilePath that is not valid UTF-8");
                record.warnings.push(msg);
            }
            CONFIG_KEY_PATH => {
                record.sink_path = Some(PathBuf::from(value));
                record.entries.push((key.to_string(), value.to_string()));
            }
            other => {
                tracing::trace!(line_number, key = other, "Skipping unknown config key");
            }
        }
    }

    record
}

/// Read and parse the config file at `path`.
///
/// Fails with `ConfigError::Unavailable` when the file cannot be read; the
/// caller decides whether that is fatal.
pub fn load_config(path: &Path) -> Result<ConfigRecord, ConfigError> {
    let bytes = std::fs::read(path).map_err(|e| ConfigError::Unavailable {
        path: path.to_path_buf(),
        source: e,
    })?;

    let record = parse_config(&String::from_utf8_lossy(&bytes));

    tracing::debug!(
        path = %path.display(),
        level = ?record.level,
        sink = ?record.sink_path,
        warnings = record.warnings.len(),
        "Loaded config"
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_level_and_path() {
        let record = parse_config("logLevel=WARNING\nlogFilePath=out.txt\n");
        assert_eq!(record.level, Some(Severity::Warning));
        assert_eq!(record.sink_path, Some(PathBuf::from("out.txt")));
        assert_eq!(record.entries.len(), 2);
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let record = parse_config("logLevel=error");
        assert_eq!(record.level, Some(Severity::Error));
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let record =
            parse_config("foo=bar=baz\nlogLevel\nlogLevel=ERROR=x\n\n=INFO\nlogFilePath=\n");
        assert!(record.is_empty());
        assert!(record.entries.is_empty());
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record = parse_config("colour=blue\nlogLevel=INFO");
        assert_eq!(record.level, Some(Severity::Info));
        assert_eq!(
            record.entries,
            vec![("logLevel".to_string(), "INFO".to_string())]
        );
    }

    #[test]
    fn test_bad_level_skips_line_and_continues() {
        let record = parse_config("logLevel=LOUD\nlogFilePath=a.log");
        assert_eq!(record.level, None);
        assert_eq!(record.sink_path, Some(PathBuf::from("a.log")));
        assert_eq!(record.warnings.len(), 1);
        assert!(record.warnings[0].contains("LOUD"));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let record = parse_config("logLevel=INFO\nlogLevel=ERROR\nlogLevel=nope");
        assert_eq!(record.level, Some(Severity::Error));
    }

    #[test]
    fn test_path_value_is_verbatim() {
        let record = parse_config("logFilePath= logs/app.txt \r\n");
        assert_eq!(record.sink_path, Some(PathBuf::from(" logs/app.txt ")));
    }

    #[test]
    fn test_key_is_case_sensitive() {
        let record = parse_config("loglevel=ERROR\nLOGFILEPATH=x.txt");
        assert!(record.is_empty());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "logLevel=ERROR").unwrap();
        let record = load_config(file.path()).unwrap();
        assert_eq!(record.level, Some(Severity::Error));
    }

    #[test]
    fn test_non_utf8_line_does_not_discard_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"logLevel=ERROR\nlogFilePath=caf\xe9.txt\n").unwrap();

        let record = load_config(file.path()).unwrap();
        assert_eq!(record.level, Some(Severity::Error));
        assert_eq!(record.sink_path, None);
        assert_eq!(record.warnings.len(), 1);
        assert!(record.warnings[0].contains("logFilePath"));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("absent.txt"));
        assert!(
            matches!(result, Err(ConfigError::Unavailable { .. })),
            "expected Unavailable, got {result:?}"
        );
    }
}
