// sevlog - core/reader.rs
//
// Read-back of a persisted log file.
//
// `read_logs` matches the literal bracketed tag of one severity, so reading
// `ERROR` never yields `WARNING` lines even though the write side filters by
// threshold. `ReadFilter::AtLeast` is the threshold-consistent alternative
// and must be asked for explicitly.
//
// The returned iterator is lazy: the file is opened up front (so a missing
// file fails immediately) and lines are read on demand. Call `read_logs`
// again to rescan from the start.
//
// Lines are decoded as lossy UTF-8, so a stray non-UTF-8 byte only mangles
// its own line. Only genuine read failures end the scan.

use crate::core::model::{parse_entry_severity, Severity};
use crate::util::error::ReadError;
use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::{Path, PathBuf};

/// Which lines a read-back yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFilter {
    /// Lines containing exactly this severity's `[NAME]` tag.
    Exact(Severity),
    /// Well-formed entry lines whose severity is at or above this one.
    AtLeast(Severity),
}

impl ReadFilter {
    fn matches(&self, line: &str, tag: &str) -> bool {
        match self {
            ReadFilter::Exact(_) => line.contains(tag),
            ReadFilter::AtLeast(min) => parse_entry_severity(line).is_some_and(|s| s >= *min),
        }
    }
}

/// Lazy sequence of matching lines from one log file.
#[derive(Debug)]
pub struct LogLines {
    path: PathBuf,
    lines: Split<BufReader<File>>,
    filter: ReadFilter,
    tag: String,
    failed: bool,
}

impl Iterator for LogLines {
    type Item = Result<String, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for line in self.lines.by_ref() {
            match line {
                Ok(raw) => {
                    let bytes = raw.strip_suffix(b"\r").unwrap_or(&raw[..]);
                    let line = String::from_utf8_lossy(bytes);
                    if self.filter.matches(&line, &self.tag) {
                        return Some(Ok(line.into_owned()));
                    }
                }
                Err(e) => {
                    // Stop after the first mid-scan failure.
                    self.failed = true;
                    return Some(Err(ReadError::Io {
                        path: self.path.clone(),
                        source: e,
                    }));
                }
            }
        }
        None
    }
}

/// Lines of `path` containing the `[NAME]` tag of `severity`, in file order.
pub fn read_logs(path: &Path, severity: Severity) -> Result<LogLines, ReadError> {
    read_logs_with(path, ReadFilter::Exact(severity))
}

/// Lines of `path` accepted by `filter`, in file order.
pub fn read_logs_with(path: &Path, filter: ReadFilter) -> Result<LogLines, ReadError> {
    let file = File::open(path).map_err(|e| ReadError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;

    let severity = match filter {
        ReadFilter::Exact(s) | ReadFilter::AtLeast(s) => s,
    };

    tracing::debug!(path = %path.display(), ?filter, "Reading log back");

    Ok(LogLines {
        path: path.to_path_buf(),
        lines: BufReader::new(file).split(b'\n'),
        filter,
        tag: severity.tag(),
        failed: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[2024-01-01 00:00:00] [INFO] a\n\
                          [2024-01-01 00:00:01] [ERROR] b\n\
                          [2024-01-01 00:00:02] [WARNING] c\n\
                          not an entry [ERROR] mention\n";

    fn sample_file() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), SAMPLE).unwrap();
        file
    }

    fn collect(lines: LogLines) -> Vec<String> {
        lines.collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn test_exact_filter_matches_tag_only() {
        let file = sample_file();
        let lines = collect(read_logs(file.path(), Severity::Error).unwrap());
        assert_eq!(
            lines,
            vec![
                "[2024-01-01 00:00:01] [ERROR] b".to_string(),
                "not an entry [ERROR] mention".to_string(),
            ]
        );
    }

    #[test]
    fn test_exact_filter_with_no_matches() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "[2024-01-01 00:00:00] [INFO] a\n[2024-01-01 00:00:01] [ERROR] b\n",
        )
        .unwrap();
        assert!(collect(read_logs(file.path(), Severity::Warning).unwrap()).is_empty());
    }

    #[test]
    fn test_at_least_filter_uses_ordering() {
        let file = sample_file();
        let filter = ReadFilter::AtLeast(Severity::Warning);
        let lines = collect(read_logs_with(file.path(), filter).unwrap());
        assert_eq!(
            lines,
            vec![
                "[2024-01-01 00:00:01] [ERROR] b".to_string(),
                "[2024-01-01 00:00:02] [WARNING] c".to_string(),
            ]
        );
    }

    #[test]
    fn test_read_is_restartable() {
        let file = sample_file();
        let first = collect(read_logs(file.path(), Severity::Info).unwrap());
        let second = collect(read_logs(file.path(), Severity::Info).unwrap());
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_non_utf8_line_does_not_end_scan() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut bytes = b"[2024-01-01 00:00:00] [ERROR] a\n".to_vec();
        bytes.extend_from_slice(b"[2024-01-01 00:00:01] [INFO] caf\xe9\n");
        bytes.extend_from_slice(b"[2024-01-01 00:00:02] [ERROR] b\r\n");
        std::fs::write(file.path(), bytes).unwrap();

        let errors = collect(read_logs(file.path(), Severity::Error).unwrap());
        assert_eq!(
            errors,
            vec![
                "[2024-01-01 00:00:00] [ERROR] a".to_string(),
                "[2024-01-01 00:00:02] [ERROR] b".to_string(),
            ]
        );

        let infos = collect(read_logs(file.path(), Severity::Info).unwrap());
        assert_eq!(infos, vec!["[2024-01-01 00:00:01] [INFO] caf\u{FFFD}".to_string()]);
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_logs(&dir.path().join("absent.txt"), Severity::Error);
        assert!(
            matches!(result, Err(ReadError::SourceUnavailable { .. })),
            "expected SourceUnavailable, got {result:?}"
        );
    }
}
