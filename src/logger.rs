//! File-backed event logger.
//!
//! Every component logs through this type rather than touching files
//! directly: one line per event, appended to one of four named log files
//! under the configured log directory. Messages follow the
//! `field => value, field => value` convention produced by
//! [`build_log_message`]. Each file write also emits a structured `tracing`
//! event so deployments that only collect process output still see the
//! entry.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Destination files for log lines. One logical file per event family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFile {
    PageNotFound,
    Error,
    Exception,
    Email,
}

impl LogFile {
    /// Base name of the backing file inside the log directory.
    pub fn file_name(self) -> &'static str {
        match self {
            LogFile::PageNotFound => "pageNotFoundLog.txt",
            LogFile::Error => "errorLog.txt",
            LogFile::Exception => "exceptionLog.txt",
            LogFile::Email => "emailLog.txt",
        }
    }
}

/// Assemble a log message from ordered `field => value` pairs.
///
/// Order is preserved and the trailing separator is suppressed, matching the
/// wire format consumed by log tooling: `a => 1, b => 2`.
pub fn build_log_message<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut msg = String::new();
    for (key, value) in fields {
        if !msg.is_empty() {
            msg.push_str(", ");
        }
        msg.push_str(key);
        msg.push_str(" => ");
        msg.push_str(value);
    }
    msg
}

/// Appends tagged lines to named log files.
///
/// Cheap to construct; the factory hands out a fresh one wherever a log write
/// is needed. When logging is disabled every write is a no-op that reports
/// success.
#[derive(Debug, Clone)]
pub struct Logger {
    enabled: bool,
    log_dir: PathBuf,
}

impl Logger {
    pub fn new(enabled: bool, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled,
            log_dir: log_dir.into(),
        }
    }

    /// Append one line to the given log file.
    ///
    /// Returns whether the line was written. Failures to open or write the
    /// file are reported via `tracing` and swallowed: logging must never turn
    /// a servable request into a failure.
    pub fn write(&self, msg: &str, kind: &str, file: LogFile) -> bool {
        if !self.enabled {
            return true;
        }

        let line = format!("[{}] [{}] {}\n", unix_timestamp(), kind, msg);
        let path = self.log_dir.join(file.file_name());

        let result = std::fs::create_dir_all(&self.log_dir)
            .and_then(|_| OpenOptions::new().create(true).append(true).open(&path))
            .and_then(|mut f| f.write_all(line.as_bytes()));

        match result {
            Ok(()) => {
                debug!(kind = %kind, file = %file.file_name(), msg = %msg, "log line written");
                true
            }
            Err(err) => {
                warn!(
                    kind = %kind,
                    file = %file.file_name(),
                    error = %err,
                    "failed to write log line"
                );
                false
            }
        }
    }

    /// Convenience for logging a map of fields as one formatted line.
    pub fn write_fields(&self, fields: &BTreeMap<String, String>, kind: &str, file: LogFile) -> bool {
        let msg = build_log_message(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        self.write(&msg, kind, file)
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_format_joins_pairs_with_comma() {
        let msg = build_log_message([("message", "boom"), ("code", "1001")]);
        assert_eq!(msg, "message => boom, code => 1001");
    }

    #[test]
    fn single_pair_has_no_separator() {
        let msg = build_log_message([("User entered", "/ghost/town")]);
        assert_eq!(msg, "User entered => /ghost/town");
    }

    #[test]
    fn disabled_logger_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(false, dir.path());
        assert!(logger.write("msg", "404", LogFile::PageNotFound));
        assert!(!dir.path().join(LogFile::PageNotFound.file_name()).exists());
    }

    #[test]
    fn write_appends_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(true, dir.path());
        logger.write("first", "404", LogFile::PageNotFound);
        logger.write("second", "404", LogFile::PageNotFound);

        let contents =
            std::fs::read_to_string(dir.path().join(LogFile::PageNotFound.file_name())).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("[404] first"));
    }
}
