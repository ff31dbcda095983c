//! Console backend writing one JSON object per record
//!
//! Example line: `{"ts":"...","severity":"INFO","tag":"net","msg":"...","cause":null}`

use std::io::{self, Write};
use std::sync::Mutex;

use crate::logger::{CauseRef, Logger};
use crate::severity::Severity;

/// Logger that writes JSON lines to a writer, stderr by default
///
/// Write errors are dropped: a failing console must not take the caller down.
pub struct ConsoleLogger<W: Write + Send + 'static = io::Stderr> {
    writer: Mutex<W>,
}

impl ConsoleLogger<io::Stderr> {
    /// Console logger on the process's stderr
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Default for ConsoleLogger<io::Stderr> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write + Send + 'static> ConsoleLogger<W> {
    /// Console logger on an arbitrary writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Build the JSON line for one record
fn render(
    severity: Severity,
    tag: Option<&str>,
    message: &str,
    cause: Option<CauseRef<'_>>,
) -> String {
    serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "severity": severity.as_str(),
        "tag": tag,
        "msg": message,
        "cause": cause.map(|e| e.to_string()),
    })
    .to_string()
}

impl<W: Write + Send + 'static> Logger for ConsoleLogger<W> {
    fn log(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: &str,
        cause: Option<CauseRef<'_>>,
    ) {
        let line = render(severity, tag, message, cause);
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(logger: ConsoleLogger<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = logger.into_inner();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_console_logger_writes_json_line() {
        let logger = ConsoleLogger::new(Vec::new());
        logger.log(Severity::Info, Some("net"), "hello", None);

        let out = lines(logger);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["severity"], "INFO");
        assert_eq!(out[0]["tag"], "net");
        assert_eq!(out[0]["msg"], "hello");
        assert!(out[0]["cause"].is_null());
        assert!(out[0]["ts"].is_string());
    }

    #[test]
    fn test_console_logger_writes_cause_and_null_tag() {
        let logger = ConsoleLogger::new(Vec::new());
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "bad");
        logger.log(Severity::Fatal, None, "stop", Some(&cause));
        logger.flush();

        let out = lines(logger);
        assert_eq!(out[0]["severity"], "FATAL");
        assert!(out[0]["tag"].is_null());
        assert_eq!(out[0]["cause"], "bad");
    }

    #[test]
    fn test_console_logger_swallows_write_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let logger = ConsoleLogger::new(Broken);
        logger.log(Severity::Error, None, "lost", None);
        logger.flush();
    }
}
