//! In-memory log buffer backend
//!
//! Provides a thread-safe ring buffer that keeps recent records for display
//! inside the host application, or for inspection in tests.

use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::logger::{CauseRef, Logger};
use crate::severity::Severity;

/// A single buffered record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Timestamp when the record reached the buffer
    pub timestamp: DateTime<Utc>,
    /// Severity of the record
    pub severity: Severity,
    /// Caller-supplied tag
    pub tag: Option<String>,
    /// Log message
    pub message: String,
    /// Rendered cause, if one was attached
    pub cause: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current time
    pub fn new(severity: Severity, tag: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            tag: tag.map(str::to_string),
            message: message.into(),
            cause: None,
        }
    }

    /// Attach a rendered cause
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// One-line rendering: `HH:MM:SS.mmm I/tag: message (cause)`
    pub fn render(&self) -> String {
        let mut line = format!(
            "{} {}/{}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.severity.letter(),
            self.tag.as_deref().unwrap_or("-"),
            self.message
        );
        if let Some(cause) = &self.cause {
            line.push_str(" (");
            line.push_str(cause);
            line.push(')');
        }
        line
    }
}

/// Thread-safe ring buffer for storing log entries
pub struct LogBuffer {
    /// All log entries (capped at max_entries)
    entries: RwLock<VecDeque<LogEntry>>,
    /// Warnings and worse only
    alerts: RwLock<VecDeque<LogEntry>>,
    /// Maximum entries to keep in the main buffer
    max_entries: usize,
    /// Maximum alerts to keep
    max_alerts: usize,
}

impl LogBuffer {
    /// Create a new log buffer with specified capacities
    pub fn new(max_entries: usize, max_alerts: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_entries)),
            alerts: RwLock::new(VecDeque::with_capacity(max_alerts)),
            max_entries,
            max_alerts,
        }
    }

    /// Push a new log entry to the buffer
    pub fn push(&self, entry: LogEntry) {
        if entry.severity.is_alert() && self.max_alerts > 0 {
            if let Ok(mut alerts) = self.alerts.write() {
                if alerts.len() >= self.max_alerts {
                    alerts.pop_front();
                }
                alerts.push_back(entry.clone());
            }
        }

        if self.max_entries == 0 {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_entries {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Get all entries as a vector (oldest first)
    pub fn all_entries(&self) -> Vec<LogEntry> {
        self.entries
            .read()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get entries at or above `severity`
    pub fn entries_at_least(&self, severity: Severity) -> Vec<LogEntry> {
        self.entries
            .read()
            .map(|e| e.iter().filter(|entry| entry.severity >= severity).cloned().collect())
            .unwrap_or_default()
    }

    /// Get the number of entries in the buffer
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and alert
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        self.clear_alerts();
    }

    /// Get pending alerts (warnings and worse)
    pub fn pending_alerts(&self) -> Vec<LogEntry> {
        self.alerts
            .read()
            .map(|a| a.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get the number of alerts
    pub fn alert_count(&self) -> usize {
        self.alerts.read().map(|a| a.len()).unwrap_or(0)
    }

    /// Clear all alerts (after they've been acknowledged)
    pub fn clear_alerts(&self) {
        if let Ok(mut alerts) = self.alerts.write() {
            alerts.clear();
        }
    }
}

impl Logger for LogBuffer {
    fn log(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: &str,
        cause: Option<CauseRef<'_>>,
    ) {
        let entry = LogEntry::new(severity, tag, message);
        let entry = match cause {
            Some(cause) => entry.with_cause(cause.to_string()),
            None => entry,
        };
        self.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_buffer_push_and_retrieve() {
        let buffer = LogBuffer::new(100, 10);

        buffer.push(LogEntry::new(Severity::Info, Some("test"), "message 1"));
        buffer.push(LogEntry::new(Severity::Warn, Some("test"), "warning 1"));
        buffer.push(LogEntry::new(Severity::Fatal, Some("test"), "fatal 1"));

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.alert_count(), 2);

        let entries = buffer.all_entries();
        assert_eq!(entries[0].message, "message 1");
        assert_eq!(entries[1].message, "warning 1");
        assert_eq!(entries[2].message, "fatal 1");

        let alerts = buffer.pending_alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].message, "warning 1");
        assert_eq!(alerts[1].message, "fatal 1");
    }

    #[test]
    fn test_log_buffer_capacity() {
        let buffer = LogBuffer::new(3, 2);

        for i in 0..5 {
            buffer.push(LogEntry::new(Severity::Info, None, format!("msg {}", i)));
        }

        assert_eq!(buffer.len(), 3);
        let entries = buffer.all_entries();
        assert_eq!(entries[0].message, "msg 2");
        assert_eq!(entries[1].message, "msg 3");
        assert_eq!(entries[2].message, "msg 4");
    }

    #[test]
    fn test_log_buffer_zero_capacity_keeps_nothing() {
        let buffer = LogBuffer::new(0, 0);
        buffer.push(LogEntry::new(Severity::Error, None, "gone"));
        assert!(buffer.is_empty());
        assert_eq!(buffer.alert_count(), 0);
    }

    #[test]
    fn test_log_buffer_as_logger_records_cause() {
        let buffer = LogBuffer::new(10, 10);
        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");

        buffer.log(Severity::Error, Some("io"), "open failed", Some(&cause));
        buffer.log(Severity::Debug, None, "plain", None);

        let entries = buffer.all_entries();
        assert_eq!(entries[0].tag.as_deref(), Some("io"));
        assert_eq!(entries[0].cause.as_deref(), Some("no such file"));
        assert_eq!(entries[1].tag, None);
        assert_eq!(entries[1].cause, None);
    }

    #[test]
    fn test_entries_at_least_and_clear() {
        let buffer = LogBuffer::new(10, 10);
        for severity in Severity::ALL {
            buffer.push(LogEntry::new(severity, None, severity.as_str()));
        }

        let loud = buffer.entries_at_least(Severity::Error);
        assert_eq!(loud.len(), 2);
        assert_eq!(loud[0].severity, Severity::Error);

        buffer.clear_alerts();
        assert_eq!(buffer.alert_count(), 0);
        assert_eq!(buffer.len(), 6);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_log_entry_render() {
        let entry = LogEntry::new(Severity::Warn, Some("net"), "slow").with_cause("timeout");
        let line = entry.render();
        assert!(line.ends_with("W/net: slow (timeout)"));

        let untagged = LogEntry::new(Severity::Info, None, "hi").render();
        assert!(untagged.ends_with("I/-: hi"));
    }
}
