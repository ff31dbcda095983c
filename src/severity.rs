//! Log severity levels
//!
//! Severities are totally ordered by urgency. The dispatcher compares the
//! active minimum severity against each call's severity before doing any work.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Urgency of a log record, from least to most urgent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// Fine-grained tracing output
    #[serde(alias = "trace")]
    Verbose = 0,
    /// Developer diagnostics
    #[default]
    Debug = 1,
    /// Normal operational messages
    Info = 2,
    /// Something unexpected that the program recovered from
    #[serde(alias = "warning")]
    Warn = 3,
    /// An operation failed
    Error = 4,
    /// A condition that should never happen
    #[serde(alias = "wtf")]
    Fatal = 5,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 6] = [
        Severity::Verbose,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Get the display name for this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Verbose => "VERBOSE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Single-letter code, as used by compact log formats
    pub fn letter(&self) -> char {
        match self {
            Severity::Verbose => 'V',
            Severity::Debug => 'D',
            Severity::Info => 'I',
            Severity::Warn => 'W',
            Severity::Error => 'E',
            Severity::Fatal => 'F',
        }
    }

    /// Check if this severity is a warning or worse (for alerts)
    pub fn is_alert(&self) -> bool {
        *self >= Severity::Warn
    }

    /// Numeric rank, stable across releases
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Severity::rank`]; out-of-range values clamp to `Fatal`
    pub(crate) const fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Severity::Verbose,
            1 => Severity::Debug,
            2 => Severity::Info,
            3 => Severity::Warn,
            4 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity '{0}', expected one of verbose, debug, info, warn, error, fatal")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbose" | "trace" | "v" => Ok(Severity::Verbose),
            "debug" | "d" => Ok(Severity::Debug),
            "info" | "i" => Ok(Severity::Info),
            "warn" | "warning" | "w" => Ok(Severity::Warn),
            "error" | "e" => Ok(Severity::Error),
            "fatal" | "wtf" | "f" => Ok(Severity::Fatal),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Severity::Verbose,
            tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warn,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Verbose => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error | Severity::Fatal => tracing::Level::ERROR,
        }
    }
}
