//! Configuration management for inlinelog
//!
//! A small TOML file selects the starting severity and backend. Environment
//! variables override the file, which is useful for turning up verbosity on a
//! single run without editing anything.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backend::{ConsoleLogger, LogBuffer, TracingLogger};
use crate::dispatcher::Dispatcher;
use crate::logger::NoopLogger;
use crate::severity::Severity;

/// Environment variable overriding the configured severity
pub const SEVERITY_ENV: &str = "INLINELOG_SEVERITY";

/// Environment variable overriding the configured backend
pub const BACKEND_ENV: &str = "INLINELOG_BACKEND";

/// Which built-in backend to install
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Forward to `tracing`
    #[default]
    Tracing,
    /// JSON lines on stderr
    Console,
    /// In-memory ring buffer
    Buffer,
    /// Drop everything
    Noop,
}

impl BackendKind {
    /// Parse a backend name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tracing" => Some(BackendKind::Tracing),
            "console" => Some(BackendKind::Console),
            "buffer" => Some(BackendKind::Buffer),
            "noop" | "none" => Some(BackendKind::Noop),
            _ => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum severity that reaches the backend (default: debug)
    #[serde(default)]
    pub severity: Severity,

    /// Backend to install (default: tracing)
    #[serde(default)]
    pub backend: BackendKind,

    /// Entries kept by the buffer backend (default: 10000)
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Warnings and worse kept by the buffer backend (default: 100)
    #[serde(default = "default_alert_capacity")]
    pub alert_capacity: usize,
}

fn default_buffer_capacity() -> usize {
    10_000
}

fn default_alert_capacity() -> usize {
    100
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            severity: Severity::default(),
            backend: BackendKind::default(),
            buffer_capacity: default_buffer_capacity(),
            alert_capacity: default_alert_capacity(),
        }
    }
}

/// Result of [`LogConfig::install`]
#[derive(Clone, Default)]
pub struct Installed {
    /// Shared buffer, when the buffer backend was chosen
    pub buffer: Option<Arc<LogBuffer>>,
}

impl LogConfig {
    /// Load configuration from the default file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Apply `INLINELOG_SEVERITY` and `INLINELOG_BACKEND` from the environment
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    ///
    /// Invalid values are reported through `tracing` and otherwise ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(SEVERITY_ENV) {
            match value.parse::<Severity>() {
                Ok(severity) => self.severity = severity,
                Err(e) => tracing::warn!("Ignoring {}: {}", SEVERITY_ENV, e),
            }
        }
        if let Some(value) = lookup(BACKEND_ENV) {
            match BackendKind::parse(&value) {
                Some(backend) => self.backend = backend,
                None => tracing::warn!("Ignoring {}: unknown backend '{}'", BACKEND_ENV, value),
            }
        }
        self
    }

    /// Set severity and backend on `dispatcher`
    pub fn install(&self, dispatcher: &Dispatcher) -> Installed {
        dispatcher.set_severity(self.severity);

        let mut installed = Installed::default();
        match self.backend {
            BackendKind::Tracing => dispatcher.set_static_logger(&TracingLogger),
            BackendKind::Console => dispatcher.set_logger(ConsoleLogger::stderr()),
            BackendKind::Noop => dispatcher.set_static_logger(&NoopLogger),
            BackendKind::Buffer => {
                let buffer = Arc::new(LogBuffer::new(self.buffer_capacity, self.alert_capacity));
                dispatcher.set_logger(Arc::clone(&buffer));
                installed.buffer = Some(buffer);
            }
        }

        tracing::debug!(
            severity = %self.severity,
            backend = ?self.backend,
            "Installed log configuration"
        );
        installed
    }
}

/// Get the base configuration directory (~/.inlinelog)
/// Falls back to ./.inlinelog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".inlinelog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".inlinelog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
