//! Default backend: forward records to `tracing`
//!
//! Each severity maps to its own `tracing` level, the tag travels as a field,
//! and records with a cause use a distinct event shape carrying an `error`
//! field. `Fatal` has no `tracing` counterpart, so it is emitted at ERROR
//! with `fatal = true`.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::logger::{CauseRef, Logger};
use crate::severity::Severity;

/// Target used for every forwarded event
pub const TARGET: &str = "inlinelog";

/// Backend that forwards every record to the `tracing` dispatcher
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: &str,
        cause: Option<CauseRef<'_>>,
    ) {
        // An absent tag leaves the field out of the event
        match cause {
            None => match severity {
                Severity::Verbose => tracing::trace!(target: TARGET, tag, "{}", message),
                Severity::Debug => tracing::debug!(target: TARGET, tag, "{}", message),
                Severity::Info => tracing::info!(target: TARGET, tag, "{}", message),
                Severity::Warn => tracing::warn!(target: TARGET, tag, "{}", message),
                Severity::Error => tracing::error!(target: TARGET, tag, "{}", message),
                Severity::Fatal => {
                    tracing::error!(target: TARGET, tag, fatal = true, "{}", message)
                }
            },
            Some(error) => match severity {
                Severity::Verbose => {
                    tracing::trace!(target: TARGET, tag, error = %error, "{}", message)
                }
                Severity::Debug => {
                    tracing::debug!(target: TARGET, tag, error = %error, "{}", message)
                }
                Severity::Info => {
                    tracing::info!(target: TARGET, tag, error = %error, "{}", message)
                }
                Severity::Warn => {
                    tracing::warn!(target: TARGET, tag, error = %error, "{}", message)
                }
                Severity::Error => {
                    tracing::error!(target: TARGET, tag, error = %error, "{}", message)
                }
                Severity::Fatal => tracing::error!(
                    target: TARGET,
                    tag,
                    fatal = true,
                    error = %error,
                    "{}",
                    message
                ),
            },
        }
    }
}

/// Install a `tracing` subscriber that prints to stderr
///
/// The filter comes from `RUST_LOG` when set, otherwise from `default_directive`
/// (for example `"inlinelog=trace"`). Fails if a global subscriber is already set.
pub fn init_subscriber(default_directive: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Writer factory that collects formatted events into a shared string
    #[derive(Clone, Default)]
    struct Collected(Arc<Mutex<Vec<u8>>>);

    impl Write for Collected {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Collected {
        type Writer = Collected;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Collected {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let collected = Collected::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(collected.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        collected.text()
    }

    #[test]
    fn test_tracing_logger_maps_levels() {
        let out = capture(|| {
            TracingLogger.log(Severity::Verbose, Some("a"), "verbose line", None);
            TracingLogger.log(Severity::Warn, Some("b"), "warn line", None);
        });

        assert!(out.contains("TRACE"));
        assert!(out.contains("verbose line"));
        assert!(out.contains("WARN"));
        assert!(out.contains("tag=\"b\""));
    }

    #[test]
    fn test_tracing_logger_fatal_is_marked() {
        let out = capture(|| {
            TracingLogger.log(Severity::Fatal, Some("core"), "impossible", None);
        });

        assert!(out.contains("ERROR"));
        assert!(out.contains("fatal=true"));
        assert!(out.contains("impossible"));
    }

    #[test]
    fn test_tracing_logger_includes_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "broken pipe");
        let out = capture(|| {
            TracingLogger.log(Severity::Error, None, "send failed", Some(&cause));
        });

        assert!(out.contains("send failed"));
        assert!(out.contains("error=broken pipe"));
    }

    #[test]
    fn test_tracing_logger_omits_missing_tag() {
        let out = capture(|| {
            TracingLogger.log(Severity::Info, None, "untagged", None);
            TracingLogger.log(Severity::Info, Some(""), "empty tag", None);
        });

        let untagged = out.lines().find(|line| line.contains("untagged")).unwrap();
        assert!(!untagged.contains("tag="));
        let empty = out.lines().find(|line| line.contains("empty tag")).unwrap();
        assert!(empty.contains("tag=\"\""));
    }

    #[test]
    fn test_tracing_logger_uses_crate_target() {
        let out = capture(|| {
            TracingLogger.log(Severity::Info, None, "targeted", None);
        });
        assert!(out.contains("inlinelog:"));
    }
}
