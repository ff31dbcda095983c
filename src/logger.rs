//! Backend capability
//!
//! A [`Logger`] receives fully realised records from the dispatcher and
//! performs the actual output. The dispatcher has no way to report backend
//! failures to the caller, so implementations handle their own errors.

use std::error::Error;
use std::sync::Arc;

use crate::severity::Severity;

/// Owned cause attached to a log record
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Borrowed cause as handed to a backend
pub type CauseRef<'a> = &'a (dyn Error + Send + Sync + 'static);

/// Output sink for log records
///
/// Implementors must be `Send + Sync + 'static` so they can be installed as the
/// process-wide backend and called from any thread.
pub trait Logger: Send + Sync + 'static {
    /// Emit one record
    fn log(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: &str,
        cause: Option<CauseRef<'_>>,
    );

    /// Flush any buffered records
    fn flush(&self) {}
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: &str,
        cause: Option<CauseRef<'_>>,
    ) {
        (**self).log(severity, tag, message, cause);
    }

    fn flush(&self) {
        (**self).flush();
    }
}

impl<L: Logger + ?Sized> Logger for &'static L {
    fn log(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: &str,
        cause: Option<CauseRef<'_>>,
    ) {
        (**self).log(severity, tag, message, cause);
    }

    fn flush(&self) {
        (**self).flush();
    }
}

/// Logger that drops every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(
        &self,
        _severity: Severity,
        _tag: Option<&str>,
        _message: &str,
        _cause: Option<CauseRef<'_>>,
    ) {
        // intentionally do nothing
    }
}
