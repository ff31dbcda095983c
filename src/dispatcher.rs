//! Severity-gated dispatch
//!
//! A [`Dispatcher`] holds the active minimum severity and the active backend.
//! Any thread may reconfigure at any time and readers never take a lock. A
//! reader may briefly observe the previous value after another thread's
//! update; the last writer wins.
//!
//! A replaced backend is dropped once the last record already handed to it
//! has been delivered.
//!
//! The process-wide instance used by the logging macros is returned by
//! [`crate::dispatcher()`]. Separate instances are useful for embedding and
//! tests.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::backend::TracingLogger;
use crate::gate;
use crate::logger::{Cause, CauseRef, Logger};
use crate::severity::Severity;

/// Backend used until another one is installed
static DEFAULT_LOGGER: TracingLogger = TracingLogger;

/// Active severity and backend for a set of log call sites
pub struct Dispatcher {
    /// Rank of the minimum severity that reaches the backend
    severity: AtomicU8,
    /// Installed backend; empty means the default backend
    logger: ArcSwapOption<Box<dyn Logger>>,
}

impl Dispatcher {
    /// Create a dispatcher with severity `Debug` and the default backend
    pub const fn new() -> Self {
        Self {
            severity: AtomicU8::new(Severity::Debug.rank()),
            logger: ArcSwapOption::const_empty(),
        }
    }

    /// Current minimum severity
    #[inline]
    pub fn severity(&self) -> Severity {
        Severity::from_rank(self.severity.load(Ordering::Relaxed))
    }

    /// Set the minimum severity; takes effect for the next emission
    pub fn set_severity(&self, severity: Severity) {
        self.severity.store(severity.rank(), Ordering::Relaxed);
    }

    /// Whether a backend other than the default is installed
    pub fn has_custom_logger(&self) -> bool {
        self.logger.load().is_some()
    }

    /// Install a backend
    ///
    /// Pass an `Arc<L>` to keep a handle to it.
    pub fn set_logger<L: Logger>(&self, logger: L) {
        self.set_boxed_logger(Box::new(logger));
    }

    /// Install a boxed backend
    pub fn set_boxed_logger(&self, logger: Box<dyn Logger>) {
        self.logger.store(Some(Arc::new(logger)));
    }

    /// Install a backend that already lives for the whole process
    pub fn set_static_logger(&self, logger: &'static dyn Logger) {
        self.set_boxed_logger(Box::new(logger));
    }

    /// Go back to the default backend
    pub fn reset_logger(&self) {
        self.logger.store(None);
    }

    /// Run `f` against the backend installed right now
    fn with_logger<R>(&self, f: impl FnOnce(&dyn Logger) -> R) -> R {
        let guard = self.logger.load();
        match &*guard {
            Some(logger) => f(&***logger),
            None => f(&DEFAULT_LOGGER),
        }
    }

    /// Whether a record at `severity` would reach the backend
    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        !gate::ELIDED && self.severity() <= severity
    }

    /// Emit with a lazily built message and cause
    ///
    /// Neither closure runs unless the record passes the severity check.
    #[inline(always)]
    pub fn emit<M, S, C>(&self, severity: Severity, tag: Option<&str>, message: M, cause: C)
    where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
        gate::emit(self, severity, tag, message, cause);
    }

    /// Emit an already built message
    ///
    /// Prefer the lazy entry points: the caller has already paid for `message`
    /// and `cause` even when the record is filtered out.
    pub fn log(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: &str,
        cause: Option<Cause>,
    ) {
        gate::emit(self, severity, tag, || message, move || cause);
    }

    /// Hand a realised record to the active backend, without filtering
    #[cfg_attr(feature = "elide", allow(dead_code))]
    pub(crate) fn deliver(
        &self,
        severity: Severity,
        tag: Option<&str>,
        message: &str,
        cause: Option<CauseRef<'_>>,
    ) {
        self.with_logger(|logger| logger.log(severity, tag, message, cause));
    }

    /// Flush the active backend
    pub fn flush(&self) {
        self.with_logger(|logger| logger.flush());
    }

    /// Log at `Verbose`
    #[inline(always)]
    pub fn verbose<M: FnOnce() -> S, S: AsRef<str>>(&self, tag: Option<&str>, message: M) {
        self.emit(Severity::Verbose, tag, message, no_cause);
    }

    /// Log at `Verbose` with a lazily built cause
    #[inline(always)]
    pub fn verbose_with<M, S, C>(&self, tag: Option<&str>, message: M, cause: C)
    where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
        self.emit(Severity::Verbose, tag, message, cause);
    }

    /// Log at `Debug`
    #[inline(always)]
    pub fn debug<M: FnOnce() -> S, S: AsRef<str>>(&self, tag: Option<&str>, message: M) {
        self.emit(Severity::Debug, tag, message, no_cause);
    }

    /// Log at `Debug` with a lazily built cause
    #[inline(always)]
    pub fn debug_with<M, S, C>(&self, tag: Option<&str>, message: M, cause: C)
    where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
        self.emit(Severity::Debug, tag, message, cause);
    }

    /// Log at `Info`
    #[inline(always)]
    pub fn info<M: FnOnce() -> S, S: AsRef<str>>(&self, tag: Option<&str>, message: M) {
        self.emit(Severity::Info, tag, message, no_cause);
    }

    /// Log at `Info` with a lazily built cause
    #[inline(always)]
    pub fn info_with<M, S, C>(&self, tag: Option<&str>, message: M, cause: C)
    where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
        self.emit(Severity::Info, tag, message, cause);
    }

    /// Log at `Warn`
    #[inline(always)]
    pub fn warn<M: FnOnce() -> S, S: AsRef<str>>(&self, tag: Option<&str>, message: M) {
        self.emit(Severity::Warn, tag, message, no_cause);
    }

    /// Log at `Warn` with a lazily built cause
    #[inline(always)]
    pub fn warn_with<M, S, C>(&self, tag: Option<&str>, message: M, cause: C)
    where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
        self.emit(Severity::Warn, tag, message, cause);
    }

    /// Log at `Error`
    #[inline(always)]
    pub fn error<M: FnOnce() -> S, S: AsRef<str>>(&self, tag: Option<&str>, message: M) {
        self.emit(Severity::Error, tag, message, no_cause);
    }

    /// Log at `Error` with a lazily built cause
    #[inline(always)]
    pub fn error_with<M, S, C>(&self, tag: Option<&str>, message: M, cause: C)
    where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
        self.emit(Severity::Error, tag, message, cause);
    }

    /// Log at `Fatal`
    #[inline(always)]
    pub fn fatal<M: FnOnce() -> S, S: AsRef<str>>(&self, tag: Option<&str>, message: M) {
        self.emit(Severity::Fatal, tag, message, no_cause);
    }

    /// Log at `Fatal` with a lazily built cause
    #[inline(always)]
    pub fn fatal_with<M, S, C>(&self, tag: Option<&str>, message: M, cause: C)
    where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
        self.emit(Severity::Fatal, tag, message, cause);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("severity", &self.severity())
            .field("custom_logger", &self.has_custom_logger())
            .finish()
    }
}

#[inline(always)]
fn no_cause() -> Option<Cause> {
    None
}
