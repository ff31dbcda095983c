//! inlinelog - a logging facade whose release builds contain no log statements
//!
//! Log calls go through macros (or [`Dispatcher`] methods) that take the
//! message and optional cause lazily. In a normal build a call checks the
//! active severity first and only then builds the message and hands the record
//! to the active [`Logger`]. With the `elide` Cargo feature enabled the macros
//! expand to nothing, so the message-building code is not compiled at all.
//!
//! ```
//! use inlinelog::Severity;
//!
//! inlinelog::set_severity(Severity::Info);
//! inlinelog::debug!(tag: "Main", "never built: {}", expensive());
//! inlinelog::info!(tag: "Main", "built only when enabled: {}", expensive());
//!
//! fn expensive() -> String {
//!     "result".to_string()
//! }
//! ```
//!
//! The active severity and backend are process-wide and may be changed from
//! any thread at any time. They only matter in builds without `elide`.

pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod gate;
pub mod logger;
mod macros;
pub mod severity;

pub use backend::{ConsoleLogger, LogBuffer, LogEntry, TracingLogger};
pub use config::{BackendKind, LogConfig};
pub use dispatcher::Dispatcher;
pub use logger::{Cause, CauseRef, Logger, NoopLogger};
pub use severity::{ParseSeverityError, Severity};

/// Dispatcher used by the logging macros
static DISPATCHER: Dispatcher = Dispatcher::new();

/// Get the process-wide dispatcher
#[inline(always)]
pub fn dispatcher() -> &'static Dispatcher {
    &DISPATCHER
}

/// Current process-wide minimum severity
pub fn severity() -> Severity {
    DISPATCHER.severity()
}

/// Set the process-wide minimum severity
pub fn set_severity(severity: Severity) {
    DISPATCHER.set_severity(severity);
}

/// Install the process-wide backend
pub fn set_logger<L: Logger>(logger: L) {
    DISPATCHER.set_logger(logger);
}

/// Install a boxed process-wide backend
pub fn set_boxed_logger(logger: Box<dyn Logger>) {
    DISPATCHER.set_boxed_logger(logger);
}

/// Install a `'static` process-wide backend
pub fn set_static_logger(logger: &'static dyn Logger) {
    DISPATCHER.set_static_logger(logger);
}

/// Restore the default process-wide backend
pub fn reset_logger() {
    DISPATCHER.reset_logger();
}

/// Serialises tests that touch the process-wide dispatcher
#[cfg(test)]
pub(crate) fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_dispatcher_is_shared() {
        let _guard = test_lock();
        assert!(std::ptr::eq(dispatcher(), dispatcher()));

        set_severity(Severity::Warn);
        assert_eq!(dispatcher().severity(), Severity::Warn);
        assert_eq!(severity(), Severity::Warn);
        set_severity(Severity::Debug);
    }

    #[cfg(not(feature = "elide"))]
    #[test]
    fn test_global_backend_swap() {
        let _guard = test_lock();
        use std::sync::Arc;
        set_severity(Severity::Debug);
        let first = Arc::new(LogBuffer::new(10, 10));
        let second = Arc::new(LogBuffer::new(10, 10));

        set_logger(Arc::clone(&first));
        crate::info!("to first");
        set_boxed_logger(Box::new(Arc::clone(&second)));
        crate::info!("to second");
        set_static_logger(&NoopLogger);
        crate::info!("to nowhere");
        reset_logger();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second.all_entries()[0].message, "to second");
    }
}
