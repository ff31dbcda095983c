//! Elision gate
//!
//! Exactly one of the two implementations below is compiled, selected by the
//! `elide` Cargo feature. With the feature off, [`emit`] checks the active
//! severity and only then runs the message and cause closures. With it on,
//! [`emit`] has an empty body: the closures are never called, so their bodies
//! are never instantiated. The logging macros go further and drop their
//! arguments before type checking, see `macros.rs`.

use crate::dispatcher::Dispatcher;
use crate::logger::Cause;
use crate::severity::Severity;

/// True when this build compiles log statements out
pub const ELIDED: bool = cfg!(feature = "elide");

#[cfg(not(feature = "elide"))]
mod imp {
    use super::*;

    #[inline(always)]
    pub fn emit<M, S, C>(
        dispatcher: &Dispatcher,
        severity: Severity,
        tag: Option<&str>,
        message: M,
        cause: C,
    ) where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
        if dispatcher.severity() <= severity {
            let message = message();
            let cause = cause();
            dispatcher.deliver(severity, tag, message.as_ref(), cause.as_deref());
        }
    }
}

#[cfg(feature = "elide")]
mod imp {
    use super::*;

    #[inline(always)]
    pub fn emit<M, S, C>(
        _dispatcher: &Dispatcher,
        _severity: Severity,
        _tag: Option<&str>,
        _message: M,
        _cause: C,
    ) where
        M: FnOnce() -> S,
        S: AsRef<str>,
        C: FnOnce() -> Option<Cause>,
    {
    }
}

/// Run one emission through the gate
///
/// `message` runs before `cause`, each at most once, and neither runs unless
/// the build is not elided and `severity` passes the dispatcher's threshold.
pub use imp::emit;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LogBuffer;
    use std::cell::Cell;
    use std::sync::Arc;

    #[test]
    fn test_elided_flag_matches_feature() {
        assert_eq!(ELIDED, cfg!(feature = "elide"));
    }

    #[cfg(not(feature = "elide"))]
    #[test]
    fn test_emit_evaluates_message_before_cause() {
        let dispatcher = Dispatcher::new();
        dispatcher.set_logger(crate::logger::NoopLogger);
        let order = std::cell::RefCell::new(Vec::new());

        emit(
            &dispatcher,
            Severity::Info,
            None,
            || {
                order.borrow_mut().push("message");
                "m"
            },
            || {
                order.borrow_mut().push("cause");
                None
            },
        );

        assert_eq!(*order.borrow(), vec!["message", "cause"]);
    }

    #[cfg(not(feature = "elide"))]
    #[test]
    fn test_emit_filtered_runs_nothing() {
        let dispatcher = Dispatcher::new();
        let buffer = Arc::new(LogBuffer::new(10, 10));
        dispatcher.set_logger(Arc::clone(&buffer));
        dispatcher.set_severity(Severity::Error);
        let calls = Cell::new(0);

        emit(
            &dispatcher,
            Severity::Warn,
            Some("gate"),
            || {
                calls.set(calls.get() + 1);
                "never"
            },
            || {
                calls.set(calls.get() + 1);
                None
            },
        );

        assert_eq!(calls.get(), 0);
        assert!(buffer.is_empty());
    }

    #[cfg(feature = "elide")]
    #[test]
    fn test_elided_emit_runs_nothing() {
        let dispatcher = Dispatcher::new();
        let buffer = Arc::new(LogBuffer::new(10, 10));
        dispatcher.set_logger(Arc::clone(&buffer));
        dispatcher.set_severity(Severity::Verbose);
        let calls = Cell::new(0);

        for severity in Severity::ALL {
            emit(
                &dispatcher,
                severity,
                Some("gate"),
                || {
                    calls.set(calls.get() + 1);
                    "never"
                },
                || {
                    calls.set(calls.get() + 1);
                    None
                },
            );
        }

        assert_eq!(calls.get(), 0);
        assert!(buffer.is_empty());
    }
}
