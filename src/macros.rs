//! Logging macros
//!
//! Every macro accepts an optional `tag: expr,` and an optional `cause: expr,`
//! (in that order) followed by `format!` arguments:
//!
//! ```
//! # let err = std::io::Error::new(std::io::ErrorKind::Other, "gone");
//! inlinelog::info!("plain message");
//! inlinelog::warn!(tag: "net", "retrying in {}s", 5);
//! inlinelog::error!(tag: "net", cause: err, "request failed");
//! ```
//!
//! The message and the cause are built inside closures that only run when the
//! record passes the active severity. With the `elide` feature enabled every
//! macro expands to `()`: the arguments are discarded before type checking,
//! so nothing used only to build a message ends up in the binary. Bindings
//! that exist only for logging will then trigger unused-variable warnings.

/// Elision gate for the macros, non-elided build
#[cfg(not(feature = "elide"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __gate {
    ($severity:expr, $tag:expr, $cause:expr, $($arg:tt)+) => {
        $crate::gate::emit(
            $crate::dispatcher(),
            $severity,
            $tag,
            || ::std::format!($($arg)+),
            || $cause,
        )
    };
}

/// Elision gate for the macros, elided build
#[cfg(feature = "elide")]
#[doc(hidden)]
#[macro_export]
macro_rules! __gate {
    ($($ignored:tt)*) => {
        ()
    };
}

/// Log at an explicit severity
///
/// ```
/// use inlinelog::Severity;
/// inlinelog::log!(Severity::Info, tag: "main", "started in {}ms", 12);
/// ```
#[macro_export]
macro_rules! log {
    ($severity:expr, tag: $tag:expr, cause: $cause:expr, $($arg:tt)+) => {
        $crate::__gate!(
            $severity,
            ::core::option::Option::Some::<&str>($tag),
            ::core::option::Option::Some(::core::convert::Into::<$crate::Cause>::into($cause)),
            $($arg)+
        )
    };
    ($severity:expr, tag: $tag:expr, $($arg:tt)+) => {
        $crate::__gate!(
            $severity,
            ::core::option::Option::Some::<&str>($tag),
            ::core::option::Option::None,
            $($arg)+
        )
    };
    ($severity:expr, cause: $cause:expr, $($arg:tt)+) => {
        $crate::__gate!(
            $severity,
            ::core::option::Option::None,
            ::core::option::Option::Some(::core::convert::Into::<$crate::Cause>::into($cause)),
            $($arg)+
        )
    };
    ($severity:expr, $($arg:tt)+) => {
        $crate::__gate!(
            $severity,
            ::core::option::Option::None,
            ::core::option::Option::None,
            $($arg)+
        )
    };
}

/// Log at `Verbose`
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Verbose, $($arg)+)
    };
}

/// Log at `Debug`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Debug, $($arg)+)
    };
}

/// Log at `Info`
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Info, $($arg)+)
    };
}

/// Log at `Warn`
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Warn, $($arg)+)
    };
}

/// Log at `Error`
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Error, $($arg)+)
    };
}

/// Log at `Fatal`
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Fatal, $($arg)+)
    };
}
