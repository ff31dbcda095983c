//! Built-in backends
//!
//! - [`TracingLogger`]: the default, forwards to `tracing`
//! - [`ConsoleLogger`]: JSON lines on stderr or any writer
//! - [`LogBuffer`]: in-memory ring buffer for in-app display and tests

mod buffer;
mod console;
mod platform;

pub use buffer::{LogBuffer, LogEntry};
pub use console::ConsoleLogger;
pub use platform::{init_subscriber, TracingLogger, TARGET};
