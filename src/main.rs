use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use inlinelog::backend::init_subscriber;
use inlinelog::{LogBuffer, LogConfig, Severity};

#[cfg_attr(feature = "elide", allow(dead_code))]
const TAG: &str = "Demo";

fn main() -> Result<()> {
    // The default backend forwards to tracing, so give it somewhere to go
    init_subscriber("inlinelog=trace")?;

    let config = LogConfig::load()?.with_env_overrides();
    let installed = config.install(inlinelog::dispatcher());
    if installed.buffer.is_some() {
        tracing::info!("Buffer backend selected; records stay in memory");
    }

    inlinelog::set_severity(Severity::Info);
    inlinelog::debug!(tag: TAG, "This log is never printed because of the severity level");
    // ... and the work is only done if the log is printed.

    inlinelog::info!(tag: TAG, "This log appears unless built with the elide feature");
    // ... and with elide the log is not in the binary at all.

    inlinelog::info!(tag: TAG, "Made a log: {}", expensive_work());

    // Swap to an in-memory "screen" and show what it captured
    let screen = Arc::new(LogBuffer::new(100, 10));
    inlinelog::set_logger(Arc::clone(&screen));

    inlinelog::info!(tag: TAG, "Made a log: {}", expensive_work());
    inlinelog::warn!(
        tag: TAG,
        cause: std::io::Error::new(std::io::ErrorKind::TimedOut, "screen refresh timed out"),
        "Screen is slow"
    );
    inlinelog::dispatcher().flush();

    for entry in screen.all_entries() {
        println!("{}", entry.render());
    }
    if inlinelog::gate::ELIDED {
        println!("(built with elide: no log statements were compiled)");
    }

    Ok(())
}

/// Stand-in for work that should only happen when the log is printed
#[cfg_attr(feature = "elide", allow(dead_code))]
fn expensive_work() -> String {
    std::thread::sleep(Duration::from_millis(200));
    uuid::Uuid::new_v4().to_string()
}
