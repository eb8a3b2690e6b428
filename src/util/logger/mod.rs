//! Logger module.
//!
//! Simple `[LEVEL] message` logging for the launcher and tools.
//!
//! # Usage
//!
//! ```no_run
//! use stagekit::util::logger;
//!
//! logger::init();
//! tracing::info!("Hello, {}", "world");
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Initialize the logger with the default configuration (INFO level).
pub fn init() {
    init_with_level(LogLevel::Info);
}

/// Initialize the logger with a custom level.
///
/// Shows a `[LEVEL]` prefix without timestamps, module paths or color.
pub fn init_with_level(level: LogLevel) {
    let filter = tracing_subscriber::filter::LevelFilter::from_level(level.into());

    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).init();
}

/// Initialize the logger for debug use (DEBUG level).
pub fn init_debug() {
    init_with_level(LogLevel::Debug);
}
