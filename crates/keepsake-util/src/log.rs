//! Logging setup using tracing.
//!
//! Library code in keepsake only emits `tracing` events. Test binaries and
//! tools that want to see them install a subscriber through this module.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "KEEPSAKE_LOG";

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parse a log level from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether to print logs to stderr.
    pub print: bool,
    /// Log level used when no filter is set in the environment.
    pub level: LogLevel,
    /// Whether to include file/line info in logs.
    pub include_location: bool,
    /// Route output through the libtest capture instead of raw stderr.
    pub test_writer: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            print: false,
            level: LogLevel::Info,
            include_location: false,
            test_writer: false,
        }
    }
}

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Initialize logging with the given configuration.
///
/// Returns `false` if a global subscriber was already installed, which is the
/// normal case when several tests in one binary call this.
pub fn init(config: LogConfig) -> bool {
    let subscriber = tracing_subscriber::registry().with(env_filter(config.level));

    if !config.print {
        return subscriber.try_init().is_ok();
    }

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.test_writer {
        subscriber.with(fmt_layer.with_test_writer()).try_init().is_ok()
    } else {
        subscriber.with(fmt_layer).try_init().is_ok()
    }
}

/// Install a debug-level subscriber whose output is captured per test.
pub fn init_for_tests() -> bool {
    init(LogConfig {
        print: true,
        level: LogLevel::Debug,
        include_location: false,
        test_writer: true,
    })
}
