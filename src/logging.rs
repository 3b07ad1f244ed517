use std::str::FromStr;

use tracing::{span, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace, Debug, Info, Warn, Error
}
impl LogLevel {
    pub fn to_log_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}
impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

const SPAN_NAME: &str = "review_sentiment";
pub struct Logger;

impl Logger {
    /// Initialize the logger. Output goes to stderr; stdout is reserved for
    /// command results.
    pub fn init(level: LogLevel) {
        // A subscriber may already be installed (tests, embedding); keep it.
        let _ = tracing_subscriber::fmt()
            .with_max_level(level.to_log_level())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub fn with_span<T>(command: &str, f: impl FnOnce() -> T) -> T {
        let span = span!(tracing::Level::INFO, SPAN_NAME, command);
        let _guard = span.enter();
        f()
    }
}

/// Install the subscriber; unknown level names fall back to `info`.
pub fn setup_logger(level: &str) -> LogLevel {
    match level.parse::<LogLevel>() {
        Ok(level) => {
            Logger::init(level);
            level
        }
        Err(err) => {
            let fallback = LogLevel::default();
            Logger::init(fallback);
            warn!("{}; using {:?}", err, fallback);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(setup_logger("loud"), LogLevel::Info);
        assert_eq!(setup_logger("debug"), LogLevel::Debug);
    }

    #[test]
    fn with_span_returns_closure_value() {
        assert_eq!(Logger::with_span("test", || 41 + 1), 42);
    }
}
