//! Where the log level and format come from.
//!
//! Lowest to highest precedence:
//! - built-in defaults (`warn`, human)
//! - `RUST_LOG` (used verbatim as a filter)
//! - `PSCOMPAT_LOG`, `PSCOMPAT_LOG_FORMAT`, `PSCOMPAT_LOG_TIMESTAMPS`
//! - `-q` / `-v` / `-vv`

use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

const LEVEL_VAR: &str = "PSCOMPAT_LOG";
const FORMAT_VAR: &str = "PSCOMPAT_LOG_FORMAT";
const TIMESTAMPS_VAR: &str = "PSCOMPAT_LOG_TIMESTAMPS";

/// Shape of stderr log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per event.
    Jsonl,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if ["human", "text", "pretty"].iter().any(|n| s.eq_ignore_ascii_case(n)) {
            Ok(LogFormat::Human)
        } else if ["jsonl", "json"].iter().any(|n| s.eq_ignore_ascii_case(n)) {
            Ok(LogFormat::Jsonl)
        } else {
            Err(format!("unknown log format {:?}", s))
        }
    }
}

/// Most verbose level that is still emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Off,
    Error,
    /// stdout carries command output, so only problems are logged by default.
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level requested by the `-q` / `-v` flags, if any.
    pub fn from_flags(quiet: bool, verbose: u8) -> Option<LogLevel> {
        match (quiet, verbose) {
            (true, _) => Some(LogLevel::Error),
            (false, 0) => None,
            (false, 1) => Some(LogLevel::Debug),
            (false, _) => Some(LogLevel::Trace),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.to_ascii_lowercase().as_str() {
            "off" | "none" | "quiet" => LogLevel::Off,
            "error" => LogLevel::Error,
            "warn" | "warning" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => return Err(format!("unknown log level {:?}", s)),
        };
        Ok(level)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Prefix human lines with a timestamp.
    pub timestamps: bool,
    /// `RUST_LOG` is set and no pscompat-specific level overrides it.
    pub use_rust_log: bool,
}

impl LogConfig {
    pub fn from_env(cli_level: Option<LogLevel>) -> Self {
        Self::from_lookup(|name| std::env::var(name).ok(), cli_level)
    }

    /// [`from_env`](Self::from_env) over an arbitrary variable source.
    ///
    /// Unparseable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, cli_level: Option<LogLevel>) -> Self {
        let mut config = LogConfig {
            use_rust_log: lookup("RUST_LOG").is_some_and(|v| !v.trim().is_empty()),
            ..LogConfig::default()
        };

        if let Some(level) = lookup(LEVEL_VAR).and_then(|v| v.parse().ok()) {
            config.level = level;
            config.use_rust_log = false;
        }
        if let Some(format) = lookup(FORMAT_VAR).and_then(|v| v.parse().ok()) {
            config.format = format;
        }
        config.timestamps = lookup(TIMESTAMPS_VAR).is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes"));

        if let Some(level) = cli_level {
            config.level = level;
            config.use_rust_log = false;
        }
        config
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}
