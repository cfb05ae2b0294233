//! Diagnostics for the pscompat CLI.
//!
//! stdout belongs to command results; every log line goes to stderr,
//! either as human text or as JSON lines for automation.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Event filter for `config`: `RUST_LOG` verbatim when selected and valid,
/// otherwise a single global level.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    if config.use_rust_log {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.level).into())
        .parse_lossy("")
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(config: &LogConfig) {
    let registry = tracing_subscriber::registry().with(build_filter(config));

    let installed = match (config.format, config.timestamps) {
        (LogFormat::Jsonl, _) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
        (LogFormat::Human, timestamps) => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            if timestamps {
                registry.with(layer).try_init()
            } else {
                registry.with(layer.without_time()).try_init()
            }
        }
    };

    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
}
