//! Subscriber initialisation and logging configuration.
//!
//! # Design
//! - One entry point installs an `EnvFilter` plus a pretty or JSON fmt layer.
//! - `RUST_LOG` always overrides the configured level.
//! - The build version is recorded once so every binary reports the same value.

use gatehouse_config::Environment;
use once_cell::sync::OnceCell;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::TelemetryError;

/// Level used when neither `RUST_LOG` nor [`LOG_LEVEL_VAR`] is provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Variable selecting the log level.
pub const LOG_LEVEL_VAR: &str = "GATEHOUSE_LOG_LEVEL";
/// Variable selecting the output format (`json` or `pretty`).
pub const LOG_FORMAT_VAR: &str = "GATEHOUSE_LOG_FORMAT";

static BUILD_VERSION: OnceCell<String> = OnceCell::new();

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns `TelemetryError::SubscriberInstall` when a subscriber is already
/// installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let _ = BUILD_VERSION.set(config.build_version.clone());

    let filter = build_env_filter(&config.level);
    let writer = match config.writer {
        LogWriter::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogWriter::Stderr => BoxMakeWriter::new(std::io::stderr),
    };
    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })
}

/// Version recorded by [`init_logging`], or the crate version before that.
#[must_use]
pub fn build_version() -> &'static str {
    BUILD_VERSION
        .get()
        .map_or(env!("CARGO_PKG_VERSION"), String::as_str)
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive such as `info` or `gatehouse_data=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Stream receiving log lines.
    pub writer: LogWriter,
    /// Version string recorded for the process.
    pub build_version: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::infer(),
            writer: LogWriter::Stdout,
            build_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read level and format from the configuration snapshot.
    ///
    /// Unknown formats fall back to [`LogFormat::infer`].
    #[must_use]
    pub fn from_environment(env: &Environment) -> Self {
        let defaults = Self::default();
        Self {
            level: env.get_or(LOG_LEVEL_VAR, DEFAULT_LOG_LEVEL).to_string(),
            format: env
                .get(LOG_FORMAT_VAR)
                .and_then(LogFormat::parse)
                .unwrap_or(defaults.format),
            writer: defaults.writer,
            build_version: defaults.build_version,
        }
    }

    /// Send log lines to `writer`.
    #[must_use]
    pub const fn with_writer(mut self, writer: LogWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Replace the recorded build version.
    #[must_use]
    pub fn with_build_version(mut self, version: impl Into<String>) -> Self {
        self.build_version = version.into();
        self
    }
}

/// Output stream for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogWriter {
    /// Standard output; the default for services.
    Stdout,
    /// Standard error; keeps command output clean for CLIs.
    Stderr,
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON objects, one per line.
    Json,
    /// Human-readable output.
    Pretty,
}

impl LogFormat {
    /// Pretty in debug builds, JSON otherwise.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }

    /// Parse a format name, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_known_names() {
        assert_eq!(LogFormat::parse("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" Pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn config_reads_environment_with_fallbacks() {
        let env = Environment::from_pairs([(LOG_LEVEL_VAR, "debug"), (LOG_FORMAT_VAR, "json")]);
        let config = LoggingConfig::from_environment(&env);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);

        let env = Environment::from_pairs([(LOG_FORMAT_VAR, "unknown")]);
        let config = LoggingConfig::from_environment(&env);
        assert_eq!(config.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.format, LogFormat::infer());
    }

    #[test]
    fn second_installation_is_rejected() {
        let config = LoggingConfig::default().with_build_version("test-build");
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::SubscriberInstall { .. })
        ));
        assert_eq!(build_version(), "test-build");
    }

    #[test]
    fn invalid_level_falls_back_to_default_filter() {
        // Must not panic on a malformed directive.
        let _ = build_env_filter("gatehouse=[=");
    }
}
