//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Environment variable overriding the log filter (`EnvFilter` syntax).
pub const LOG_FILTER_ENV: &str = "TIMEGAPS_LOG";

/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "TIMEGAPS_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Multi-line human readable output.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `timegaps=debug`.
    pub directive: String,
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directive: verbosity_directive(0).to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds the logging configuration.
    ///
    /// The filter comes from `TIMEGAPS_LOG`, else from `-v` flags when
    /// given, else from the config file, else `warn`. The format comes from
    /// `TIMEGAPS_LOG_FORMAT`, else from the config file.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbosity: u8) -> Self {
        let env_filter = std::env::var(LOG_FILTER_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        let env_format = std::env::var(LOG_FORMAT_ENV).ok();
        Self::resolve(settings, verbosity, env_filter, env_format.as_deref())
    }

    fn resolve(
        settings: Option<&LoggingSettings>,
        verbosity: u8,
        env_filter: Option<String>,
        env_format: Option<&str>,
    ) -> Self {
        let directive = env_filter
            .or_else(|| (verbosity > 0).then(|| verbosity_directive(verbosity).to_string()))
            .or_else(|| settings.and_then(|s| s.level.clone()))
            .unwrap_or_else(|| verbosity_directive(0).to_string());

        let format = env_format
            .and_then(LogFormat::parse)
            .or_else(|| {
                settings
                    .and_then(|s| s.format.as_deref())
                    .and_then(LogFormat::parse)
            })
            .unwrap_or_default();

        Self {
            directive,
            format,
            file: settings.and_then(|s| s.file.clone()),
        }
    }
}

/// Maps the `-v` count to a level: warn, info, debug.
#[must_use]
pub const fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
