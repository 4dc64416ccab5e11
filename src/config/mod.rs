//! Configuration management.
//!
//! Configuration is read from, in order of precedence:
//!
//! 1. Command line flags (applied by the caller)
//! 2. The file given with `--config`
//! 3. `<platform config dir>/timegaps/config.toml`
//! 4. Built-in defaults
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "json"
//! file = "/var/log/timegaps.log"
//!
//! [input]
//! follow_symlinks = true
//!
//! [output]
//! null_separator = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration for timegaps.
#[derive(Debug, Clone, Default)]
pub struct TimegapsConfig {
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Use the modification time of symlink targets.
    pub follow_symlinks: bool,
    /// Separate items with NUL instead of newline.
    pub null_separator: bool,
}

/// Logging settings from the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Filter directive such as `info` or `timegaps=debug`.
    pub level: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path; stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Logging section.
    pub logging: Option<LoggingSettings>,
    /// Input section.
    pub input: Option<ConfigFileInput>,
    /// Output section.
    pub output: Option<ConfigFileOutput>,
}

/// Input section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFileInput {
    /// Follow symlinks.
    pub follow_symlinks: Option<bool>,
}

/// Output section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFileOutput {
    /// NUL separator.
    pub null_separator: Option<bool>,
}

impl TimegapsConfig {
    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::parse(&contents).map_err(|e| match e {
            crate::Error::OperationFailed { operation, cause } => crate::Error::OperationFailed {
                operation,
                cause: format!("{}: {cause}", path.display()),
            },
            other => other,
        })
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn parse(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Returns the default config file location, if a home directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("timegaps").join("config.toml"))
    }

    /// Loads configuration from the default location.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is
    /// an error so that a typo does not silently change behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the default file exists but cannot be loaded.
    pub fn load_default() -> crate::Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Converts a `ConfigFile` to `TimegapsConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(logging) = file.logging {
            config.logging = logging;
        }
        if let Some(v) = file.input.and_then(|input| input.follow_symlinks) {
            config.follow_symlinks = v;
        }
        if let Some(v) = file.output.and_then(|output| output.null_separator) {
            config.null_separator = v;
        }

        config
    }
}
