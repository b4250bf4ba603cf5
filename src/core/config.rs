//! Typed logging configuration
//!
//! A [`LoggingConfig`] only exists in a fully validated state: the builder
//! checks every constraint in `build()` and fields are read-only afterwards.

use super::error::{ConfigError, Result as LoggerResult, MAX_FILE_PATH_LEN};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_FILE_PATH: &str = "app.log";
pub const DEFAULT_LOGGER_NAME: &str = "logs";

/// Output format of rendered records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Console,
    Json,
}

const FORMAT_TABLE: [(&str, LogFormat); 2] =
    [("console", LogFormat::Console), ("json", LogFormat::Json)];

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Console => "console",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("LOGGING_FORMAT", &FORMAT_TABLE, &s.to_lowercase())
    }
}

/// Destination of rendered records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    File,
}

const OUTPUT_TABLE: [(&str, LogOutput); 2] =
    [("stdout", LogOutput::Stdout), ("file", LogOutput::File)];

impl LogOutput {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOutput::Stdout => "stdout",
            LogOutput::File => "file",
        }
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogOutput {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("LOGGING_OUTPUT", &OUTPUT_TABLE, &s.to_lowercase())
    }
}

fn lookup<T: Copy>(
    variable: &'static str,
    table: &[(&str, T)],
    normalized: &str,
) -> Result<T, ConfigError> {
    table
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, value)| *value)
        .ok_or_else(|| {
            let expected = table
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", ");
            ConfigError::invalid_choice(variable, normalized, expected)
        })
}

/// Validated logging configuration
///
/// # Example
///
/// ```
/// use envlog::{LogFormat, LogLevel, LoggingConfig};
///
/// let config = LoggingConfig::builder()
///     .level(LogLevel::Info)
///     .format(LogFormat::Json)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.logger_name(), "logs");
/// assert_eq!(config.file_path(), "app.log");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    level: LogLevel,
    format: LogFormat,
    output: LogOutput,
    file_path: String,
    include_location: bool,
    logger_name: String,
}

impl LoggingConfig {
    #[must_use]
    pub fn builder() -> LoggingConfigBuilder {
        LoggingConfigBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn output(&self) -> LogOutput {
        self.output
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn include_location(&self) -> bool {
        self.include_location
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    /// Builder seeded with this configuration, for deriving a variant
    #[must_use]
    pub fn to_builder(&self) -> LoggingConfigBuilder {
        LoggingConfigBuilder {
            level: self.level,
            format: self.format,
            output: self.output,
            file_path: self.file_path.clone(),
            include_location: self.include_location,
            logger_name: self.logger_name.clone(),
        }
    }

    /// Pretty-printed JSON dump, e.g. for startup diagnostics
    pub fn to_json(&self) -> LoggerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub(crate) fn file_path_ref(&self) -> &Path {
        Path::new(&self.file_path)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Console,
            output: LogOutput::Stdout,
            file_path: DEFAULT_FILE_PATH.to_string(),
            include_location: false,
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for LoggingConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(default)]
        struct Raw {
            level: LogLevel,
            format: LogFormat,
            output: LogOutput,
            file_path: String,
            include_location: bool,
            logger_name: String,
        }

        impl Default for Raw {
            fn default() -> Self {
                let d = LoggingConfig::default();
                Self {
                    level: d.level,
                    format: d.format,
                    output: d.output,
                    file_path: d.file_path,
                    include_location: d.include_location,
                    logger_name: d.logger_name,
                }
            }
        }

        let raw = Raw::deserialize(deserializer)?;
        LoggingConfig::builder()
            .level(raw.level)
            .format(raw.format)
            .output(raw.output)
            .file_path(raw.file_path)
            .include_location(raw.include_location)
            .logger_name(raw.logger_name)
            .build()
            .map_err(serde::de::Error::custom)
    }
}

/// Builder for [`LoggingConfig`]; starts from the documented defaults
#[derive(Debug, Clone)]
pub struct LoggingConfigBuilder {
    level: LogLevel,
    format: LogFormat,
    output: LogOutput,
    file_path: String,
    include_location: bool,
    logger_name: String,
}

impl LoggingConfigBuilder {
    pub fn new() -> Self {
        LoggingConfig::default().to_builder()
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Set the log file path; validated on `build()` whatever the output
    #[must_use = "builder methods return a new value"]
    pub fn file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn include_location(mut self, include: bool) -> Self {
        self.include_location = include;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<LoggingConfig, ConfigError> {
        if self.file_path.is_empty() {
            return Err(ConfigError::Empty {
                variable: "LOGGING_FILE_PATH",
            });
        }
        let len = self.file_path.chars().count();
        if len > MAX_FILE_PATH_LEN {
            return Err(ConfigError::TooLong {
                variable: "LOGGING_FILE_PATH",
                max: MAX_FILE_PATH_LEN,
                len,
            });
        }
        if self.logger_name.is_empty() {
            return Err(ConfigError::Empty {
                variable: "LOGGING_LOGGER_NAME",
            });
        }

        Ok(LoggingConfig {
            level: self.level,
            format: self.format,
            output: self.output,
            file_path: self.file_path,
            include_location: self.include_location,
            logger_name: self.logger_name,
        })
    }
}

impl Default for LoggingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
