//! Environment variable resolution into a [`LoggingConfig`]

use super::config::{LogFormat, LogOutput, LoggingConfig, DEFAULT_FILE_PATH, DEFAULT_LOGGER_NAME};
use super::error::ConfigError;
use super::log_level::LogLevel;
use std::collections::HashMap;

pub const ENV_LEVEL: &str = "LOGGING_LEVEL";
pub const ENV_FORMAT: &str = "LOGGING_FORMAT";
pub const ENV_OUTPUT: &str = "LOGGING_OUTPUT";
pub const ENV_FILE_PATH: &str = "LOGGING_FILE_PATH";
pub const ENV_INCLUDE_LOCATION: &str = "LOGGING_INCLUDE_LOCATION";
pub const ENV_LOGGER_NAME: &str = "LOGGING_LOGGER_NAME";

/// Values of `LOGGING_INCLUDE_LOCATION` that enable call-site fields
const TRUTHY: [&str; 3] = ["true", "1", "yes"];

/// Turns an environment mapping into a validated [`LoggingConfig`]
///
/// Variables are checked in a fixed order (level, format, output, file
/// path, location flag, logger name) and the first violation is returned.
///
/// # Example
///
/// ```
/// use envlog::{ConfigResolver, LogFormat, LogLevel};
/// use std::collections::HashMap;
///
/// let env = HashMap::from([
///     ("LOGGING_LEVEL".to_string(), "warning".to_string()),
///     ("LOGGING_FORMAT".to_string(), "JSON".to_string()),
/// ]);
///
/// let config = ConfigResolver::resolve(&env).unwrap();
/// assert_eq!(config.level(), LogLevel::Warning);
/// assert_eq!(config.format(), LogFormat::Json);
/// assert_eq!(config.file_path(), "app.log");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn resolve(env: &HashMap<String, String>) -> Result<LoggingConfig, ConfigError> {
        let get = |key: &str| env.get(key).map(String::as_str);

        let level: LogLevel = get(ENV_LEVEL).unwrap_or("DEBUG").parse()?;
        let format: LogFormat = get(ENV_FORMAT).unwrap_or("console").parse()?;
        let output: LogOutput = get(ENV_OUTPUT).unwrap_or("stdout").parse()?;
        let file_path = get(ENV_FILE_PATH).unwrap_or(DEFAULT_FILE_PATH);
        let include_location = get(ENV_INCLUDE_LOCATION).is_some_and(Self::is_truthy);
        let logger_name = get(ENV_LOGGER_NAME).unwrap_or(DEFAULT_LOGGER_NAME);

        LoggingConfig::builder()
            .level(level)
            .format(format)
            .output(output)
            .file_path(file_path)
            .include_location(include_location)
            .logger_name(logger_name)
            .build()
    }

    /// Resolve from the current process environment
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn resolve_process_env() -> Result<LoggingConfig, ConfigError> {
        Self::resolve(&Self::process_env())
    }

    /// Snapshot of the process environment restricted to `LOGGING_*` keys
    pub fn process_env() -> HashMap<String, String> {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .filter(|(key, _)| key.starts_with("LOGGING_"))
            .collect()
    }

    /// Lenient flag parsing: anything outside the truthy set is false
    pub fn is_truthy(value: &str) -> bool {
        let lowered = value.to_lowercase();
        TRUTHY.contains(&lowered.as_str())
    }
}

impl LoggingConfig {
    /// Shorthand for [`ConfigResolver::resolve`]
    pub fn from_env(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        ConfigResolver::resolve(env)
    }
}
