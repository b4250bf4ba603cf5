//! Error types for configuration and backend wiring

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Longest accepted value for `LOGGING_FILE_PATH`, in characters
pub const MAX_FILE_PATH_LEN: usize = 4096;

/// Invalid or out-of-range configuration input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Value outside the recognized set of an enumerated variable
    #[error("Invalid {variable} '{value}'. Must be one of: {expected}")]
    InvalidChoice {
        variable: &'static str,
        value: String,
        expected: String,
    },

    #[error("{variable} must be a non-empty string")]
    Empty { variable: &'static str },

    #[error("{variable} is too long (max {max} characters, got {len})")]
    TooLong {
        variable: &'static str,
        max: usize,
        len: usize,
    },

    #[error("Log file path '{}' is a directory, not a file", path.display())]
    PathIsDirectory { path: PathBuf },

    #[error("Log file path '{}' exists but is not a regular file", path.display())]
    NotRegularFile { path: PathBuf },
}

impl ConfigError {
    pub fn invalid_choice(
        variable: &'static str,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidChoice {
            variable,
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Name of the environment variable the error is about, if any
    pub fn variable(&self) -> Option<&'static str> {
        match self {
            ConfigError::InvalidChoice { variable, .. }
            | ConfigError::Empty { variable }
            | ConfigError::TooLong { variable, .. } => Some(*variable),
            ConfigError::PathIsDirectory { .. } | ConfigError::NotRegularFile { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Configuration constraint violated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Sink creation or write failure, wraps the OS error
    #[error("Failed to {operation} for path '{}': {source}", path.display())]
    Backend {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a backend error for a failed sink operation on `path`
    pub fn backend(
        operation: impl Into<String>,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::Backend {
            operation: operation.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, LoggerError::Config(_))
    }

    pub fn is_backend_error(&self) -> bool {
        matches!(self, LoggerError::Backend { .. } | LoggerError::IoError(_))
    }
}
