//! Logging macros for ergonomic log message formatting.
//!
//! Every macro takes a logger handle followed by either `format!`-style
//! arguments or a literal event and `key = value` fields after a `;`.
//!
//! # Examples
//!
//! ```
//! use envlog::prelude::*;
//! use envlog::info;
//!
//! let logging = LoggingContext::new();
//! logging.configure_with_sink(LoggingConfig::default(), Box::new(MemorySink::new()))?;
//! let logger = logging.logger("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With structured fields
//! info!(logger, "Request handled"; path = "/health", status = 200);
//! # Ok::<(), envlog::LoggerError>(())
//! ```

/// Log a message at an explicit level.
///
/// In the `; key = value` form the event literal is still a format string,
/// so it may capture variables inline (`"user {name} logged in"`).
///
/// # Examples
///
/// ```
/// # use envlog::prelude::*;
/// # let logging = LoggingContext::new();
/// # logging.configure_with_sink(LoggingConfig::default(), Box::new(MemorySink::new()))?;
/// # let logger = logging.logger("app");
/// use envlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warning, "Slow query"; table = "users", ms = 1200);
/// # Ok::<(), envlog::LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:literal; $($key:ident = $value:expr),+ $(,)?) => {
        $logger.log_with_fields(
            $level,
            format!($msg),
            $crate::LogContext::new()$(.with_field(stringify!($key), $value))+,
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use envlog::prelude::*;
/// # let logging = LoggingContext::new();
/// # logging.configure_with_sink(LoggingConfig::default(), Box::new(MemorySink::new()))?;
/// # let logger = logging.logger("app");
/// use envlog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// # Ok::<(), envlog::LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use envlog::prelude::*;
/// # let logging = LoggingContext::new();
/// # logging.configure_with_sink(LoggingConfig::default(), Box::new(MemorySink::new()))?;
/// # let logger = logging.logger("app");
/// use envlog::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Connection failed"; host = "db.internal", retries = 3);
/// # Ok::<(), envlog::LoggerError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}
