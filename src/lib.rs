//! # envlog
//!
//! Environment-driven structured logging. One set of `LOGGING_*` variables
//! decides the level, the format (human-readable console or JSON lines),
//! the destination (stdout or a file) and whether call-site fields are
//! added; every component of an application then obtains logger handles
//! from a shared [`LoggingContext`] and emits records with key/value fields.
//!
//! ## Features
//!
//! - **Validated Configuration**: Invalid variables fail fast with errors naming the variable
//! - **Structured Records**: Bound fields, per-call fields and context overlays
//! - **Safe Reconfiguration**: Exactly one open sink, swapped atomically
//! - **Thread Safe**: Handles are cheap clones usable from any thread
//!
//! ## Example
//!
//! ```no_run
//! use envlog::prelude::*;
//! use envlog::info;
//!
//! let logging = LoggingContext::from_env()?;
//! let logger = logging.default_logger()?;
//! info!(logger, "Service started"; port = 8080);
//!
//! let db = logging.handler_logger("db");
//! db.info_builder().message("Query executed").field("table", "users").log();
//! # Ok::<(), envlog::LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;
pub mod tools;

pub mod prelude {
    pub use crate::core::{
        BoundContext, ConfigError, FieldValue, LogContext, LogFormat, LogLevel, LogOutput,
        Logger, LoggerError, LoggingConfig, LoggingContext, Result, StructuredLogBuilder,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, Sink};
}

pub use crate::core::{
    BoundContext, CallSite, ConfigError, ConfigResolver, FieldValue, LogContext, LogFormat,
    LogLevel, LogOutput, LogRecord, Logger, LoggerError, LoggerMetrics, LoggingConfig,
    LoggingConfigBuilder, LoggingContext, Pipeline, Processor, Renderer, Result,
    StructuredLogBuilder, TimestampFormat, MAX_FILE_PATH_LEN,
};
pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, Sink};
