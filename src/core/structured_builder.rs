//! Structured log builder for fluent record construction
//!
//! Provides a builder pattern for emitting records with structured fields.

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use super::log_record::CallSite;
use super::logger::Logger;

/// Builder for structured log records
///
/// The call site is captured where the builder is created, so location
/// fields point at the `*_builder()` call rather than at `log()`.
///
/// # Example
///
/// ```
/// use envlog::prelude::*;
///
/// let logging = LoggingContext::new();
/// logging.configure_with_sink(LoggingConfig::default(), Box::new(MemorySink::new()))?;
/// let logger = logging.logger("api");
///
/// logger.info_builder()
///     .message("Request processed")
///     .field("user_id", 12345)
///     .field("latency_ms", 42.5)
///     .field("status", 200)
///     .log();
/// # Ok::<(), envlog::LoggerError>(())
/// ```
#[must_use = "a structured record is only emitted by calling log()"]
pub struct StructuredLogBuilder<'a> {
    logger: &'a Logger,
    level: LogLevel,
    message: String,
    context: LogContext,
    call_site: CallSite,
}

impl<'a> StructuredLogBuilder<'a> {
    /// Create a new structured log builder
    #[track_caller]
    pub fn new(logger: &'a Logger, level: LogLevel) -> Self {
        Self {
            logger,
            level,
            message: String::new(),
            context: LogContext::new(),
            call_site: CallSite::caller(),
        }
    }

    /// Set the event text
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = msg.into();
        self
    }

    /// Add a structured field to the record
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.add_field(key, value);
        self
    }

    /// Add multiple fields from a LogContext
    pub fn fields(mut self, context: LogContext) -> Self {
        for (key, value) in context.fields() {
            self.context.add_field(key.clone(), value.clone());
        }
        self
    }

    /// Emit the record
    pub fn log(self) {
        self.logger
            .emit(self.level, &self.message, self.context, self.call_site);
    }
}

impl Logger {
    #[track_caller]
    pub fn debug_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Debug)
    }

    #[track_caller]
    pub fn info_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Info)
    }

    /// Create a warning-level structured log builder
    ///
    /// # Example
    ///
    /// ```
    /// # use envlog::prelude::*;
    /// # let logging = LoggingContext::new();
    /// # logging.configure_with_sink(LoggingConfig::default(), Box::new(MemorySink::new()))?;
    /// let logger = logging.logger("monitor");
    /// logger.warning_builder()
    ///     .message("Resource usage high")
    ///     .field("cpu_percent", 85.5)
    ///     .field("threshold", 80.0)
    ///     .log();
    /// # Ok::<(), envlog::LoggerError>(())
    /// ```
    #[track_caller]
    pub fn warning_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Warning)
    }

    #[track_caller]
    pub fn error_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Error)
    }

    #[track_caller]
    pub fn critical_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Critical)
    }
}
