//! Logger handle

use super::factory::Backend;
use super::log_context::{BoundContext, FieldValue, LogContext};
use super::log_level::LogLevel;
use super::log_record::{CallSite, LogRecord};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Named handle emitting records through a [`LoggingContext`](crate::LoggingContext)
///
/// Handles are cheap to clone and hold no sink of their own: every record
/// goes through whatever backend the context has active at that moment, so
/// a handle obtained before a reconfiguration follows the new settings.
///
/// Fields attached with [`bind`](Self::bind) are added to every record the
/// handle emits. Per-call fields take priority over bound fields, which take
/// priority over a [`BoundContext`] overlay.
#[derive(Clone)]
pub struct Logger {
    backend: Arc<Backend>,
    name: Arc<str>,
    bound: LogContext,
    context: BoundContext,
}

impl Logger {
    pub(crate) fn new(backend: Arc<Backend>, name: &str) -> Self {
        Self {
            backend,
            name: Arc::from(name),
            bound: LogContext::new(),
            context: BoundContext::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields bound to this handle
    pub fn bound_fields(&self) -> &LogContext {
        &self.bound
    }

    /// New handle that adds `key=value` to every record
    #[must_use]
    pub fn bind<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut logger = self.clone();
        logger.bound.add_field(key, value);
        logger
    }

    /// New handle carrying `context` as its overlay
    ///
    /// # Example
    ///
    /// ```
    /// use envlog::{BoundContext, LoggingConfig, LoggingContext, MemorySink};
    ///
    /// let sink = MemorySink::new();
    /// let logging = LoggingContext::new();
    /// logging.configure_with_sink(LoggingConfig::default(), Box::new(sink.clone()))?;
    ///
    /// let request = BoundContext::new().bind("request_id", "abc-123");
    /// logging.logger("api").with_context(&request).info("handled");
    ///
    /// assert!(sink.lines()[0].contains("request_id=abc-123"));
    /// # Ok::<(), envlog::LoggerError>(())
    /// ```
    #[must_use]
    pub fn with_context(&self, context: &BoundContext) -> Self {
        let mut logger = self.clone();
        logger.context = context.clone();
        logger
    }

    pub fn context(&self) -> &BoundContext {
        &self.context
    }

    /// Whether a record at `level` would currently reach a sink
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.backend.is_enabled(level)
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, event: impl AsRef<str>) {
        self.emit(level, event.as_ref(), LogContext::new(), CallSite::caller());
    }

    /// Log with per-call fields
    #[track_caller]
    pub fn log_with_fields(&self, level: LogLevel, event: impl AsRef<str>, fields: LogContext) {
        self.emit(level, event.as_ref(), fields, CallSite::caller());
    }

    pub(crate) fn emit(&self, level: LogLevel, event: &str, fields: LogContext, site: CallSite) {
        self.backend.dispatch(level, || {
            let mut fields = fields;
            fields.merge_missing(&self.bound);
            LogRecord::new(level, &*self.name, event, site)
                .with_fields(fields)
                .with_context(self.context.clone())
        });
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, event: impl AsRef<str>) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, event: impl AsRef<str>) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, event: impl AsRef<str>) {
        self.log(LogLevel::Warning, event);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, event: impl AsRef<str>) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, event: impl AsRef<str>) {
        self.log(LogLevel::Critical, event);
    }

    /// Log at error level with the error and its source chain in an
    /// `exception` field
    #[track_caller]
    pub fn exception(&self, event: impl AsRef<str>, err: &dyn Error) {
        let fields = LogContext::new().with_field("exception", describe_error(err));
        self.emit(LogLevel::Error, event.as_ref(), fields, CallSite::caller());
    }
}

/// `outer: inner: root` rendering of an error chain
fn describe_error(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("bound", &self.bound)
            .field("context", &self.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{LogFormat, LoggingConfig};
    use crate::sinks::MemorySink;
    use crate::LoggingContext;

    fn json_context() -> (LoggingContext, MemorySink) {
        let ctx = LoggingContext::new();
        let sink = MemorySink::new();
        let config = LoggingConfig::builder()
            .format(LogFormat::Json)
            .build()
            .unwrap();
        ctx.configure_with_sink(config, Box::new(sink.clone()))
            .unwrap();
        (ctx, sink)
    }

    fn last_json(sink: &MemorySink) -> serde_json::Value {
        let lines = sink.lines();
        serde_json::from_str(lines.last().unwrap()).unwrap()
    }

    #[test]
    fn test_level_methods() {
        let (ctx, sink) = json_context();
        let logger = ctx.logger("svc");

        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");
        logger.critical("c");

        let levels: Vec<String> = sink
            .lines()
            .iter()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["level"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(levels, ["debug", "info", "warning", "error", "critical"]);
    }

    #[test]
    fn test_call_fields_override_bound_fields() {
        let (ctx, sink) = json_context();
        let logger = ctx.logger("svc").bind("user", "alice").bind("attempt", 1);

        logger.log_with_fields(
            LogLevel::Info,
            "login",
            LogContext::new().with_field("attempt", 2),
        );

        let record = last_json(&sink);
        assert_eq!(record["user"], "alice");
        assert_eq!(record["attempt"], 2);
    }

    #[test]
    fn test_bound_fields_override_overlay() {
        let (ctx, sink) = json_context();
        let overlay = BoundContext::new()
            .bind("request_id", "from-overlay")
            .bind("tenant", "acme");
        let logger = ctx
            .logger("svc")
            .with_context(&overlay)
            .bind("request_id", "from-handle");

        logger.info("handled");

        let record = last_json(&sink);
        assert_eq!(record["request_id"], "from-handle");
        assert_eq!(record["tenant"], "acme");
    }

    #[test]
    fn test_bind_does_not_mutate_original() {
        let (ctx, _sink) = json_context();
        let base = ctx.logger("svc");
        let bound = base.bind("k", "v");
        assert!(base.bound_fields().is_empty());
        assert_eq!(bound.bound_fields().len(), 1);
    }

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("query failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_exception_includes_source_chain() {
        let (ctx, sink) = json_context();
        ctx.logger("db").exception("operation failed", &Outer(Inner));

        let record = last_json(&sink);
        assert_eq!(record["level"], "error");
        assert_eq!(record["exception"], "query failed: connection refused");
    }

    #[test]
    fn test_handle_follows_reconfiguration() {
        let (ctx, first) = json_context();
        let logger = ctx.logger("svc");
        logger.info("before");

        let second = MemorySink::new();
        ctx.configure_with_sink(LoggingConfig::default(), Box::new(second.clone()))
            .unwrap();
        logger.info("after");

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert!(second.lines()[0].contains("after"));
    }
}
