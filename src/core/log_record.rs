//! Log record passed through the processor pipeline

use super::log_context::{BoundContext, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::panic::Location;
use std::path::Path;

/// Source location of the statement that emitted a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    location: &'static Location<'static>,
}

impl CallSite {
    /// Capture the location of the caller
    #[track_caller]
    pub fn caller() -> Self {
        Self {
            location: Location::caller(),
        }
    }

    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    /// File name without directories
    pub fn filename(&self) -> &'static str {
        Path::new(self.location.file())
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.location.file())
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }

    /// File stem, the closest thing to a module name a location carries
    pub fn module(&self) -> &'static str {
        Path::new(self.location.file())
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.location.file())
    }
}

/// One record on its way from a logger handle to a sink
///
/// `fields` is the record's event dictionary: processors add their
/// annotations (`level`, `logger`, `timestamp`, ...) to it and renderers
/// read it back.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub logger_name: String,
    pub event: String,
    pub fields: LogContext,
    pub context: BoundContext,
    pub call_site: CallSite,
    pub created: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(
        level: LogLevel,
        logger_name: impl Into<String>,
        event: &str,
        call_site: CallSite,
    ) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            event: event.to_string(),
            fields: LogContext::new(),
            context: BoundContext::new(),
            call_site,
            created: Utc::now(),
        }
    }

    pub fn with_fields(mut self, fields: LogContext) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_context(mut self, context: BoundContext) -> Self {
        self.context = context;
        self
    }
}
