//! Record processors and the pipeline that runs them
//!
//! A pipeline is an ordered list of [`Processor`]s followed by a
//! [`Renderer`]. Each processor annotates the record's field map in place;
//! the renderer turns the final map into one output line.

use super::config::{LogFormat, LoggingConfig};
use super::log_context::FieldValue;
use super::log_record::LogRecord;
use super::renderer::Renderer;
use super::timestamp::TimestampFormat;

/// A single record transformation run before rendering
pub trait Processor: Send + Sync {
    fn process(&self, record: &mut LogRecord);
    fn name(&self) -> &str;
}

/// Merges the record's bound context overlay; fields already on the record win
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeContext;

impl Processor for MergeContext {
    fn process(&self, record: &mut LogRecord) {
        record.fields.merge_missing(record.context.fields());
    }

    fn name(&self) -> &str {
        "merge_context"
    }
}

/// Adds `level` with the lowercase level name
#[derive(Debug, Default, Clone, Copy)]
pub struct AddLogLevel;

impl Processor for AddLogLevel {
    fn process(&self, record: &mut LogRecord) {
        record.fields.add_field("level", record.level.as_record_str());
    }

    fn name(&self) -> &str {
        "add_log_level"
    }
}

/// Adds `logger` with the emitting handle's name
#[derive(Debug, Default, Clone, Copy)]
pub struct AddLoggerName;

impl Processor for AddLoggerName {
    fn process(&self, record: &mut LogRecord) {
        record.fields.add_field("logger", record.logger_name.clone());
    }

    fn name(&self) -> &str {
        "add_logger_name"
    }
}

/// Adds `filename`, `lineno` and `module` of the emitting statement
#[derive(Debug, Default, Clone, Copy)]
pub struct CallSiteAdder;

impl Processor for CallSiteAdder {
    fn process(&self, record: &mut LogRecord) {
        let site = record.call_site;
        record.fields.add_field("filename", site.filename());
        record.fields.add_field("lineno", site.line());
        record.fields.add_field("module", site.module());
    }

    fn name(&self) -> &str {
        "call_site"
    }
}

/// Adds `timestamp` rendered from the record's creation time (UTC)
#[derive(Debug, Default, Clone)]
pub struct TimeStamper {
    format: TimestampFormat,
}

impl TimeStamper {
    pub fn new(format: TimestampFormat) -> Self {
        Self { format }
    }
}

impl Processor for TimeStamper {
    fn process(&self, record: &mut LogRecord) {
        let value = if self.format.is_numeric() {
            FieldValue::Int(record.created.timestamp_millis())
        } else {
            FieldValue::String(self.format.format(&record.created))
        };
        record.fields.add_field("timestamp", value);
    }

    fn name(&self) -> &str {
        "timestamper"
    }
}

/// Ordered processors plus the renderer that ends the chain
pub struct Pipeline {
    processors: Vec<Box<dyn Processor>>,
    renderer: Renderer,
}

impl Pipeline {
    /// Create a pipeline with no processors
    pub fn new(renderer: Renderer) -> Self {
        Self {
            processors: Vec::new(),
            renderer,
        }
    }

    /// Append a processor
    #[must_use = "builder methods return a new value"]
    pub fn processor<P: Processor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Standard chain for a configuration: context merge, level, logger
    /// name, call site (when enabled), timestamp, then the format's renderer
    pub fn for_config(config: &LoggingConfig, use_colors: bool) -> Self {
        let renderer = match config.format() {
            LogFormat::Json => Renderer::Json,
            LogFormat::Console => Renderer::Console { colors: use_colors },
        };

        let mut pipeline = Pipeline::new(renderer)
            .processor(MergeContext)
            .processor(AddLogLevel)
            .processor(AddLoggerName);
        if config.include_location() {
            pipeline = pipeline.processor(CallSiteAdder);
        }
        pipeline.processor(TimeStamper::new(TimestampFormat::Iso8601Micros))
    }

    /// Run every processor in order and render the result
    pub fn run(&self, mut record: LogRecord) -> String {
        for processor in &self.processors {
            processor.process(&mut record);
        }
        self.renderer.render(&record)
    }

    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    pub fn renderer(&self) -> Renderer {
        self.renderer
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("processors", &self.processor_names())
            .field("renderer", &self.renderer)
            .finish()
    }
}
