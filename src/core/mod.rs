//! Core logger types and traits

pub mod config;
pub mod error;
pub mod factory;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod processor;
pub mod renderer;
pub mod resolver;
pub mod structured_builder;
pub mod timestamp;

pub use config::{LogFormat, LogOutput, LoggingConfig, LoggingConfigBuilder};
pub use error::{ConfigError, LoggerError, Result, MAX_FILE_PATH_LEN};
pub use factory::LoggingContext;
pub use log_context::{BoundContext, FieldValue, LogContext};
pub use log_level::LogLevel;
pub use log_record::{CallSite, LogRecord};
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use processor::{
    AddLogLevel, AddLoggerName, CallSiteAdder, MergeContext, Pipeline, Processor, TimeStamper,
};
pub use renderer::Renderer;
pub use resolver::ConfigResolver;
pub use structured_builder::StructuredLogBuilder;
pub use timestamp::TimestampFormat;
