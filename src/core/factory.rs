//! Logging context: configuration lifecycle and logger handle factory
//!
//! A [`LoggingContext`] owns the active backend (pipeline plus sink) and
//! hands out [`Logger`] handles bound to it. `configure` and `reset` are
//! serialized by one mutation lock; the active backend lives in a separate
//! slot that is write-locked only for the swap, so readers always observe
//! either the old or the new configuration, never a mix.

use super::config::{LogOutput, LoggingConfig, DEFAULT_LOGGER_NAME};
use super::error::Result;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::logger::Logger;
use super::metrics::LoggerMetrics;
use super::processor::Pipeline;
use super::resolver::ConfigResolver;
use crate::sinks::{ConsoleSink, FileSink, Sink};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Sink slot of an active backend; empty once closed
struct SinkSlot {
    sink: Mutex<Option<Box<dyn Sink>>>,
    metrics: Arc<LoggerMetrics>,
}

impl SinkSlot {
    fn new(sink: Box<dyn Sink>, metrics: Arc<LoggerMetrics>) -> Self {
        metrics.sink_opened();
        Self {
            sink: Mutex::new(Some(sink)),
            metrics,
        }
    }

    fn write(&self, line: &str) {
        let mut guard = self.sink.lock();
        let Some(sink) = guard.as_mut() else {
            // Closed by a concurrent reconfigure; never write to a stale sink
            self.metrics.record_discarded();
            return;
        };

        match sink.write_line(line).and_then(|()| sink.flush()) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(e) => {
                self.metrics.record_write_error();
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
            }
        }
    }

    fn close(&self) {
        if let Some(mut sink) = self.sink.lock().take() {
            if let Err(e) = sink.flush() {
                eprintln!(
                    "[LOGGER ERROR] Failed to flush sink '{}' on close: {}",
                    sink.name(),
                    e
                );
            }
            self.metrics.sink_closed();
        }
    }
}

impl Drop for SinkSlot {
    fn drop(&mut self) {
        self.close();
    }
}

/// Configuration snapshot with the pipeline and sink built from it
struct ActiveBackend {
    config: Arc<LoggingConfig>,
    pipeline: Pipeline,
    sink: SinkSlot,
}

/// Emission side shared by the context and every logger handle
pub(crate) struct Backend {
    active: RwLock<Option<Arc<ActiveBackend>>>,
    metrics: Arc<LoggerMetrics>,
}

impl Backend {
    fn new() -> Self {
        Self {
            active: RwLock::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    fn current(&self) -> Option<Arc<ActiveBackend>> {
        self.active.read().clone()
    }

    /// Filter by level, then build, process, render and write a record
    pub(crate) fn dispatch(&self, level: LogLevel, build: impl FnOnce() -> LogRecord) {
        let Some(active) = self.current() else {
            self.metrics.record_discarded();
            return;
        };
        if level < active.config.level() {
            self.metrics.record_filtered();
            return;
        }

        let line = active.pipeline.run(build());
        active.sink.write(&line);
    }

    pub(crate) fn is_enabled(&self, level: LogLevel) -> bool {
        self.current()
            .is_some_and(|active| level >= active.config.level())
    }

    /// Install `next`, then close the previous sink
    ///
    /// The close happens after the write lock is released so readers never
    /// wait on sink I/O. Emitters still holding the previous backend find
    /// its sink closed and discard.
    fn swap(&self, next: Option<Arc<ActiveBackend>>) {
        let previous = std::mem::replace(&mut *self.active.write(), next);
        if let Some(previous) = previous {
            previous.sink.close();
        }
    }
}

/// Where `configure_from_env` reads variables from
#[derive(Debug, Clone)]
enum EnvSource {
    Process,
    Fixed(HashMap<String, String>),
}

impl EnvSource {
    fn resolve(&self) -> std::result::Result<LoggingConfig, super::error::ConfigError> {
        match self {
            EnvSource::Process => ConfigResolver::resolve_process_env(),
            EnvSource::Fixed(env) => ConfigResolver::resolve(env),
        }
    }
}

#[derive(Default)]
struct FactoryState {
    default_logger: Option<Logger>,
}

struct Shared {
    state: Mutex<FactoryState>,
    backend: Arc<Backend>,
    env: EnvSource,
}

/// Explicit, shareable logging context
///
/// Cloning is cheap; all clones share one configuration and one sink.
///
/// # Example
///
/// ```no_run
/// use envlog::{LogFormat, LoggingConfig, LoggingContext};
///
/// let logging = LoggingContext::new();
/// logging.configure(
///     LoggingConfig::builder()
///         .format(LogFormat::Json)
///         .build()?,
/// )?;
///
/// let logger = logging.default_logger()?;
/// logger.info("Application started");
///
/// let db = logging.handler_logger("db");
/// db.info_builder().message("Query").field("table", "users").log();
/// # Ok::<(), envlog::LoggerError>(())
/// ```
#[derive(Clone)]
pub struct LoggingContext {
    shared: Arc<Shared>,
}

impl LoggingContext {
    /// Unconfigured context reading the process environment on demand
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(EnvSource::Process)
    }

    /// Unconfigured context whose effective environment is `env`
    ///
    /// The process environment is never consulted by this context.
    #[must_use]
    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self::with_source(EnvSource::Fixed(env))
    }

    /// Context configured from the process environment right away
    pub fn from_env() -> Result<Self> {
        let ctx = Self::new();
        ctx.configure_from_env()?;
        Ok(ctx)
    }

    fn with_source(env: EnvSource) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(FactoryState::default()),
                backend: Arc::new(Backend::new()),
                env,
            }),
        }
    }

    /// Apply `config`, replacing any previous configuration
    ///
    /// On error nothing changes: the previous configuration and sink stay
    /// active.
    pub fn configure(&self, config: LoggingConfig) -> Result<()> {
        let mut state = self.shared.state.lock();
        self.apply_locked(&mut state, config, None).map(|_| ())
    }

    /// Resolve a configuration from the effective environment and apply it
    pub fn configure_from_env(&self) -> Result<()> {
        let mut state = self.shared.state.lock();
        let config = self.shared.env.resolve()?;
        self.apply_locked(&mut state, config, None).map(|_| ())
    }

    /// Resolve a configuration from `env` and apply it
    pub fn configure_from_map(&self, env: &HashMap<String, String>) -> Result<()> {
        let mut state = self.shared.state.lock();
        let config = ConfigResolver::resolve(env)?;
        self.apply_locked(&mut state, config, None).map(|_| ())
    }

    /// Apply `config` but write to a caller-provided sink instead of the
    /// one `config.output()` selects
    pub fn configure_with_sink(&self, config: LoggingConfig, sink: Box<dyn Sink>) -> Result<()> {
        let mut state = self.shared.state.lock();
        self.apply_locked(&mut state, config, Some(sink)).map(|_| ())
    }

    fn apply_locked(
        &self,
        state: &mut FactoryState,
        config: LoggingConfig,
        custom_sink: Option<Box<dyn Sink>>,
    ) -> Result<Logger> {
        let (sink, use_colors): (Box<dyn Sink>, bool) = match custom_sink {
            Some(sink) => (sink, false),
            None => match config.output() {
                LogOutput::File => (Box::new(FileSink::open(config.file_path_ref())?), false),
                LogOutput::Stdout => (Box::new(ConsoleSink::new()), ConsoleSink::is_terminal()),
            },
        };

        let backend = &self.shared.backend;
        let pipeline = Pipeline::for_config(&config, use_colors);
        let config = Arc::new(config);
        let next = ActiveBackend {
            config: Arc::clone(&config),
            pipeline,
            sink: SinkSlot::new(sink, Arc::clone(&backend.metrics)),
        };

        backend.swap(Some(Arc::new(next)));

        let logger = Logger::new(Arc::clone(backend), config.logger_name());
        state.default_logger = Some(logger.clone());
        Ok(logger)
    }

    /// The cached default logger, configuring from the environment first if
    /// this context has not been configured yet
    pub fn default_logger(&self) -> Result<Logger> {
        let mut state = self.shared.state.lock();
        if let Some(logger) = &state.default_logger {
            return Ok(logger.clone());
        }
        let config = self.shared.env.resolve()?;
        self.apply_locked(&mut state, config, None)
    }

    /// Close the current sink and return to the unconfigured state
    ///
    /// Calling this on an unconfigured context does nothing.
    pub fn reset(&self) {
        let mut state = self.shared.state.lock();
        self.shared.backend.swap(None);
        state.default_logger = None;
    }

    /// Snapshot of the active configuration
    pub fn config(&self) -> Option<LoggingConfig> {
        self.shared
            .backend
            .current()
            .map(|active| LoggingConfig::clone(&active.config))
    }

    pub fn is_configured(&self) -> bool {
        self.shared.backend.current().is_some()
    }

    /// Handle for `name`, or the default logger when `name` is absent or empty
    pub fn get_logger(&self, name: Option<&str>) -> Result<Logger> {
        match name {
            Some(name) if !name.is_empty() => Ok(self.logger(name)),
            _ => self.default_logger(),
        }
    }

    /// Fresh handle bound to `name`; never triggers configuration
    pub fn logger(&self, name: &str) -> Logger {
        Logger::new(Arc::clone(&self.shared.backend), name)
    }

    /// Handle on the configured logger name (or `logs`) that adds
    /// `handler=<tag>` to every record
    pub fn handler_logger(&self, tag: &str) -> Logger {
        let name = self
            .shared
            .backend
            .current()
            .map(|active| active.config.logger_name().to_string())
            .unwrap_or_else(|| DEFAULT_LOGGER_NAME.to_string());
        self.logger(&name).bind("handler", tag)
    }

    /// Drop-in replacement for a named logger during migration; same as
    /// [`logger`](Self::logger)
    pub fn replace_compat_logger(&self, name: &str) -> Logger {
        self.logger(name)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.backend.metrics
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("config", &self.config())
            .field("open_sinks", &self.metrics().open_sinks())
            .finish()
    }
}
