//! In-memory sink for capturing output

use super::Sink;
use crate::core::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps rendered lines in a shared buffer
///
/// Clones share the buffer, so a clone can be handed to
/// [`LoggingContext::configure_with_sink`](crate::LoggingContext::configure_with_sink)
/// while the original is kept for inspection.
///
/// # Example
///
/// ```
/// use envlog::{LoggingConfig, LoggingContext, MemorySink};
///
/// let sink = MemorySink::new();
/// let logging = LoggingContext::new();
/// logging.configure_with_sink(LoggingConfig::default(), Box::new(sink.clone()))?;
///
/// logging.logger("app").info("captured");
/// assert_eq!(sink.len(), 1);
/// assert!(sink.lines()[0].contains("captured"));
/// # Ok::<(), envlog::LoggerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Remove and return the captured lines
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
