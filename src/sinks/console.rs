//! Standard output sink

use super::Sink;
use crate::core::Result;
use std::io::{IsTerminal, Write};

/// Writes every record to the process's standard output
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    /// Whether stdout is attached to a terminal, i.e. colors are useful
    pub fn is_terminal() -> bool {
        std::io::stdout().is_terminal()
    }
}

impl Sink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
