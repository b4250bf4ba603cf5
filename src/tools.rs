//! Helpers built on top of logger handles

use crate::core::{LogContext, LogLevel, Logger};
use std::fmt::{Debug, Display};

/// Event of the record that opens a table
pub const TABLE_TITLE: &str = "loaded model with config, config_data";

/// Log `data` as a bordered KEY/VALUE table, one debug record per line
///
/// Keys use their `Display` form and values their `Debug` form, so string
/// values show up quoted. `fields` are attached to every record.
///
/// # Example
///
/// ```
/// use envlog::prelude::*;
/// use envlog::tools::log_table;
///
/// let sink = MemorySink::new();
/// let logging = LoggingContext::new();
/// logging.configure_with_sink(LoggingConfig::default(), Box::new(sink.clone()))?;
///
/// let data = [("id", "abc"), ("name", "test-station")];
/// log_table(&logging.handler_logger("tools"), data, &LogContext::new());
///
/// let lines = sink.lines();
/// assert_eq!(lines.len(), 5);
/// assert!(lines[2].contains("| id   | \"abc\"          |"));
/// # Ok::<(), envlog::LoggerError>(())
/// ```
#[track_caller]
pub fn log_table<I, K, V>(logger: &Logger, data: I, fields: &LogContext)
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Debug,
{
    let rows: Vec<(String, String)> = data
        .into_iter()
        .map(|(key, value)| (key.to_string(), format!("{:?}", value)))
        .collect();

    let key_width = column_width("KEY", rows.iter().map(|(key, _)| key));
    let value_width = column_width("VALUE", rows.iter().map(|(_, value)| value));
    let border = format!("+-{}-+-{}-+", "-".repeat(key_width), "-".repeat(value_width));

    logger.log_with_fields(LogLevel::Debug, TABLE_TITLE, fields.clone());
    logger.log_with_fields(LogLevel::Debug, &border, fields.clone());
    for (key, value) in &rows {
        let row = format!("| {:<key_width$} | {:<value_width$} |", key, value);
        logger.log_with_fields(LogLevel::Debug, row, fields.clone());
    }
    logger.log_with_fields(LogLevel::Debug, &border, fields.clone());
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a String>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .fold(header.len(), usize::max)
}
