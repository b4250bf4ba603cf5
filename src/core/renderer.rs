//! Final pipeline stage turning a processed record into one output line
//!
//! - Console: human-readable, `timestamp [level    ] event  [logger] key=value`
//! - Json: one JSON object per line, message under `"event"`

use super::log_context::FieldValue;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use colored::Colorize;

/// Width the level label is padded to inside its brackets
const LEVEL_WIDTH: usize = 9;

/// Width the event text is padded to before the logger name
const EVENT_WIDTH: usize = 30;

/// Keys the console renderer places in fixed columns instead of `key=value`
const COLUMN_KEYS: [&str; 3] = ["timestamp", "level", "logger"];

/// Escape newlines, carriage returns and tabs so a console record always
/// renders as a single line and cannot forge additional entries
fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Human-readable text, optionally colored
    Console { colors: bool },

    /// Machine-parseable JSON object per record
    Json,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::Console { colors: false }
    }
}

impl Renderer {
    pub fn render(&self, record: &LogRecord) -> String {
        match self {
            Renderer::Console { colors } => Self::render_console(record, *colors),
            Renderer::Json => Self::render_json(record),
        }
    }

    fn render_console(record: &LogRecord, colors: bool) -> String {
        let mut out = String::new();

        if let Some(timestamp) = record.fields.get("timestamp") {
            out.push_str(&sanitize(&timestamp.to_string()));
            out.push(' ');
        }

        let level_label = match record.fields.get("level") {
            Some(FieldValue::String(level)) => sanitize(level),
            _ => record.level.as_record_str().to_string(),
        };
        let padded = format!("{:<width$}", level_label, width = LEVEL_WIDTH);
        if colors {
            out.push_str(&format!("[{}] ", Self::paint_level(&padded, record.level)));
        } else {
            out.push_str(&format!("[{}] ", padded));
        }

        let event = format!("{:<width$}", sanitize(&record.event), width = EVENT_WIDTH);
        if colors {
            out.push_str(&event.bold().to_string());
        } else {
            out.push_str(&event);
        }

        if let Some(logger) = record.fields.get("logger") {
            let label = format!("[{}]", sanitize(&logger.to_string()));
            out.push(' ');
            if colors {
                out.push_str(&label.blue().to_string());
            } else {
                out.push_str(&label);
            }
        }

        for (key, value) in record.fields.fields() {
            if COLUMN_KEYS.contains(&key.as_str()) {
                continue;
            }
            let key = sanitize(key);
            let value = sanitize(&value.to_string());
            out.push(' ');
            if colors {
                out.push_str(&format!("{}={}", key.cyan(), value.magenta()));
            } else {
                out.push_str(&format!("{}={}", key, value));
            }
        }

        out.trim_end().to_string()
    }

    fn paint_level(label: &str, level: LogLevel) -> String {
        label.color(level.color_code()).to_string()
    }

    fn render_json(record: &LogRecord) -> String {
        let mut json_obj = serde_json::Map::new();

        for (key, value) in record.fields.fields() {
            json_obj.insert(key.clone(), value.to_json_value());
        }

        // The message always lives under "event", even if a field collides
        json_obj.insert(
            "event".to_string(),
            serde_json::Value::String(record.event.clone()),
        );

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }
}
