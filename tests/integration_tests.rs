//! Integration tests for envlog
//!
//! These tests verify:
//! - Environment resolution into file and stdout configurations
//! - Handler loggers and structured fields in JSON output
//! - Failed configuration leaves the previous state intact
//! - Reset and lazy reconfiguration
//! - Bound context overlays
//! - Log injection prevention

use envlog::prelude::*;
use envlog::tools::log_table;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn file_env(path: &Path, format: &str) -> HashMap<String, String> {
    env(&[
        ("LOGGING_OUTPUT", "file"),
        ("LOGGING_FORMAT", format),
        ("LOGGING_FILE_PATH", path.to_str().expect("temp path is UTF-8")),
    ])
}

fn json_lines(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Every line is a JSON object"))
        .collect()
}

#[test]
fn test_handler_logger_json_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("logs").join("app.log");

    let logging = LoggingContext::with_env(file_env(&log_file, "json"));
    let db = logging.handler_logger("db");
    // Handles are usable before configuration; nothing is written yet
    assert!(!logging.is_configured());

    logging.default_logger().expect("Failed to configure");
    db.info_builder()
        .message("Query executed")
        .field("table", "users")
        .log();

    let records = json_lines(&log_file);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["event"], "Query executed");
    assert_eq!(record["handler"], "db");
    assert_eq!(record["table"], "users");
    assert_eq!(record["level"], "info");
    assert_eq!(record["logger"], "logs");
    assert!(record["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_console_format_in_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("console.log");

    let logging = LoggingContext::with_env(file_env(&log_file, "console"));
    let logger = logging.default_logger().expect("Failed to configure");
    logger.bind("handler", "app.tools").info("loaded");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let line = content.lines().next().expect("One line written");
    assert!(line.contains("[info     ] loaded"));
    assert!(line.ends_with("[logs] handler=app.tools"));
    // No color codes in files
    assert!(!line.contains('\u{1b}'));
}

#[test]
fn test_directory_path_keeps_previous_configuration() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let good_file = temp_dir.path().join("good.log");

    let logging = LoggingContext::new();
    logging
        .configure_from_map(&file_env(&good_file, "json"))
        .expect("Failed to configure");

    let err = logging
        .configure_from_map(&file_env(temp_dir.path(), "json"))
        .unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("is a directory, not a file"));

    let config = logging.config().expect("Previous config still active");
    assert_eq!(config.file_path(), good_file.to_str().unwrap());
    assert_eq!(logging.metrics().open_sinks(), 1);

    logging.logger("svc").warning("still working");
    assert_eq!(json_lines(&good_file).len(), 1);
}

#[test]
fn test_failed_first_configuration_stays_unconfigured() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logging = LoggingContext::with_env(file_env(temp_dir.path(), "json"));

    assert!(logging.default_logger().is_err());
    assert!(!logging.is_configured());
    assert_eq!(logging.metrics().open_sinks(), 0);
}

#[test]
fn test_unwritable_parent_is_backend_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").expect("Failed to create blocker file");

    let logging = LoggingContext::new();
    let err = logging
        .configure_from_map(&file_env(&blocker.join("app.log"), "json"))
        .unwrap_err();
    assert!(err.is_backend_error());
    assert!(err.to_string().starts_with("Failed to create log directory"));
}

#[test]
fn test_invalid_env_reports_variable() {
    let logging = LoggingContext::new();
    let err = logging
        .configure_from_map(&env(&[("LOGGING_LEVEL", "verbose")]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid LOGGING_LEVEL 'VERBOSE'. Must be one of: CRITICAL, ERROR, WARNING, INFO, DEBUG"
    );
    assert!(!logging.is_configured());
}

#[test]
fn test_reset_then_default_logger_reconfigures() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let logging = LoggingContext::with_env(file_env(&log_file, "json"));

    let first = logging.default_logger().expect("Failed to configure");
    first.info("one");

    logging.reset();
    assert!(logging.config().is_none());
    assert_eq!(logging.metrics().open_sinks(), 0);

    // Records emitted while unconfigured are discarded
    first.info("lost");
    assert_eq!(logging.metrics().discarded_count(), 1);

    let second = logging.default_logger().expect("Failed to reconfigure");
    second.info("two");

    let events: Vec<String> = json_lines(&log_file)
        .iter()
        .map(|r| r["event"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(events, ["one", "two"]);
}

#[test]
fn test_default_logger_is_cached() {
    let logging = LoggingContext::with_env(env(&[("LOGGING_LOGGER_NAME", "svc")]));
    let sink = MemorySink::new();
    logging
        .configure_with_sink(
            LoggingConfig::builder().logger_name("svc").build().unwrap(),
            Box::new(sink.clone()),
        )
        .expect("Failed to configure");

    let a = logging.default_logger().unwrap();
    let b = logging.get_logger(None).unwrap();
    assert_eq!(a.name(), "svc");
    assert_eq!(b.name(), "svc");
    // Still the custom sink: no reconfiguration happened
    b.info("cached");
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_named_logger_does_not_auto_configure() {
    let logging = LoggingContext::with_env(HashMap::new());
    let logger = logging.get_logger(Some("database")).unwrap();
    logger.info("nobody listening");

    assert!(!logging.is_configured());
    assert_eq!(logging.metrics().discarded_count(), 1);
}

#[test]
fn test_bound_context_appears_and_clears() {
    let logging = LoggingContext::new();
    let sink = MemorySink::new();
    logging
        .configure_with_sink(
            LoggingConfig::builder().format(LogFormat::Json).build().unwrap(),
            Box::new(sink.clone()),
        )
        .unwrap();

    let request = BoundContext::new().bind("request_id", "abc-123").bind("user", 7);
    let logger = logging.logger("api");

    logger.with_context(&request).info("inside request");
    logger.with_context(&request.clear()).info("after request");

    let records: Vec<serde_json::Value> = sink
        .lines()
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records[0]["request_id"], "abc-123");
    assert_eq!(records[0]["user"], 7);
    assert!(records[1].get("request_id").is_none());
    assert!(records[1].get("user").is_none());
}

#[test]
fn test_level_threshold_from_env() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let mut vars = file_env(&log_file, "json");
    vars.insert("LOGGING_LEVEL".to_string(), "warning".to_string());

    let logging = LoggingContext::with_env(vars);
    let logger = logging.default_logger().unwrap();

    logger.debug("no");
    logger.info("no");
    logger.warning("yes");
    logger.error("yes");
    logger.critical("yes");

    let levels: Vec<String> = json_lines(&log_file)
        .iter()
        .map(|r| r["level"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(levels, ["warning", "error", "critical"]);
    assert_eq!(logging.metrics().filtered_count(), 2);
}

#[test]
fn test_include_location_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let mut vars = file_env(&log_file, "json");
    vars.insert("LOGGING_INCLUDE_LOCATION".to_string(), "YES".to_string());

    let logging = LoggingContext::with_env(vars);
    let logger = logging.default_logger().unwrap();
    let line = line!() + 1;
    logger.info("located");

    let record = &json_lines(&log_file)[0];
    assert_eq!(record["filename"], "integration_tests.rs");
    assert_eq!(record["module"], "integration_tests");
    assert_eq!(record["lineno"], line);
}

#[test]
fn test_location_absent_by_default() {
    let logging = LoggingContext::new();
    let sink = MemorySink::new();
    logging
        .configure_with_sink(
            LoggingConfig::builder().format(LogFormat::Json).build().unwrap(),
            Box::new(sink.clone()),
        )
        .unwrap();

    logging.logger("svc").info("plain");

    let record: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
    assert!(record.get("filename").is_none());
    assert!(record.get("lineno").is_none());
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");
    let logging = LoggingContext::with_env(file_env(&log_file, "console"));
    let logger = logging.default_logger().unwrap();

    // Try to inject fake log entries with newlines
    let malicious_message = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    logger.bind("note", "a\nb").info(malicious_message);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("\\n"));
    assert!(!content.contains("\nERROR [2024-10-17] Fake error injected\n"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_config_table_in_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("table.log");
    let logging = LoggingContext::with_env(file_env(&log_file, "json"));
    logging.default_logger().unwrap();

    let config = logging.config().unwrap();
    let data = [
        ("format", config.format().to_string()),
        ("output", config.output().to_string()),
    ];
    log_table(
        &logging.handler_logger("startup"),
        data,
        &LogContext::new().with_field("context_var", 10),
    );

    let records = json_lines(&log_file);
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r["handler"] == "startup"));
    assert!(records.iter().all(|r| r["level"] == "debug"));
    assert_eq!(records[2]["event"], "| format | \"json\" |");
}

#[test]
fn test_replace_compat_logger_uses_given_name() {
    let logging = LoggingContext::new();
    let sink = MemorySink::new();
    logging
        .configure_with_sink(
            LoggingConfig::builder().format(LogFormat::Json).build().unwrap(),
            Box::new(sink.clone()),
        )
        .unwrap();

    logging.replace_compat_logger("legacy.module").info("migrated");

    let record: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
    assert_eq!(record["logger"], "legacy.module");
}

#[test]
fn test_json_event_keeps_control_characters() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("json_event.log");
    let logging = LoggingContext::with_env(file_env(&log_file, "json"));
    let logger = logging.default_logger().unwrap();

    let message = "line one\nline two\tend";
    logger.info(message);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 1);
    assert_eq!(json_lines(&log_file)[0]["event"], message);
}
