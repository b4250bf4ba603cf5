//! Basic envlog usage example
//!
//! Demonstrates environment-driven configuration, handler loggers, bound
//! fields and the config table helper.
//!
//! Run with: cargo run --example basic_usage
//! Try: LOGGING_FORMAT=json LOGGING_INCLUDE_LOCATION=true cargo run --example basic_usage

use envlog::prelude::*;
use envlog::tools::log_table;
use envlog::{info, warning};

fn main() -> Result<()> {
    println!("=== envlog - Basic Usage Example ===\n");

    // Configuration comes from the LOGGING_* variables
    let logging = LoggingContext::from_env()?;
    let logger = logging.default_logger()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    println!("\n2. Structured fields:");
    info!(logger, "Server listening"; host = "0.0.0.0", port = 8080);
    logger
        .info_builder()
        .message("Request processed")
        .field("status", 200)
        .field("latency_ms", 42.5)
        .log();

    println!("\n3. Handler loggers and bound context:");
    let db = logging.handler_logger("db");
    db.info_builder().message("Query executed").field("table", "users").log();

    let request = BoundContext::new().bind("request_id", "abc-123");
    let scoped = logger.with_context(&request);
    warning!(scoped, "Slow request took {} ms", 1250);

    println!("\n4. Active configuration as a table:");
    if let Some(config) = logging.config() {
        let data = [
            ("level", config.level().to_string()),
            ("format", config.format().to_string()),
            ("output", config.output().to_string()),
            ("file_path", config.file_path().to_string()),
            ("logger_name", config.logger_name().to_string()),
        ];
        log_table(&logging.handler_logger("demo"), data, &LogContext::new());
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
