//! Criterion benchmarks for envlog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use envlog::prelude::*;
use envlog::{CallSite, ConfigResolver, LogRecord, Pipeline, Renderer};
use std::collections::HashMap;
use std::thread;

/// Sink that drops every line, so benchmarks measure the pipeline only
struct NullSink;

impl Sink for NullSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        black_box(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn context(format: LogFormat, level: LogLevel) -> LoggingContext {
    let logging = LoggingContext::new();
    let config = LoggingConfig::builder()
        .format(format)
        .level(level)
        .build()
        .expect("valid config");
    logging
        .configure_with_sink(config, Box::new(NullSink))
        .expect("configure");
    logging
}

// ============================================================================
// Configuration Benchmarks
// ============================================================================

fn bench_config_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_resolution");
    group.throughput(Throughput::Elements(1));

    let empty = HashMap::new();
    let full = HashMap::from([
        ("LOGGING_LEVEL".to_string(), "warning".to_string()),
        ("LOGGING_FORMAT".to_string(), "JSON".to_string()),
        ("LOGGING_OUTPUT".to_string(), "file".to_string()),
        ("LOGGING_FILE_PATH".to_string(), "/var/log/app/service.log".to_string()),
        ("LOGGING_INCLUDE_LOCATION".to_string(), "yes".to_string()),
        ("LOGGING_LOGGER_NAME".to_string(), "service".to_string()),
    ]);

    group.bench_function("defaults", |b| {
        b.iter(|| black_box(ConfigResolver::resolve(black_box(&empty))));
    });

    group.bench_function("all_variables", |b| {
        b.iter(|| black_box(ConfigResolver::resolve(black_box(&full))));
    });

    group.finish();
}

fn bench_reconfigure(c: &mut Criterion) {
    let logging = LoggingContext::new();
    let config = LoggingConfig::default();

    c.bench_function("reconfigure_swap", |b| {
        b.iter(|| {
            logging
                .configure_with_sink(config.clone(), Box::new(NullSink))
                .expect("configure");
        });
    });
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    let console = context(LogFormat::Console, LogLevel::Debug).logger("bench");
    let json = context(LogFormat::Json, LogLevel::Debug).logger("bench");
    let bound = json.bind("request_id", "abc-123").bind("user_id", 42);

    group.bench_function("console_info", |b| {
        b.iter(|| console.info(black_box("Info message")));
    });

    group.bench_function("json_info", |b| {
        b.iter(|| json.info(black_box("Info message")));
    });

    group.bench_function("json_bound_fields", |b| {
        b.iter(|| bound.info(black_box("Info message")));
    });

    group.bench_function("json_builder", |b| {
        b.iter(|| {
            json.info_builder()
                .message("Request processed")
                .field("status", 200)
                .field("latency_ms", 42.5)
                .log();
        });
    });

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = context(LogFormat::Json, LogLevel::Error).logger("bench");

    group.bench_function("filtered_debug", |b| {
        b.iter(|| logger.debug(black_box("Filtered message")));
    });

    group.bench_function("is_enabled", |b| {
        b.iter(|| black_box(logger.is_enabled(black_box(LogLevel::Info))));
    });

    group.finish();
}

fn bench_concurrent_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_emission");
    let num_threads = 4;
    let per_thread = 250;
    group.throughput(Throughput::Elements((num_threads * per_thread) as u64));

    let logging = context(LogFormat::Json, LogLevel::Debug);

    group.bench_function("4_threads", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..num_threads)
                .map(|t| {
                    let logger = logging.logger("bench").bind("thread", t);
                    thread::spawn(move || {
                        for _ in 0..per_thread {
                            logger.info("Concurrent message");
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().expect("thread panicked");
            }
        });
    });

    group.finish();
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(1));

    let with_location = LoggingConfig::builder()
        .format(LogFormat::Json)
        .include_location(true)
        .build()
        .expect("valid config");
    let pipeline = Pipeline::for_config(&with_location, false);
    let fields = LogContext::new()
        .with_field("user_id", 12345)
        .with_field("action", "login");

    group.bench_function("json_with_location", |b| {
        b.iter(|| {
            let record = LogRecord::new(LogLevel::Info, "bench", "Message", CallSite::caller())
                .with_fields(fields.clone());
            black_box(pipeline.run(record))
        });
    });

    let control_chars = LogRecord::new(
        LogLevel::Info,
        "bench",
        "line one\nline two\ttabbed\r",
        CallSite::caller(),
    );
    group.bench_function("console_escape", |b| {
        b.iter(|| black_box(Renderer::Console { colors: false }.render(black_box(&control_chars))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_config_resolution,
    bench_reconfigure,
    bench_emission,
    bench_level_filtering,
    bench_concurrent_emission,
    bench_pipeline,
);

criterion_main!(benches);
