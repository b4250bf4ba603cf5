//! Logger metrics for observability
//!
//! Counters for records written, filtered and discarded, sink write
//! failures, and the number of sinks currently open.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics shared by a [`LoggingContext`](crate::LoggingContext) and its handles
///
/// # Example
///
/// ```
/// use envlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_discarded();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.discarded_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records rendered and accepted by a sink
    written: AtomicU64,

    /// Records below the configured level
    filtered: AtomicU64,

    /// Records emitted while no sink was attached
    discarded: AtomicU64,

    /// Sink writes or flushes that returned an error
    write_errors: AtomicU64,

    /// Sinks opened and not yet closed
    open_sinks: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            open_sinks: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn discarded_count(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_error_count(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    /// Number of sinks currently attached and open
    #[inline]
    pub fn open_sinks(&self) -> u64 {
        self.open_sinks.load(Ordering::Acquire)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_discarded(&self) -> u64 {
        self.discarded.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn sink_opened(&self) {
        self.open_sinks.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn sink_closed(&self) {
        self.open_sinks.fetch_sub(1, Ordering::AcqRel);
    }

    /// Share of emitted records that never reached a sink (0.0 - 100.0)
    pub fn loss_rate(&self) -> f64 {
        let lost = (self.discarded_count() + self.write_error_count()) as f64;
        let total = self.written_count() as f64 + lost;
        if total == 0.0 {
            0.0
        } else {
            (lost / total) * 100.0
        }
    }

    /// Reset the record counters; the open-sink gauge is left untouched
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.discarded.store(0, Ordering::Relaxed);
        self.write_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
