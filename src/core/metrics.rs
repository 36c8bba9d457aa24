//! Engine metrics for observability
//!
//! Counters for monitoring pipeline health: accepted records, capacity
//! evictions, dispatched records, and sink write failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the delivery pipeline
///
/// Eviction is the only way the pipeline loses accepted records, so the
/// evicted counter is the primary overload signal.
///
/// # Example
///
/// ```
/// use batchlog::EngineMetrics;
///
/// let metrics = EngineMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_evicted();
/// assert_eq!(metrics.enqueued_count(), 1);
/// assert_eq!(metrics.evicted_count(), 1);
/// ```
#[derive(Debug)]
pub struct EngineMetrics {
    /// Records accepted into the queue
    enqueued: AtomicU64,

    /// Records overwritten by drop-oldest eviction
    evicted: AtomicU64,

    /// Records handed to at least one sink
    dispatched: AtomicU64,

    /// Individual sink write failures
    sink_write_failures: AtomicU64,
}

impl EngineMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            sink_write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn evicted_count(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_write_failures(&self) -> u64 {
        self.sink_write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_evicted(&self) -> u64 {
        self.evicted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_write_failure(&self) -> u64 {
        self.sink_write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Fraction of accepted records lost to eviction, as a percentage
    ///
    /// Returns 0.0 if nothing has been enqueued.
    pub fn eviction_rate(&self) -> f64 {
        let evicted = self.evicted_count() as f64;
        let enqueued = self.enqueued_count() as f64;
        if enqueued == 0.0 {
            0.0
        } else {
            (evicted / enqueued) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.evicted.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.sink_write_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EngineMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued_count()),
            evicted: AtomicU64::new(self.evicted_count()),
            dispatched: AtomicU64::new(self.dispatched_count()),
            sink_write_failures: AtomicU64::new(self.sink_write_failures()),
        }
    }
}
