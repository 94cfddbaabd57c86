//! Observability metrics for permit pools.
//!
//! Provides counters and gauges about admission decisions for monitoring
//! and debugging. All updates use atomic operations and can be read at any
//! time without locking.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Internal metric storage owned by a limiter.
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    /// Callers currently suspended in `acquire_permission`
    waiting: AtomicUsize,
    /// Total permits granted
    granted: AtomicU64,
    /// Total acquisitions denied (timeout or empty pool)
    denied: AtomicU64,
}

impl Metrics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mark the calling task as waiting until the returned guard drops.
    ///
    /// The decrement lives in `Drop` so the gauge stays accurate even when
    /// the waiting future is cancelled mid-acquire.
    pub(crate) fn enter_wait(&self) -> WaitGuard<'_> {
        self.waiting.fetch_add(1, Ordering::SeqCst);
        WaitGuard { waiting: &self.waiting }
    }

    pub(crate) fn record_granted(&self) {
        self.granted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_denied(&self) {
        self.denied.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            waiting_callers: self.waiting.load(Ordering::SeqCst),
            permits_granted: self.granted.load(Ordering::Relaxed),
            permits_denied: self.denied.load(Ordering::Relaxed),
        }
    }
}

/// RAII marker for a caller blocked in `acquire_permission`.
#[derive(Debug)]
pub(crate) struct WaitGuard<'a> {
    waiting: &'a AtomicUsize,
}

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        self.waiting.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A point-in-time view of a limiter's admission metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Estimate of callers currently blocked waiting for a permit
    pub waiting_callers: usize,
    /// Total number of permits granted so far
    pub permits_granted: u64,
    /// Total number of acquisitions denied so far
    pub permits_denied: u64,
}

impl MetricsSnapshot {
    /// Total admission decisions made (granted + denied).
    pub fn total_decisions(&self) -> u64 {
        self.permits_granted.saturating_add(self.permits_denied)
    }

    /// Ratio of denied acquisitions to total decisions (0.0 to 1.0).
    ///
    /// Returns 0.0 before any decision has been made.
    pub fn denial_rate(&self) -> f64 {
        let total = self.total_decisions();
        if total == 0 {
            0.0
        } else {
            self.permits_denied as f64 / total as f64
        }
    }
}

/// Extended metrics view exposing pool internals.
///
/// Mainly useful for tests and debugging; the available-permit count is a
/// snapshot and may be stale by the time it is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailedMetrics {
    /// Permits obtainable right now, before the next refresh
    pub available_permits: usize,
    /// Estimate of callers currently blocked waiting for a permit
    pub waiting_callers: usize,
    /// Total number of permits granted so far
    pub permits_granted: u64,
    /// Total number of acquisitions denied so far
    pub permits_denied: u64,
}
