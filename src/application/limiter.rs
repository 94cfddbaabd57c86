//! Fixed-rate permit pool.
//!
//! A [`RateLimiter`] owns a counting pool of permits and a background task
//! that tops the pool up on a fixed schedule. Callers ask for permission
//! before starting a unit of work; a granted permit is consumed and comes
//! back only through the next refresh, which is what makes this admission
//! control rather than concurrency control.

use crate::application::metrics::{DetailedMetrics, Metrics, MetricsSnapshot};
use crate::domain::config::{ConfigError, LimiterConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, trace};

/// A named, fixed-rate admission controller.
///
/// The pool starts with `permits_per_period` permits and gains another
/// `permits_per_period` every `refresh_period`, forever. Waiting callers are
/// served strictly in arrival order: a permit released by a refresh goes to
/// the caller that has been waiting longest.
///
/// Unused permits are not discarded at the period boundary, so an idle
/// limiter accumulates capacity and can admit a burst later. The pool is
/// only ever clamped at the semaphore's maximum, far beyond any practical
/// accumulation.
///
/// The refill task runs on the Tokio runtime the limiter was created on and
/// is aborted when the limiter is dropped; it never keeps a process alive.
#[derive(Debug)]
pub struct RateLimiter {
    shared: Arc<Shared>,
    refill_task: JoinHandle<()>,
}

#[derive(Debug)]
struct Shared {
    name: String,
    config: LimiterConfig,
    semaphore: Semaphore,
    metrics: Metrics,
}

impl RateLimiter {
    /// Create a limiter and start its refill schedule.
    ///
    /// The first refresh fires one full `refresh_period` after construction.
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyName`] if `name` is empty.
    pub fn new(name: impl Into<String>, config: LimiterConfig) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }

        let shared = Arc::new(Shared {
            semaphore: Semaphore::new(config.permits_per_period()),
            metrics: Metrics::new(),
            name,
            config,
        });

        let refill_task = tokio::spawn(refill_loop(Arc::clone(&shared)));

        Ok(Self {
            shared,
            refill_task,
        })
    }

    /// Try to obtain one permit, waiting up to `timeout` for one to appear.
    ///
    /// Returns `true` if a permit was obtained and `false` if the timeout
    /// elapsed first. A zero timeout performs a non-blocking check and only
    /// succeeds if a permit is free right now. Timeouts and cancellation are
    /// expected outcomes, never errors; callers branch on the return value.
    ///
    /// Waiting callers are granted permits in the order they began waiting,
    /// even when several are released by a single refresh.
    pub async fn acquire_permission(&self, timeout: Duration) -> bool {
        let granted = if timeout.is_zero() {
            self.try_acquire_now()
        } else {
            let _waiting = self.shared.metrics.enter_wait();
            match tokio::time::timeout(timeout, self.shared.semaphore.acquire()).await {
                Ok(Ok(permit)) => {
                    permit.forget();
                    true
                }
                // The semaphore is never closed while the limiter is alive.
                Ok(Err(_)) => false,
                Err(_) => false,
            }
        };

        if granted {
            self.shared.metrics.record_granted();
            trace!(limiter = %self.shared.name, "permit granted");
        } else {
            self.shared.metrics.record_denied();
            debug!(limiter = %self.shared.name, ?timeout, "permission denied");
        }
        granted
    }

    fn try_acquire_now(&self) -> bool {
        match self.shared.semaphore.try_acquire() {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(_) => false,
        }
    }

    /// The limiter's name, unique within its registry.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// The configuration this limiter was built from.
    pub fn config(&self) -> &LimiterConfig {
        &self.shared.config
    }

    /// A point-in-time view of the limiter's admission metrics.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    /// Extended metrics including the current available-permit count.
    pub fn detailed_metrics(&self) -> DetailedMetrics {
        let snapshot = self.shared.metrics.snapshot();
        DetailedMetrics {
            available_permits: self.shared.semaphore.available_permits(),
            waiting_callers: snapshot.waiting_callers,
            permits_granted: snapshot.permits_granted,
            permits_denied: snapshot.permits_denied,
        }
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.refill_task.abort();
    }
}

async fn refill_loop(shared: Arc<Shared>) {
    let period = shared.config.refresh_period();
    let mut ticker = interval_at(Instant::now() + period, period);
    loop {
        ticker.tick().await;
        shared.refill();
    }
}

impl Shared {
    /// Add one period's permit quota to the pool.
    ///
    /// Deliberately uncapped: quota unused in one period carries over to the
    /// next. The top-up is clamped only against the semaphore's hard maximum
    /// so a tick can never panic and stop the schedule.
    fn refill(&self) {
        let quota = self.config.permits_per_period();
        let headroom = Semaphore::MAX_PERMITS - self.semaphore.available_permits();
        let added = quota.min(headroom);
        if added > 0 {
            self.semaphore.add_permits(added);
        }
        trace!(limiter = %self.name, added, "permit pool refreshed");
    }
}
