//! Call-site adapters for gated work.
//!
//! The limiter itself reports denial through a plain `bool`; these helpers
//! are the layer that escalates a denial into a [`PermissionDenied`] error
//! and only then runs the wrapped work. The wait bound is always the
//! limiter's configured `wait_timeout`, so call sites don't repeat it.
//!
//! The wrapped closure's value is passed through untouched. In particular a
//! closure returning `Result` has its `Ok`/`Err` forwarded as-is; denial is
//! the only condition these adapters add.

use crate::application::limiter::RateLimiter;
use std::fmt;
use std::future::Future;

/// Error raised when a limiter refuses to admit a unit of work.
///
/// Carries the name of the denying limiter so a call site gated by several
/// limiters can tell which one refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDenied {
    limiter: String,
}

impl PermissionDenied {
    fn new(limiter: &str) -> Self {
        Self {
            limiter: limiter.to_owned(),
        }
    }

    /// Name of the limiter that denied the request.
    pub fn limiter(&self) -> &str {
        &self.limiter
    }
}

impl fmt::Display for PermissionDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request not permitted by limiter '{}'", self.limiter)
    }
}

impl std::error::Error for PermissionDenied {}

/// Wait for permission using the limiter's configured wait timeout.
///
/// # Errors
/// Returns [`PermissionDenied`] if no permit could be obtained within the
/// wait bound.
pub async fn require_permission(limiter: &RateLimiter) -> Result<(), PermissionDenied> {
    let wait = limiter.config().wait_timeout();
    if limiter.acquire_permission(wait).await {
        Ok(())
    } else {
        Err(PermissionDenied::new(limiter.name()))
    }
}

/// Run `op` if the limiter admits it; the closure is never invoked on
/// denial.
///
/// Covers producers (`FnOnce() -> T`) and runnables (`FnOnce() -> ()`).
///
/// # Errors
/// Returns [`PermissionDenied`] if no permit could be obtained.
pub async fn call<T, F>(limiter: &RateLimiter, op: F) -> Result<T, PermissionDenied>
where
    F: FnOnce() -> T,
{
    require_permission(limiter).await?;
    Ok(op())
}

/// Run `op(arg)` if the limiter admits it.
///
/// Covers single-argument functions and consumers.
///
/// # Errors
/// Returns [`PermissionDenied`] if no permit could be obtained.
pub async fn call_with<A, T, F>(limiter: &RateLimiter, op: F, arg: A) -> Result<T, PermissionDenied>
where
    F: FnOnce(A) -> T,
{
    require_permission(limiter).await?;
    Ok(op(arg))
}

/// Await `work` if the limiter admits it; the future is dropped unpolled on
/// denial.
///
/// # Errors
/// Returns [`PermissionDenied`] if no permit could be obtained.
pub async fn call_future<F>(limiter: &RateLimiter, work: F) -> Result<F::Output, PermissionDenied>
where
    F: Future,
{
    require_permission(limiter).await?;
    Ok(work.await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::LimiterConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn open_limiter() -> RateLimiter {
        let config =
            LimiterConfig::new(Duration::ZERO, Duration::from_millis(500), 10).unwrap();
        RateLimiter::new("open", config).unwrap()
    }

    async fn exhausted_limiter() -> RateLimiter {
        let config = LimiterConfig::new(Duration::ZERO, Duration::from_secs(60), 1).unwrap();
        let limiter = RateLimiter::new("exhausted", config).unwrap();
        assert!(limiter.acquire_permission(Duration::ZERO).await);
        limiter
    }

    #[tokio::test(start_paused = true)]
    async fn denial_names_the_limiter_and_skips_the_work() {
        let limiter = exhausted_limiter().await;
        let invocations = AtomicUsize::new(0);

        let result = call(&limiter, || {
            invocations.fetch_add(1, Ordering::SeqCst);
            42
        })
        .await;

        let denied = result.unwrap_err();
        assert_eq!(denied.limiter(), "exhausted");
        assert_eq!(invocations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn grant_passes_the_value_through() {
        let limiter = open_limiter();
        let result = call(&limiter, || 42).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn inner_results_are_forwarded_unchanged() {
        let limiter = open_limiter();

        let ok: Result<Result<u32, String>, PermissionDenied> =
            call(&limiter, || Ok(7)).await;
        assert_eq!(ok, Ok(Ok(7)));

        let err: Result<Result<u32, String>, PermissionDenied> =
            call(&limiter, || Err("backend down".to_owned())).await;
        assert_eq!(err, Ok(Err("backend down".to_owned())));
    }

    #[tokio::test(start_paused = true)]
    async fn call_with_forwards_the_argument() {
        let limiter = open_limiter();
        let result = call_with(&limiter, |n: u32| n * 2, 21).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn denied_future_is_never_polled() {
        let limiter = exhausted_limiter().await;
        let polled = AtomicUsize::new(0);

        let result = call_future(&limiter, async {
            polled.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        assert!(result.is_err());
        assert_eq!(polled.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn granted_future_runs_to_completion() {
        let limiter = open_limiter();
        let result = call_future(&limiter, async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn require_permission_uses_configured_timeout() {
        // Wait timeout zero: denial must be immediate even though the pool
        // refreshes far in the future.
        let limiter = exhausted_limiter().await;
        let started = tokio::time::Instant::now();
        assert!(require_permission(&limiter).await.is_err());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn error_display_includes_name() {
        let denied = PermissionDenied::new("backend-api");
        assert_eq!(
            denied.to_string(),
            "request not permitted by limiter 'backend-api'"
        );
    }
}
