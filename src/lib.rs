//! # permit-throttle
//!
//! Named, fixed-rate admission control for the Tokio ecosystem.
//!
//! A [`RateLimiter`] owns a pool of permits that replenishes on a fixed
//! schedule: no more than `permits_per_period` operations are admitted per
//! `refresh_period`, and callers that cannot be served within their wait
//! bound fail fast instead of queueing indefinitely. A [`LimiterRegistry`]
//! hands out named limiters so every call site gating the same resource
//! shares one pool.
//!
//! ## Quick Start
//!
//! ```no_run
//! use permit_throttle::{LimiterConfig, LimiterRegistry};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     // At most 50 admissions per second, callers wait up to 250ms.
//!     let defaults = LimiterConfig::builder()
//!         .wait_timeout(Duration::from_millis(250))
//!         .refresh_period(Duration::from_secs(1)).unwrap()
//!         .permits_per_period(50).unwrap()
//!         .build()
//!         .unwrap();
//!     let registry = LimiterRegistry::new(defaults);
//!
//!     let limiter = registry.get("backend-api").unwrap();
//!     if limiter.acquire_permission(Duration::from_millis(250)).await {
//!         // proceed with the gated call
//!     } else {
//!         // shed load: reject, queue elsewhere, or retry later
//!     }
//! }
//! ```
//!
//! ## Admission control, not concurrency control
//!
//! A granted permit is consumed, not held: there is nothing to release when
//! the gated operation finishes. Capacity comes back only through the
//! background refresh. This bounds how many operations *start* per period,
//! not how many run at once.
//!
//! ## Fairness
//!
//! Callers blocked on the same limiter are granted permits strictly in the
//! order they began waiting, even when a single refresh releases several
//! waiters at once. A caller that gives up (timeout or cancellation) leaves
//! the queue without affecting the others' positions.
//!
//! ## Permit accumulation
//!
//! Refreshes are additive and deliberately uncapped: a limiter that sits
//! idle for several periods accumulates the unused quota and can admit a
//! burst later. Size `permits_per_period` accordingly if smooth pacing
//! matters more than burst capacity.
//!
//! ## Escalating denials
//!
//! The limiter reports denial through its `bool` return value. When a call
//! site would rather fail loudly, the adapters in
//! [`infrastructure::decorate`] run a closure or future only after
//! admission and turn a denial into a [`PermissionDenied`] error naming the
//! limiter:
//!
//! ```no_run
//! use permit_throttle::{call, LimiterConfig, RateLimiter};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LimiterConfig::new(
//!         Duration::from_millis(250),
//!         Duration::from_secs(1),
//!         50,
//!     )
//!     .unwrap();
//!     let limiter = RateLimiter::new("payments", config).unwrap();
//!
//!     match call(&limiter, || charge_card()).await {
//!         Ok(receipt) => println!("charged: {receipt}"),
//!         Err(denied) => eprintln!("shedding load: {denied}"),
//!     }
//! }
//!
//! fn charge_card() -> u64 {
//!     42
//! }
//! ```
//!
//! ## Observability
//!
//! Each limiter tracks how many callers are currently waiting and how many
//! acquisitions were granted or denied; see [`RateLimiter::metrics`] and
//! [`RateLimiter::detailed_metrics`]. Admission decisions and refresh ticks
//! are also emitted as `tracing` events carrying the limiter name.
//!
//! ## Lifecycle
//!
//! Limiters are built for process-lifetime use: the refill task keeps
//! firing for as long as its limiter exists and is aborted when the limiter
//! is dropped. It never keeps a shutting-down process alive.

// Domain layer - validated configuration types
pub mod domain;

// Application layer - limiter, registry, metrics
pub mod application;

// Infrastructure layer - call-site adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::config::{ConfigError, LimiterConfig, LimiterConfigBuilder, MIN_REFRESH_PERIOD};

pub use application::{
    limiter::RateLimiter,
    metrics::{DetailedMetrics, MetricsSnapshot},
    registry::LimiterRegistry,
};

pub use infrastructure::decorate::{
    call, call_future, call_with, require_permission, PermissionDenied,
};
