//! Application layer - the concurrent core of the system.
//!
//! This layer coordinates the runtime behavior:
//! - Permit pool limiter (fair acquisition and periodic refill)
//! - Limiter registry (named, memoized instances)
//! - Metrics (observability counters and gauges)

pub mod limiter;
pub mod metrics;
pub mod registry;
