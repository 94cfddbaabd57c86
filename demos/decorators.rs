//! Example demonstrating the call-site adapters.
//!
//! Instead of branching on `acquire_permission`'s boolean at every call
//! site, the adapters run a closure only when the limiter admits it and
//! turn a denial into a typed error naming the limiter.

use permit_throttle::{call, call_future, LimiterConfig, RateLimiter};
use std::time::Duration;

fn lookup_user(id: u64) -> String {
    format!("user-{id}")
}

#[tokio::main]
async fn main() {
    // 2 admissions per second, no waiting.
    let config =
        LimiterConfig::new(Duration::ZERO, Duration::from_secs(1), 2).unwrap();
    let limiter = RateLimiter::new("user-service", config).unwrap();

    println!("=== Gated closures ===");
    for id in 1..=4 {
        match call(&limiter, || lookup_user(id)).await {
            Ok(user) => println!("  fetched {user}"),
            Err(denied) => println!("  rejected: {denied}"),
        }
    }

    println!("\nWaiting for the quota to come back...");
    tokio::time::sleep(Duration::from_millis(1100)).await;

    println!("=== Gated futures ===");
    for id in 5..=8 {
        let work = async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            lookup_user(id)
        };
        match call_future(&limiter, work).await {
            Ok(user) => println!("  fetched {user}"),
            Err(denied) => println!("  rejected: {denied}"),
        }
    }
}
