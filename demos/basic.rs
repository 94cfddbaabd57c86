//! Basic example demonstrating fixed-rate admission control.
//!
//! This example configures a limiter that admits 3 operations per 500ms and
//! then fires bursts of requests at it, showing which ones are admitted
//! immediately, which are served after a short wait, and which are shed.

use permit_throttle::{LimiterConfig, LimiterRegistry};
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "permit_throttle=debug".into()),
        )
        .init();

    // 3 admissions per 500ms; callers are willing to wait up to 200ms.
    let defaults = LimiterConfig::builder()
        .wait_timeout(Duration::from_millis(200))
        .refresh_period(Duration::from_millis(500))
        .unwrap()
        .permits_per_period(3)
        .unwrap()
        .build()
        .unwrap();
    let registry = LimiterRegistry::new(defaults);
    let limiter = registry.get("demo-endpoint").unwrap();

    println!("=== Fixed-Rate Admission Control ===\n");
    println!("Quota: 3 permits per 500ms, wait bound 200ms\n");

    println!("Burst of 6 non-blocking requests:");
    for i in 1..=6 {
        let admitted = limiter.acquire_permission(Duration::ZERO).await;
        println!("  request {i}: {}", if admitted { "admitted" } else { "shed" });
    }

    println!("\nWaiting out one refresh period...");
    tokio::time::sleep(Duration::from_millis(600)).await;

    println!("Burst of 6 requests willing to wait 200ms:");
    for i in 1..=6 {
        let admitted = limiter
            .acquire_permission(limiter.config().wait_timeout())
            .await;
        println!("  request {i}: {}", if admitted { "admitted" } else { "shed" });
    }

    let metrics = limiter.detailed_metrics();
    println!("\n=== Metrics ===");
    println!("granted:   {}", metrics.permits_granted);
    println!("denied:    {}", metrics.permits_denied);
    println!("available: {}", metrics.available_permits);
}
