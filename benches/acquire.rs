use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use permit_throttle::{LimiterConfig, LimiterRegistry, RateLimiter};
use std::time::Duration;

/// Benchmark the admission fast paths: an immediate grant from a plentiful
/// pool and an immediate denial from an exhausted one.
fn bench_acquire(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();

    // Pool large enough to never exhaust during the run; the refresh is
    // pushed far out so it stays off the hot path.
    let plentiful =
        LimiterConfig::new(Duration::ZERO, Duration::from_secs(3600), usize::MAX >> 4).unwrap();
    let granting = {
        let _guard = rt.enter();
        RateLimiter::new("granting", plentiful).unwrap()
    };

    let scarce = LimiterConfig::new(Duration::ZERO, Duration::from_secs(3600), 1).unwrap();
    let denying = {
        let _guard = rt.enter();
        RateLimiter::new("denying", scarce).unwrap()
    };
    rt.block_on(async {
        assert!(denying.acquire_permission(Duration::ZERO).await);
    });

    let mut group = c.benchmark_group("acquire_permission");
    group.throughput(Throughput::Elements(1));

    group.bench_function("grant_zero_timeout", |b| {
        b.to_async(&rt)
            .iter(|| async { granting.acquire_permission(Duration::ZERO).await })
    });

    group.bench_function("deny_zero_timeout", |b| {
        b.to_async(&rt)
            .iter(|| async { denying.acquire_permission(Duration::ZERO).await })
    });

    group.finish();
}

/// Benchmark memoized lookup of an already-registered limiter.
fn bench_registry_lookup(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();

    let defaults =
        LimiterConfig::new(Duration::from_secs(5), Duration::from_secs(1), 100).unwrap();
    let registry = LimiterRegistry::new(defaults);
    {
        let _guard = rt.enter();
        registry.get("hot").unwrap();
    }

    c.bench_function("registry_get_registered", |b| {
        b.iter(|| registry.get("hot").unwrap())
    });
}

criterion_group!(benches, bench_acquire, bench_registry_lookup);
criterion_main!(benches);
