// Package stats publishes snapshots to the metrics facade.

use std::sync::Once;

use super::snapshot::CacheStats;

// Metric name constants
pub const HITS: &str = "cache_hits";
pub const MISSES: &str = "cache_misses";
pub const HIT_COST: &str = "cache_hit_cost";
pub const MISS_COST: &str = "cache_miss_cost";
pub const HIT_RATE: &str = "cache_hit_rate";
pub const LOAD_SUCCESSES: &str = "cache_load_successes";
pub const LOAD_FAILURES: &str = "cache_load_failures";
pub const AVG_LOAD_PENALTY: &str = "cache_avg_load_penalty_ns";
pub const EVICTIONS: &str = "cache_evictions";
pub const EVICTION_WEIGHT: &str = "cache_eviction_weight";

fn describe() {
    static DESCRIBED: Once = Once::new();
    DESCRIBED.call_once(|| {
        metrics::describe_gauge!(HITS, metrics::Unit::Count, "Total cache hits");
        metrics::describe_gauge!(MISSES, metrics::Unit::Count, "Total cache misses");
        metrics::describe_gauge!(HIT_RATE, "Hits over requests");
        metrics::describe_gauge!(
            AVG_LOAD_PENALTY,
            metrics::Unit::Nanoseconds,
            "Mean time per load attempt"
        );
        metrics::describe_gauge!(EVICTIONS, metrics::Unit::Count, "Total evicted entries");
    });
}

/// Publishes a snapshot as absolute gauges.
///
/// A no-op unless a metrics recorder has been installed.
pub fn publish(stats: &CacheStats) {
    describe();
    metrics::gauge!(HITS).set(stats.hit_count() as f64);
    metrics::gauge!(MISSES).set(stats.miss_count() as f64);
    metrics::gauge!(HIT_COST).set(stats.hit_cost());
    metrics::gauge!(MISS_COST).set(stats.miss_cost());
    metrics::gauge!(HIT_RATE).set(stats.hit_rate());
    metrics::gauge!(LOAD_SUCCESSES).set(stats.load_success_count() as f64);
    metrics::gauge!(LOAD_FAILURES).set(stats.load_failure_count() as f64);
    metrics::gauge!(AVG_LOAD_PENALTY).set(stats.average_load_penalty());
    metrics::gauge!(EVICTIONS).set(stats.eviction_count() as f64);
    metrics::gauge!(EVICTION_WEIGHT).set(stats.eviction_weight() as f64);
}
