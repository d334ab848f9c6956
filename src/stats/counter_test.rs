//! Tests for statistics counters and snapshots.

#[cfg(test)]
mod tests {
    use crate::stats::counter::AtomicF64;
    use crate::stats::{CacheStats, ConcurrentStatsCounter, RemovalCause, StatsCounter};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    fn populated() -> ConcurrentStatsCounter {
        let c = ConcurrentStatsCounter::new();
        c.record_hits(3);
        c.record_hits_with_cost(2, 1.5);
        c.record_misses(1);
        c.record_misses_with_cost(1, 4.0);
        c.record_load_success(Duration::from_nanos(30));
        c.record_load_failure(Duration::from_nanos(10));
        c.record_eviction(5, RemovalCause::Size);
        c
    }

    #[test]
    fn test_snapshot_reflects_records() {
        let s = populated().snapshot();
        assert_eq!(s.hit_count(), 5);
        assert_eq!(s.miss_count(), 2);
        assert_eq!(s.hit_cost(), 1.5);
        assert_eq!(s.miss_cost(), 4.0);
        assert_eq!(s.load_success_count(), 1);
        assert_eq!(s.load_failure_count(), 1);
        assert_eq!(s.total_load_time(), 40);
        assert_eq!(s.eviction_count(), 1);
        assert_eq!(s.eviction_weight(), 5);

        assert_eq!(s.request_count(), 7);
        assert!((s.hit_rate() - 5.0 / 7.0).abs() < 1e-12);
        assert!((s.miss_rate() - 2.0 / 7.0).abs() < 1e-12);
        assert_eq!(s.load_count(), 2);
        assert_eq!(s.load_failure_rate(), 0.5);
        assert_eq!(s.average_load_penalty(), 20.0);
    }

    #[test]
    fn test_empty_rates() {
        let s = CacheStats::empty();
        assert_eq!(s.hit_rate(), 1.0);
        assert_eq!(s.miss_rate(), 0.0);
        assert_eq!(s.average_load_penalty(), 0.0);
        assert_eq!(s.load_failure_rate(), 0.0);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let c = populated();
        c.reset();
        assert_eq!(c.snapshot(), CacheStats::empty());
    }

    #[test]
    fn test_increment_by_merges() {
        let a = populated();
        let b = populated();
        a.increment_by(&b);
        let s = a.snapshot();
        assert_eq!(s.hit_count(), 10);
        assert_eq!(s.miss_cost(), 8.0);
        assert_eq!(s.total_load_time(), 80);
        assert_eq!(s.eviction_weight(), 10);
        assert_eq!(s, b.snapshot().plus(&b.snapshot()));
    }

    /// Overflowed sums are reported as i64::MAX rather than negative values.
    #[test]
    fn test_overflow_reads_as_max() {
        let c = ConcurrentStatsCounter::new();
        c.record_hits(i64::MAX as u64);
        c.record_hits(1);
        assert_eq!(c.snapshot().hit_count(), i64::MAX as u64);
    }

    #[test]
    fn test_minus_floors_at_zero() {
        let small = populated().snapshot();
        let big = small.plus(&small);
        assert_eq!(big.minus(&small), small);
        assert_eq!(small.minus(&big), CacheStats::empty());
    }

    #[test]
    fn test_removal_cause_was_evicted() {
        assert!(RemovalCause::Size.was_evicted());
        assert!(RemovalCause::Expired.was_evicted());
        assert!(RemovalCause::Collected.was_evicted());
        assert!(!RemovalCause::Explicit.was_evicted());
        assert!(!RemovalCause::Replaced.was_evicted());
    }

    #[test]
    fn test_display_lists_fields() {
        let text = populated().to_string();
        assert!(text.starts_with("CacheStats{hit_count=5, miss_count=2"), "got: {text}");
        assert!(text.contains("eviction_weight=5"));
    }

    #[test]
    fn test_atomic_f64_accumulates() {
        let f = AtomicF64::default();
        f.add(0.25);
        f.add(0.5);
        assert_eq!(f.sum(), 0.75);
        f.reset();
        assert_eq!(f.sum(), 0.0);
    }

    /// Concurrent recording loses no updates.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_recording_is_exact() {
        let c = Arc::new(ConcurrentStatsCounter::new());
        let workers = num_cpus::get().max(2);

        let mut join_set = tokio::task::JoinSet::new();
        for _ in 0..workers {
            let c = c.clone();
            join_set.spawn(async move {
                for _ in 0..10_000 {
                    c.record_hits_with_cost(1, 1.0);
                    c.record_misses(1);
                }
            });
        }

        let result = timeout(Duration::from_secs(10), async {
            while let Some(result) = join_set.join_next().await {
                result.unwrap();
            }
        })
        .await;
        assert!(result.is_ok(), "timeout: concurrent recording took too long");

        let s = c.snapshot();
        let want = (workers * 10_000) as u64;
        assert_eq!(s.hit_count(), want);
        assert_eq!(s.miss_count(), want);
        assert_eq!(s.hit_cost(), want as f64);
    }
}
