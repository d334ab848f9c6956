//! Counters for cache statistics.
//

use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use super::cause::RemovalCause;
use super::snapshot::CacheStats;

/// Accumulates statistics while a cache operates.
pub trait StatsCounter: Send + Sync {
    fn record_hits(&self, count: u64);

    fn record_hits_with_cost(&self, count: u64, cost: f64);

    fn record_misses(&self, count: u64);

    fn record_misses_with_cost(&self, count: u64, cost: f64);

    fn record_load_success(&self, load_time: Duration);

    fn record_load_failure(&self, load_time: Duration);

    fn record_eviction(&self, weight: u64, cause: RemovalCause);

    /// Returns a point-in-time view; concurrent updates may or may not be
    /// reflected.
    fn snapshot(&self) -> CacheStats;
}

/// An `f64` accumulator stored as bits in an `AtomicU64`.
#[derive(Debug, Default)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn add(&self, v: f64) {
        // fetch_update retries the CAS until it lands.
        let _ = self
            .bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |old| {
                Some((f64::from_bits(old) + v).to_bits())
            });
    }

    pub fn sum(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn reset(&self) {
        self.bits.store(0f64.to_bits(), Ordering::Relaxed);
    }
}

/// A thread-safe [`StatsCounter`]: relaxed atomic adds on the hot path and
/// a consistent-enough snapshot on read.
#[derive(Debug, Default)]
pub struct ConcurrentStatsCounter {
    hit_count: AtomicI64,
    miss_count: AtomicI64,
    load_success_count: AtomicI64,
    load_failure_count: AtomicI64,
    total_load_time: AtomicI64,
    eviction_count: AtomicI64,
    eviction_weight: AtomicI64,
    hit_cost: AtomicF64,
    miss_cost: AtomicF64,
}

impl ConcurrentStatsCounter {
    /// Creates a counter with all counts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every counter.
    pub fn reset(&self) {
        for c in self.longs() {
            c.store(0, Ordering::Relaxed);
        }
        self.hit_cost.reset();
        self.miss_cost.reset();
    }

    /// Adds all counts from `other` into this counter.
    pub fn increment_by(&self, other: &dyn StatsCounter) {
        let o = other.snapshot();
        add(&self.hit_count, o.hit_count());
        add(&self.miss_count, o.miss_count());
        self.hit_cost.add(o.hit_cost());
        self.miss_cost.add(o.miss_cost());
        add(&self.load_success_count, o.load_success_count());
        add(&self.load_failure_count, o.load_failure_count());
        add(&self.total_load_time, o.total_load_time());
        add(&self.eviction_count, o.eviction_count());
        add(&self.eviction_weight, o.eviction_weight());
    }

    fn longs(&self) -> [&AtomicI64; 7] {
        [
            &self.hit_count,
            &self.miss_count,
            &self.load_success_count,
            &self.load_failure_count,
            &self.total_load_time,
            &self.eviction_count,
            &self.eviction_weight,
        ]
    }
}

impl StatsCounter for ConcurrentStatsCounter {
    fn record_hits(&self, count: u64) {
        add(&self.hit_count, count);
    }

    fn record_hits_with_cost(&self, count: u64, cost: f64) {
        add(&self.hit_count, count);
        self.hit_cost.add(cost);
    }

    fn record_misses(&self, count: u64) {
        add(&self.miss_count, count);
    }

    fn record_misses_with_cost(&self, count: u64, cost: f64) {
        add(&self.miss_count, count);
        self.miss_cost.add(cost);
    }

    fn record_load_success(&self, load_time: Duration) {
        add(&self.load_success_count, 1);
        add(&self.total_load_time, nanos(load_time));
    }

    fn record_load_failure(&self, load_time: Duration) {
        add(&self.load_failure_count, 1);
        add(&self.total_load_time, nanos(load_time));
    }

    fn record_eviction(&self, weight: u64, _cause: RemovalCause) {
        add(&self.eviction_count, 1);
        add(&self.eviction_weight, weight);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats::new(
            load(&self.hit_count),
            load(&self.miss_count),
            self.hit_cost.sum(),
            self.miss_cost.sum(),
            load(&self.load_success_count),
            load(&self.load_failure_count),
            load(&self.total_load_time),
            load(&self.eviction_count),
            load(&self.eviction_weight),
        )
    }
}

impl fmt::Display for ConcurrentStatsCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

/// Wrapping add; an overflowed sum reads back as i64::MAX.
#[inline]
fn add(c: &AtomicI64, v: u64) {
    c.fetch_add(v as i64, Ordering::Relaxed);
}

/// Returns the value, if non-negative. Otherwise, returns i64::MAX.
#[inline]
fn load(c: &AtomicI64) -> u64 {
    let v = c.load(Ordering::Relaxed);
    if v >= 0 {
        v as u64
    } else {
        i64::MAX as u64
    }
}

#[inline]
fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
