// Package stats provides the immutable statistics snapshot.

use std::fmt;

use serde::Serialize;

/// Point-in-time cache statistics. Every count is non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    hit_count: u64,
    miss_count: u64,
    hit_cost: f64,
    miss_cost: f64,
    load_success_count: u64,
    load_failure_count: u64,
    /// Nanoseconds spent loading.
    total_load_time: u64,
    eviction_count: u64,
    eviction_weight: u64,
}

impl CacheStats {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hit_count: u64,
        miss_count: u64,
        hit_cost: f64,
        miss_cost: f64,
        load_success_count: u64,
        load_failure_count: u64,
        total_load_time: u64,
        eviction_count: u64,
        eviction_weight: u64,
    ) -> Self {
        Self {
            hit_count,
            miss_count,
            hit_cost,
            miss_cost,
            load_success_count,
            load_failure_count,
            total_load_time,
            eviction_count,
            eviction_weight,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    pub fn miss_count(&self) -> u64 {
        self.miss_count
    }

    pub fn hit_cost(&self) -> f64 {
        self.hit_cost
    }

    pub fn miss_cost(&self) -> f64 {
        self.miss_cost
    }

    pub fn load_success_count(&self) -> u64 {
        self.load_success_count
    }

    pub fn load_failure_count(&self) -> u64 {
        self.load_failure_count
    }

    pub fn total_load_time(&self) -> u64 {
        self.total_load_time
    }

    pub fn eviction_count(&self) -> u64 {
        self.eviction_count
    }

    pub fn eviction_weight(&self) -> u64 {
        self.eviction_weight
    }

    /// hits + misses, saturating.
    pub fn request_count(&self) -> u64 {
        self.hit_count.saturating_add(self.miss_count)
    }

    /// Fraction of requests that hit; 1.0 when there were no requests.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.request_count();
        if requests == 0 {
            1.0
        } else {
            self.hit_count as f64 / requests as f64
        }
    }

    /// Fraction of requests that missed; 0.0 when there were no requests.
    pub fn miss_rate(&self) -> f64 {
        let requests = self.request_count();
        if requests == 0 {
            0.0
        } else {
            self.miss_count as f64 / requests as f64
        }
    }

    pub fn load_count(&self) -> u64 {
        self.load_success_count.saturating_add(self.load_failure_count)
    }

    pub fn load_failure_rate(&self) -> f64 {
        let loads = self.load_count();
        if loads == 0 {
            0.0
        } else {
            self.load_failure_count as f64 / loads as f64
        }
    }

    /// Mean nanoseconds per load attempt.
    pub fn average_load_penalty(&self) -> f64 {
        let loads = self.load_count();
        if loads == 0 {
            0.0
        } else {
            self.total_load_time as f64 / loads as f64
        }
    }

    /// Difference floored at zero field by field.
    pub fn minus(&self, other: &CacheStats) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.saturating_sub(other.hit_count),
            miss_count: self.miss_count.saturating_sub(other.miss_count),
            hit_cost: (self.hit_cost - other.hit_cost).max(0.0),
            miss_cost: (self.miss_cost - other.miss_cost).max(0.0),
            load_success_count: self.load_success_count.saturating_sub(other.load_success_count),
            load_failure_count: self.load_failure_count.saturating_sub(other.load_failure_count),
            total_load_time: self.total_load_time.saturating_sub(other.total_load_time),
            eviction_count: self.eviction_count.saturating_sub(other.eviction_count),
            eviction_weight: self.eviction_weight.saturating_sub(other.eviction_weight),
        }
    }

    /// Saturating sum field by field.
    pub fn plus(&self, other: &CacheStats) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.saturating_add(other.hit_count),
            miss_count: self.miss_count.saturating_add(other.miss_count),
            hit_cost: self.hit_cost + other.hit_cost,
            miss_cost: self.miss_cost + other.miss_cost,
            load_success_count: self.load_success_count.saturating_add(other.load_success_count),
            load_failure_count: self.load_failure_count.saturating_add(other.load_failure_count),
            total_load_time: self.total_load_time.saturating_add(other.total_load_time),
            eviction_count: self.eviction_count.saturating_add(other.eviction_count),
            eviction_weight: self.eviction_weight.saturating_add(other.eviction_weight),
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats{{hit_count={}, miss_count={}, hit_cost={}, miss_cost={}, \
             load_success_count={}, load_failure_count={}, total_load_time={}, \
             eviction_count={}, eviction_weight={}}}",
            self.hit_count,
            self.miss_count,
            self.hit_cost,
            self.miss_cost,
            self.load_success_count,
            self.load_failure_count,
            self.total_load_time,
            self.eviction_count,
            self.eviction_weight
        )
    }
}
