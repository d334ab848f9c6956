//! Cache statistics: thread-safe accumulators and immutable snapshots.
//
//! These observe cache outcomes (hits, misses, loads, evictions); they never
//! look inside the frequency sketch.

pub mod cause;
pub mod counter;
pub mod meter;
pub mod snapshot;

#[cfg(test)]
mod counter_test;

// Re-export commonly used items
pub use cause::RemovalCause;
pub use counter::{ConcurrentStatsCounter, StatsCounter};
pub use snapshot::CacheStats;
