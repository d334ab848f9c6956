//! Entry cost extraction used to weight hit/miss statistics.
//!
//! The frequency sketch itself is cost-agnostic; the surrounding cache asks
//! a `CostExtractor` for a per-entry cost when recording hits and misses.
//! By default every entry costs 1.0 (`UnitCost`).

/// Computes the cost of a cache entry.
pub trait CostExtractor<K: ?Sized, V: ?Sized>: Send + Sync {
    fn extract(&self, key: &K, value: &V) -> f64;
}

/// Every entry costs exactly 1.0. This is the default extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitCost;

impl<K: ?Sized, V: ?Sized> CostExtractor<K, V> for UnitCost {
    #[inline]
    fn extract(&self, _key: &K, _value: &V) -> f64 {
        1.0
    }
}

/// An extractor backed by a closure.
pub struct FnCost<F>(pub F);

impl<K, V, F> CostExtractor<K, V> for FnCost<F>
where
    K: ?Sized,
    V: ?Sized,
    F: Fn(&K, &V) -> f64 + Send + Sync,
{
    #[inline]
    fn extract(&self, key: &K, value: &V) -> f64 {
        (self.0)(key, value)
    }
}
