//! Admission control interface.
//

use crate::config::Admission as AdmissionConfig;
use crate::hash::SketchKey;

use super::error::SketchError;
use super::tiny_lfu::TinyLfu;

/// Admission control interface consumed by the eviction policy.
pub trait Admission<K: ?Sized>: Send + Sync {
    /// Records a key access.
    fn record(&self, key: &K);

    /// Returns true if the candidate should replace a victim.
    fn allow(&self, candidate: &K, victim: &K) -> bool;

    /// Exposes the frequency estimate (for metrics/diagnostics).
    fn estimate(&self, key: &K) -> u8;

    /// Grows the underlying sketch once the cache capacity is known.
    fn ensure_capacity(&self, maximum_size: i64) -> Result<(), SketchError>;

    /// Forces aging now (useful for tests or ops hooks).
    fn reset(&self);
}

impl<K: SketchKey + ?Sized> Admission<K> for TinyLfu {
    fn record(&self, key: &K) {
        TinyLfu::record(self, key);
    }

    fn allow(&self, candidate: &K, victim: &K) -> bool {
        TinyLfu::allow(self, candidate, victim)
    }

    fn estimate(&self, key: &K) -> u8 {
        TinyLfu::estimate(self, key)
    }

    fn ensure_capacity(&self, maximum_size: i64) -> Result<(), SketchError> {
        TinyLfu::ensure_capacity(self, maximum_size)
    }

    fn reset(&self) {
        TinyLfu::reset(self);
    }
}

/// Creates a new admission controller.
///
/// Without config the sketch stays unsized until `ensure_capacity` is
/// called, and no candidate is admitted before then.
pub fn new_admission<K: SketchKey + ?Sized>(
    cfg: Option<&AdmissionConfig>,
) -> Result<Box<dyn Admission<K>>, SketchError> {
    let cfg = match cfg {
        Some(c) => c,
        None => return Ok(Box::new(TinyLfu::default())),
    };
    Ok(Box::new(TinyLfu::new(cfg)?))
}
