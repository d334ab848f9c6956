// Package admission provides TinyLFU implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::Admission as AdmissionConfig;
use crate::hash::SketchKey;

use super::error::SketchError;
use super::frequency_sketch::FrequencySketch;

/// Capacity used when the config leaves `maximum_size` unset.
pub const DEFAULT_MAXIMUM_SIZE: i64 = 10_000;

/// TinyLFU admitter: one frequency sketch behind a mutex.
///
/// The sketch itself is unsynchronized; this lock is the mutual exclusion
/// its callers must provide.
pub struct TinyLfu {
    sketch: Mutex<FrequencySketch>,
    /// When false, every candidate is admitted and nothing is recorded.
    is_enabled: Arc<AtomicBool>,
}

impl TinyLfu {
    /// Creates an admitter from config, sizing the sketch immediately.
    pub fn new(cfg: &AdmissionConfig) -> Result<Self, SketchError> {
        let maximum_size = cfg.maximum_size.unwrap_or(DEFAULT_MAXIMUM_SIZE);
        let mut sketch = FrequencySketch::new();
        sketch.ensure_capacity(maximum_size)?;

        debug!(
            component = "admission",
            event = "configured",
            enabled = cfg.is_enabled.load(Ordering::Relaxed),
            maximum_size,
            table_len = sketch.table_len(),
            "tinylfu admitter configured"
        );

        Ok(Self {
            sketch: Mutex::new(sketch),
            is_enabled: Arc::clone(&cfg.is_enabled),
        })
    }

    /// Creates an enabled admitter sized for `maximum_size` entries.
    pub fn with_capacity(maximum_size: i64) -> Result<Self, SketchError> {
        let admitter = Self::default();
        admitter.ensure_capacity(maximum_size)?;
        Ok(admitter)
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled.load(Ordering::Relaxed)
    }

    /// Records a key access.
    pub fn record<K: SketchKey + ?Sized>(&self, key: &K) {
        if !self.is_enabled() {
            return;
        }
        self.sketch.lock().increment(key);
    }

    /// Returns true if the candidate should replace the victim; ties reject.
    pub fn allow<K: SketchKey + ?Sized>(&self, candidate: &K, victim: &K) -> bool {
        if !self.is_enabled() {
            return true;
        }
        let sketch = self.sketch.lock();
        sketch.frequency(candidate) > sketch.frequency(victim)
    }

    pub fn estimate<K: SketchKey + ?Sized>(&self, key: &K) -> u8 {
        self.sketch.lock().frequency(key)
    }

    pub fn ensure_capacity(&self, maximum_size: i64) -> Result<(), SketchError> {
        self.sketch.lock().ensure_capacity(maximum_size)
    }

    /// Forces aging now.
    pub fn reset(&self) {
        self.sketch.lock().reset();
    }

    pub fn table_len(&self) -> usize {
        self.sketch.lock().table_len()
    }
}

impl Default for TinyLfu {
    /// An enabled admitter whose sketch is not yet sized, so it never admits.
    fn default() -> Self {
        Self {
            sketch: Mutex::new(FrequencySketch::new()),
            is_enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}
