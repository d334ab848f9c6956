//! Synthetic replay: drives a Zipf-like trace through a small cache guarded
//! by the TinyLFU admitter and reports the resulting statistics.

pub mod simulator;
pub mod trace;


use anyhow::{Context, Result};
use tracing::info;

use crate::admission::{new_admission, Admission};
use crate::config::{Config, ConfigTrait};
use crate::cost::UnitCost;
use crate::stats::{CacheStats, ConcurrentStatsCounter, StatsCounter};

pub use simulator::Simulator;
pub use trace::ZipfTrace;

pub const DEFAULT_KEYS: usize = 10_000;
pub const DEFAULT_ACCESSES: usize = 100_000;
pub const DEFAULT_SKEW: f64 = 0.9;
pub const DEFAULT_SEED: u64 = 1;
/// Resident capacity when the config has no admission section.
pub const DEFAULT_CAPACITY: i64 = 256;

/// Replays the configured trace and returns the final snapshot.
pub fn run(cfg: &Config) -> Result<CacheStats> {
    let trace_cfg = cfg.trace();
    let keys = trace_cfg.and_then(|t| t.keys).unwrap_or(DEFAULT_KEYS);
    let accesses = trace_cfg.and_then(|t| t.accesses).unwrap_or(DEFAULT_ACCESSES);
    let skew = trace_cfg.and_then(|t| t.skew).unwrap_or(DEFAULT_SKEW);
    let seed = trace_cfg.and_then(|t| t.seed).unwrap_or(DEFAULT_SEED);

    let capacity = cfg
        .admission()
        .and_then(|a| a.maximum_size)
        .unwrap_or(DEFAULT_CAPACITY);

    let admission = new_admission::<str>(cfg.admission()).context("build admission")?;
    admission
        .ensure_capacity(capacity)
        .context("size admission sketch")?;
    let stats = ConcurrentStatsCounter::new();

    info!(
        component = "replay",
        event = "start",
        keys,
        accesses,
        skew,
        seed,
        capacity,
        "replay started"
    );

    let resident = usize::try_from(capacity).context("capacity does not fit usize")?;
    let mut sim = Simulator::new(resident, &*admission, &stats, UnitCost);
    let mut trace = ZipfTrace::new(keys, skew, seed);
    for _ in 0..accesses {
        let key = ZipfTrace::key(trace.next_rank());
        sim.access(&key);
    }

    let snapshot = stats.snapshot();
    info!(
        component = "replay",
        event = "done",
        hit_rate = snapshot.hit_rate(),
        hits = snapshot.hit_count(),
        misses = snapshot.miss_count(),
        evictions = snapshot.eviction_count(),
        resident = sim.len(),
        "replay finished"
    );
    Ok(snapshot)
}
