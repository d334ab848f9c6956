//! A FIFO-resident toy cache that consults an admission policy on eviction.
//

use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use crate::admission::Admission;
use crate::cost::CostExtractor;
use crate::stats::{RemovalCause, StatsCounter};

/// Residents are evicted oldest-first, but only when the admitter prefers
/// the incoming candidate; otherwise the candidate is dropped.
pub struct Simulator<'a, C> {
    capacity: usize,
    admission: &'a dyn Admission<str>,
    stats: &'a dyn StatsCounter,
    cost: C,
    resident: HashSet<String>,
    order: VecDeque<String>,
}

impl<'a, C: CostExtractor<str, ()>> Simulator<'a, C> {
    pub fn new(
        capacity: usize,
        admission: &'a dyn Admission<str>,
        stats: &'a dyn StatsCounter,
        cost: C,
    ) -> Self {
        Self {
            capacity,
            admission,
            stats,
            cost,
            resident: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Serves one access of `key`.
    pub fn access(&mut self, key: &str) {
        self.admission.record(key);
        let cost = self.cost.extract(key, &());

        if self.resident.contains(key) {
            self.stats.record_hits_with_cost(1, cost);
            return;
        }
        self.stats.record_misses_with_cost(1, cost);

        let started = Instant::now();
        let loaded = key.to_owned();
        self.stats.record_load_success(started.elapsed());

        if self.capacity == 0 {
            self.stats.record_eviction(1, RemovalCause::Size);
            return;
        }
        if self.order.len() < self.capacity {
            self.insert(loaded);
            return;
        }

        let admitted = match self.order.front() {
            Some(victim) => self.admission.allow(key, victim),
            None => true,
        };
        if admitted {
            if let Some(victim) = self.order.pop_front() {
                self.resident.remove(&victim);
            }
            self.insert(loaded);
        }
        // Either the victim or the rejected candidate leaves.
        self.stats.record_eviction(1, RemovalCause::Size);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resident.contains(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, key: String) {
        self.resident.insert(key.clone());
        self.order.push_back(key);
    }
}
