// Package replay provides the Zipf-like key generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws key ranks with probability proportional to 1 / (rank + 1)^skew.
pub struct ZipfTrace {
    /// Running sums of the unnormalized weights.
    cumulative: Vec<f64>,
    rng: StdRng,
}

impl ZipfTrace {
    /// A keyspace of `keys` ranks (at least one), seeded for repeatability.
    pub fn new(keys: usize, skew: f64, seed: u64) -> Self {
        let mut total = 0.0;
        let cumulative = (1..=keys.max(1))
            .map(|rank| {
                total += 1.0 / (rank as f64).powf(skew);
                total
            })
            .collect();
        Self {
            cumulative,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next rank in `[0, keys)`; rank 0 is the most popular.
    pub fn next_rank(&mut self) -> usize {
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        let u = self.rng.gen::<f64>() * total;
        self.cumulative
            .partition_point(|&c| c < u)
            .min(self.cumulative.len() - 1)
    }

    /// Cache key for a rank.
    pub fn key(rank: usize) -> String {
        format!("key-{rank}")
    }

    pub fn keys(&self) -> usize {
        self.cumulative.len()
    }
}

impl Iterator for ZipfTrace {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        Some(self.next_rank())
    }
}
