//! Doorkeeper (Bloom admission filter).
//

use std::f64::consts::LN_2;

use super::error::SketchError;

/// Doorkeeper is a classic bit-array Bloom filter placed in front of the
/// frequency sketch so that keys seen only once never reach the counters.
///
/// Not synchronized: mutation takes `&mut self` and callers provide any
/// locking (see [`TinyLfu`](super::tiny_lfu::TinyLfu)).
#[derive(Debug, Clone, Default)]
pub struct Doorkeeper {
    /// Packed bit-array (64 bits per word).
    bits: Vec<u64>,
    /// Logical bit count m; probes are taken modulo this value.
    num_bits: u64,
    /// Probe count k.
    num_hashes: u32,
    /// Insertion count the filter was sized for.
    expected_insertions: u64,
}

impl Doorkeeper {
    /// Creates an uninitialized filter; every probe misses until
    /// [`ensure_capacity`](Self::ensure_capacity) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter sized for `expected_insertions` at `fpp`.
    pub fn with_capacity(expected_insertions: u64, fpp: f64) -> Result<Self, SketchError> {
        let mut door = Self::new();
        door.ensure_capacity(expected_insertions, fpp)?;
        Ok(door)
    }

    /// Sizes the bit array for `expected_insertions` items at false-positive
    /// probability `fpp`, clearing all bits.
    ///
    /// Growth only: a request that does not exceed the current capacity is a
    /// no-op. Zero insertions are treated as one.
    pub fn ensure_capacity(&mut self, expected_insertions: u64, fpp: f64) -> Result<(), SketchError> {
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(SketchError::InvalidFalsePositiveProbability(fpp));
        }
        let n = expected_insertions.max(1);
        if !self.is_not_initialized() && n <= self.expected_insertions {
            return Ok(());
        }

        let num_bits = optimal_num_bits(n, fpp);
        let num_hashes = optimal_num_hashes(n, num_bits);
        let word_count = ((num_bits + 63) / 64) as usize;

        self.bits = vec![0u64; word_count];
        self.num_bits = num_bits;
        self.num_hashes = num_hashes;
        self.expected_insertions = n;
        Ok(())
    }

    pub fn is_not_initialized(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns true if all k probed bits are set. Never a false negative.
    pub fn might_contain(&self, hash: u64) -> bool {
        if self.is_not_initialized() {
            return false;
        }
        Probes::new(hash, self.num_bits, self.num_hashes).all(|i| self.get(i))
    }

    /// Sets the k probed bits.
    ///
    /// Returns true if any of them was previously unset, i.e. the key is
    /// newly observed. An uninitialized filter records nothing and also
    /// reports the key as new, so callers never count it.
    pub fn put(&mut self, hash: u64) -> bool {
        if self.is_not_initialized() {
            return true;
        }
        let mut added = false;
        for i in Probes::new(hash, self.num_bits, self.num_hashes) {
            added |= self.set(i);
        }
        added
    }

    /// Clears all bits, keeping the current sizing.
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    pub fn bit_size(&self) -> u64 {
        self.num_bits
    }

    pub fn hash_count(&self) -> u32 {
        self.num_hashes
    }

    pub fn expected_insertions(&self) -> u64 {
        self.expected_insertions
    }

    /// Maps a flat bit index to (wordIndex, bitMask) within bits.
    #[inline]
    fn word_bit(i: u64) -> (usize, u64) {
        ((i >> 6) as usize, 1u64 << (i & 63))
    }

    #[inline]
    fn get(&self, i: u64) -> bool {
        let (w, b) = Self::word_bit(i);
        self.bits[w] & b != 0
    }

    /// Sets a single bit; returns true if it was unset.
    #[inline]
    fn set(&mut self, i: u64) -> bool {
        let (w, b) = Self::word_bit(i);
        let was_unset = self.bits[w] & b == 0;
        self.bits[w] |= b;
        was_unset
    }
}

/// m = ceil(-n * ln(p) / ln(2)^2), at least 1.
fn optimal_num_bits(n: u64, fpp: f64) -> u64 {
    let bits = (-(n as f64) * fpp.ln() / (LN_2 * LN_2)).ceil();
    (bits as u64).max(1)
}

/// k = round(m / n * ln(2)), at least 1.
fn optimal_num_hashes(n: u64, num_bits: u64) -> u32 {
    let k = (num_bits as f64 / n as f64 * LN_2).round();
    (k as u32).max(1)
}

/// Double-hashing probe sequence: pos_i = (h1 + i * h2) mod m, with h2
/// bumped by one after every m probes.
struct Probes {
    h1: u64,
    h2: u64,
    num_bits: u64,
    i: u32,
    k: u32,
}

impl Probes {
    #[inline]
    fn new(hash: u64, num_bits: u64, k: u32) -> Self {
        Self {
            h1: hash & 0xFFFF_FFFF,
            h2: hash >> 32,
            num_bits,
            i: 0,
            k,
        }
    }
}

impl Iterator for Probes {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.i >= self.k {
            return None;
        }
        let i = self.i as u64;
        if i > 0 && i % self.num_bits == 0 {
            self.h2 = self.h2.wrapping_add(1);
        }
        self.i += 1;
        Some(self.h1.wrapping_add(i.wrapping_mul(self.h2)) % self.num_bits)
    }
}
