//! TinyLFU frequency sketch: a 4-bit Count-Min Sketch with periodic aging.
//!
//! The counter matrix is a single array of `u64` words holding 16 nibble
//! counters each. Depth is fixed at four. The array length equals the cache's
//! maximum size rounded up to a power of two, which gives the four rows a
//! combined width of four times the length.
//!
//! An item's four counters are confined to one 8-word (64-byte) block, the
//! size of an L1 cache line. Blocks are selected uniformly and each counter
//! comes from a distinct 16-byte pair of words inside the block, so a lookup
//! usually costs a single memory access.
//!
//! Aging halves every counter once `sample_size` accepted increments have
//! been observed, letting recent popularity dominate.
//!
//! A [`Doorkeeper`] sits in front of the table: the first sighting of a key
//! only sets filter bits, and `frequency` adds one back for any key the
//! filter knows.

use tracing::{debug, trace};

use crate::hash::{ceiling_power_of_two, rehash, spread, SketchKey};

use super::door_keeper::Doorkeeper;
use super::error::SketchError;

const RESET_MASK: u64 = 0x7777_7777_7777_7777;
const ONE_MASK: u64 = 0x1111_1111_1111_1111;
const NIBBLE_MASK: u64 = 0xF;

/// Largest capacity the table is sized for.
pub const MAX_CAPACITY: usize = (i32::MAX as usize) >> 1;
pub const MIN_TABLE_LEN: usize = 8;
pub const SAMPLE_MULTIPLIER: i32 = 10;
/// Target false-positive rate of the doorkeeper.
pub const DOORKEEPER_FPP: f64 = 0.02;

/// Sample size used when the computed window overflows; never reached.
const UNBOUNDED_SAMPLE: u32 = u32::MAX;

/// Sketch is lazily initialized: it counts nothing until
/// [`ensure_capacity`](Self::ensure_capacity) has been called.
///
/// Not synchronized. Mutating methods take `&mut self`; share it behind a
/// lock such as [`TinyLfu`](super::tiny_lfu::TinyLfu).
#[derive(Debug, Default)]
pub struct FrequencySketch {
    state: Option<Counters>,
}

/// Initialized sketch state.
#[derive(Debug)]
struct Counters {
    /// 16 packed 4-bit counters per word; length is a power of two >= 8.
    table: Vec<u64>,
    /// (table.len() / 8) - 1; selects an aligned 8-word block.
    block_mask: u32,
    /// Accepted increments that trigger aging.
    sample_size: u32,
    /// Accepted increments since the last aging pass.
    size: u32,
    door_keeper: Doorkeeper,
}

impl FrequencySketch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes and grows the sketch so it can estimate popularity for a
    /// cache holding up to `maximum_size` entries.
    ///
    /// Growing forgets all previous counts. A request the current table
    /// already covers is a no-op, so the sketch never shrinks.
    pub fn ensure_capacity(&mut self, maximum_size: i64) -> Result<(), SketchError> {
        if maximum_size < 0 {
            return Err(SketchError::InvalidCapacity(maximum_size));
        }
        let maximum = (maximum_size as u64).min(MAX_CAPACITY as u64) as usize;
        if let Some(state) = &self.state {
            if state.table.len() >= maximum {
                return Ok(());
            }
        }

        let door_keeper = Doorkeeper::with_capacity(maximum as u64, DOORKEEPER_FPP)?;
        let len = ceiling_power_of_two(maximum).max(MIN_TABLE_LEN);
        let sample_size = sample_size_for(maximum_size, maximum);

        debug!(
            component = "frequency_sketch",
            event = "resized",
            maximum_size,
            table_len = len,
            sample_size,
            doorkeeper_bits = door_keeper.bit_size(),
            doorkeeper_hashes = door_keeper.hash_count(),
            "frequency sketch resized"
        );

        self.state = Some(Counters {
            table: vec![0u64; len],
            block_mask: ((len >> 3) - 1) as u32,
            sample_size,
            size: 0,
            door_keeper,
        });
        Ok(())
    }

    /// Returns true until [`ensure_capacity`](Self::ensure_capacity) succeeds.
    pub fn is_not_initialized(&self) -> bool {
        self.state.is_none()
    }

    /// Estimated number of occurrences of `key`, in `[0, 16]`.
    ///
    /// Zero means the doorkeeper has never seen the key. Otherwise this is
    /// the minimum of the key's four counters plus one for the sighting the
    /// doorkeeper absorbed.
    pub fn frequency<K: SketchKey + ?Sized>(&self, key: &K) -> u8 {
        let Some(state) = &self.state else {
            return 0;
        };
        if !state.door_keeper.might_contain(key.doorkeeper_hash()) {
            return 0;
        }

        let min = counter_slots(key.identity_hash(), state.block_mask)
            .iter()
            .map(|&(word, index)| nibble(state.table[word], index))
            .fold(NIBBLE_MASK as u8, u8::min);
        min + 1
    }

    /// Records one access of `key`.
    ///
    /// The first sighting only marks the doorkeeper. Later sightings
    /// increment the four counters, each saturating at 15. Once
    /// `sample_size` increments have changed at least one counter, all
    /// counters are halved.
    pub fn increment<K: SketchKey + ?Sized>(&mut self, key: &K) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.door_keeper.put(key.doorkeeper_hash()) {
            return;
        }

        let mut added = false;
        for (word, index) in counter_slots(key.identity_hash(), state.block_mask) {
            added |= increment_at(&mut state.table[word], index);
        }

        if added {
            state.size += 1;
            if state.size == state.sample_size {
                state.reset();
            }
        }
    }

    /// Forces an aging pass now.
    pub fn reset(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.reset();
        }
    }

    /// Table length in words; 0 before initialization.
    pub fn table_len(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.table.len())
    }

    pub fn sample_size(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.sample_size)
    }

    /// Accepted increments since the last aging pass.
    pub fn size(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.size)
    }

    #[cfg(test)]
    pub(crate) fn table(&self) -> &[u64] {
        self.state.as_ref().map_or(&[][..], |s| s.table.as_slice())
    }

    #[cfg(test)]
    pub(crate) fn counters_of<K: SketchKey + ?Sized>(&self, key: &K) -> [u8; 4] {
        let mut out = [0u8; 4];
        if let Some(state) = &self.state {
            let slots = counter_slots(key.identity_hash(), state.block_mask);
            for (o, (word, index)) in out.iter_mut().zip(slots) {
                *o = nibble(state.table[word], index);
            }
        }
        out
    }
}

impl Counters {
    /// Halves every counter and approximates the halved running size from
    /// the number of odd counters, in one pass over the table.
    fn reset(&mut self) {
        let mut odd: u64 = 0;
        for word in &mut self.table {
            odd += (*word & ONE_MASK).count_ones() as u64;
            *word = (*word >> 1) & RESET_MASK;
        }
        let before = self.size;
        let dropped = u32::try_from(odd >> 2).unwrap_or(u32::MAX);
        self.size = self.size.saturating_sub(dropped) >> 1;

        trace!(
            component = "frequency_sketch",
            event = "aged",
            size_before = before,
            size_after = self.size,
            odd_counters = odd,
            "frequency sketch aged"
        );
    }
}

/// Aging window for a cache of `maximum_size` entries clamped to `maximum`.
/// An overflowed window is treated as unbounded.
pub(crate) fn sample_size_for(maximum_size: i64, maximum: usize) -> u32 {
    if maximum_size == 0 {
        return SAMPLE_MULTIPLIER as u32;
    }
    i32::try_from(maximum)
        .ok()
        .and_then(|m| m.checked_mul(SAMPLE_MULTIPLIER))
        .map_or(UNBOUNDED_SAMPLE, |s| s.max(1) as u32)
}

/// Returns the four (word index, nibble index) pairs for an identity hash.
#[inline]
fn counter_slots(identity: u32, block_mask: u32) -> [(usize, u32); 4] {
    let block_hash = spread(identity);
    let counter_hash = rehash(block_hash);
    let block = ((block_hash & block_mask) as usize) << 3;

    let mut slots = [(0usize, 0u32); 4];
    for (i, slot) in slots.iter_mut().enumerate() {
        let h = counter_hash >> (i << 3);
        let index = (h >> 1) & 15;
        let offset = (h & 1) as usize;
        *slot = (block + offset + (i << 1), index);
    }
    slots
}

#[inline]
fn nibble(word: u64, index: u32) -> u8 {
    ((word >> (index << 2)) & NIBBLE_MASK) as u8
}

/// Increments nibble `index` of `word` unless it is already 15.
#[inline]
fn increment_at(word: &mut u64, index: u32) -> bool {
    let offset = index << 2;
    let mask = NIBBLE_MASK << offset;
    if *word & mask != mask {
        *word += 1u64 << offset;
        return true;
    }
    false
}
