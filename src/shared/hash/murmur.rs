// Package hash provides the 64-bit byte-sequence hash.

use byteorder::{ByteOrder, LittleEndian};

/// Seed applied by [`hash_bytes`] and [`hash_str`].
pub const DEFAULT_SEED: i32 = 305_441_741;

const M: u64 = 0xc6a4_a793_5bd1_e995;
const R: u32 = 47;

/// MurmurHash64A over `data`.
///
/// Input is consumed in 8-byte little-endian chunks; a trailing partial
/// chunk is zero-padded into one more word. The seed is sign-extended, so
/// negative seeds hash the same as their 64-bit two's-complement value.
pub fn hash64(data: &[u8], seed: i32) -> u64 {
    let mut h = (seed as i64 as u64) ^ (data.len() as u64).wrapping_mul(M);

    let mut chunks = data.chunks_exact(8);
    for chunk in &mut chunks {
        let mut k = LittleEndian::read_u64(chunk);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        h ^= k;
        h = h.wrapping_mul(M);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut buf = [0u8; 8];
        buf[..tail.len()].copy_from_slice(tail);
        h ^= LittleEndian::read_u64(&buf);
        h = h.wrapping_mul(M);
    }

    h ^= h >> R;
    h = h.wrapping_mul(M);
    h ^= h >> R;
    h
}

/// Hashes raw bytes with [`DEFAULT_SEED`].
#[inline]
pub fn hash_bytes(data: &[u8]) -> u64 {
    hash64(data, DEFAULT_SEED)
}

/// Hashes the UTF-8 encoding of `s` with [`DEFAULT_SEED`].
#[inline]
pub fn hash_str(s: &str) -> u64 {
    hash_bytes(s.as_bytes())
}

/// Like [`hash_str`], but an absent key hashes to 0.
#[inline]
pub fn hash_opt_str(s: Option<&str>) -> u64 {
    s.map_or(0, hash_str)
}
