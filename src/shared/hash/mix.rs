// Package hash provides integer mixers and sizing helpers.

const SPREAD_MUL1: u32 = 0xed5a_d4bb;
const SPREAD_MUL2: u32 = 0xac4c_1b51;
const REHASH_MUL: u32 = 0x3184_8bab;

/// Supplemental three-round hash that defends against a poor identity hash.
/// Its output selects the counter block.
#[inline]
pub fn spread(mut x: u32) -> u32 {
    x ^= x >> 17;
    x = x.wrapping_mul(SPREAD_MUL1);
    x ^= x >> 11;
    x = x.wrapping_mul(SPREAD_MUL2);
    x ^= x >> 15;
    x
}

/// One more multiply-xor round; each byte of the result picks one counter.
#[inline]
pub fn rehash(mut x: u32) -> u32 {
    x = x.wrapping_mul(REHASH_MUL);
    x ^= x >> 14;
    x
}

/// SplitMix64 finalizer (public-domain; Steele et al.).
pub fn mix64(x: u64) -> u64 {
    const SPLITMIX64_INCREMENT: u64 = 0x9E3779B97F4A7C15;
    const SPLITMIX64_MUL1: u64 = 0xBF58476D1CE4E5B9;
    const SPLITMIX64_MUL2: u64 = 0x94D049BB133111EB;

    let mut x = x.wrapping_add(SPLITMIX64_INCREMENT);
    x = (x ^ (x >> 30)).wrapping_mul(SPLITMIX64_MUL1);
    x = (x ^ (x >> 27)).wrapping_mul(SPLITMIX64_MUL2);
    x ^ (x >> 31)
}

/// Widens a 32-bit identity hash into a doorkeeper hash.
#[inline]
pub fn hash_identity(identity: u32) -> u64 {
    mix64(identity as u64)
}

/// Returns the smallest power-of-two >= x (1 for x <= 1).
pub fn ceiling_power_of_two(x: usize) -> usize {
    if x <= 1 {
        return 1;
    }
    1usize << (usize::BITS - (x - 1).leading_zeros())
}
