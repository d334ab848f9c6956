//! Static hash-path selection for sketch keys.
//!
//! Byte-like keys are hashed twice: [`hash_bytes`] feeds the doorkeeper and a
//! 31-multiplier polynomial gives the identity hash that picks counters.
//! Integer keys use their value as the identity hash and widen it with
//! [`hash_identity`] for the doorkeeper.

use super::mix::hash_identity;
use super::murmur::hash_bytes;

/// A key the frequency sketch can count.
pub trait SketchKey {
    /// 32-bit native hash; drives block and counter selection.
    fn identity_hash(&self) -> u32;

    /// 64-bit hash handed to the doorkeeper filter.
    fn doorkeeper_hash(&self) -> u64;
}

/// A key whose 64-bit hash the caller already computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prehashed(pub u64);

#[inline]
fn fold64(v: u64) -> u32 {
    (v ^ (v >> 32)) as u32
}

#[inline]
fn polynomial(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(1u32, |h, &b| h.wrapping_mul(31).wrapping_add(b as i8 as i32 as u32))
}

impl SketchKey for [u8] {
    fn identity_hash(&self) -> u32 {
        polynomial(self)
    }

    fn doorkeeper_hash(&self) -> u64 {
        hash_bytes(self)
    }
}

impl SketchKey for Vec<u8> {
    fn identity_hash(&self) -> u32 {
        self.as_slice().identity_hash()
    }

    fn doorkeeper_hash(&self) -> u64 {
        self.as_slice().doorkeeper_hash()
    }
}

impl SketchKey for str {
    fn identity_hash(&self) -> u32 {
        self.encode_utf16()
            .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
    }

    fn doorkeeper_hash(&self) -> u64 {
        hash_bytes(self.as_bytes())
    }
}

impl SketchKey for String {
    fn identity_hash(&self) -> u32 {
        self.as_str().identity_hash()
    }

    fn doorkeeper_hash(&self) -> u64 {
        self.as_str().doorkeeper_hash()
    }
}

impl SketchKey for Prehashed {
    fn identity_hash(&self) -> u32 {
        fold64(self.0)
    }

    fn doorkeeper_hash(&self) -> u64 {
        self.0
    }
}

macro_rules! impl_narrow_int_key {
    ($($t:ty),*) => {$(
        impl SketchKey for $t {
            #[inline]
            fn identity_hash(&self) -> u32 {
                *self as u32
            }

            #[inline]
            fn doorkeeper_hash(&self) -> u64 {
                hash_identity(self.identity_hash())
            }
        }
    )*};
}

macro_rules! impl_wide_int_key {
    ($($t:ty),*) => {$(
        impl SketchKey for $t {
            #[inline]
            fn identity_hash(&self) -> u32 {
                fold64(*self as u64)
            }

            #[inline]
            fn doorkeeper_hash(&self) -> u64 {
                hash_identity(self.identity_hash())
            }
        }
    )*};
}

impl_narrow_int_key!(u8, u16, u32, i8, i16, i32);
impl_wide_int_key!(u64, i64, usize, isize);

/// An absent key hashes to 0 on both paths.
impl<K: SketchKey> SketchKey for Option<K> {
    fn identity_hash(&self) -> u32 {
        self.as_ref().map_or(0, SketchKey::identity_hash)
    }

    fn doorkeeper_hash(&self) -> u64 {
        self.as_ref().map_or(0, SketchKey::doorkeeper_hash)
    }
}

impl<K: SketchKey + ?Sized> SketchKey for &K {
    #[inline]
    fn identity_hash(&self) -> u32 {
        (**self).identity_hash()
    }

    #[inline]
    fn doorkeeper_hash(&self) -> u64 {
        (**self).doorkeeper_hash()
    }
}
