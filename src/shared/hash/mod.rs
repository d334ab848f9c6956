//! Mixing hashes used by the frequency sketch and its doorkeeper.
//!
//! Everything here is a pure function over fixed-width integers. All
//! arithmetic wraps.

pub mod key;
pub mod mix;
pub mod murmur;


pub use key::{Prehashed, SketchKey};
pub use mix::{ceiling_power_of_two, hash_identity, mix64, rehash, spread};
pub use murmur::{hash64, hash_bytes, hash_opt_str, hash_str, DEFAULT_SEED};
