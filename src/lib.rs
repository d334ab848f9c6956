#[path = "shared/hash/mod.rs"]
pub mod hash;

pub mod admission;
pub mod config;
pub mod cost;
pub mod replay;
pub mod stats;

pub use admission::{new_admission, Admission, Doorkeeper, FrequencySketch, SketchError, TinyLfu};
pub use hash::{Prehashed, SketchKey};
