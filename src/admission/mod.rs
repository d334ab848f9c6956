//! TinyLFU admission control: frequency sketch, doorkeeper and admitter.

pub mod admission;
pub mod door_keeper;
pub mod error;
pub mod frequency_sketch;
pub mod tiny_lfu;

#[cfg(test)]
mod tiny_lfu_test;

// Re-export main types
pub use admission::{new_admission, Admission};
pub use door_keeper::Doorkeeper;
pub use error::SketchError;
pub use frequency_sketch::FrequencySketch;
pub use tiny_lfu::TinyLfu;
