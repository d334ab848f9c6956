// Error definitions for admission sizing.

/// Argument-validation failures; no state is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SketchError {
    #[error("maximum size must be non-negative, got {0}")]
    InvalidCapacity(i64),
    #[error("false positive probability must be in (0, 1), got {0}")]
    InvalidFalsePositiveProbability(f64),
}
