//! Retrieval-quality scoring.

pub mod evaluator;

pub use self::evaluator::{PrecisionRecallCurve, evaluate};

/// Default evaluation cutoff depths.
pub const DEFAULT_K_VALUES: &[usize] = &[2, 4, 6, 8, 10];
