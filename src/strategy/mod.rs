//! Evaluation Strategies
//!
//! Batch evaluation on top of the single-path evaluator:
//! - parallel: Rayon-based evaluation of many paths or many contexts

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(feature = "parallel")]
pub use parallel::{evaluate_each, evaluate_parallel, xmap};
