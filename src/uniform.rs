//! Uniform fallback selection.
//!
//! When the surrogate cannot be trusted (too few observations, or the
//! exploration modulator decides to escape a plateau) candidate scoring
//! degrades to equal-priority random scores. Selecting the argmax of such
//! scores is equivalent to picking a candidate uniformly at random.

use crate::rng::Rng;

/// A selector that can score candidates without a trained model.
///
/// The contract is deliberately thin: one score per candidate, with no
/// uncertainty attached. Scores carry no meaning beyond their ordering,
/// which is random for the default implementation.
pub trait FallbackSelector {
    /// Produce one score per candidate for `n` candidates.
    fn predict(&mut self, n: usize) -> Vec<f64>;
}

/// Scores every candidate with an independent uniform draw in [0, 1).
///
/// # Examples
///
/// ```
/// use afinar::uniform::{FallbackSelector, UniformSelector};
///
/// let mut uniform = UniformSelector::with_seed(42);
/// let scores = uniform.predict(8);
/// assert_eq!(scores.len(), 8);
/// assert!(scores.iter().all(|s| (0.0..1.0).contains(s)));
/// ```
#[derive(Debug, Clone)]
pub struct UniformSelector {
    rng: crate::rng::XorShift64,
}

impl UniformSelector {
    /// Create a uniform selector with a fixed seed for reproducibility.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: crate::rng::XorShift64::new(seed),
        }
    }
}

impl FallbackSelector for UniformSelector {
    fn predict(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.rng.gen_f64()).collect()
    }
}
