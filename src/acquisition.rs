//! Acquisition policies: turning predictions into a choice.
//!
//! A policy reduces each candidate's prediction to a scalar preference and
//! selects the argmax. Two variants:
//!
//! - [`AcquisitionPolicy::MaxMean`]: highest predicted mean, uncertainty
//!   ignored. The base policy, and the delegate whenever predictions carry
//!   no uncertainty column (the fallback path).
//! - [`AcquisitionPolicy::ExpectedImprovement`]: closed-form expected
//!   improvement under a Gaussian predictive distribution, trading off
//!   exploitation (high mean) against exploration (high uncertainty).
//!
//! Ties break to the lowest index, deterministically.
//!
//! # References
//!
//! Snoek, Larochelle & Adams (2012). Practical Bayesian Optimization of
//! Machine Learning Algorithms. `NeurIPS`.

use serde::{Deserialize, Serialize};

use crate::error::{AfinarError, Result};
use crate::stats::{normal_cdf, normal_pdf};
use crate::surrogate::Prediction;

/// Candidate selection rule over predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AcquisitionPolicy {
    /// Pick the highest predicted mean.
    #[default]
    MaxMean,
    /// Pick the highest expected improvement over the best observed score.
    ExpectedImprovement,
}

impl AcquisitionPolicy {
    /// Index of the preferred candidate.
    ///
    /// `best_y` is the best score observed so far; `MaxMean` ignores it.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::EmptyCandidates`] if `predictions` is empty.
    pub fn select(&self, predictions: &Prediction, best_y: f64) -> Result<usize> {
        Ok(self.select_top(predictions, best_y, 1)?[0])
    }

    /// Indices of the `k` most preferred candidates, best first.
    ///
    /// Returns fewer than `k` indices when fewer candidates exist. The
    /// ranking is stable: equal scores keep their original order.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::EmptyCandidates`] if `predictions` is empty.
    pub fn select_top(&self, predictions: &Prediction, best_y: f64, k: usize) -> Result<Vec<usize>> {
        if predictions.is_empty() || k == 0 {
            return Err(AfinarError::EmptyCandidates);
        }
        let scores = self.scores(predictions, best_y);

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // stable sort keeps first occurrence ahead on ties; NaN sinks to the end
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or_else(|| scores[a].is_nan().cmp(&scores[b].is_nan()))
        });
        order.truncate(k.min(scores.len()));
        Ok(order)
    }

    /// One preference score per candidate; higher is better.
    ///
    /// Predictions without an uncertainty column reduce both policies to
    /// max-score selection; under fallback there is nothing richer to rank.
    #[must_use]
    pub fn scores(&self, predictions: &Prediction, best_y: f64) -> Vec<f64> {
        match (self, predictions) {
            (_, Prediction::Scores(scores)) => scores.clone(),
            (AcquisitionPolicy::MaxMean, Prediction::MeanStd(pairs)) => {
                pairs.iter().map(|(mean, _)| *mean).collect()
            }
            (AcquisitionPolicy::ExpectedImprovement, Prediction::MeanStd(pairs)) => pairs
                .iter()
                .map(|(mean, stdev)| expected_improvement(*mean, *stdev, best_y))
                .collect(),
        }
    }
}

/// Closed-form expected improvement, oriented for maximization.
///
/// ```text
/// z  = (μ - best) / σ
/// EI = σ · (z·Φ(z) + φ(z))
/// ```
///
/// A candidate with zero (or negative, from numerical noise) standard
/// deviation has no improvement potential beyond its mean: EI is defined as
/// 0 rather than propagating a division by zero.
///
/// # Examples
///
/// ```
/// use afinar::acquisition::expected_improvement;
///
/// // no uncertainty, no expected improvement
/// assert_eq!(expected_improvement(10.0, 0.0, 0.5), 0.0);
///
/// // a candidate matching the best score still has upside from uncertainty
/// let ei = expected_improvement(0.5, 0.2, 0.5);
/// assert!(ei > 0.0);
/// ```
#[must_use]
pub fn expected_improvement(mean: f64, stdev: f64, best_y: f64) -> f64 {
    if stdev <= 0.0 {
        return 0.0;
    }
    let z = (mean - best_y) / stdev;
    if !z.is_finite() {
        // stdev underflowed relative to the gap; the Gaussian collapses to
        // its mean and EI degenerates to the plain improvement
        return (mean - best_y).max(0.0);
    }
    stdev * (z * normal_cdf(z) + normal_pdf(z))
}
