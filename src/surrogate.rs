//! Surrogate model seam and the adapter that gates it.
//!
//! The regression engine is consumed through the [`SurrogateModel`] /
//! [`FittedSurrogate`] trait pair: anything with a `fit(X, y)` /
//! `predict(X) -> (mean, stdev)` contract plugs in. The crate ships
//! [`crate::gp::GaussianProcess`] as the default engine.
//!
//! [`SurrogateAdapter`] decides whether the engine can be trusted at all.
//! Below `r_minimum` observations it never touches the engine, since fitting
//! a regression on one or two points is numerically unstable and
//! statistically meaningless, and routes predictions through the uniform fallback
//! selector. That is a defined degraded mode, not an error.

use tracing::{debug, info};

use crate::error::Result;
use crate::uniform::FallbackSelector;

/// A surrogate regression engine, before fitting.
pub trait SurrogateModel {
    /// The immutable trained snapshot produced by [`fit`](Self::fit).
    type Fitted: FittedSurrogate;

    /// Fit the engine to observations, returning a trained snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error on shape mismatches or numerical failure.
    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Self::Fitted>;
}

/// A trained surrogate snapshot.
pub trait FittedSurrogate {
    /// Predict `(mean, stdev)` per candidate. `stdev` is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if a candidate's dimensionality does not match the
    /// training data.
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<(f64, f64)>>;
}

/// Candidate predictions, in one of two shapes.
///
/// The trained surrogate path produces means with uncertainty; the fallback
/// path produces bare scores with no uncertainty column. Acquisition
/// policies branch on the shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Equal-priority fallback scores, one per candidate.
    Scores(Vec<f64>),
    /// `(mean, stdev)` per candidate from a trained surrogate.
    MeanStd(Vec<(f64, f64)>),
}

impl Prediction {
    /// Number of candidates covered.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Prediction::Scores(s) => s.len(),
            Prediction::MeanStd(p) => p.len(),
        }
    }

    /// True if no candidates are covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if an uncertainty column is present.
    #[must_use]
    pub fn has_uncertainty(&self) -> bool {
        matches!(self, Prediction::MeanStd(_))
    }
}

/// Result of fitting through the adapter: either a trusted snapshot or the
/// deficient marker that forces fallback selection.
#[derive(Debug, Clone)]
pub enum SurrogateFit<F> {
    /// Too few observations; the engine was not invoked.
    Deficient {
        /// Observation count at fit time.
        n_observations: usize,
    },
    /// Trained snapshot, ready for predictions.
    Trained(F),
}

impl<F> SurrogateFit<F> {
    /// True if the surrogate path is available.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        matches!(self, SurrogateFit::Trained(_))
    }
}

/// Gates the surrogate engine behind a minimum observation count.
#[derive(Debug, Clone)]
pub struct SurrogateAdapter<M> {
    model: M,
    r_minimum: usize,
}

impl<M: SurrogateModel> SurrogateAdapter<M> {
    /// Wrap a surrogate engine with the default `r_minimum` of 2.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            r_minimum: 2,
        }
    }

    /// Set the minimum observation count before the engine is trusted.
    #[must_use]
    pub fn with_r_minimum(mut self, r_minimum: usize) -> Self {
        self.r_minimum = r_minimum;
        self
    }

    /// Minimum observation count before the engine is trusted.
    #[must_use]
    pub fn r_minimum(&self) -> usize {
        self.r_minimum
    }

    /// Fit on the observation history.
    ///
    /// Below `r_minimum` observations the engine is skipped entirely and the
    /// deficient state is returned; otherwise the engine fits and its
    /// snapshot is returned.
    ///
    /// # Errors
    ///
    /// Propagates engine failures (shape mismatch, singular kernel matrix).
    pub fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<SurrogateFit<M::Fitted>> {
        if x.len() < self.r_minimum {
            debug!(
                n_observations = x.len(),
                r_minimum = self.r_minimum,
                "skipping surrogate fit"
            );
            return Ok(SurrogateFit::Deficient {
                n_observations: x.len(),
            });
        }
        Ok(SurrogateFit::Trained(self.model.fit(x, y)?))
    }

    /// Predict candidate scores through the snapshot, or through the
    /// fallback selector when the snapshot is deficient.
    ///
    /// # Errors
    ///
    /// Propagates snapshot prediction failures. The deficient path never
    /// errors.
    pub fn predict<F: FallbackSelector>(
        &self,
        fit: &SurrogateFit<M::Fitted>,
        x: &[Vec<f64>],
        fallback: &mut F,
    ) -> Result<Prediction> {
        match fit {
            SurrogateFit::Deficient { n_observations } => {
                info!(
                    n_observations,
                    r_minimum = self.r_minimum,
                    "observation count below r_minimum; scoring candidates with the uniform fallback"
                );
                Ok(Prediction::Scores(fallback.predict(x.len())))
            }
            SurrogateFit::Trained(snapshot) => Ok(Prediction::MeanStd(snapshot.predict(x)?)),
        }
    }
}
