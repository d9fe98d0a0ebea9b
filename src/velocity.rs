//! Exploration modulation from the score trajectory.
//!
//! When the best observed scores cluster tightly, the search has stalled on
//! a plateau and surrogate-guided selection will keep proposing near the
//! incumbent. The modulator measures the "velocity" of the top scores (the
//! mean gap between adjacent ranked scores) and converts it into a
//! probability of uniform selection (POU):
//!
//! ```text
//! POU = exp(multiplier · mean_velocity)      multiplier < 0
//! ```
//!
//! Tightly clustered top scores (velocity near zero) push POU toward 1,
//! injecting pure random exploration to escape the plateau; scores that are
//! still spreading out push POU toward 0, trusting the surrogate.

use tracing::debug;

use crate::rng::Rng;

/// Computes and holds the probability of uniform selection.
///
/// # Examples
///
/// ```
/// use afinar::velocity::ExplorationModulator;
///
/// let mut modulator = ExplorationModulator::new();
/// modulator.refresh(&[0.10, 0.12, 0.50, 0.51, 0.90], 2);
/// let pou = modulator.pou();
/// assert!((0.0..=1.0).contains(&pou));
/// ```
#[derive(Debug, Clone)]
pub struct ExplorationModulator {
    n_best_y: usize,
    multiplier: f64,
    pou: f64,
}

impl ExplorationModulator {
    /// Create a modulator with the defaults: top 5 scores, multiplier -100.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_best_y: 5,
            multiplier: -100.0,
            pou: 0.0,
        }
    }

    /// Set how many top scores enter the velocity computation.
    #[must_use]
    pub fn with_n_best_y(mut self, n_best_y: usize) -> Self {
        self.n_best_y = n_best_y;
        self
    }

    /// Set the (negative) exponent multiplier.
    ///
    /// Magic number; modify with care. More negative values make the
    /// modulator quicker to trust the surrogate for a given velocity.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Current probability of uniform selection, in [0, 1].
    #[must_use]
    pub fn pou(&self) -> f64 {
        self.pou
    }

    /// Recompute POU from the full score history.
    ///
    /// With fewer than `r_minimum` observations POU stays 0: the tuner is
    /// already in degraded mode and needs no extra randomization layer. A
    /// single-element top set leaves POU at 0 as well, since no velocity is
    /// defined between fewer than two scores.
    pub fn refresh(&mut self, y: &[f64], r_minimum: usize) {
        self.pou = 0.0;
        if y.len() < r_minimum {
            return;
        }

        let mut sorted = y.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let top = &sorted[sorted.len().saturating_sub(self.n_best_y)..];
        if top.len() < 2 {
            return;
        }

        let mean_velocity =
            top.windows(2).map(|w| w[1] - w[0]).sum::<f64>() / (top.len() - 1) as f64;
        self.pou = (self.multiplier * mean_velocity).exp().clamp(0.0, 1.0);
        debug!(pou = self.pou, mean_velocity, "exploration probability refreshed");
    }

    /// Decide whether the next prediction should bypass the surrogate.
    ///
    /// Draws once from the injected random source and compares against POU,
    /// so tests can script the outcome.
    pub fn should_explore(&self, rng: &mut impl Rng) -> bool {
        rng.gen_f64() < self.pou
    }
}

impl Default for ExplorationModulator {
    fn default() -> Self {
        Self::new()
    }
}
