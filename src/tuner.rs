//! The tuner facade: `fit` / `predict` / `propose`.
//!
//! [`GpTuner`] owns the observation history, the surrogate adapter, the
//! fallback selector and the exploration coin-flip source, and orchestrates
//! them into the sequential-decision loop:
//!
//! ```text
//! fit(X, y)            replace history, refit surrogate, refresh POU
//! propose(gen, n)      draw candidates -> predict -> acquisition top-n
//! ```
//!
//! The four tuner flavors of classical GP tuning map onto configuration
//! rather than subclasses:
//!
//! | constructor                | acquisition          | kernel       | POU |
//! |----------------------------|----------------------|--------------|-----|
//! | [`GpTuner::new`]           | max mean             | sq. exp.     | no  |
//! | [`GpTuner::ei`]            | expected improvement | sq. exp.     | no  |
//! | [`GpTuner::matern52_ei`]   | expected improvement | Matérn 5/2   | no  |
//! | [`GpTuner::ei_velocity`]   | expected improvement | sq. exp.     | yes |

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::acquisition::AcquisitionPolicy;
use crate::error::{AfinarError, Result};
use crate::gp::{GaussianProcess, Kernel};
use crate::rng::{Rng, XorShift64};
use crate::surrogate::{Prediction, SurrogateAdapter, SurrogateFit, SurrogateModel};
use crate::uniform::{FallbackSelector, UniformSelector};
use crate::velocity::ExplorationModulator;

/// Produces candidate configuration vectors for `propose` to score.
///
/// Candidate encoding is the caller's concern; the tuner only requires that
/// every generated vector matches the dimensionality of the fitted history.
pub trait CandidateGenerator {
    /// Generate up to `n` candidate vectors.
    fn generate(&mut self, n: usize) -> Vec<Vec<f64>>;
}

/// Samples candidates uniformly within per-dimension bounds.
///
/// # Examples
///
/// ```
/// use afinar::tuner::{BoundsGenerator, CandidateGenerator};
///
/// let mut generator = BoundsGenerator::new(vec![(0.0, 1.0), (-5.0, 5.0)]).with_seed(7);
/// let candidates = generator.generate(3);
/// assert_eq!(candidates.len(), 3);
/// assert!(candidates.iter().all(|c| (0.0..1.0).contains(&c[0])));
/// ```
#[derive(Debug, Clone)]
pub struct BoundsGenerator {
    bounds: Vec<(f64, f64)>,
    rng: XorShift64,
}

impl BoundsGenerator {
    /// Create a generator over `(low, high)` bounds, one pair per dimension.
    #[must_use]
    pub fn new(bounds: Vec<(f64, f64)>) -> Self {
        Self {
            bounds,
            rng: XorShift64::new(42),
        }
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = XorShift64::new(seed);
        self
    }
}

impl CandidateGenerator for BoundsGenerator {
    fn generate(&mut self, n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|_| {
                self.bounds
                    .iter()
                    .map(|&(low, high)| self.rng.gen_f64_range(low, high))
                    .collect()
            })
            .collect()
    }
}

/// Tuner configuration, immutable per instance once fitting starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunerConfig {
    /// Minimum observations before the surrogate is trusted.
    pub r_minimum: usize,
    /// How many top scores enter the velocity computation.
    pub n_best_y: usize,
    /// Negative exponent multiplier for the POU formula.
    pub multiplier: f64,
    /// Covariance kernel for the default Gaussian process engine.
    pub kernel: Kernel,
    /// Observation noise variance on the kernel diagonal.
    pub noise_variance: f64,
    /// Candidate pool size drawn per `propose` call.
    pub n_candidates: usize,
    /// Selection rule over predictions.
    pub acquisition: AcquisitionPolicy,
    /// Whether the exploration modulator participates in `predict`.
    pub velocity: bool,
    /// Seed for the coin-flip and fallback random sources.
    pub seed: u64,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            r_minimum: 2,
            n_best_y: 5,
            multiplier: -100.0,
            kernel: Kernel::SquaredExponential,
            noise_variance: 1e-6,
            n_candidates: 1000,
            acquisition: AcquisitionPolicy::MaxMean,
            velocity: false,
            seed: 42,
        }
    }
}

impl TunerConfig {
    /// Check every field against its constraint.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::InvalidHyperparameter`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        if self.r_minimum < 1 {
            return Err(invalid("r_minimum", self.r_minimum.to_string(), ">= 1"));
        }
        if self.n_best_y < 2 {
            return Err(invalid("n_best_y", self.n_best_y.to_string(), ">= 2"));
        }
        if !(self.multiplier.is_finite() && self.multiplier < 0.0) {
            return Err(invalid(
                "multiplier",
                self.multiplier.to_string(),
                "finite and < 0",
            ));
        }
        if !(self.noise_variance.is_finite() && self.noise_variance > 0.0) {
            return Err(invalid(
                "noise_variance",
                self.noise_variance.to_string(),
                "finite and > 0",
            ));
        }
        if self.n_candidates < 1 {
            return Err(invalid(
                "n_candidates",
                self.n_candidates.to_string(),
                ">= 1",
            ));
        }
        Ok(())
    }
}

fn invalid(param: &str, value: String, constraint: &str) -> AfinarError {
    AfinarError::InvalidHyperparameter {
        param: param.to_string(),
        value,
        constraint: constraint.to_string(),
    }
}

/// Fitted observation history, replaced wholesale on each `fit`.
#[derive(Debug, Clone)]
struct Observations {
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
    dim: usize,
    best_y: f64,
}

/// Sequential model-based tuner.
///
/// Generic over the surrogate engine `M` and the fallback selector `F`; the
/// defaults wire in the crate's Gaussian process and uniform selector.
///
/// # Examples
///
/// ```
/// use afinar::prelude::*;
///
/// let x = vec![vec![1.0], vec![2.0], vec![3.0]];
/// let y = vec![0.1, 0.5, 0.9];
///
/// let mut tuner = GpTuner::ei();
/// tuner.fit(&x, &y).unwrap();
///
/// let mut generator = BoundsGenerator::new(vec![(0.0, 4.0)]).with_seed(7);
/// let next = tuner.propose(&mut generator, 1).unwrap();
/// assert_eq!(next.len(), 1);
/// assert!((0.0..=4.0).contains(&next[0][0]));
/// ```
#[derive(Debug)]
pub struct GpTuner<M: SurrogateModel = GaussianProcess, F = UniformSelector> {
    config: TunerConfig,
    adapter: SurrogateAdapter<M>,
    modulator: ExplorationModulator,
    fallback: F,
    rng: XorShift64,
    observations: Option<Observations>,
    state: Option<SurrogateFit<M::Fitted>>,
}

impl GpTuner<GaussianProcess, UniformSelector> {
    /// Max-mean tuner with the default squared exponential kernel.
    #[must_use]
    pub fn new() -> Self {
        Self::from_default_engine(TunerConfig::default())
    }

    /// Expected improvement tuner.
    #[must_use]
    pub fn ei() -> Self {
        Self::from_default_engine(TunerConfig {
            acquisition: AcquisitionPolicy::ExpectedImprovement,
            ..TunerConfig::default()
        })
    }

    /// Expected improvement tuner with a Matérn 5/2 kernel.
    #[must_use]
    pub fn matern52_ei() -> Self {
        Self::from_default_engine(TunerConfig {
            acquisition: AcquisitionPolicy::ExpectedImprovement,
            kernel: Kernel::Matern52,
            ..TunerConfig::default()
        })
    }

    /// Expected improvement tuner with velocity-based exploration.
    #[must_use]
    pub fn ei_velocity() -> Self {
        Self::from_default_engine(TunerConfig {
            acquisition: AcquisitionPolicy::ExpectedImprovement,
            velocity: true,
            ..TunerConfig::default()
        })
    }

    /// Build a tuner from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::InvalidHyperparameter`] for out-of-range
    /// configuration values.
    pub fn with_config(config: TunerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_default_engine(config))
    }

    fn from_default_engine(config: TunerConfig) -> Self {
        let model = GaussianProcess::new()
            .with_kernel(config.kernel)
            .with_noise_variance(config.noise_variance);
        let fallback = UniformSelector::with_seed(config.seed);
        Self::from_parts_with_config(model, fallback, config)
    }

    /// Set the covariance kernel. Intended for use before the first `fit`.
    #[must_use]
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.config.kernel = kernel;
        self.rebuild_model();
        self
    }

    /// Set the observation noise variance of the default engine.
    #[must_use]
    pub fn with_noise_variance(mut self, noise_variance: f64) -> Self {
        self.config.noise_variance = noise_variance;
        self.rebuild_model();
        self
    }

    fn rebuild_model(&mut self) {
        let model = GaussianProcess::new()
            .with_kernel(self.config.kernel)
            .with_noise_variance(self.config.noise_variance);
        self.adapter = SurrogateAdapter::new(model).with_r_minimum(self.config.r_minimum);
        self.state = None;
    }
}

impl Default for GpTuner<GaussianProcess, UniformSelector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: SurrogateModel, F: FallbackSelector> GpTuner<M, F> {
    /// Assemble a tuner from an explicit engine and fallback selector.
    ///
    /// The seam for plugging in a custom regression engine or a scripted
    /// fallback in tests.
    #[must_use]
    pub fn from_parts(model: M, fallback: F) -> Self {
        Self::from_parts_with_config(model, fallback, TunerConfig::default())
    }

    fn from_parts_with_config(model: M, fallback: F, config: TunerConfig) -> Self {
        let adapter = SurrogateAdapter::new(model).with_r_minimum(config.r_minimum);
        let modulator = ExplorationModulator::new()
            .with_n_best_y(config.n_best_y)
            .with_multiplier(config.multiplier);
        // distinct stream from the fallback selector's
        let rng = XorShift64::new(config.seed ^ 0x9E37_79B9_7F4A_7C15);
        Self {
            config,
            adapter,
            modulator,
            fallback,
            rng,
            observations: None,
            state: None,
        }
    }

    /// Set the minimum observation count before the surrogate is trusted.
    #[must_use]
    pub fn with_r_minimum(mut self, r_minimum: usize) -> Self {
        self.config.r_minimum = r_minimum;
        self.adapter = self.adapter.with_r_minimum(r_minimum);
        self
    }

    /// Set the acquisition policy.
    #[must_use]
    pub fn with_acquisition(mut self, acquisition: AcquisitionPolicy) -> Self {
        self.config.acquisition = acquisition;
        self
    }

    /// Enable or disable velocity-based exploration.
    #[must_use]
    pub fn with_velocity(mut self, velocity: bool) -> Self {
        self.config.velocity = velocity;
        self
    }

    /// Set how many top scores enter the velocity computation.
    #[must_use]
    pub fn with_n_best_y(mut self, n_best_y: usize) -> Self {
        self.config.n_best_y = n_best_y;
        self.modulator = ExplorationModulator::new()
            .with_n_best_y(n_best_y)
            .with_multiplier(self.config.multiplier);
        self
    }

    /// Set the POU exponent multiplier.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.config.multiplier = multiplier;
        self.modulator = ExplorationModulator::new()
            .with_n_best_y(self.config.n_best_y)
            .with_multiplier(multiplier);
        self
    }

    /// Set the candidate pool size drawn per `propose` call.
    #[must_use]
    pub fn with_n_candidates(mut self, n_candidates: usize) -> Self {
        self.config.n_candidates = n_candidates;
        self
    }

    /// Set the seed of the exploration coin-flip source.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self.rng = XorShift64::new(seed ^ 0x9E37_79B9_7F4A_7C15);
        self
    }

    /// Current tuner configuration.
    #[must_use]
    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    /// Current probability of uniform selection.
    #[must_use]
    pub fn pou(&self) -> f64 {
        self.modulator.pou()
    }

    /// True once a `fit` has produced a trusted surrogate snapshot.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.state.as_ref().is_some_and(SurrogateFit::is_trained)
    }

    /// Replace the observation history and refit.
    ///
    /// The history is replaced wholesale: the tuner is stateless across
    /// fits apart from its random sources. Refreshes the exploration
    /// modulator when velocity is enabled.
    ///
    /// # Errors
    ///
    /// Fails fast on structural violations: empty history, `X`/`y` length
    /// mismatch, ragged or zero-width configuration vectors, or an invalid
    /// configuration. Too few observations is not an error.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        self.config.validate()?;
        if x.is_empty() {
            return Err(AfinarError::EmptyObservations);
        }
        if x.len() != y.len() {
            return Err(AfinarError::DimensionMismatch {
                expected: format!("{} scores", x.len()),
                actual: format!("{} scores", y.len()),
            });
        }
        let dim = x[0].len();
        if dim == 0 {
            return Err(AfinarError::DimensionMismatch {
                expected: "configurations with at least 1 dimension".to_string(),
                actual: "0 dimensions".to_string(),
            });
        }
        for row in x {
            if row.len() != dim {
                return Err(AfinarError::DimensionMismatch {
                    expected: format!("{dim}-dimensional configuration"),
                    actual: format!("{}-dimensional configuration", row.len()),
                });
            }
        }

        let best_y = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        self.state = Some(self.adapter.fit(x, y)?);
        self.observations = Some(Observations {
            x: x.to_vec(),
            y: y.to_vec(),
            dim,
            best_y,
        });

        if self.config.velocity {
            self.modulator.refresh(y, self.config.r_minimum);
        }
        debug!(
            n_observations = x.len(),
            best_y,
            trained = self.is_trained(),
            "tuner fitted"
        );
        Ok(())
    }

    /// Score candidates: `(mean, stdev)` pairs on the surrogate path, bare
    /// scores on the fallback path.
    ///
    /// With velocity enabled, a uniform draw against POU may bypass the
    /// surrogate entirely to escape a plateau.
    ///
    /// # Errors
    ///
    /// [`AfinarError::NotFitted`] before the first `fit`,
    /// [`AfinarError::EmptyCandidates`] for an empty candidate set, and
    /// [`AfinarError::DimensionMismatch`] for candidates whose width differs
    /// from the fitted history.
    pub fn predict(&mut self, x: &[Vec<f64>]) -> Result<Prediction> {
        let dim = self.observations.as_ref().ok_or(AfinarError::NotFitted)?.dim;
        if x.is_empty() {
            return Err(AfinarError::EmptyCandidates);
        }
        for candidate in x {
            if candidate.len() != dim {
                return Err(AfinarError::DimensionMismatch {
                    expected: format!("{dim}-dimensional candidate"),
                    actual: format!("{}-dimensional candidate", candidate.len()),
                });
            }
        }

        if self.config.velocity && self.modulator.should_explore(&mut self.rng) {
            info!(
                pou = self.modulator.pou(),
                "bypassing surrogate for uniform exploration"
            );
            return Ok(Prediction::Scores(self.fallback.predict(x.len())));
        }

        let state = self.state.as_ref().ok_or(AfinarError::NotFitted)?;
        self.adapter.predict(state, x, &mut self.fallback)
    }

    /// Choose the next `n` configurations to evaluate.
    ///
    /// Draws a candidate pool from the generator, scores it with `predict`,
    /// and returns the top `n` by the configured acquisition policy.
    ///
    /// # Errors
    ///
    /// [`AfinarError::NotFitted`] before the first `fit`,
    /// [`AfinarError::EmptyCandidates`] when `n` is zero or the generator
    /// produces nothing, plus any `predict` failure.
    pub fn propose<G: CandidateGenerator>(
        &mut self,
        generator: &mut G,
        n: usize,
    ) -> Result<Vec<Vec<f64>>> {
        let best_y = self
            .observations
            .as_ref()
            .ok_or(AfinarError::NotFitted)?
            .best_y;
        if n == 0 {
            return Err(AfinarError::EmptyCandidates);
        }

        let candidates = generator.generate(self.config.n_candidates.max(n));
        if candidates.is_empty() {
            return Err(AfinarError::EmptyCandidates);
        }

        let predictions = self.predict(&candidates)?;
        let chosen = self.config.acquisition.select_top(&predictions, best_y, n)?;
        Ok(chosen.into_iter().map(|i| candidates[i].clone()).collect())
    }

    /// Number of observations behind the current fit, if any.
    #[must_use]
    pub fn n_observations(&self) -> Option<usize> {
        self.observations.as_ref().map(|o| o.x.len())
    }

    /// Best observed score behind the current fit, if any.
    #[must_use]
    pub fn best_score(&self) -> Option<f64> {
        self.observations.as_ref().map(|o| o.best_y)
    }

    /// The fitted observation history, if any.
    #[must_use]
    pub fn observations(&self) -> Option<(&[Vec<f64>], &[f64])> {
        self.observations
            .as_ref()
            .map(|o| (o.x.as_slice(), o.y.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> (Vec<Vec<f64>>, Vec<f64>) {
        (
            vec![vec![1.0], vec![2.0], vec![3.0]],
            vec![0.1, 0.5, 0.9],
        )
    }

    #[test]
    fn test_predict_before_fit_errors() {
        let mut tuner = GpTuner::new();
        let err = tuner.predict(&[vec![1.0]]).unwrap_err();
        assert!(matches!(err, AfinarError::NotFitted));
    }

    #[test]
    fn test_propose_before_fit_errors() {
        let mut tuner = GpTuner::new();
        let mut generator = BoundsGenerator::new(vec![(0.0, 1.0)]);
        let err = tuner.propose(&mut generator, 1).unwrap_err();
        assert!(matches!(err, AfinarError::NotFitted));
    }

    #[test]
    fn test_fit_rejects_empty_history() {
        let mut tuner = GpTuner::new();
        let err = tuner.fit(&[], &[]).unwrap_err();
        assert!(matches!(err, AfinarError::EmptyObservations));
    }

    #[test]
    fn test_fit_rejects_length_mismatch() {
        let mut tuner = GpTuner::new();
        let err = tuner.fit(&[vec![1.0], vec![2.0]], &[0.1]).unwrap_err();
        assert!(matches!(err, AfinarError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_fit_rejects_ragged_rows() {
        let mut tuner = GpTuner::new();
        let err = tuner
            .fit(&[vec![1.0], vec![2.0, 3.0]], &[0.1, 0.2])
            .unwrap_err();
        assert!(matches!(err, AfinarError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_trained_path_returns_mean_stdev() {
        let (x, y) = history();
        let mut tuner = GpTuner::ei();
        tuner.fit(&x, &y).unwrap();
        assert!(tuner.is_trained());

        let pred = tuner.predict(&[vec![4.0]]).unwrap();
        match pred {
            Prediction::MeanStd(pairs) => {
                assert_eq!(pairs.len(), 1);
                assert!(pairs[0].1 >= 0.0);
            }
            Prediction::Scores(_) => panic!("expected surrogate path above r_minimum"),
        }
    }

    #[test]
    fn test_deficient_path_returns_bare_scores() {
        let mut tuner = GpTuner::ei();
        tuner.fit(&[vec![1.0]], &[0.1]).unwrap();
        assert!(!tuner.is_trained());

        let pred = tuner.predict(&[vec![2.0], vec![3.0]]).unwrap();
        assert!(!pred.has_uncertainty());
        assert_eq!(pred.len(), 2);
    }

    #[test]
    fn test_predict_rejects_wrong_candidate_width() {
        let (x, y) = history();
        let mut tuner = GpTuner::new();
        tuner.fit(&x, &y).unwrap();
        let err = tuner.predict(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, AfinarError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_predict_rejects_empty_candidates() {
        let (x, y) = history();
        let mut tuner = GpTuner::new();
        tuner.fit(&x, &y).unwrap();
        let err = tuner.predict(&[]).unwrap_err();
        assert!(matches!(err, AfinarError::EmptyCandidates));
    }

    #[test]
    fn test_plateau_forces_uniform_exploration() {
        // identical scores: POU = exp(0) = 1, every predict bypasses the GP
        let mut tuner = GpTuner::ei_velocity();
        tuner
            .fit(&[vec![1.0], vec![2.0], vec![3.0]], &[0.5, 0.5, 0.5])
            .unwrap();
        assert!(tuner.is_trained());
        assert_eq!(tuner.pou(), 1.0);

        let pred = tuner.predict(&[vec![1.5], vec![2.5]]).unwrap();
        assert!(!pred.has_uncertainty());
    }

    #[test]
    fn test_progressing_scores_keep_surrogate_path() {
        let mut tuner = GpTuner::ei_velocity();
        tuner
            .fit(&[vec![1.0], vec![2.0], vec![3.0]], &[0.1, 0.5, 0.9])
            .unwrap();
        // mean velocity 0.4 ⇒ POU = exp(-40), effectively never explores
        assert!(tuner.pou() < 1e-15);

        let pred = tuner.predict(&[vec![1.5]]).unwrap();
        assert!(pred.has_uncertainty());
    }

    #[test]
    fn test_velocity_disabled_never_bypasses() {
        let mut tuner = GpTuner::ei();
        tuner
            .fit(&[vec![1.0], vec![2.0], vec![3.0]], &[0.5, 0.5, 0.5])
            .unwrap();
        // plateau scores, but no modulator in the chain
        assert_eq!(tuner.pou(), 0.0);
        let pred = tuner.predict(&[vec![1.5]]).unwrap();
        assert!(pred.has_uncertainty());
    }

    #[test]
    fn test_propose_returns_n_in_bounds() {
        let (x, y) = history();
        let mut tuner = GpTuner::ei().with_n_candidates(50);
        tuner.fit(&x, &y).unwrap();

        let mut generator = BoundsGenerator::new(vec![(0.0, 4.0)]).with_seed(9);
        let chosen = tuner.propose(&mut generator, 3).unwrap();
        assert_eq!(chosen.len(), 3);
        for candidate in &chosen {
            assert_eq!(candidate.len(), 1);
            assert!((0.0..=4.0).contains(&candidate[0]));
        }
    }

    #[test]
    fn test_propose_zero_errors() {
        let (x, y) = history();
        let mut tuner = GpTuner::new();
        tuner.fit(&x, &y).unwrap();
        let mut generator = BoundsGenerator::new(vec![(0.0, 4.0)]);
        let err = tuner.propose(&mut generator, 0).unwrap_err();
        assert!(matches!(err, AfinarError::EmptyCandidates));
    }

    #[test]
    fn test_propose_deterministic_with_seeds() {
        let (x, y) = history();

        let run = || {
            let mut tuner = GpTuner::ei().with_seed(11).with_n_candidates(64);
            tuner.fit(&x, &y).unwrap();
            let mut generator = BoundsGenerator::new(vec![(0.0, 4.0)]).with_seed(11);
            tuner.propose(&mut generator, 2).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_refit_replaces_history() {
        let mut tuner = GpTuner::new();
        tuner.fit(&[vec![1.0]], &[0.1]).unwrap();
        assert_eq!(tuner.n_observations(), Some(1));
        assert!(!tuner.is_trained());

        let (x, y) = history();
        tuner.fit(&x, &y).unwrap();
        assert_eq!(tuner.n_observations(), Some(3));
        assert_eq!(tuner.best_score(), Some(0.9));
        assert!(tuner.is_trained());
    }

    #[test]
    fn test_with_config_validates() {
        for config in [
            TunerConfig {
                r_minimum: 0,
                ..TunerConfig::default()
            },
            TunerConfig {
                n_best_y: 1,
                ..TunerConfig::default()
            },
            TunerConfig {
                multiplier: 1.0,
                ..TunerConfig::default()
            },
            TunerConfig {
                noise_variance: 0.0,
                ..TunerConfig::default()
            },
            TunerConfig {
                n_candidates: 0,
                ..TunerConfig::default()
            },
        ] {
            let err = GpTuner::with_config(config).unwrap_err();
            assert!(matches!(err, AfinarError::InvalidHyperparameter { .. }));
        }
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = TunerConfig {
            kernel: Kernel::Matern52,
            acquisition: AcquisitionPolicy::ExpectedImprovement,
            velocity: true,
            ..TunerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: TunerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_bounds_generator_respects_bounds() {
        let mut generator = BoundsGenerator::new(vec![(-1.0, 1.0), (10.0, 20.0)]).with_seed(3);
        for candidate in generator.generate(100) {
            assert!((-1.0..1.0).contains(&candidate[0]));
            assert!((10.0..20.0).contains(&candidate[1]));
        }
    }
}
