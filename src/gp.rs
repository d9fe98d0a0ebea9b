//! Gaussian process regression for surrogate modeling.
//!
//! Exact GP regression fitted via Cholesky decomposition, with a choice of
//! covariance kernel and per-dimension (ARD) lengthscales derived from the
//! spread of the training inputs. Targets are standardized to zero mean and
//! unit variance before fitting, so heterogeneous score magnitudes across
//! search spaces do not require manual scaling.
//!
//! Fitting returns an immutable [`TrainedGp`] snapshot; predictions are made
//! against the snapshot, never against hidden mutable state.
//!
//! # References
//!
//! Rasmussen & Williams (2006). Gaussian Processes for Machine Learning, ch. 2.
//!
//! Snoek, Larochelle & Adams (2012). Practical Bayesian Optimization of
//! Machine Learning Algorithms. `NeurIPS`.

use serde::{Deserialize, Serialize};

use crate::error::{AfinarError, Result};
use crate::surrogate::{FittedSurrogate, SurrogateModel};

/// √5, used by the Matérn 5/2 kernel.
const SQRT_5: f64 = 2.236_067_977_499_79;

/// Floor for ARD lengthscales, guards degenerate (constant) input dimensions.
const MIN_LENGTHSCALE: f64 = 0.01;

/// Covariance kernel choice.
///
/// `SquaredExponential` is the default and assumes very smooth objectives.
/// `Matern52` is the standard choice for hyperparameter response surfaces,
/// which tend to be less smooth than the squared exponential implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Kernel {
    /// `k(r) = exp(-r² / 2)`
    #[default]
    SquaredExponential,
    /// `k(r) = (1 + √5 r + 5/3 r²) exp(-√5 r)`
    Matern52,
}

impl Kernel {
    /// Evaluate the kernel between two points with ARD lengthscales.
    #[must_use]
    pub fn value(&self, a: &[f64], b: &[f64], lengthscales: &[f64]) -> f64 {
        let mut r_sq = 0.0;
        for i in 0..a.len() {
            let diff = (a[i] - b[i]) / lengthscales[i];
            r_sq += diff * diff;
        }
        match self {
            Kernel::SquaredExponential => (-0.5 * r_sq).exp(),
            Kernel::Matern52 => {
                let r = r_sq.sqrt();
                let sqrt5_r = SQRT_5 * r;
                (1.0 + sqrt5_r + 5.0 / 3.0 * r_sq) * (-sqrt5_r).exp()
            }
        }
    }
}

/// Gaussian process regressor.
///
/// # Examples
///
/// ```
/// use afinar::gp::{GaussianProcess, Kernel};
/// use afinar::surrogate::{FittedSurrogate, SurrogateModel};
///
/// let x = vec![vec![1.0], vec![2.0], vec![3.0]];
/// let y = vec![0.1, 0.5, 0.9];
///
/// let gp = GaussianProcess::new().with_kernel(Kernel::Matern52);
/// let trained = gp.fit(&x, &y).unwrap();
/// let predictions = trained.predict(&[vec![2.5]]).unwrap();
///
/// let (mean, stdev) = predictions[0];
/// assert!((0.1..=0.9).contains(&mean));
/// assert!(stdev >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct GaussianProcess {
    kernel: Kernel,
    noise_variance: f64,
    normalize_y: bool,
}

impl GaussianProcess {
    /// Create a GP with the default squared exponential kernel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kernel: Kernel::SquaredExponential,
            noise_variance: 1e-6,
            normalize_y: true,
        }
    }

    /// Set the covariance kernel.
    #[must_use]
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the observation noise variance added to the kernel diagonal.
    ///
    /// Larger values make the fit smoother and more tolerant of noisy or
    /// duplicated observations. Default: `1e-6`.
    #[must_use]
    pub fn with_noise_variance(mut self, noise_variance: f64) -> Self {
        self.noise_variance = noise_variance;
        self
    }

    /// Enable or disable target standardization. Default: enabled.
    #[must_use]
    pub fn with_normalize_y(mut self, normalize_y: bool) -> Self {
        self.normalize_y = normalize_y;
        self
    }
}

impl Default for GaussianProcess {
    fn default() -> Self {
        Self::new()
    }
}

impl SurrogateModel for GaussianProcess {
    type Fitted = TrainedGp;

    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<TrainedGp> {
        if x.is_empty() {
            return Err(AfinarError::EmptyObservations);
        }
        if x.len() != y.len() {
            return Err(AfinarError::DimensionMismatch {
                expected: format!("{} scores", x.len()),
                actual: format!("{} scores", y.len()),
            });
        }
        let n = x.len();
        let dim = x[0].len();

        let (y_mean, y_std) = if self.normalize_y {
            standardization_params(y)
        } else {
            (0.0, 1.0)
        };
        let y_scaled: Vec<f64> = y.iter().map(|&v| (v - y_mean) / y_std).collect();

        // ARD lengthscales from the per-dimension spread of the inputs
        let lengthscales: Vec<f64> = (0..dim)
            .map(|j| {
                let mean_j = x.iter().map(|row| row[j]).sum::<f64>() / n as f64;
                let var_j =
                    x.iter().map(|row| (row[j] - mean_j).powi(2)).sum::<f64>() / n as f64;
                var_j.sqrt().max(MIN_LENGTHSCALE)
            })
            .collect();

        // K + σ²I, row-major
        let mut k = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..=i {
                let v = self.kernel.value(&x[i], &x[j], &lengthscales);
                k[i * n + j] = v;
                k[j * n + i] = v;
            }
            k[i * n + i] += self.noise_variance;
        }

        let chol = cholesky(&k, n)?;
        let alpha = cholesky_solve(&chol, n, &y_scaled);

        Ok(TrainedGp {
            kernel: self.kernel,
            x_train: x.to_vec(),
            chol,
            alpha,
            lengthscales,
            y_mean,
            y_std,
        })
    }
}

/// Immutable fitted GP snapshot.
///
/// Holds everything needed to predict: the training inputs, the Cholesky
/// factor of the kernel matrix, and the precomputed weight vector
/// `α = (K + σ²I)⁻¹ y`.
#[derive(Debug, Clone)]
pub struct TrainedGp {
    kernel: Kernel,
    x_train: Vec<Vec<f64>>,
    /// Lower-triangular Cholesky factor of K + σ²I, row-major.
    chol: Vec<f64>,
    alpha: Vec<f64>,
    lengthscales: Vec<f64>,
    y_mean: f64,
    y_std: f64,
}

impl TrainedGp {
    /// Number of training observations behind this snapshot.
    #[must_use]
    pub fn n_observations(&self) -> usize {
        self.x_train.len()
    }
}

impl FittedSurrogate for TrainedGp {
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<(f64, f64)>> {
        let n = self.x_train.len();
        let dim = self.lengthscales.len();

        let mut out = Vec::with_capacity(x.len());
        for candidate in x {
            if candidate.len() != dim {
                return Err(AfinarError::DimensionMismatch {
                    expected: format!("{dim}-dimensional candidate"),
                    actual: format!("{}-dimensional candidate", candidate.len()),
                });
            }

            let k_star: Vec<f64> = self
                .x_train
                .iter()
                .map(|train| self.kernel.value(candidate, train, &self.lengthscales))
                .collect();

            // mean = k*ᵀ α, in standardized space
            let mean_scaled: f64 = k_star.iter().zip(&self.alpha).map(|(a, b)| a * b).sum();

            // var = k(x*, x*) - ‖L⁻¹ k*‖²; kernel value at zero distance is 1
            let v = forward_solve(&self.chol, n, &k_star);
            let var_scaled = (1.0 - v.iter().map(|x| x * x).sum::<f64>()).max(0.0);

            let mean = self.y_mean + self.y_std * mean_scaled;
            let stdev = self.y_std * var_scaled.sqrt();
            out.push((mean, stdev));
        }
        Ok(out)
    }
}

/// Mean and standard deviation used for target standardization.
///
/// Uses the sample standard deviation, floored so constant targets do not
/// divide by zero.
fn standardization_params(y: &[f64]) -> (f64, f64) {
    let n = y.len();
    let mean = y.iter().sum::<f64>() / n as f64;
    let var = if n > 1 {
        y.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        1.0
    };
    (mean, var.sqrt().max(1e-10))
}

/// Cholesky decomposition A = L·Lᵀ of a symmetric positive definite matrix.
///
/// `a` is row-major n×n; returns the lower-triangular factor, row-major.
fn cholesky(a: &[f64], n: usize) -> Result<Vec<f64>> {
    let mut l = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            if i == j {
                for k in 0..j {
                    sum += l[j * n + k] * l[j * n + k];
                }
                let pivot = a[j * n + j] - sum;
                if pivot <= 0.0 {
                    return Err(AfinarError::SingularMatrix { pivot });
                }
                l[j * n + j] = pivot.sqrt();
            } else {
                for k in 0..j {
                    sum += l[i * n + k] * l[j * n + k];
                }
                l[i * n + j] = (a[i * n + j] - sum) / l[j * n + j];
            }
        }
    }
    Ok(l)
}

/// Forward substitution: solve L·y = b.
fn forward_solve(l: &[f64], n: usize, b: &[f64]) -> Vec<f64> {
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[i * n + j] * y[j];
        }
        y[i] = (b[i] - sum) / l[i * n + i];
    }
    y
}

/// Solve (L·Lᵀ)·x = b via forward then backward substitution.
fn cholesky_solve(l: &[f64], n: usize, b: &[f64]) -> Vec<f64> {
    let y = forward_solve(l, n, b);
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[j * n + i] * x[j];
        }
        x[i] = (y[i] - sum) / l[i * n + i];
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        (
            vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]],
            vec![0.1, 0.5, 0.9, 1.3],
        )
    }

    #[test]
    fn test_fit_predict_interpolates_training_points() {
        let (x, y) = training_data();
        let gp = GaussianProcess::new();
        let trained = gp.fit(&x, &y).unwrap();

        let predictions = trained.predict(&x).unwrap();
        for ((mean, stdev), expected) in predictions.iter().zip(&y) {
            assert!(
                (mean - expected).abs() < 0.05,
                "mean {mean} too far from {expected}"
            );
            assert!(*stdev >= 0.0);
            assert!(*stdev < 0.1, "stdev {stdev} too large at a training point");
        }
    }

    #[test]
    fn test_uncertainty_grows_away_from_data() {
        let (x, y) = training_data();
        let trained = GaussianProcess::new().fit(&x, &y).unwrap();

        let near = trained.predict(&[vec![2.5]]).unwrap()[0].1;
        let far = trained.predict(&[vec![30.0]]).unwrap()[0].1;
        assert!(far > near, "far stdev {far} should exceed near stdev {near}");
    }

    #[test]
    fn test_matern52_kernel_fits() {
        let (x, y) = training_data();
        let trained = GaussianProcess::new()
            .with_kernel(Kernel::Matern52)
            .fit(&x, &y)
            .unwrap();
        let (mean, stdev) = trained.predict(&[vec![2.0]]).unwrap()[0];
        assert!((mean - 0.5).abs() < 0.1);
        assert!(stdev >= 0.0);
    }

    #[test]
    fn test_normalize_y_handles_large_scores() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![1_000.0, 5_000.0, 9_000.0];
        let trained = GaussianProcess::new().fit(&x, &y).unwrap();
        let (mean, _) = trained.predict(&[vec![2.0]]).unwrap()[0];
        assert!((mean - 5_000.0).abs() < 500.0);
    }

    #[test]
    fn test_constant_targets_do_not_divide_by_zero() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![0.7, 0.7, 0.7];
        let trained = GaussianProcess::new().fit(&x, &y).unwrap();
        let (mean, stdev) = trained.predict(&[vec![1.5]]).unwrap()[0];
        assert!((mean - 0.7).abs() < 0.1);
        assert!(stdev.is_finite());
    }

    #[test]
    fn test_duplicate_inputs_survive_via_noise_diagonal() {
        let x = vec![vec![2.0], vec![2.0], vec![3.0]];
        let y = vec![0.4, 0.6, 0.9];
        let trained = GaussianProcess::new()
            .with_noise_variance(1e-3)
            .fit(&x, &y)
            .unwrap();
        let (mean, _) = trained.predict(&[vec![2.0]]).unwrap()[0];
        // Prediction at the duplicated input lands between the two targets
        assert!((0.3..=0.7).contains(&mean));
    }

    #[test]
    fn test_mismatched_lengths_error() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![0.1];
        let err = GaussianProcess::new().fit(&x, &y).unwrap_err();
        assert!(matches!(err, AfinarError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_empty_observations_error() {
        let err = GaussianProcess::new().fit(&[], &[]).unwrap_err();
        assert!(matches!(err, AfinarError::EmptyObservations));
    }

    #[test]
    fn test_predict_wrong_width_errors() {
        let (x, y) = training_data();
        let trained = GaussianProcess::new().fit(&x, &y).unwrap();
        let err = trained.predict(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, AfinarError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_kernel_value_at_zero_distance_is_one() {
        let a = [1.5, -2.0];
        let ls = [1.0, 1.0];
        assert!((Kernel::SquaredExponential.value(&a, &a, &ls) - 1.0).abs() < 1e-12);
        assert!((Kernel::Matern52.value(&a, &a, &ls) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_kernel_decays_with_distance() {
        let ls = [1.0];
        for kernel in [Kernel::SquaredExponential, Kernel::Matern52] {
            let near = kernel.value(&[0.0], &[0.5], &ls);
            let far = kernel.value(&[0.0], &[3.0], &ls);
            assert!(near > far);
            assert!(far > 0.0);
        }
    }

    #[test]
    fn test_kernel_serde_round_trip() {
        let json = serde_json::to_string(&Kernel::Matern52).unwrap();
        let back: Kernel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Kernel::Matern52);
    }

    #[test]
    fn test_cholesky_rejects_non_positive_definite() {
        // [[1, 2], [2, 1]] has a negative eigenvalue
        let a = vec![1.0, 2.0, 2.0, 1.0];
        let err = cholesky(&a, 2).unwrap_err();
        assert!(matches!(err, AfinarError::SingularMatrix { .. }));
    }

    #[test]
    fn test_cholesky_solve_identity() {
        // A = I ⇒ x = b
        let a = vec![1.0, 0.0, 0.0, 1.0];
        let l = cholesky(&a, 2).unwrap();
        let x = cholesky_solve(&l, 2, &[3.0, -4.0]);
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] + 4.0).abs() < 1e-12);
    }
}
