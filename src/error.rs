//! Error types for Afinar operations.
//!
//! Structural contract violations (shape mismatches, empty inputs, calling
//! `predict` before `fit`) surface through [`AfinarError`]. Numerically
//! recoverable conditions, such as too few observations for the surrogate or
//! a zero-variance candidate inside expected improvement, are absorbed
//! internally with defined fallback behavior and never reach the caller.

use std::fmt;

/// Main error type for Afinar operations.
///
/// # Examples
///
/// ```
/// use afinar::error::AfinarError;
///
/// let err = AfinarError::DimensionMismatch {
///     expected: "4 scores".to_string(),
///     actual: "3 scores".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum AfinarError {
    /// Observation or candidate dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// `fit` was called with no observations.
    EmptyObservations,

    /// `predict` or `propose` was called with no candidates.
    EmptyCandidates,

    /// `predict` or `propose` was called before any `fit`.
    NotFitted,

    /// Kernel matrix is not positive definite (Cholesky failed).
    SingularMatrix {
        /// Offending diagonal pivot (at or below zero)
        pivot: f64,
    },

    /// Invalid configuration value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for AfinarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AfinarError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            AfinarError::EmptyObservations => {
                write!(f, "fit requires at least one observation")
            }
            AfinarError::EmptyCandidates => {
                write!(f, "predict requires at least one candidate")
            }
            AfinarError::NotFitted => {
                write!(f, "tuner is not fitted: call fit before predict or propose")
            }
            AfinarError::SingularMatrix { pivot } => {
                write!(f, "kernel matrix is not positive definite: pivot = {pivot}")
            }
            AfinarError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            AfinarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AfinarError {}

impl From<&str> for AfinarError {
    fn from(msg: &str) -> Self {
        AfinarError::Other(msg.to_string())
    }
}

impl From<String> for AfinarError {
    fn from(msg: String) -> Self {
        AfinarError::Other(msg)
    }
}

/// Convenience result type for Afinar operations.
pub type Result<T> = std::result::Result<T, AfinarError>;
