//! Afinar: sequential model-based hyperparameter tuning in pure Rust.
//!
//! Afinar decides which configuration to try next, given a history of
//! (configuration, score) observations. A Gaussian process surrogate
//! predicts mean and uncertainty for unseen candidates, an acquisition
//! policy turns those predictions into a single choice, and the whole chain
//! degrades gracefully to uniform random selection when data is scarce or
//! the search has stalled on a plateau.
//!
//! # Quick Start
//!
//! ```
//! use afinar::prelude::*;
//!
//! // Scores observed so far (higher is better)
//! let x = vec![vec![1.0], vec![2.0], vec![3.0]];
//! let y = vec![0.1, 0.5, 0.9];
//!
//! // Expected-improvement tuner over a Gaussian process surrogate
//! let mut tuner = GpTuner::ei();
//! tuner.fit(&x, &y).unwrap();
//!
//! // Ask for the next configuration to evaluate
//! let mut generator = BoundsGenerator::new(vec![(0.0, 4.0)]).with_seed(7);
//! let next = tuner.propose(&mut generator, 1).unwrap();
//! assert_eq!(next.len(), 1);
//! assert!((0.0..=4.0).contains(&next[0][0]));
//! ```
//!
//! # Modules
//!
//! - [`tuner`]: the `fit` / `predict` / `propose` facade and candidate generation
//! - [`surrogate`]: the regression-engine seam and the `r_minimum` gate
//! - [`gp`]: the default Gaussian process engine (squared exponential or Matérn 5/2)
//! - [`acquisition`]: max-mean and expected-improvement selection
//! - [`velocity`]: plateau detection and the probability of uniform selection
//! - [`uniform`]: the random fallback selector
//! - [`rng`]: deterministic, injectable random sources
//! - [`stats`]: standard normal helpers for expected improvement
//! - [`error`]: error types

pub mod acquisition;
pub mod error;
pub mod gp;
pub mod prelude;
pub mod rng;
pub mod stats;
pub mod surrogate;
pub mod tuner;
pub mod uniform;
pub mod velocity;

pub use error::{AfinarError, Result};
pub use tuner::{GpTuner, TunerConfig};
