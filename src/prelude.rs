//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use afinar::prelude::*;
//! ```

pub use crate::acquisition::{expected_improvement, AcquisitionPolicy};
pub use crate::error::{AfinarError, Result};
pub use crate::gp::{GaussianProcess, Kernel, TrainedGp};
pub use crate::rng::{Rng, XorShift64};
pub use crate::surrogate::{
    FittedSurrogate, Prediction, SurrogateAdapter, SurrogateFit, SurrogateModel,
};
pub use crate::tuner::{BoundsGenerator, CandidateGenerator, GpTuner, TunerConfig};
pub use crate::uniform::{FallbackSelector, UniformSelector};
pub use crate::velocity::ExplorationModulator;
