//! # pd-math
//!
//! Numerical core of probdist: special functions, one-dimensional solvers,
//! random sources and sampling strategies, and the probability
//! distribution families built on them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Dense matrix newtype over nalgebra.
pub mod matrix;

/// Random number generators.
pub mod random_numbers;

/// Generic sampling strategies and the gamma variate generators.
pub mod sampling;

/// 1D root-finding and minimisation.
pub mod solvers1d;

/// Gamma, beta and zeta functions and their incomplete forms.
pub mod special;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{
    normal_cdf, normal_cdf_inverse, normal_pdf, ContinuousDistribution, DiscreteDistribution,
    Moments,
};
pub use matrix::Matrix;
pub use random_numbers::MersenneTwisterUniformRng;
