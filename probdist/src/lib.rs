//! # probdist
//!
//! Numerically robust probability distributions: densities, CDFs,
//! quantiles, samplers and conjugate Bayesian posteriors.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `pd-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use probdist::math::distributions::{BetaDistribution, ContinuousDistribution};
//!
//! let d = BetaDistribution::new(2.0, 5.0).unwrap();
//! let median = d.inverse_cdf(0.5).unwrap();
//! assert!((d.cdf(median).unwrap() - 0.5).abs() < 1e-8);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, settings and error definitions.
pub use pd_core as core;

/// Special functions, solvers, samplers and distribution families.
pub use pd_math as math;

/// Conjugate posteriors and credible intervals.
pub use pd_bayes as bayes;

pub use pd_core::{Error, Integer, Probability, Real, Result, Settings};
pub use pd_math::distributions::{ContinuousDistribution, DiscreteDistribution, Moments};
pub use pd_math::MersenneTwisterUniformRng;
