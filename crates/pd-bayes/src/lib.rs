//! # pd-bayes
//!
//! Conjugate posterior summaries and credible intervals on top of the
//! `pd-math` distribution families.
//!
//! - [`interval`]: equal-tail and highest-density intervals of a posterior.
//! - [`empirical`]: quantiles, CDF and intervals of posterior samples.
//! - [`BinomialProportion`], [`PoissonRate`], [`NormalMean`]: the
//!   Beta–binomial, Gamma–Poisson and Normal–Normal conjugate pairs, all
//!   summarised through the [`Posterior`] trait.
//! - [`Difference`]: the normal posterior of a difference of two of those,
//!   with Satterthwaite's correction when the σ are estimated.
//! - [`MultinomialProportions`]: the Dirichlet–multinomial pair.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Beta–binomial posterior of a proportion.
pub mod binomial;
/// Differences of two independent posteriors.
pub mod difference;
/// Summaries of posterior samples.
pub mod empirical;
/// Credible intervals and point estimates.
pub mod interval;
/// Dirichlet–multinomial posterior of category probabilities.
pub mod multinomial;
/// Normal–normal posterior of a mean.
pub mod normal_mean;
/// Gamma–Poisson posterior of a rate.
pub mod poisson;
/// The shared posterior trait.
pub mod posterior;

pub use binomial::{BetaPrior, BinomialProportion};
pub use difference::{satterthwaite_dof, welch_credible_interval, Difference};
pub use empirical::{
    empirical_cdf, empirical_credible_interval, empirical_quantile, lower_tail_probability,
    upper_tail_probability,
};
pub use interval::{credible_interval, hdi_of_quantile, Interval, PointEstimate};
pub use multinomial::{DirichletPrior, MultinomialProportions};
pub use normal_mean::{discrete_prior_posterior, NormalMean, NormalPrior};
pub use poisson::{GammaPrior, PoissonRate};
pub use posterior::Posterior;
