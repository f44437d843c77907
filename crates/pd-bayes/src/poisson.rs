//! Inference on a Poisson rate with a Gamma prior.

use pd_core::{errors::Result, ensure, Probability, Real};
use pd_math::distributions::{ContinuousDistribution, GammaDistribution};

use crate::binomial::xlogy;
use crate::posterior::Posterior;

/// Gamma prior on a rate, parameterised by shape `r` and rate `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GammaPrior {
    /// Improper uniform prior, `r = 1`, `v = 0`.
    Flat,
    /// Improper Jeffreys prior `λ^(−½)`, `r = ½`, `v = 0`.
    Jeffreys,
    /// A proper Gamma(r, v) prior.
    Gamma {
        /// Shape `r`.
        shape: Real,
        /// Rate `v`.
        rate: Real,
    },
}

impl GammaPrior {
    /// Prior with the given mode and standard deviation.
    pub fn from_mode_sd(mode: Real, sd: Real) -> Result<Self> {
        ensure!(mode >= 0.0 && mode.is_finite(), "gamma prior mode must be non-negative, got {mode}");
        ensure!(sd > 0.0 && sd.is_finite(), "gamma prior sd must be positive, got {sd}");
        let rate = (mode + (mode * mode + 4.0 * sd * sd).sqrt()) / (2.0 * sd * sd);
        Ok(GammaPrior::Gamma {
            shape: 1.0 + mode * rate,
            rate,
        })
    }

    /// Prior with the given mean and standard deviation: `r = m²/s²`, `v = m/s²`.
    pub fn from_mean_sd(mean: Real, sd: Real) -> Result<Self> {
        ensure!(mean > 0.0 && mean.is_finite(), "gamma prior mean must be positive, got {mean}");
        ensure!(sd > 0.0 && sd.is_finite(), "gamma prior sd must be positive, got {sd}");
        let s2 = sd * sd;
        Ok(GammaPrior::Gamma {
            shape: mean * mean / s2,
            rate: mean / s2,
        })
    }

    /// Shape and rate `(r, v)`; improper priors have `v = 0`.
    pub fn parameters(&self) -> (Real, Real) {
        match *self {
            GammaPrior::Flat => (1.0, 0.0),
            GammaPrior::Jeffreys => (0.5, 0.0),
            GammaPrior::Gamma { shape, rate } => (shape, rate),
        }
    }

    /// Number of observations the prior is worth, `⌊v⌋`.
    pub fn equivalent_sample_size(&self) -> u64 {
        self.parameters().1.floor() as u64
    }
}

/// Posterior of a rate λ after `observations` Poisson counts summing to
/// `total_count`: Gamma(r + Σy, v + n).
#[derive(Debug, Clone)]
pub struct PoissonRate {
    total_count: u64,
    observations: u64,
    prior: GammaPrior,
    posterior: GammaDistribution,
}

impl PoissonRate {
    /// Posterior after `observations` counts summing to `total_count`.
    pub fn new(total_count: u64, observations: u64, prior: GammaPrior) -> Result<Self> {
        let (r, v) = prior.parameters();
        ensure!(
            r.is_finite() && v.is_finite() && r >= 0.0 && v >= 0.0,
            "gamma prior parameters must be finite and non-negative, got ({r}, {v})"
        );
        let shape = r + total_count as Real;
        let rate = v + observations as Real;
        ensure!(
            shape > 0.0 && rate > 0.0,
            "posterior is improper: Gamma(shape {shape}, rate {rate})"
        );
        tracing::debug!(shape, rate, "poisson rate posterior");
        Ok(Self {
            total_count,
            observations,
            prior,
            posterior: GammaDistribution::new(shape, rate)?,
        })
    }

    /// Posterior from the individual counts.
    pub fn from_counts(counts: &[u64], prior: GammaPrior) -> Result<Self> {
        Self::new(counts.iter().sum(), counts.len() as u64, prior)
    }

    /// Sum of the observed counts `Σy`.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of counts `n`.
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// The prior the posterior was built from.
    pub fn prior(&self) -> GammaPrior {
        self.prior
    }

    /// Log of the likelihood kernel `λ^Σy e^(−nλ)`.
    pub fn ln_likelihood(&self, lambda: Real) -> Real {
        if lambda < 0.0 {
            return f64::NEG_INFINITY;
        }
        xlogy(self.total_count as Real, lambda) - self.observations as Real * lambda
    }

    /// `λ^Σy e^(−nλ)`.
    pub fn likelihood(&self, lambda: Real) -> Real {
        self.ln_likelihood(lambda).exp()
    }

    /// `−2 ln L(λ)`.
    pub fn deviance(&self, lambda: Real) -> Real {
        -2.0 * self.ln_likelihood(lambda)
    }

    /// Deviance of the point null `λ = null` minus that of `λ`.
    pub fn deviance_difference(&self, null: Real, lambda: Real) -> Real {
        self.deviance(null) - self.deviance(lambda)
    }

    /// Posterior probability of `H₀: λ ≤ λ₀`.
    pub fn one_sided_probability(&self, lambda0: Real) -> Result<Probability> {
        self.posterior.cdf(lambda0)
    }

    /// Posterior odds of `H₀: λ ≤ λ₀` against `λ > λ₀`.
    pub fn one_sided_odds(&self, lambda0: Real) -> Result<Real> {
        let p = self.one_sided_probability(lambda0)?;
        Ok(p / (1.0 - p))
    }
}

impl Posterior for PoissonRate {
    type Distribution = GammaDistribution;

    fn distribution(&self) -> &GammaDistribution {
        &self.posterior
    }

    fn mean(&self) -> Real {
        self.posterior.shape() / self.posterior.rate()
    }

    fn variance(&self) -> Real {
        self.posterior.shape() / (self.posterior.rate() * self.posterior.rate())
    }

    fn mode(&self) -> Option<Real> {
        Some(self.posterior.mode())
    }
}
