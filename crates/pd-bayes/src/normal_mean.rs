//! Inference on a normal mean with known standard deviation.

use pd_core::{errors::Result, ensure, Error, Probability, Real};
use pd_math::distributions::{
    normal_pdf, ContinuousDistribution, NormalDistribution, StudentTDistribution,
};
use pd_math::statistics::Statistics;

use crate::interval::{check_mass, Interval};
use crate::posterior::Posterior;

/// Prior on the mean μ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalPrior {
    /// Improper uniform prior.
    Flat,
    /// A `N(mean, std_dev²)` prior.
    Normal {
        /// Prior mean `m`.
        mean: Real,
        /// Prior standard deviation `s`.
        std_dev: Real,
    },
}

/// Posterior of μ after `observations` draws from `N(μ, σ²)` with sample
/// mean `ȳ`.
///
/// With a flat prior the posterior is `N(ȳ, σ²/n)`; with a `N(m, s²)` prior
/// precisions add and the posterior mean is the precision-weighted average
/// of `m` and `ȳ`.
#[derive(Debug, Clone)]
pub struct NormalMean {
    observations: u64,
    sample_mean: Real,
    sigma: Real,
    prior: NormalPrior,
    posterior: NormalDistribution,
}

impl NormalMean {
    /// Posterior from the sample size, the sample mean and the known
    /// population standard deviation `σ`.
    pub fn new(observations: u64, sample_mean: Real, sigma: Real, prior: NormalPrior) -> Result<Self> {
        ensure!(sample_mean.is_finite(), "sample mean must be finite, got {sample_mean}");
        ensure!(
            sigma > 0.0 && sigma.is_finite(),
            "population standard deviation must be positive, got {sigma}"
        );
        let n = observations as Real;
        let sigma2 = sigma * sigma;
        let (mean, variance) = match prior {
            NormalPrior::Flat => {
                ensure!(observations > 0, "a flat prior needs at least one observation");
                (sample_mean, sigma2 / n)
            }
            NormalPrior::Normal { mean, std_dev } => {
                ensure!(mean.is_finite(), "prior mean must be finite, got {mean}");
                ensure!(
                    std_dev > 0.0 && std_dev.is_finite(),
                    "prior standard deviation must be positive, got {std_dev}"
                );
                let prior_precision = 1.0 / (std_dev * std_dev);
                let data_precision = n / sigma2;
                let precision = prior_precision + data_precision;
                (
                    (mean * prior_precision + sample_mean * data_precision) / precision,
                    1.0 / precision,
                )
            }
        };
        tracing::debug!(mean, variance, "normal mean posterior");
        Ok(Self {
            observations,
            sample_mean,
            sigma,
            prior,
            posterior: NormalDistribution::new(mean, variance.sqrt())?,
        })
    }

    /// Posterior from raw observations.
    pub fn from_samples(samples: &[Real], sigma: Real, prior: NormalPrior) -> Result<Self> {
        let stats: Statistics = samples.iter().copied().collect();
        let mean = stats
            .mean()
            .ok_or_else(|| Error::Domain("no observations supplied".into()))?;
        Self::new(stats.samples() as u64, mean, sigma, prior)
    }

    /// Sample size `n`.
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Sample mean `ȳ`.
    pub fn sample_mean(&self) -> Real {
        self.sample_mean
    }

    /// Population standard deviation `σ`.
    pub fn sigma(&self) -> Real {
        self.sigma
    }

    /// The prior the posterior was built from.
    pub fn prior(&self) -> NormalPrior {
        self.prior
    }

    /// Interval `mean ± t·sd` for when σ is itself estimated from the
    /// sample, with `t` from Student's t on `n − 1` degrees of freedom.
    pub fn student_t_credible_interval(&self, mass: Probability) -> Result<Interval> {
        check_mass(mass)?;
        ensure!(
            self.observations >= 2,
            "an estimated sigma needs at least two observations"
        );
        let t = StudentTDistribution::new((self.observations - 1) as Real)?
            .inverse_cdf(0.5 * (1.0 + mass))?;
        let half = t * self.std_dev();
        Ok(Interval {
            lower: self.mean() - half,
            upper: self.mean() + half,
        })
    }
}

impl Posterior for NormalMean {
    type Distribution = NormalDistribution;

    fn distribution(&self) -> &NormalDistribution {
        &self.posterior
    }

    fn mean(&self) -> Real {
        self.posterior.location()
    }

    fn variance(&self) -> Real {
        self.posterior.scale() * self.posterior.scale()
    }

    fn mode(&self) -> Option<Real> {
        Some(self.posterior.location())
    }
}

/// Posterior weights over a discrete set of candidate means.
///
/// Each candidate `μᵢ` is weighted by `priorᵢ · φ((ȳ − μᵢ)√n/σ)`; the
/// result is normalised to sum to one.
pub fn discrete_prior_posterior(
    sample_mean: Real,
    observations: u64,
    sigma: Real,
    means: &[Real],
    prior: &[Real],
) -> Result<Vec<Real>> {
    if means.len() != prior.len() {
        return Err(Error::DimensionMismatch {
            expected: means.len(),
            found: prior.len(),
        });
    }
    ensure!(observations > 0, "at least one observation is required");
    ensure!(sigma > 0.0 && sigma.is_finite(), "sigma must be positive, got {sigma}");
    ensure!(
        prior.iter().all(|w| *w >= 0.0 && w.is_finite()),
        "prior weights must be finite and non-negative"
    );
    let se = sigma / (observations as Real).sqrt();
    let mut post: Vec<Real> = means
        .iter()
        .zip(prior)
        .map(|(mu, w)| w * normal_pdf((sample_mean - mu) / se))
        .collect();
    let total: Real = post.iter().sum();
    ensure!(
        total > 0.0,
        "posterior weights vanish; the observation is incompatible with the prior"
    );
    post.iter_mut().for_each(|w| *w /= total);
    Ok(post)
}
