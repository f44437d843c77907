//! Inference on the category probabilities of a multinomial.

use pd_core::{errors::Result, ensure, Probability, Real};
use pd_math::distributions::{BetaDistribution, DirichletDistribution};
use rand::Rng;

use crate::interval::{self, Interval};

/// Dirichlet prior on the probability vector.
#[derive(Debug, Clone, PartialEq)]
pub enum DirichletPrior {
    /// Dirichlet(1, …, 1), uniform on the simplex.
    Flat,
    /// Dirichlet(½, …, ½).
    Jeffreys,
    /// Explicit concentrations, one per category.
    Dirichlet(Vec<Real>),
}

impl DirichletPrior {
    /// Concentrations for `categories` categories. An explicit vector of
    /// another length is a domain error.
    pub fn concentrations(&self, categories: usize) -> Result<Vec<Real>> {
        match self {
            DirichletPrior::Flat => Ok(vec![1.0; categories]),
            DirichletPrior::Jeffreys => Ok(vec![0.5; categories]),
            DirichletPrior::Dirichlet(alpha) => {
                ensure!(
                    alpha.len() == categories,
                    "dirichlet prior has {} concentrations for {categories} observed categories",
                    alpha.len()
                );
                Ok(alpha.clone())
            }
        }
    }
}

/// Posterior Dirichlet(α + x) of the category probabilities after
/// observing the counts `x`.
#[derive(Debug, Clone)]
pub struct MultinomialProportions {
    counts: Vec<u64>,
    prior: DirichletPrior,
    posterior: DirichletDistribution,
}

impl MultinomialProportions {
    /// Posterior from per-category counts; at least two categories.
    pub fn new(counts: &[u64], prior: DirichletPrior) -> Result<Self> {
        ensure!(counts.len() >= 2, "a multinomial needs at least two categories");
        let alpha: Vec<Real> = prior
            .concentrations(counts.len())?
            .iter()
            .zip(counts)
            .map(|(a, &x)| a + x as Real)
            .collect();
        tracing::debug!(?alpha, "multinomial proportions posterior");
        Ok(Self {
            counts: counts.to_vec(),
            prior,
            posterior: DirichletDistribution::new(&alpha)?,
        })
    }

    /// Observed counts.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// The prior the posterior was built from.
    pub fn prior(&self) -> &DirichletPrior {
        &self.prior
    }

    /// The posterior Dirichlet law.
    pub fn distribution(&self) -> &DirichletDistribution {
        &self.posterior
    }

    /// Number of categories.
    pub fn categories(&self) -> usize {
        self.counts.len()
    }

    /// Posterior density at the probability vector `pi`.
    pub fn pdf(&self, pi: &[Real]) -> Result<Real> {
        Ok(self.ln_pdf(pi)?.exp())
    }

    /// Log posterior density; `−∞` off the simplex.
    pub fn ln_pdf(&self, pi: &[Real]) -> Result<Real> {
        ensure!(
            pi.len() == self.categories(),
            "probability vector has {} entries for {} categories",
            pi.len(),
            self.categories()
        );
        self.posterior.ln_pdf(pi)
    }

    /// One probability vector drawn from the posterior.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Real> {
        self.posterior.sample(rng)
    }

    /// Posterior mean `(αᵢ + xᵢ) / Σ(α + x)`.
    pub fn mean(&self) -> Vec<Real> {
        self.posterior.mean()
    }

    /// Marginal posterior of category `i`, `Beta(aᵢ, a₀ − aᵢ)` with
    /// `a₀ = Σ a`.
    pub fn marginal(&self, i: usize) -> Result<BetaDistribution> {
        let alpha = self.posterior.alpha();
        ensure!(
            i < alpha.len(),
            "category {i} out of range for {} categories",
            alpha.len()
        );
        let total: Real = alpha.iter().sum();
        BetaDistribution::new(alpha[i], total - alpha[i])
    }

    /// Equal-tail marginal interval holding `mass` for each category.
    pub fn credible_intervals(&self, mass: Probability) -> Result<Vec<Interval>> {
        (0..self.categories())
            .map(|i| interval::credible_interval(&self.marginal(i)?, mass))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pd_core::Error;
    use pd_math::distributions::ContinuousDistribution;
    use pd_math::statistics::Statistics;
    use pd_math::MersenneTwisterUniformRng;

    #[test]
    fn posterior_adds_counts() {
        let post = MultinomialProportions::new(&[3, 1, 0], DirichletPrior::Flat).unwrap();
        assert_eq!(post.distribution().alpha(), &[4.0, 2.0, 1.0]);
        let mean = post.mean();
        assert_abs_diff_eq!(mean[0], 4.0 / 7.0, epsilon = 1e-15);
        assert_abs_diff_eq!(mean[2], 1.0 / 7.0, epsilon = 1e-15);
        // Dir(4, 2, 1) at (½, ¼, ¼): Γ(7)/(Γ(4)Γ(2)) · ½³ · ¼
        assert_abs_diff_eq!(post.pdf(&[0.5, 0.25, 0.25]).unwrap(), 120.0 / 32.0, epsilon = 1e-12);
    }

    #[test]
    fn length_mismatch_is_domain_error() {
        let prior = DirichletPrior::Dirichlet(vec![1.0, 1.0]);
        assert!(matches!(
            MultinomialProportions::new(&[1, 2, 3], prior),
            Err(Error::Domain(_))
        ));
        let post = MultinomialProportions::new(&[1, 2, 3], DirichletPrior::Jeffreys).unwrap();
        assert!(matches!(post.pdf(&[0.5, 0.5]), Err(Error::Domain(_))));
        assert!(matches!(post.marginal(3), Err(Error::Domain(_))));
        assert!(MultinomialProportions::new(&[4], DirichletPrior::Flat).is_err());
    }

    #[test]
    fn two_categories_match_the_binomial_posterior() {
        let post = MultinomialProportions::new(&[7, 3], DirichletPrior::Flat).unwrap();
        let marginal = post.marginal(0).unwrap();
        assert_eq!((marginal.alpha(), marginal.beta()), (8.0, 4.0));
        let ci = &post.credible_intervals(0.9).unwrap()[0];
        assert_abs_diff_eq!(marginal.cdf(ci.lower).unwrap(), 0.05, epsilon = 1e-8);
        assert_abs_diff_eq!(marginal.cdf(ci.upper).unwrap(), 0.95, epsilon = 1e-8);
    }

    #[test]
    fn samples_lie_on_the_simplex() {
        let post = MultinomialProportions::new(&[10, 5, 5], DirichletPrior::Jeffreys).unwrap();
        let mut rng = MersenneTwisterUniformRng::new(9);
        let draws: Vec<Vec<Real>> = (0..20_000).map(|_| post.sample(&mut rng)).collect();
        for d in draws.iter().take(100) {
            assert_abs_diff_eq!(d.iter().sum::<Real>(), 1.0, epsilon = 1e-12);
        }
        let first: Statistics = draws.iter().map(|d| d[0]).collect();
        assert!((first.mean().unwrap() - post.mean()[0]).abs() < 0.005);
    }
}
