//! Inference on a binomial proportion with a Beta prior.

use pd_core::{errors::Result, ensure, Real};
use pd_math::distributions::BetaDistribution;

use crate::posterior::Posterior;

/// Beta prior on a proportion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BetaPrior {
    /// Beta(1, 1).
    Flat,
    /// Beta(½, ½).
    Jeffreys,
    /// The improper Beta(0, 0); needs at least one success and one failure.
    Haldane,
    /// A proper Beta(α, β) prior.
    Beta {
        /// Prior successes weight α.
        alpha: Real,
        /// Prior failures weight β.
        beta: Real,
    },
}

impl BetaPrior {
    /// Shapes `(α, β)`; the Haldane prior gives `(0, 0)`.
    pub fn shapes(&self) -> (Real, Real) {
        match *self {
            BetaPrior::Flat => (1.0, 1.0),
            BetaPrior::Jeffreys => (0.5, 0.5),
            BetaPrior::Haldane => (0.0, 0.0),
            BetaPrior::Beta { alpha, beta } => (alpha, beta),
        }
    }

    /// Number of observations the prior is worth, `⌊α + β + 1⌋`.
    pub fn equivalent_sample_size(&self) -> u64 {
        let (a, b) = self.shapes();
        (a + b + 1.0).floor() as u64
    }
}

/// Posterior of a proportion π after `successes` out of `trials`:
/// Beta(α + k, β + n − k).
#[derive(Debug, Clone)]
pub struct BinomialProportion {
    successes: u64,
    trials: u64,
    prior: BetaPrior,
    posterior: BetaDistribution,
}

impl BinomialProportion {
    /// Posterior after `successes` out of `trials`. Fails when the prior is
    /// negative or the posterior would be improper.
    pub fn new(successes: u64, trials: u64, prior: BetaPrior) -> Result<Self> {
        ensure!(
            successes <= trials,
            "successes ({successes}) must not exceed trials ({trials})"
        );
        let (a, b) = prior.shapes();
        ensure!(
            a.is_finite() && b.is_finite() && a >= 0.0 && b >= 0.0,
            "beta prior shapes must be finite and non-negative, got ({a}, {b})"
        );
        let post_a = a + successes as Real;
        let post_b = b + (trials - successes) as Real;
        ensure!(
            post_a > 0.0 && post_b > 0.0,
            "posterior is improper: Beta({post_a}, {post_b})"
        );
        tracing::debug!(post_a, post_b, "binomial proportion posterior");
        Ok(Self {
            successes,
            trials,
            prior,
            posterior: BetaDistribution::new(post_a, post_b)?,
        })
    }

    /// Observed successes `k`.
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Number of trials `n`.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// The prior the posterior was built from.
    pub fn prior(&self) -> BetaPrior {
        self.prior
    }

    fn failures(&self) -> Real {
        (self.trials - self.successes) as Real
    }

    /// `k ln π + (n − k) ln(1 − π)`, with `0 · ln 0 = 0`.
    pub fn ln_likelihood(&self, pi: Real) -> Real {
        if !(0.0..=1.0).contains(&pi) {
            return f64::NEG_INFINITY;
        }
        xlogy(self.successes as Real, pi) + xlogy(self.failures(), 1.0 - pi)
    }

    /// `π^k (1 − π)^(n − k)`.
    pub fn likelihood(&self, pi: Real) -> Real {
        self.ln_likelihood(pi).exp()
    }

    /// `−2 ln L(π)`.
    pub fn deviance(&self, pi: Real) -> Real {
        -2.0 * self.ln_likelihood(pi)
    }

    /// Deviance of the point null `π = null` minus that of `π`.
    pub fn deviance_difference(&self, null: Real, pi: Real) -> Real {
        self.deviance(null) - self.deviance(pi)
    }
}

pub(crate) fn xlogy(x: Real, y: Real) -> Real {
    if x == 0.0 {
        0.0
    } else {
        x * y.ln()
    }
}

impl Posterior for BinomialProportion {
    type Distribution = BetaDistribution;

    fn distribution(&self) -> &BetaDistribution {
        &self.posterior
    }

    fn mean(&self) -> Real {
        let (a, b) = (self.posterior.alpha(), self.posterior.beta());
        a / (a + b)
    }

    fn variance(&self) -> Real {
        let (a, b) = (self.posterior.alpha(), self.posterior.beta());
        let s = a + b;
        a * b / (s * s * (s + 1.0))
    }

    fn mode(&self) -> Option<Real> {
        self.posterior.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::PointEstimate;
    use approx::assert_abs_diff_eq;
    use pd_core::Error;
    use pd_math::MersenneTwisterUniformRng;

    #[test]
    fn flat_prior_posterior() {
        let post = BinomialProportion::new(6, 20, BetaPrior::Flat).unwrap();
        assert_eq!(post.distribution().alpha(), 7.0);
        assert_eq!(post.distribution().beta(), 15.0);
        assert_abs_diff_eq!(post.mean(), 7.0 / 22.0, epsilon = 1e-15);
        assert_abs_diff_eq!(post.mode().unwrap(), 0.3, epsilon = 1e-15);
        assert_abs_diff_eq!(post.variance(), 105.0 / (484.0 * 23.0), epsilon = 1e-15);
    }

    #[test]
    fn pms_of_mean_is_variance() {
        let post = BinomialProportion::new(3, 10, BetaPrior::Jeffreys).unwrap();
        assert_eq!(post.pms(PointEstimate::Mean).unwrap(), post.variance());
        let mode = post.mode().unwrap();
        let expected = post.variance() + (post.mean() - mode).powi(2);
        assert_abs_diff_eq!(post.pms(PointEstimate::Mode).unwrap(), expected, epsilon = 1e-15);
        let median = post.median().unwrap();
        assert_abs_diff_eq!(post.cdf(median).unwrap(), 0.5, epsilon = 1e-8);
    }

    #[test]
    fn haldane_needs_mixed_outcomes() {
        assert!(matches!(
            BinomialProportion::new(0, 5, BetaPrior::Haldane),
            Err(Error::Domain(_))
        ));
        assert!(BinomialProportion::new(2, 5, BetaPrior::Haldane).is_ok());
        assert!(BinomialProportion::new(6, 5, BetaPrior::Flat).is_err());
        let bad = BetaPrior::Beta { alpha: -1.0, beta: 2.0 };
        assert!(BinomialProportion::new(1, 5, bad).is_err());
    }

    #[test]
    fn intervals() {
        let post = BinomialProportion::new(40, 100, BetaPrior::Flat).unwrap();
        let exact = post.credible_interval(0.95).unwrap();
        let normal = post.normal_credible_interval(0.95).unwrap();
        let hdi = post.hdi(0.95).unwrap();
        assert_abs_diff_eq!(post.cdf(exact.lower).unwrap(), 0.025, epsilon = 1e-8);
        assert_abs_diff_eq!(exact.lower, normal.lower, epsilon = 5e-3);
        assert_abs_diff_eq!(exact.upper, normal.upper, epsilon = 5e-3);
        assert!(hdi.width() <= exact.width() + 1e-9);
    }

    #[test]
    fn likelihood_and_deviance() {
        let post = BinomialProportion::new(3, 4, BetaPrior::Flat).unwrap();
        assert_abs_diff_eq!(post.likelihood(0.5), 0.0625, epsilon = 1e-15);
        assert_abs_diff_eq!(post.deviance(0.5), -2.0 * 0.0625_f64.ln(), epsilon = 1e-12);
        // the MLE has the smaller deviance
        assert!(post.deviance_difference(0.5, 0.75) > 0.0);
        let all = BinomialProportion::new(4, 4, BetaPrior::Flat).unwrap();
        assert_eq!(all.likelihood(1.0), 1.0);
        assert_eq!(all.likelihood(1.5), 0.0);
    }

    #[test]
    fn equivalent_sample_size() {
        assert_eq!(BetaPrior::Flat.equivalent_sample_size(), 3);
        assert_eq!(BetaPrior::Beta { alpha: 4.5, beta: 7.2 }.equivalent_sample_size(), 12);
    }

    #[test]
    fn samples_match_posterior_mean() {
        let post = BinomialProportion::new(12, 30, BetaPrior::Flat).unwrap();
        let mut rng = MersenneTwisterUniformRng::new(7);
        let n = 20_000;
        let m = (0..n).map(|_| post.sample(&mut rng)).sum::<Real>() / n as Real;
        assert_abs_diff_eq!(m, post.mean(), epsilon = 0.005);
    }
}
