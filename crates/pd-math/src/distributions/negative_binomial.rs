//! Negative binomial distribution.

use pd_core::{errors::Result, ensure, Integer, Probability, Real};
use rand::Rng;

use super::poisson::poisson_count;
use super::{check_positive, DiscreteDistribution, Moments};
use crate::sampling::standard_gamma;
use crate::solvers1d::discrete_quantile;
use crate::special::{ln_factorial, ln_gamma, regularized_incomplete_beta};

/// Number of failures before the `r`-th success in trials with success
/// probability `ρ`. `r` may be any positive real.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeBinomialDistribution {
    successes: Real,
    p: Probability,
}

impl NegativeBinomialDistribution {
    /// Failures before the `successes`-th success; `successes` may be fractional.
    pub fn new(successes: Real, p: Probability) -> Result<Self> {
        check_positive("negative binomial success count", successes)?;
        ensure!(
            p > 0.0 && p <= 1.0,
            "negative binomial success probability must lie in (0, 1], got {p}"
        );
        Ok(Self { successes, p })
    }

    /// Target successes `r`.
    pub fn successes(&self) -> Real {
        self.successes
    }

    /// Success probability.
    pub fn p(&self) -> Probability {
        self.p
    }
}

impl DiscreteDistribution for NegativeBinomialDistribution {
    fn pmf(&self, k: Integer) -> Real {
        if k < 0 {
            return 0.0;
        }
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: Integer) -> Real {
        if k < 0 {
            return f64::NEG_INFINITY;
        }
        let r = self.successes;
        let failures = if k == 0 { 0.0 } else { k as Real * (-self.p).ln_1p() };
        ln_gamma(k as Real + r) - ln_factorial(k as u64) - ln_gamma(r) + r * self.p.ln() + failures
    }

    /// `I_ρ(r, k + 1)`.
    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < 0 {
            return Ok(0.0);
        }
        regularized_incomplete_beta(self.successes, k as Real + 1.0, self.p)
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        discrete_quantile(|k| self.cdf(k), p, 0, None)
    }

    /// Gamma–Poisson mixture.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        if self.p == 1.0 {
            return 0;
        }
        let lambda = standard_gamma(self.successes, rng) * (1.0 - self.p) / self.p;
        if lambda <= 0.0 {
            return 0;
        }
        poisson_count(lambda, rng) as Integer
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (0, None)
    }
}

impl Moments for NegativeBinomialDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.successes * (1.0 - self.p) / self.p)
    }

    fn variance(&self) -> Option<Real> {
        Some(self.successes * (1.0 - self.p) / (self.p * self.p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_numbers::MersenneTwisterUniformRng;
    use crate::statistics::Statistics;
    use approx::assert_abs_diff_eq;

    #[test]
    fn twenty_successes_table() {
        let ks = [10, 11, 12, 16, 25, 40];
        let pmf = [
            0.018_654_400_482_773_78,
            0.025_437_818_840_146_065,
            0.032_857_182_668_522,
            0.059_079_741_913_592_44,
            0.040_041_398_962_557_65,
            0.001_211_948_511_977_531_6,
        ];
        let cdf = [
            0.049_368_573_352_694_51,
            0.074_806_392_192_840_58,
            0.107_663_574_861_362_58,
            0.308_859_658_514_847_97,
            0.814_350_982_764_494_8,
            0.996_891_198_670_336_7,
        ];
        let d = NegativeBinomialDistribution::new(20.0, 0.5).unwrap();
        for (i, &k) in ks.iter().enumerate() {
            assert_abs_diff_eq!(d.pmf(k), pmf[i], epsilon = 1e-11);
            assert_abs_diff_eq!(d.cdf(k).unwrap(), cdf[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn sampler_moments() {
        let d = NegativeBinomialDistribution::new(3.5, 0.3).unwrap();
        let mut rng = MersenneTwisterUniformRng::new(21);
        let s: Statistics = (0..50_000).map(|_| d.sample(&mut rng) as Real).collect();
        let se = (d.variance().unwrap() / 50_000.0).sqrt();
        assert!((s.mean().unwrap() - d.mean().unwrap()).abs() < 4.0 * se);
    }

    #[test]
    fn quantile_roundtrip() {
        let d = NegativeBinomialDistribution::new(20.0, 0.5).unwrap();
        let c = d.cdf(25).unwrap();
        assert_eq!(d.inverse_cdf(c).unwrap(), 25);
        assert_eq!(d.inverse_cdf(c + 1e-6).unwrap(), 26);
    }
}
