//! Binomial distribution.

use pd_core::{errors::Result, ensure, Integer, Probability, Real};
use rand::Rng;

use super::{check_unit_interval, BetaDistribution, ContinuousDistribution, DiscreteDistribution, Moments};
use crate::solvers1d::discrete_quantile;
use crate::special::{ln_choose, regularized_incomplete_beta};

/// Trial counts up to this size are sampled as a direct Bernoulli sum.
const DIRECT_TRIALS: u64 = 64;

/// Number of successes in `n` independent trials with probability `ρ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialDistribution {
    trials: u64,
    p: Probability,
}

impl BinomialDistribution {
    /// Successes in `trials` independent trials of probability `p`.
    pub fn new(trials: u64, p: Probability) -> Result<Self> {
        check_unit_interval("binomial success probability", p)?;
        ensure!(
            trials <= Integer::MAX as u64,
            "binomial trial count {trials} is too large"
        );
        Ok(Self { trials, p })
    }

    /// Number of trials `n`.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Success probability per trial.
    pub fn p(&self) -> Probability {
        self.p
    }
}

/// Binomial variate by Knuth's beta splitting down to a Bernoulli sum.
pub(crate) fn binomial_count<R: Rng + ?Sized>(trials: u64, p: Probability, rng: &mut R) -> u64 {
    let (mut n, mut p) = (trials, p);
    let mut k = 0;
    while n > DIRECT_TRIALS {
        if p <= 0.0 {
            return k;
        }
        if p >= 1.0 {
            return k + n;
        }
        let a = 1 + n / 2;
        let b = n + 1 - a;
        let x = match BetaDistribution::new(a as Real, b as Real) {
            Ok(beta) => beta.sample(rng),
            Err(_) => break,
        };
        if x >= p {
            // successes all fall among the a − 1 order statistics below x
            n = a - 1;
            p /= x;
        } else {
            k += a;
            n = b - 1;
            p = (p - x) / (1.0 - x);
        }
    }
    k + (0..n).filter(|_| rng.gen::<Real>() < p).count() as u64
}

impl DiscreteDistribution for BinomialDistribution {
    fn pmf(&self, k: Integer) -> Real {
        if k < 0 || k as u64 > self.trials {
            return 0.0;
        }
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: Integer) -> Real {
        if k < 0 || k as u64 > self.trials {
            return f64::NEG_INFINITY;
        }
        let (n, k) = (self.trials, k as u64);
        let successes = if k == 0 { 0.0 } else { k as Real * self.p.ln() };
        let failures = if k == n { 0.0 } else { (n - k) as Real * (-self.p).ln_1p() };
        ln_choose(n, k) + successes + failures
    }

    /// `I_{1−ρ}(n − k, k + 1)`.
    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < 0 {
            return Ok(0.0);
        }
        if k as u64 >= self.trials {
            return Ok(1.0);
        }
        let k = k as Real;
        regularized_incomplete_beta(self.trials as Real - k, k + 1.0, 1.0 - self.p)
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        discrete_quantile(|k| self.cdf(k), p, 0, Some(self.trials as Integer))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        binomial_count(self.trials, self.p, rng) as Integer
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (0, Some(self.trials as Integer))
    }
}

impl Moments for BinomialDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.trials as Real * self.p)
    }

    fn variance(&self) -> Option<Real> {
        Some(self.trials as Real * self.p * (1.0 - self.p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_numbers::MersenneTwisterUniformRng;
    use crate::statistics::Statistics;
    use approx::assert_abs_diff_eq;

    fn summed_cdf(d: &BinomialDistribution, k: Integer) -> Real {
        (0..=k).map(|i| d.pmf(i)).sum()
    }

    #[test]
    fn known_values() {
        let d = BinomialDistribution::new(25, 0.3897).unwrap();
        assert_abs_diff_eq!(d.pmf(9), 0.156_866_650_6, epsilon = 1e-9);
        assert_abs_diff_eq!(d.cdf(9).unwrap(), 0.466_580_671_9, epsilon = 1e-9);
    }

    #[test]
    fn fair_coin_table() {
        let pmf = [
            9.536_743_164_062_5e-7, 1.907_348_632_812_5e-5, 0.000_181_198_1, 0.001_087_188_7,
            0.004_620_552_1, 0.014_785_766_6, 0.036_964_416_5, 0.073_928_833, 0.120_134_353_6,
            0.160_179_138_2, 0.176_197_052,
        ];
        let cdf = [
            9.536_743_164_062_5e-7, 2.002_716_064_453_12e-5, 0.000_201_225_3, 0.001_288_414,
            0.005_908_966_1, 0.020_694_732_7, 0.057_659_149_2, 0.131_587_982_2, 0.251_722_335_8,
            0.411_901_474, 0.588_098_526,
        ];
        let d = BinomialDistribution::new(20, 0.5).unwrap();
        for k in 0..=10 {
            assert_abs_diff_eq!(d.pmf(k), pmf[k as usize], epsilon = 1e-9);
            assert_abs_diff_eq!(d.pmf(20 - k), pmf[k as usize], epsilon = 1e-9);
            assert_abs_diff_eq!(d.cdf(k).unwrap(), cdf[k as usize], epsilon = 1e-9);
        }
        assert_eq!(d.cdf(20).unwrap(), 1.0);
    }

    #[test]
    fn incomplete_beta_matches_summation() {
        let d = BinomialDistribution::new(37, 0.62).unwrap();
        for k in 0..37 {
            assert_abs_diff_eq!(d.cdf(k).unwrap(), summed_cdf(&d, k), epsilon = 1e-12);
        }
    }

    #[test]
    fn quantile_inverts_cdf() {
        let d = BinomialDistribution::new(20, 0.5).unwrap();
        let at_nine = d.cdf(9).unwrap();
        assert_eq!(d.inverse_cdf(at_nine).unwrap(), 9);
        assert_eq!(d.inverse_cdf(0.42).unwrap(), 10);
        assert_eq!(d.inverse_cdf(0.0).unwrap(), 0);
        assert_eq!(d.inverse_cdf(1.0).unwrap(), 20);
    }

    #[test]
    fn degenerate_probabilities() {
        let d = BinomialDistribution::new(5, 1.0).unwrap();
        assert_eq!(d.pmf(5), 1.0);
        assert_eq!(d.cdf(4).unwrap(), 0.0);
        let d = BinomialDistribution::new(5, 0.0).unwrap();
        assert_eq!(d.pmf(0), 1.0);
    }

    #[test]
    fn large_trial_sampler_moments() {
        let d = BinomialDistribution::new(10_000, 0.3).unwrap();
        let mut rng = MersenneTwisterUniformRng::new(11);
        let s: Statistics = (0..20_000).map(|_| d.sample(&mut rng) as Real).collect();
        let se = (d.variance().unwrap() / 20_000.0).sqrt();
        assert!((s.mean().unwrap() - 3_000.0).abs() < 4.0 * se);
        assert!((s.variance().unwrap() / d.variance().unwrap() - 1.0).abs() < 0.05);
    }
}
