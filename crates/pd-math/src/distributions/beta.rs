//! Beta distribution.

use pd_core::{errors::Result, Probability, Real};
use rand::Rng;

use super::{check_positive, check_probability, ContinuousDistribution, Moments};
use crate::sampling::ln_standard_gamma;
use crate::solvers1d::{bisection_default, bisection_log_default};
use crate::special::{beta as beta_fn, ln_beta, regularized_incomplete_beta};

/// Quantiles closer than this to an endpoint are refined to relative precision.
const TAIL: Real = 1e-3;

/// Beta distribution with shape parameters `α` and `β` on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaDistribution {
    alpha: Real,
    beta: Real,
}

impl BetaDistribution {
    /// Create a Beta(α, β) distribution; both shapes must be positive.
    pub fn new(alpha: Real, beta: Real) -> Result<Self> {
        check_positive("beta shape alpha", alpha)?;
        check_positive("beta shape beta", beta)?;
        Ok(Self { alpha, beta })
    }

    /// Shape parameter α.
    pub fn alpha(&self) -> Real {
        self.alpha
    }

    /// Shape parameter β.
    pub fn beta(&self) -> Real {
        self.beta
    }

    /// Mode `(α − 1)/(α + β − 2)`; `None` unless both shapes exceed one.
    pub fn mode(&self) -> Option<Real> {
        (self.alpha > 1.0 && self.beta > 1.0)
            .then(|| (self.alpha - 1.0) / (self.alpha + self.beta - 2.0))
    }

    /// The quantile `x` together with `1 − x`, the smaller of the two
    /// resolved to relative rather than absolute precision. `p` must lie
    /// strictly inside `(0, 1)`.
    pub(crate) fn quantile_with_complement(&self, p: Probability) -> Result<(Real, Real)> {
        let x = bisection_default(|x| self.cdf(x), p, 0.0, 1.0)?;
        if x <= TAIL {
            let x = bisection_log_default(|x| self.cdf(x), p, x.max(f64::MIN_POSITIVE))?;
            return Ok((x, 1.0 - x));
        }
        if x >= 1.0 - TAIL {
            // 1 − X ~ Beta(β, α)
            let mirror = Self {
                alpha: self.beta,
                beta: self.alpha,
            };
            let start = (1.0 - x).max(f64::MIN_POSITIVE);
            let y = bisection_log_default(|y| mirror.cdf(y), 1.0 - p, start)?;
            return Ok((1.0 - y, y));
        }
        Ok((x, 1.0 - x))
    }

    /// Density at an endpoint whose exponent is `shape_here − 1`.
    fn endpoint_density(&self, shape_here: Real) -> Real {
        if shape_here < 1.0 {
            f64::INFINITY
        } else if shape_here == 1.0 {
            1.0 / beta_fn(self.alpha, self.beta)
        } else {
            0.0
        }
    }
}

impl ContinuousDistribution for BetaDistribution {
    fn pdf(&self, x: Real) -> Real {
        if !(0.0..=1.0).contains(&x) {
            return 0.0;
        }
        if x == 0.0 {
            return self.endpoint_density(self.alpha);
        }
        if x == 1.0 {
            return self.endpoint_density(self.beta);
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: Real) -> Real {
        if !(0.0..=1.0).contains(&x) {
            return f64::NEG_INFINITY;
        }
        if x == 0.0 || x == 1.0 {
            return self.pdf(x).ln();
        }
        (self.alpha - 1.0) * x.ln() + (self.beta - 1.0) * (-x).ln_1p() - ln_beta(self.alpha, self.beta)
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x <= 0.0 {
            return Ok(0.0);
        }
        if x >= 1.0 {
            return Ok(1.0);
        }
        regularized_incomplete_beta(self.alpha, self.beta, x)
    }

    /// Bisection on `[0, 1]` to the configured absolute precision, then in
    /// `ln x` when the quantile sits near an endpoint.
    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(1.0);
        }
        Ok(self.quantile_with_complement(p)?.0)
    }

    /// Two-component Dirichlet draw `G_α / (G_α + G_β)`, formed in log
    /// space.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        let la = ln_standard_gamma(self.alpha, rng);
        let lb = ln_standard_gamma(self.beta, rng);
        1.0 / (1.0 + (lb - la).exp())
    }

    fn support(&self) -> (Real, Real) {
        (0.0, 1.0)
    }
}

impl Moments for BetaDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.alpha / (self.alpha + self.beta))
    }

    fn variance(&self) -> Option<Real> {
        let s = self.alpha + self.beta;
        Some(self.alpha * self.beta / (s * s * (s + 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_numbers::MersenneTwisterUniformRng;
    use crate::statistics::Statistics;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pd_core::Error;

    const XS: [Real; 19] = [
        0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7, 0.75, 0.8,
        0.85, 0.9, 0.95,
    ];

    #[test]
    fn beta_half_two_table() {
        let pdf = [
            3.186_396_867_9, 2.134_537_420_6, 1.646_017_922_1, 1.341_640_786_5, 1.125,
            0.958_514_475_6, 0.824_025_398_4, 0.711_512_473_5, 0.614_918_693_8, 0.530_330_085_9,
            0.455_084_907_2, 0.387_298_334_6, 0.325_591_178_3, 0.268_926_437_1, 0.216_506_350_9,
            0.167_705_098_3, 0.122_023_382_5, 0.079_056_941_5, 0.038_474_188_2,
        ];
        let cdf = [
            0.329_820_026_7, 0.458_530_260_7, 0.551_900_126_8, 0.626_099_033_7, 0.6875,
            0.739_425_452_6, 0.783_880_571_3, 0.822_192_191_6, 0.855_296_001_4, 0.883_883_476_5,
            0.908_484_314_7, 0.929_516_003_1, 0.947_315_285_4, 0.962_159_030_5, 0.974_278_579_3,
            0.983_869_910_1, 0.991_101_029_2, 0.996_117_463, 0.999_046_420_3,
        ];
        let d = BetaDistribution::new(0.5, 2.0).unwrap();
        for (i, &x) in XS.iter().enumerate() {
            assert_abs_diff_eq!(d.pdf(x), pdf[i], epsilon = 1e-9);
            assert_abs_diff_eq!(d.cdf(x).unwrap(), cdf[i], epsilon = 1e-9);
        }
        assert_eq!(d.pdf(1.0), 0.0);
        assert_eq!(d.cdf(1.0).unwrap(), 1.0);
    }

    #[test]
    fn cdf_saturates_near_one() {
        let d = BetaDistribution::new(2.0, 5.0).unwrap();
        assert_abs_diff_eq!(d.cdf(0.999_999_999_999_999_999).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn quantile_known_values() {
        let d = BetaDistribution::new(10.001, 5.0001).unwrap();
        assert_abs_diff_eq!(d.inverse_cdf(0.01).unwrap(), 0.3726, epsilon = 1e-4);
        assert_abs_diff_eq!(d.inverse_cdf(0.5).unwrap(), 0.6742, epsilon = 1e-4);
        assert_abs_diff_eq!(d.inverse_cdf(0.99).unwrap(), 0.8981, epsilon = 1e-4);
    }

    #[test]
    fn tail_quantiles_keep_relative_precision() {
        let d = BetaDistribution::new(0.1, 3.0).unwrap();
        for &p in &[1e-6, 1e-3, 0.02] {
            let x = d.inverse_cdf(p).unwrap();
            assert!(x > 0.0);
            assert_relative_eq!(d.cdf(x).unwrap(), p, max_relative = 1e-7);
        }
        // upper tail through the complement
        let d = BetaDistribution::new(3.0, 0.1).unwrap();
        let mirror = BetaDistribution::new(0.1, 3.0).unwrap();
        let (x, y) = d.quantile_with_complement(1.0 - 1e-6).unwrap();
        assert!(y > 0.0 && y < 1e-3);
        assert_eq!(x, 1.0 - y);
        assert_relative_eq!(mirror.cdf(y).unwrap(), 1e-6, max_relative = 1e-7);
    }

    #[test]
    fn quantile_rejects_bad_probability() {
        let d = BetaDistribution::new(2.0, 3.0).unwrap();
        assert!(matches!(d.inverse_cdf(-0.1), Err(Error::Domain(_))));
        assert!(matches!(d.inverse_cdf(1.1), Err(Error::Domain(_))));
        assert_eq!(d.inverse_cdf(0.0).unwrap(), 0.0);
        assert_eq!(d.inverse_cdf(1.0).unwrap(), 1.0);
    }

    #[test]
    fn endpoint_densities() {
        assert_eq!(BetaDistribution::new(0.5, 2.0).unwrap().pdf(0.0), f64::INFINITY);
        assert_abs_diff_eq!(BetaDistribution::new(1.0, 3.0).unwrap().pdf(0.0), 3.0, epsilon = 1e-12);
        assert_eq!(BetaDistribution::new(2.0, 3.0).unwrap().pdf(0.0), 0.0);
    }

    #[test]
    fn sample_moments() {
        let d = BetaDistribution::new(2.0, 5.0).unwrap();
        let mut rng = MersenneTwisterUniformRng::new(77);
        let s: Statistics = (0..100_000).map(|_| d.sample(&mut rng)).collect();
        assert!((s.mean().unwrap() - d.mean().unwrap()).abs() < 0.002);
        assert!((s.variance().unwrap() - d.variance().unwrap()).abs() < 0.001);
    }
}
