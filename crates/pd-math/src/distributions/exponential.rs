//! Exponential distribution.

use pd_core::{errors::Result, Probability, Real};
use rand::Rng;

use super::{check_positive, check_probability, ContinuousDistribution, Moments};
use crate::random_numbers::uniform_open01;

/// Exponential distribution with rate `λ` (mean `1/λ`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDistribution {
    rate: Real,
}

impl ExponentialDistribution {
    /// Create an Exponential(λ) distribution; `λ > 0`.
    pub fn new(rate: Real) -> Result<Self> {
        check_positive("exponential rate", rate)?;
        Ok(Self { rate })
    }

    /// Rate λ.
    pub fn rate(&self) -> Real {
        self.rate
    }
}

impl ContinuousDistribution for ExponentialDistribution {
    fn pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            0.0
        } else {
            self.rate * (-self.rate * x).exp()
        }
    }

    fn ln_pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            f64::NEG_INFINITY
        } else {
            self.rate.ln() - self.rate * x
        }
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        Ok(if x <= 0.0 { 0.0 } else { -(-self.rate * x).exp_m1() })
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        Ok(-(-p).ln_1p() / self.rate)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        // inversion on 1 − U
        -uniform_open01(rng).ln() / self.rate
    }

    fn support(&self) -> (Real, Real) {
        (0.0, f64::INFINITY)
    }
}

impl Moments for ExponentialDistribution {
    fn mean(&self) -> Option<Real> {
        Some(1.0 / self.rate)
    }

    fn variance(&self) -> Option<Real> {
        Some(1.0 / (self.rate * self.rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn closed_forms() {
        let d = ExponentialDistribution::new(2.0).unwrap();
        assert_eq!(d.pdf(-1.0), 0.0);
        assert_eq!(d.ln_pdf(-1.0), f64::NEG_INFINITY);
        assert_abs_diff_eq!(d.cdf(1.0).unwrap(), 1.0 - (-2.0_f64).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(d.inverse_cdf(0.5).unwrap(), 2.0_f64.ln() / 2.0, epsilon = 1e-15);
        assert_eq!(d.inverse_cdf(0.0).unwrap(), 0.0);
        assert_eq!(d.inverse_cdf(1.0).unwrap(), f64::INFINITY);
        assert!(d.inverse_cdf(-0.1).is_err());
        assert!(ExponentialDistribution::new(-1.0).is_err());
    }
}
