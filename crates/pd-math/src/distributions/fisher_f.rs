//! Fisher–Snedecor F distribution.

use pd_core::{errors::Result, Probability, Real};
use rand::Rng;

use super::{check_positive, check_probability, BetaDistribution, ContinuousDistribution, Moments};
use crate::sampling::standard_gamma;
use crate::special::{ln_beta, regularized_incomplete_beta};

/// F distribution with `d₁` numerator and `d₂` denominator degrees of
/// freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisherFDistribution {
    d1: Real,
    d2: Real,
}

impl FisherFDistribution {
    /// An F distribution; both degrees of freedom must be positive.
    pub fn new(d1: Real, d2: Real) -> Result<Self> {
        check_positive("F numerator degrees of freedom", d1)?;
        check_positive("F denominator degrees of freedom", d2)?;
        Ok(Self { d1, d2 })
    }

    /// Numerator degrees of freedom.
    pub fn d1(&self) -> Real {
        self.d1
    }

    /// Denominator degrees of freedom.
    pub fn d2(&self) -> Real {
        self.d2
    }
}

impl ContinuousDistribution for FisherFDistribution {
    fn pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            return if self.d1 < 2.0 {
                f64::INFINITY
            } else if self.d1 == 2.0 {
                1.0
            } else {
                0.0
            };
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        if x == 0.0 {
            return self.pdf(0.0).ln();
        }
        let (d1, d2) = (self.d1, self.d2);
        0.5 * (d1 * (d1 * x).ln() + d2 * d2.ln() - (d1 + d2) * (d1 * x + d2).ln())
            - x.ln()
            - ln_beta(0.5 * d1, 0.5 * d2)
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x <= 0.0 {
            return Ok(0.0);
        }
        if x.is_infinite() {
            return Ok(1.0);
        }
        let u = self.d1 * x / (self.d1 * x + self.d2);
        regularized_incomplete_beta(0.5 * self.d1, 0.5 * self.d2, u)
    }

    /// `F = d₂X / (d₁(1 − X))` for the Beta(d₁/2, d₂/2) quantile `X`.
    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let (x, y) = BetaDistribution::new(0.5 * self.d1, 0.5 * self.d2)?.quantile_with_complement(p)?;
        Ok(self.d2 * x / (self.d1 * y))
    }

    /// Ratio of scaled chi-square variates.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        let num = 2.0 * standard_gamma(0.5 * self.d1, rng) / self.d1;
        let den = 2.0 * standard_gamma(0.5 * self.d2, rng) / self.d2;
        num / den
    }

    fn support(&self) -> (Real, Real) {
        (0.0, f64::INFINITY)
    }
}

impl Moments for FisherFDistribution {
    fn mean(&self) -> Option<Real> {
        (self.d2 > 2.0).then(|| self.d2 / (self.d2 - 2.0))
    }

    fn variance(&self) -> Option<Real> {
        let (d1, d2) = (self.d1, self.d2);
        (d2 > 4.0).then(|| {
            2.0 * d2 * d2 * (d1 + d2 - 2.0) / (d1 * (d2 - 2.0) * (d2 - 2.0) * (d2 - 4.0))
        })
    }
}
