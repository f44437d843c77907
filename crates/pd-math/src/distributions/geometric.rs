//! Geometric distribution.

use pd_core::{errors::Result, ensure, Integer, Probability, Real};
use rand::Rng;

use super::{check_probability, DiscreteDistribution, Moments};
use crate::random_numbers::uniform_open01;

/// Number of failures before the first success, `P(k) = ρ(1 − ρ)ᵏ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricDistribution {
    p: Probability,
}

impl GeometricDistribution {
    /// Failures before the first success, for `p ∈ (0, 1]`.
    pub fn new(p: Probability) -> Result<Self> {
        ensure!(
            p > 0.0 && p <= 1.0,
            "geometric success probability must lie in (0, 1], got {p}"
        );
        Ok(Self { p })
    }

    /// Success probability.
    pub fn p(&self) -> Probability {
        self.p
    }
}

impl DiscreteDistribution for GeometricDistribution {
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
        if k == 0 {
            return self.p.ln();
        }
        self.p.ln() + k as Real * (-self.p).ln_1p()
    }

    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < 0 {
            return Ok(0.0);
        }
        Ok(-((k as Real + 1.0) * (-self.p).ln_1p()).exp_m1())
    }

    /// `⌈ln(1 − p)/ln(1 − ρ)⌉ − 1`, corrected by one step either way
    /// against the exact CDF.
    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        check_probability(p)?;
        if p == 0.0 || self.p == 1.0 {
            return Ok(0);
        }
        if p == 1.0 {
            return Ok(Integer::MAX);
        }
        let estimate = ((-p).ln_1p() / (-self.p).ln_1p()).ceil() - 1.0;
        let mut k = estimate.clamp(0.0, Integer::MAX as Real) as Integer;
        while k > 0 && self.cdf(k - 1)? >= p {
            k -= 1;
        }
        while self.cdf(k)? < p {
            k += 1;
        }
        Ok(k)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        if self.p == 1.0 {
            return 0;
        }
        (uniform_open01(rng).ln() / (-self.p).ln_1p()).floor() as Integer
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (0, None)
    }
}

impl Moments for GeometricDistribution {
    fn mean(&self) -> Option<Real> {
        Some((1.0 - self.p) / self.p)
    }

    fn variance(&self) -> Option<Real> {
        Some((1.0 - self.p) / (self.p * self.p))
    }
}
