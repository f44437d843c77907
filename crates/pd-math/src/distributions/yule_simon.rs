//! Yule–Simon distribution.

use pd_core::{errors::Result, Integer, Probability, Real};
use rand::Rng;

use super::{check_positive, DiscreteDistribution, Moments};
use crate::random_numbers::standard_exponential;
use crate::solvers1d::discrete_quantile;
use crate::special::ln_beta;

/// `P(k) = ρ B(k, ρ + 1)` on `k ≥ 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YuleSimonDistribution {
    rho: Real,
}

impl YuleSimonDistribution {
    /// A Yule–Simon law with shape `ρ > 0`.
    pub fn new(rho: Real) -> Result<Self> {
        check_positive("yule-simon shape", rho)?;
        Ok(Self { rho })
    }

    /// Shape ρ.
    pub fn rho(&self) -> Real {
        self.rho
    }

    /// Always 1.
    pub fn mode(&self) -> Integer {
        1
    }
}

impl DiscreteDistribution for YuleSimonDistribution {
    fn pmf(&self, k: Integer) -> Real {
        if k < 1 {
            return 0.0;
        }
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: Integer) -> Real {
        if k < 1 {
            return f64::NEG_INFINITY;
        }
        self.rho.ln() + ln_beta(k as Real, self.rho + 1.0)
    }

    /// `1 − k B(k, ρ + 1)`.
    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < 1 {
            return Ok(0.0);
        }
        let k = k as Real;
        Ok(-(k.ln() + ln_beta(k, self.rho + 1.0)).exp() + 1.0)
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        discrete_quantile(|k| self.cdf(k), p, 1, None)
    }

    /// Geometric with success probability `e^{−W}`, `W ~ Exp(ρ)` (Devroye,
    /// p. 553).
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        let e1 = standard_exponential(rng);
        let e2 = standard_exponential(rng);
        let failure = -(-e2 / self.rho).exp_m1();
        let draw = (-e1 / failure.ln()).ceil();
        (draw as Integer).max(1)
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (1, None)
    }
}

impl Moments for YuleSimonDistribution {
    fn mean(&self) -> Option<Real> {
        (self.rho > 1.0).then(|| self.rho / (self.rho - 1.0))
    }

    fn variance(&self) -> Option<Real> {
        let r = self.rho;
        (r > 2.0).then(|| r * r / ((r - 1.0) * (r - 1.0) * (r - 2.0)))
    }
}
