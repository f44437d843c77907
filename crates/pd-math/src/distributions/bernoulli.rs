//! Bernoulli distribution.

use pd_core::{errors::Result, Integer, Probability, Real};
use rand::Rng;

use super::{check_probability, check_unit_interval, DiscreteDistribution, Moments};

/// Single trial with success probability `ρ`, valued in `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliDistribution {
    p: Probability,
}

impl BernoulliDistribution {
    /// A Bernoulli trial with success probability `p ∈ [0, 1]`.
    pub fn new(p: Probability) -> Result<Self> {
        check_unit_interval("bernoulli success probability", p)?;
        Ok(Self { p })
    }

    /// Success probability.
    pub fn p(&self) -> Probability {
        self.p
    }
}

impl DiscreteDistribution for BernoulliDistribution {
    fn pmf(&self, k: Integer) -> Real {
        match k {
            0 => 1.0 - self.p,
            1 => self.p,
            _ => 0.0,
        }
    }

    fn cdf(&self, k: Integer) -> Result<Probability> {
        Ok(match k {
            k if k < 0 => 0.0,
            0 => 1.0 - self.p,
            _ => 1.0,
        })
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        check_probability(p)?;
        Ok(if p <= 1.0 - self.p { 0 } else { 1 })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        let u: Real = rng.gen();
        Integer::from(u < self.p)
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (0, Some(1))
    }
}

impl Moments for BernoulliDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.p)
    }

    fn variance(&self) -> Option<Real> {
        Some(self.p * (1.0 - self.p))
    }
}
