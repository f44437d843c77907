//! Hypergeometric distribution.

use pd_core::{errors::Result, ensure, Integer, Probability, Real};
use rand::Rng;

use super::{check_probability, DiscreteDistribution, Moments};
use crate::special::ln_choose;

/// Number of marked items in `n` draws without replacement from a
/// population of `N` items of which `K` are marked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HypergeometricDistribution {
    population: u64,
    marked: u64,
    draws: u64,
}

impl HypergeometricDistribution {
    /// Draw `draws ≤ population` items from a population containing
    /// `marked ≤ population` marked ones. Zero draws give a point mass at 0.
    pub fn new(population: u64, marked: u64, draws: u64) -> Result<Self> {
        ensure!(population >= 1, "hypergeometric population must be non-empty");
        ensure!(
            marked <= population,
            "marked count {marked} exceeds population {population}"
        );
        ensure!(
            draws <= population,
            "draw count must lie in [0, {population}], got {draws}"
        );
        Ok(Self {
            population,
            marked,
            draws,
        })
    }

    /// Population size `N`.
    pub fn population(&self) -> u64 {
        self.population
    }

    /// Marked items `K`.
    pub fn marked(&self) -> u64 {
        self.marked
    }

    /// Draws `n`.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    fn lower(&self) -> Integer {
        (self.draws + self.marked).saturating_sub(self.population) as Integer
    }

    fn upper(&self) -> Integer {
        self.marked.min(self.draws) as Integer
    }
}

impl DiscreteDistribution for HypergeometricDistribution {
    fn pmf(&self, k: Integer) -> Real {
        if k < self.lower() || k > self.upper() {
            return 0.0;
        }
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: Integer) -> Real {
        if k < self.lower() || k > self.upper() {
            return f64::NEG_INFINITY;
        }
        let k = k as u64;
        ln_choose(self.marked, k) + ln_choose(self.population - self.marked, self.draws - k)
            - ln_choose(self.population, self.draws)
    }

    /// Direct summation of the mass over the bounded support; linear in
    /// `k`, so it is the slow path for large populations.
    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < self.lower() {
            return Ok(0.0);
        }
        if k >= self.upper() {
            return Ok(1.0);
        }
        let total: Real = (self.lower()..=k).map(|i| self.pmf(i)).sum();
        Ok(total.min(1.0))
    }

    /// Sequential search accumulating the mass from the lower bound.
    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        check_probability(p)?;
        let (lower, upper) = (self.lower(), self.upper());
        if p == 0.0 {
            return Ok(lower);
        }
        if p == 1.0 {
            return Ok(upper);
        }
        let target = p * (1.0 - 64.0 * f64::EPSILON);
        let mut acc = 0.0;
        for k in lower..upper {
            acc += self.pmf(k);
            if acc >= target {
                return Ok(k);
            }
        }
        Ok(upper)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        let u: Real = rng.gen();
        let mut acc = 0.0;
        for k in self.lower()..self.upper() {
            acc += self.pmf(k);
            if u < acc {
                return k;
            }
        }
        self.upper()
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (self.lower(), Some(self.upper()))
    }
}

impl Moments for HypergeometricDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.draws as Real * self.marked as Real / self.population as Real)
    }

    fn variance(&self) -> Option<Real> {
        let (n, k, d) = (
            self.population as Real,
            self.marked as Real,
            self.draws as Real,
        );
        if self.population == 1 {
            return Some(0.0);
        }
        Some(d * (k / n) * (1.0 - k / n) * (n - d) / (n - 1.0))
    }
}
