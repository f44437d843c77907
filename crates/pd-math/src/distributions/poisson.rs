//! Poisson distribution.

use pd_core::{errors::Result, Integer, Probability, Real};
use rand::Rng;

use super::binomial::binomial_count;
use super::{check_positive, DiscreteDistribution, Moments};
use crate::sampling::standard_gamma;
use crate::solvers1d::discrete_quantile;
use crate::special::{ln_factorial, regularized_upper_gamma};

/// Means below this are sampled by the multiplication method.
const PRODUCT_METHOD_LIMIT: Real = 30.0;

/// Poisson distribution with mean `λ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonDistribution {
    lambda: Real,
}

impl PoissonDistribution {
    /// A Poisson law with rate `λ > 0`.
    pub fn new(lambda: Real) -> Result<Self> {
        check_positive("poisson mean", lambda)?;
        Ok(Self { lambda })
    }

    /// Rate λ.
    pub fn lambda(&self) -> Real {
        self.lambda
    }
}

/// Poisson variate (Knuth): gamma splitting while the mean is large, then
/// the product of uniforms.
pub(crate) fn poisson_count<R: Rng + ?Sized>(lambda: Real, rng: &mut R) -> u64 {
    let mut mu = lambda;
    let mut k: u64 = 0;
    while mu > PRODUCT_METHOD_LIMIT {
        let m = (0.875 * mu).floor() as u64;
        let x = standard_gamma(m as Real, rng);
        if x < mu {
            k += m;
            mu -= x;
        } else {
            return k + binomial_count(m - 1, mu / x, rng);
        }
    }
    let limit = (-mu).exp();
    let mut product: Real = rng.gen();
    while product > limit {
        k += 1;
        product *= rng.gen::<Real>();
    }
    k
}

impl DiscreteDistribution for PoissonDistribution {
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
        k as Real * self.lambda.ln() - self.lambda - ln_factorial(k as u64)
    }

    /// `Q(k + 1, λ)`.
    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < 0 {
            return Ok(0.0);
        }
        regularized_upper_gamma(k as Real + 1.0, self.lambda)
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        discrete_quantile(|k| self.cdf(k), p, 0, None)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        poisson_count(self.lambda, rng) as Integer
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (0, None)
    }
}

impl Moments for PoissonDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.lambda)
    }

    fn variance(&self) -> Option<Real> {
        Some(self.lambda)
    }
}
