//! Zeta (discrete Zipf) distribution.

use pd_core::{errors::Result, ensure, Integer, Probability, Real};
use rand::Rng;

use super::{DiscreteDistribution, Moments};
use crate::random_numbers::uniform_open01;
use crate::solvers1d::discrete_quantile;
use crate::special::{hurwitz_zeta, riemann_zeta};

/// `P(k) = k^{−s} / ζ(s)` on `k ≥ 1`, for `s > 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZetaDistribution {
    s: Real,
    normalizer: Real,
}

impl ZetaDistribution {
    /// Fails unless `s > 1`.
    pub fn new(s: Real) -> Result<Self> {
        ensure!(
            s > 1.0 && s.is_finite(),
            "zeta exponent must exceed 1, got {s}"
        );
        Ok(Self {
            s,
            normalizer: riemann_zeta(s)?,
        })
    }

    /// Exponent `s`.
    pub fn exponent(&self) -> Real {
        self.s
    }

    /// Always 1.
    pub fn mode(&self) -> Integer {
        1
    }
}

impl DiscreteDistribution for ZetaDistribution {
    fn pmf(&self, k: Integer) -> Real {
        if k < 1 {
            return 0.0;
        }
        (k as Real).powf(-self.s) / self.normalizer
    }

    fn ln_pmf(&self, k: Integer) -> Real {
        if k < 1 {
            return f64::NEG_INFINITY;
        }
        -self.s * (k as Real).ln() - self.normalizer.ln()
    }

    /// `1 − ζ(s, k + 1)/ζ(s)`.
    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < 1 {
            return Ok(0.0);
        }
        let tail = hurwitz_zeta(self.s, k as Real + 1.0)? / self.normalizer;
        Ok((1.0 - tail).clamp(0.0, 1.0))
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        discrete_quantile(|k| self.cdf(k), p, 1, None)
    }

    /// Devroye's rejection method (Non-Uniform Random Variate Generation,
    /// p. 550).
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        let a = self.s - 1.0;
        let b = 2f64.powf(a);
        loop {
            let u = uniform_open01(rng);
            let v: Real = rng.gen();
            let x = u.powf(-1.0 / a).floor();
            let t = (1.0 + 1.0 / x).powf(a);
            if v * x * (t - 1.0) / (b - 1.0) <= t / b {
                // saturating cast for the far tail
                return x as Integer;
            }
        }
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (1, None)
    }
}

impl Moments for ZetaDistribution {
    fn mean(&self) -> Option<Real> {
        if self.s <= 2.0 {
            return None;
        }
        riemann_zeta(self.s - 1.0).ok().map(|z| z / self.normalizer)
    }

    /// `(ζ(s)ζ(s − 2) − ζ(s − 1)²) / ζ(s)²` for `s > 3`.
    fn variance(&self) -> Option<Real> {
        if self.s <= 3.0 {
            return None;
        }
        let z1 = riemann_zeta(self.s - 1.0).ok()?;
        let z2 = riemann_zeta(self.s - 2.0).ok()?;
        let z = self.normalizer;
        Some((z * z2 - z1 * z1) / (z * z))
    }
}
