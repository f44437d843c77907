//! Planck distribution (Johnson and Kotz, 1970).

use std::f64::consts::PI;

use pd_core::{
    errors::{Error, Result},
    Integer, Probability, Real,
};
use rand::Rng;

use super::{
    check_positive, check_probability, ContinuousDistribution, DiscreteDistribution, Moments,
    ZetaDistribution,
};
use crate::sampling::standard_gamma;
use crate::solvers1d::bisection_log_default;
use crate::special::{hurwitz_zeta, ln_gamma, regularized_lower_gamma, riemann_zeta};

/// Below this value of `b·x` the CDF is summed from the Bernoulli expansion
/// of `1/(eʸ − 1)`, which converges for `y < 2π`.
const SERIES_LIMIT: Real = 2.0;

const MAX_TERMS: u64 = 1_000_000;

/// `f(x) = b^{a+1} xᵃ / (Γ(a + 1) ζ(a + 1) (e^{bx} − 1))` on `x > 0`.
///
/// Expanding `1/(e^{bx} − 1) = Σ e^{−kbx}` shows the law is a Zeta(a + 1)
/// mixture of Gamma(a + 1, kb) laws, which drives both the CDF and the
/// sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanckDistribution {
    a: Real,
    b: Real,
    /// ζ(a + 1)
    zeta_norm: Real,
    mixing: ZetaDistribution,
}

impl PlanckDistribution {
    /// A Planck law with shape `a > 0` and rate `b > 0`.
    pub fn new(a: Real, b: Real) -> Result<Self> {
        check_positive("planck shape", a)?;
        check_positive("planck rate", b)?;
        Ok(Self {
            a,
            b,
            zeta_norm: riemann_zeta(a + 1.0)?,
            mixing: ZetaDistribution::new(a + 1.0)?,
        })
    }

    /// Shape `a`.
    pub fn shape(&self) -> Real {
        self.a
    }

    /// Rate `b`.
    pub fn rate(&self) -> Real {
        self.b
    }

    /// `ln Γ(a + 1) + ln ζ(a + 1)`.
    fn ln_normalizer(&self) -> Real {
        ln_gamma(self.a + 1.0) + self.zeta_norm.ln()
    }

    /// `∫₀ᶻ yᵃ/(eʸ − 1) dy` normalised, from
    /// `1/(eʸ − 1) = 1/y − 1/2 + Σ (−1)ⁿ⁺¹ 2ζ(2n) y²ⁿ⁻¹ / (2π)²ⁿ`.
    fn cdf_series(&self, z: Real) -> Result<Probability> {
        let a = self.a;
        let w = (z / (2.0 * PI)).powi(2);
        let mut sum = 1.0 / a - z / (2.0 * (a + 1.0));
        let mut power = 1.0;
        let mut sign = 1.0;
        for n in 1..=64 {
            power *= w;
            let two_n = 2.0 * n as Real;
            let term = sign * 2.0 * riemann_zeta(two_n)? * power / (a + two_n);
            sum += term;
            if term.abs() <= 1e-17 * sum.abs() {
                break;
            }
            sign = -sign;
        }
        let ln_front = a * z.ln() - self.ln_normalizer();
        Ok((ln_front.exp() * sum).clamp(0.0, 1.0))
    }

    /// `Σ_k P(k) · P(a + 1, k z)` over the Zeta mixing weights; once the
    /// incomplete gamma saturates the remaining weights are added in one
    /// Hurwitz zeta.
    fn cdf_mixture(&self, z: Real) -> Result<Probability> {
        let s = self.a + 1.0;
        let mut acc = 0.0;
        for k in 1..=MAX_TERMS {
            let lower = regularized_lower_gamma(s, k as Real * z)?;
            if lower >= 1.0 - 1e-16 {
                acc += hurwitz_zeta(s, k as Real)? / self.zeta_norm;
                return Ok(acc.clamp(0.0, 1.0));
            }
            acc += self.mixing.pmf(k as Integer) * lower;
        }
        Err(Error::Convergence {
            method: "planck cdf",
            iterations: MAX_TERMS,
        })
    }
}

impl ContinuousDistribution for PlanckDistribution {
    fn pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            // f(x) ~ b^{a} x^{a−1} / (Γ(a + 1) ζ(a + 1)) near the origin
            return if self.a < 1.0 {
                f64::INFINITY
            } else if self.a == 1.0 {
                self.b / self.zeta_norm
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
        let y = self.b * x;
        // ln(eʸ − 1)
        let ln_bose = if y > 1.0 {
            y + (-(-y).exp()).ln_1p()
        } else {
            y.exp_m1().ln()
        };
        (self.a + 1.0) * self.b.ln() + self.a * x.ln() - self.ln_normalizer() - ln_bose
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x <= 0.0 {
            return Ok(0.0);
        }
        if x.is_infinite() {
            return Ok(1.0);
        }
        let z = self.b * x;
        if z <= SERIES_LIMIT {
            self.cdf_series(z)
        } else {
            self.cdf_mixture(z)
        }
    }

    /// Bisection in `ln x` from the mean.
    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let start = self.mean().filter(|m| m.is_finite() && *m > 0.0).unwrap_or(1.0 / self.b);
        bisection_log_default(|x| self.cdf(x), p, start)
    }

    /// Devroye (1986, p. 552): `G / (b Z)` with `G ~ Gamma(a + 1)` and
    /// `Z ~ Zeta(a + 1)`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        let g = standard_gamma(self.a + 1.0, rng);
        let z = self.mixing.sample(rng) as Real;
        g / (self.b * z)
    }

    fn support(&self) -> (Real, Real) {
        (0.0, f64::INFINITY)
    }
}

impl Moments for PlanckDistribution {
    /// `(a + 1) ζ(a + 2) / (b ζ(a + 1))`.
    fn mean(&self) -> Option<Real> {
        let z2 = riemann_zeta(self.a + 2.0).ok()?;
        Some((self.a + 1.0) * z2 / (self.b * self.zeta_norm))
    }

    fn variance(&self) -> Option<Real> {
        let a = self.a;
        let z3 = riemann_zeta(a + 3.0).ok()?;
        let second = (a + 1.0) * (a + 2.0) * z3 / (self.b * self.b * self.zeta_norm);
        let m = self.mean()?;
        Some(second - m * m)
    }
}
