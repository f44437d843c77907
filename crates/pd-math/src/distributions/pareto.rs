//! Pareto family: type I, type II (Lomax), generalized, single-parameter and
//! tapered.
//!
//! Each type exposes `raw_moment(k)`, which is `+∞` where the integral
//! diverges, and `median()` where a closed form exists.

use pd_core::{errors::Result, Probability, Real};
use rand::Rng;

use super::{check_positive, check_probability, BetaDistribution, ContinuousDistribution, Moments};
use crate::random_numbers::{standard_exponential, uniform_open01};
use crate::sampling::standard_gamma;
use crate::solvers1d::newton_safeguarded;
use crate::special::{beta as beta_fn, ln_beta, ln_gamma, regularized_incomplete_beta};

/// Absolute tolerance of the tapered-Pareto Newton solve.
const TAPERED_TOLERANCE: Real = 1e-10;
const TAPERED_MAX_ITERATIONS: u64 = 200;

fn variance_from_moments(m1: Real, m2: Real) -> Option<Real> {
    (m2.is_finite()).then(|| m2 - m1 * m1)
}

// ── Pareto type I ─────────────────────────────────────────────────────────────

/// Pareto type I with scale (minimum) `θ` and shape `α`; support `[θ, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParetoDistribution {
    scale: Real,
    shape: Real,
}

impl ParetoDistribution {
    /// Both parameters must be positive.
    pub fn new(scale: Real, shape: Real) -> Result<Self> {
        check_positive("pareto scale", scale)?;
        check_positive("pareto shape", shape)?;
        Ok(Self { scale, shape })
    }

    /// Scale (minimum) θ.
    pub fn scale(&self) -> Real {
        self.scale
    }

    /// Shape α.
    pub fn shape(&self) -> Real {
        self.shape
    }

    /// `θ 2^{1/α}`.
    pub fn median(&self) -> Real {
        self.scale * 2f64.powf(1.0 / self.shape)
    }

    /// The minimum θ.
    pub fn mode(&self) -> Real {
        self.scale
    }

    /// `E[Xᵏ] = α θᵏ / (α − k)` for `k < α`.
    pub fn raw_moment(&self, k: Real) -> Real {
        if k >= self.shape {
            return f64::INFINITY;
        }
        self.shape * self.scale.powf(k) / (self.shape - k)
    }
}

impl ContinuousDistribution for ParetoDistribution {
    fn pdf(&self, x: Real) -> Real {
        if x < self.scale {
            return 0.0;
        }
        self.shape * self.scale.powf(self.shape) / x.powf(self.shape + 1.0)
    }

    fn ln_pdf(&self, x: Real) -> Real {
        if x < self.scale {
            return f64::NEG_INFINITY;
        }
        self.shape.ln() + self.shape * self.scale.ln() - (self.shape + 1.0) * x.ln()
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x <= self.scale {
            return Ok(0.0);
        }
        Ok(1.0 - (self.scale / x).powf(self.shape))
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.scale * (1.0 - p).powf(-1.0 / self.shape))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.scale * uniform_open01(rng).powf(-1.0 / self.shape)
    }

    fn support(&self) -> (Real, Real) {
        (self.scale, f64::INFINITY)
    }
}

impl Moments for ParetoDistribution {
    fn mean(&self) -> Option<Real> {
        let a = self.shape;
        (a > 1.0).then(|| a * self.scale / (a - 1.0))
    }

    fn variance(&self) -> Option<Real> {
        let a = self.shape;
        (a > 2.0).then(|| self.scale * self.scale * a / ((a - 1.0) * (a - 1.0) * (a - 2.0)))
    }
}

// ── Pareto type II (Lomax) ────────────────────────────────────────────────────

/// Pareto type II (Lomax) with scale `θ` and shape `α`; support `[0, ∞)`,
/// `F(x) = 1 − (1 + x/θ)^{−α}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LomaxDistribution {
    scale: Real,
    shape: Real,
}

impl LomaxDistribution {
    /// Both parameters must be positive.
    pub fn new(scale: Real, shape: Real) -> Result<Self> {
        check_positive("lomax scale", scale)?;
        check_positive("lomax shape", shape)?;
        Ok(Self { scale, shape })
    }

    /// `θ (2^{1/α} − 1)`.
    pub fn median(&self) -> Real {
        self.scale * (2f64.powf(1.0 / self.shape) - 1.0)
    }

    /// `E[Xᵏ] = θᵏ Γ(k + 1) Γ(α − k) / Γ(α)` for `−1 < k < α`.
    pub fn raw_moment(&self, k: Real) -> Real {
        if k <= -1.0 || k >= self.shape {
            return f64::INFINITY;
        }
        (k * self.scale.ln() + ln_gamma(k + 1.0) + ln_gamma(self.shape - k) - ln_gamma(self.shape))
            .exp()
    }
}

impl ContinuousDistribution for LomaxDistribution {
    fn pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return 0.0;
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        (self.shape / self.scale).ln() - (self.shape + 1.0) * (x / self.scale).ln_1p()
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x <= 0.0 {
            return Ok(0.0);
        }
        Ok(-(-self.shape * (x / self.scale).ln_1p()).exp_m1())
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.scale * (-(-p).ln_1p() / self.shape).exp_m1())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.scale * (-uniform_open01(rng).ln() / self.shape).exp_m1()
    }

    fn support(&self) -> (Real, Real) {
        (0.0, f64::INFINITY)
    }
}

impl Moments for LomaxDistribution {
    fn mean(&self) -> Option<Real> {
        (self.shape > 1.0).then(|| self.scale / (self.shape - 1.0))
    }

    fn variance(&self) -> Option<Real> {
        if self.shape <= 2.0 {
            return None;
        }
        variance_from_moments(self.raw_moment(1.0), self.raw_moment(2.0))
    }
}

// ── Generalized Pareto ────────────────────────────────────────────────────────

/// Generalized Pareto (Klugman–Panjer–Willmot) with shapes `α`, `τ` and
/// scale `θ`: `X/(X + θ) ~ Beta(τ, α)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralizedParetoDistribution {
    shape1: Real,
    shape2: Real,
    scale: Real,
}

impl GeneralizedParetoDistribution {
    /// All three parameters must be positive.
    pub fn new(shape1: Real, shape2: Real, scale: Real) -> Result<Self> {
        check_positive("generalized pareto shape1", shape1)?;
        check_positive("generalized pareto shape2", shape2)?;
        check_positive("generalized pareto scale", scale)?;
        Ok(Self {
            shape1,
            shape2,
            scale,
        })
    }

    /// `E[Xᵏ] = θᵏ B(α − k, τ + k) / B(α, τ)` for `−τ < k < α`.
    pub fn raw_moment(&self, k: Real) -> Real {
        if k <= -self.shape2 || k >= self.shape1 {
            return f64::INFINITY;
        }
        (k * self.scale.ln() + ln_beta(self.shape1 - k, self.shape2 + k)
            - ln_beta(self.shape1, self.shape2))
        .exp()
    }
}

impl ContinuousDistribution for GeneralizedParetoDistribution {
    fn pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            return if self.shape2 < 1.0 {
                f64::INFINITY
            } else if self.shape2 == 1.0 {
                1.0 / (self.scale * beta_fn(self.shape2, self.shape1))
            } else {
                0.0
            };
        }
        self.ln_pdf(x).exp()
    }

    /// `τ ln u + α ln(1 − u) − ln x − ln B(τ, α)` with `u = x/(x + θ)`.
    fn ln_pdf(&self, x: Real) -> Real {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        if x == 0.0 {
            return self.pdf(0.0).ln();
        }
        let t = x.ln() - self.scale.ln();
        let ln_u = -(-t).exp().ln_1p();
        let ln_1mu = -t.exp().ln_1p();
        self.shape2 * ln_u + self.shape1 * ln_1mu - x.ln() - ln_beta(self.shape2, self.shape1)
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x <= 0.0 {
            return Ok(0.0);
        }
        if x.is_infinite() {
            return Ok(1.0);
        }
        let u = x / (x + self.scale);
        regularized_incomplete_beta(self.shape2, self.shape1, u)
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let q = BetaDistribution::new(self.shape2, self.shape1)?.inverse_cdf(p)?;
        Ok(self.scale * q / (1.0 - q))
    }

    /// `θ G_τ / G_α`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.scale * standard_gamma(self.shape2, rng) / standard_gamma(self.shape1, rng)
    }

    fn support(&self) -> (Real, Real) {
        (0.0, f64::INFINITY)
    }
}

impl Moments for GeneralizedParetoDistribution {
    fn mean(&self) -> Option<Real> {
        (self.shape1 > 1.0).then(|| self.raw_moment(1.0))
    }

    fn variance(&self) -> Option<Real> {
        if self.shape1 <= 2.0 {
            return None;
        }
        variance_from_moments(self.raw_moment(1.0), self.raw_moment(2.0))
    }
}

// ── Single-parameter Pareto ───────────────────────────────────────────────────

/// Single-parameter Pareto with shape `α` and known threshold `μ`:
/// `F(x) = 1 − (μ/x)^α` on `[μ, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleParameterParetoDistribution {
    inner: ParetoDistribution,
}

impl SingleParameterParetoDistribution {
    /// Both parameters must be positive.
    pub fn new(shape: Real, threshold: Real) -> Result<Self> {
        Ok(Self {
            inner: ParetoDistribution::new(threshold, shape)?,
        })
    }

    /// Shape α.
    pub fn shape(&self) -> Real {
        self.inner.shape
    }

    /// Threshold μ.
    pub fn threshold(&self) -> Real {
        self.inner.scale
    }

    /// `μ 2^{1/α}`.
    pub fn median(&self) -> Real {
        self.inner.median()
    }

    /// `E[Xᵏ] = α μᵏ / (α − k)` for `k < α`.
    pub fn raw_moment(&self, k: Real) -> Real {
        self.inner.raw_moment(k)
    }
}

impl ContinuousDistribution for SingleParameterParetoDistribution {
    fn pdf(&self, x: Real) -> Real {
        self.inner.pdf(x)
    }

    fn ln_pdf(&self, x: Real) -> Real {
        self.inner.ln_pdf(x)
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        self.inner.cdf(x)
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        self.inner.inverse_cdf(p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.inner.sample(rng)
    }

    fn support(&self) -> (Real, Real) {
        self.inner.support()
    }
}

impl Moments for SingleParameterParetoDistribution {
    fn mean(&self) -> Option<Real> {
        self.inner.mean()
    }

    fn variance(&self) -> Option<Real> {
        self.inner.variance()
    }
}

// ── Tapered Pareto ────────────────────────────────────────────────────────────

/// Tapered Pareto with threshold `θ`, shape `α` and taper `τ`; survival
/// `S(x) = (θ/x)^α e^{(θ − x)/τ}` on `[θ, ∞)`.
///
/// Has no closed-form moments, so it does not implement [`Moments`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperedParetoDistribution {
    scale: Real,
    shape: Real,
    taper: Real,
}

impl TaperedParetoDistribution {
    /// All three parameters must be positive.
    pub fn new(scale: Real, shape: Real, taper: Real) -> Result<Self> {
        check_positive("tapered pareto scale", scale)?;
        check_positive("tapered pareto shape", shape)?;
        check_positive("tapered pareto taper", taper)?;
        Ok(Self {
            scale,
            shape,
            taper,
        })
    }

    /// Cumulative hazard `−ln S(θ + y)`.
    fn hazard(&self, y: Real) -> Real {
        self.shape * (y / self.scale).ln_1p() + y / self.taper
    }
}

impl ContinuousDistribution for TaperedParetoDistribution {
    fn pdf(&self, x: Real) -> Real {
        if x < self.scale {
            return 0.0;
        }
        (self.shape / x + 1.0 / self.taper) * (-self.hazard(x - self.scale)).exp()
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x <= self.scale {
            return Ok(0.0);
        }
        Ok(-(-self.hazard(x - self.scale)).exp_m1())
    }

    /// Newton on the cumulative hazard of `y = x − θ`, started from the
    /// smaller of the pure-Pareto and pure-exponential solutions.
    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(self.scale);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let target = -(-p).ln_1p();
        let pareto_only = self.scale * (target / self.shape).exp_m1();
        let exponential_only = self.taper * target;
        let y0 = pareto_only.min(exponential_only);
        let y = newton_safeguarded(
            |y| {
                Ok((
                    self.hazard(y),
                    self.shape / (self.scale + y) + 1.0 / self.taper,
                ))
            },
            target,
            y0,
            TAPERED_TOLERANCE,
            TAPERED_MAX_ITERATIONS,
        )?;
        Ok(self.scale + y)
    }

    /// Minimum of a Pareto I and a shifted exponential variate.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        let pareto = self.scale * uniform_open01(rng).powf(-1.0 / self.shape);
        let exponential = self.scale + self.taper * standard_exponential(rng);
        pareto.min(exponential)
    }

    fn support(&self) -> (Real, Real) {
        (self.scale, f64::INFINITY)
    }
}
