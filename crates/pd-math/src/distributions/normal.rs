//! Normal (Gaussian) distribution.

use std::f64::consts::{PI, SQRT_2};

use pd_core::{errors::Result, ensure, Probability, Real};
use rand::Rng;

use super::{check_positive, check_probability, ContinuousDistribution, Moments};
use crate::random_numbers::standard_normal;
use crate::special::erfc;

/// The standard normal probability density function.
///
/// `φ(x) = exp(-x²/2) / √(2π)`
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The standard normal cumulative distribution function
/// `Φ(x) = erfc(−x/√2) / 2`.
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

/// The inverse standard normal CDF (probit function).
///
/// Acklam's rational approximation polished by one Halley step against
/// [`normal_cdf`]. Returns `∓∞` at `p = 0` and `p = 1`.
pub fn normal_cdf_inverse(p: Probability) -> Result<Real> {
    check_probability(p)?;
    if p == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }
    let x = acklam_inverse(p);
    let e = normal_cdf(x) - p;
    let u = e * (2.0 * PI).sqrt() * (0.5 * x * x).exp();
    let refined = x - u / (1.0 + 0.5 * x * u);
    Ok(if refined.is_finite() { refined } else { x })
}

/// Peter J. Acklam's rational approximation to the inverse normal CDF.
///
/// Maximum absolute error < 1.15e-9.
fn acklam_inverse(p: Real) -> Real {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e+01,
        2.209_460_984_245_205e+02,
        -2.759_285_104_469_687e+02,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e+01,
        2.506_628_277_459_239e+00,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e+01,
        1.615_858_368_580_409e+02,
        -1.556_989_798_598_866e+02,
        6.680_131_188_771_972e+01,
        -1.328_068_155_288_572e+01,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-03,
        -3.223_964_580_411_365e-01,
        -2.400_758_277_161_838e+00,
        -2.549_732_539_343_734e+00,
        4.374_664_141_464_968e+00,
        2.938_163_982_698_783e+00,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-03,
        3.224_671_290_700_398e-01,
        2.445_134_137_142_996e+00,
        3.754_408_661_907_416e+00,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    let tail = |q: Real| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (-p).ln_1p()).sqrt())
    }
}

/// Normal distribution with mean `μ` and standard deviation `σ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalDistribution {
    mean: Real,
    std_dev: Real,
}

impl NormalDistribution {
    /// Create a Normal(μ, σ) distribution; `σ > 0`.
    pub fn new(mean: Real, std_dev: Real) -> Result<Self> {
        ensure!(mean.is_finite(), "normal mean must be finite, got {mean}");
        check_positive("normal standard deviation", std_dev)?;
        Ok(Self { mean, std_dev })
    }

    /// The standard normal distribution.
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    /// Location μ.
    pub fn location(&self) -> Real {
        self.mean
    }

    /// Scale σ.
    pub fn scale(&self) -> Real {
        self.std_dev
    }
}

impl ContinuousDistribution for NormalDistribution {
    fn pdf(&self, x: Real) -> Real {
        normal_pdf((x - self.mean) / self.std_dev) / self.std_dev
    }

    fn ln_pdf(&self, x: Real) -> Real {
        let z = (x - self.mean) / self.std_dev;
        -0.5 * z * z - self.std_dev.ln() - 0.5 * (2.0 * PI).ln()
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        Ok(normal_cdf((x - self.mean) / self.std_dev))
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        Ok(self.mean + self.std_dev * normal_cdf_inverse(p)?)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.mean + self.std_dev * standard_normal(rng)
    }

    fn support(&self) -> (Real, Real) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }
}

impl Moments for NormalDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.mean)
    }

    fn variance(&self) -> Option<Real> {
        Some(self.std_dev * self.std_dev)
    }
}
