//! Inverse-gamma distribution.

use pd_core::{errors::Result, Probability, Real};
use rand::Rng;

use super::{check_positive, check_probability, ContinuousDistribution, GammaDistribution, Moments};
use crate::sampling::standard_gamma;
use crate::special::{ln_gamma, regularized_upper_gamma};

/// Distribution of `1/X` for `X ~ Gamma(α, β)`: shape `α`, scale `β`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseGammaDistribution {
    shape: Real,
    scale: Real,
}

impl InverseGammaDistribution {
    /// An inverse gamma law; shape and scale must be positive.
    pub fn new(shape: Real, scale: Real) -> Result<Self> {
        check_positive("inverse gamma shape", shape)?;
        check_positive("inverse gamma scale", scale)?;
        Ok(Self { shape, scale })
    }

    /// Shape α.
    pub fn shape(&self) -> Real {
        self.shape
    }

    /// Scale β.
    pub fn scale(&self) -> Real {
        self.scale
    }

    /// Mode `β/(α + 1)`.
    pub fn mode(&self) -> Real {
        self.scale / (self.shape + 1.0)
    }
}

impl ContinuousDistribution for InverseGammaDistribution {
    fn pdf(&self, x: Real) -> Real {
        if x <= 0.0 {
            return 0.0;
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: Real) -> Real {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let (a, b) = (self.shape, self.scale);
        a * b.ln() - ln_gamma(a) - (a + 1.0) * x.ln() - b / x
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x <= 0.0 {
            return Ok(0.0);
        }
        regularized_upper_gamma(self.shape, self.scale / x)
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let y = GammaDistribution::new(self.shape, 1.0)?.inverse_cdf(1.0 - p)?;
        Ok(self.scale / y)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.scale / standard_gamma(self.shape, rng)
    }

    fn support(&self) -> (Real, Real) {
        (0.0, f64::INFINITY)
    }
}

impl Moments for InverseGammaDistribution {
    fn mean(&self) -> Option<Real> {
        (self.shape > 1.0).then(|| self.scale / (self.shape - 1.0))
    }

    fn variance(&self) -> Option<Real> {
        let a = self.shape;
        (a > 2.0).then(|| self.scale * self.scale / ((a - 1.0) * (a - 1.0) * (a - 2.0)))
    }
}
