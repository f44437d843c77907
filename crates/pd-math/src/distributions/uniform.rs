//! Continuous uniform distribution.

use pd_core::{errors::Result, ensure, Probability, Real};
use rand::Rng;

use super::{check_probability, ContinuousDistribution, Moments};

/// Uniform distribution on `[a, b]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformDistribution {
    lower: Real,
    upper: Real,
}

impl UniformDistribution {
    /// Create a Uniform(a, b) distribution; `a < b`, both finite.
    pub fn new(lower: Real, upper: Real) -> Result<Self> {
        ensure!(
            lower.is_finite() && upper.is_finite() && lower < upper,
            "uniform bounds must be finite with lower < upper, got [{lower}, {upper}]"
        );
        Ok(Self { lower, upper })
    }

    /// Uniform on `[0, 1]`.
    pub fn unit() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }

    fn width(&self) -> Real {
        self.upper - self.lower
    }
}

impl ContinuousDistribution for UniformDistribution {
    fn pdf(&self, x: Real) -> Real {
        if (self.lower..=self.upper).contains(&x) {
            1.0 / self.width()
        } else {
            0.0
        }
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        Ok(((x - self.lower) / self.width()).clamp(0.0, 1.0))
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        Ok(self.lower + p * self.width())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        let u: Real = rng.gen();
        self.lower + u * self.width()
    }

    fn support(&self) -> (Real, Real) {
        (self.lower, self.upper)
    }
}

impl Moments for UniformDistribution {
    fn mean(&self) -> Option<Real> {
        Some(0.5 * (self.lower + self.upper))
    }

    fn variance(&self) -> Option<Real> {
        Some(self.width() * self.width() / 12.0)
    }
}
