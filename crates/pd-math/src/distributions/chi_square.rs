//! Chi-square distribution.

use pd_core::{errors::Result, Probability, Real};
use rand::Rng;

use super::{check_positive, ContinuousDistribution, GammaDistribution, Moments};
use crate::random_numbers::standard_normal;
use crate::sampling::standard_gamma;

/// Largest integral degrees of freedom sampled as a sum of squared normals.
const DIRECT_SUM_LIMIT: Real = 32.0;

/// Chi-square distribution with `ν` degrees of freedom, i.e.
/// `Gamma(ν/2, rate ½)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareDistribution {
    dof: Real,
    gamma: GammaDistribution,
}

impl ChiSquareDistribution {
    /// A χ² law with `dof > 0` degrees of freedom.
    pub fn new(dof: Real) -> Result<Self> {
        check_positive("chi-square degrees of freedom", dof)?;
        Ok(Self {
            dof,
            gamma: GammaDistribution::new(0.5 * dof, 0.5)?,
        })
    }

    /// Degrees of freedom `k`.
    pub fn dof(&self) -> Real {
        self.dof
    }
}

impl ContinuousDistribution for ChiSquareDistribution {
    fn pdf(&self, x: Real) -> Real {
        self.gamma.pdf(x)
    }

    fn ln_pdf(&self, x: Real) -> Real {
        self.gamma.ln_pdf(x)
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        self.gamma.cdf(x)
    }

    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        self.gamma.inverse_cdf(p)
    }

    /// Integral small `ν` sums squared standard normals; everything else goes
    /// through the gamma sampler.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        if self.dof.fract() == 0.0 && self.dof <= DIRECT_SUM_LIMIT {
            (0..self.dof as u32)
                .map(|_| {
                    let z = standard_normal(rng);
                    z * z
                })
                .sum()
        } else {
            2.0 * standard_gamma(0.5 * self.dof, rng)
        }
    }

    fn support(&self) -> (Real, Real) {
        (0.0, f64::INFINITY)
    }
}

impl Moments for ChiSquareDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.dof)
    }

    fn variance(&self) -> Option<Real> {
        Some(2.0 * self.dof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_numbers::MersenneTwisterUniformRng;
    use crate::statistics::Statistics;
    use approx::assert_abs_diff_eq;

    #[test]
    fn known_values() {
        let d = ChiSquareDistribution::new(2.0).unwrap();
        // ν = 2 is Exp(½)
        assert_abs_diff_eq!(d.cdf(3.0).unwrap(), 1.0 - (-1.5f64).exp(), epsilon = 1e-13);
        let d = ChiSquareDistribution::new(10.0).unwrap();
        assert_abs_diff_eq!(d.inverse_cdf(0.95).unwrap(), 18.307_038_053_275_146, epsilon = 1e-6);
        assert_abs_diff_eq!(d.cdf(18.307_038_053_275_146).unwrap(), 0.95, epsilon = 1e-10);
    }

    #[test]
    fn both_samplers_match_moments() {
        let mut rng = MersenneTwisterUniformRng::new(31);
        for &nu in &[4.0, 5.5] {
            let d = ChiSquareDistribution::new(nu).unwrap();
            let s: Statistics = (0..50_000).map(|_| d.sample(&mut rng)).collect();
            let se = (2.0 * nu / 50_000.0).sqrt();
            assert!((s.mean().unwrap() - nu).abs() < 4.0 * se);
        }
    }
}
