//! Vector-valued families: multinomial, Dirichlet and multivariate normal.
//!
//! These expose densities and samplers only; a vector of the wrong length
//! is a [`Error::DimensionMismatch`].

use std::f64::consts::PI;

use pd_core::{
    errors::{Error, Result},
    ensure, Real,
};
use rand::Rng;

use super::binomial::binomial_count;
use super::check_positive;
use crate::matrix::Matrix;
use crate::random_numbers::standard_normal;
use crate::sampling::ln_standard_gamma;
use crate::special::ln_gamma;

/// Simplex tolerance for Dirichlet arguments.
const SIMPLEX_TOLERANCE: Real = 1e-10;

fn require_len(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, found })
    }
}

/// Cholesky factor of a symmetric positive-definite covariance.
pub(crate) fn covariance_factor(name: &str, covariance: &Matrix) -> Result<Matrix> {
    covariance.require_square()?;
    let tol = 1e-10 * covariance.norm().max(1.0);
    ensure!(covariance.is_symmetric(tol), "{name} must be symmetric");
    covariance.cholesky()
}

// ── Multinomial ───────────────────────────────────────────────────────────────

/// Counts of `n` categorical draws over `k` categories.
#[derive(Debug, Clone, PartialEq)]
pub struct MultinomialDistribution {
    trials: u64,
    probabilities: Vec<Real>,
}

impl MultinomialDistribution {
    /// Category weights are normalised to sum to one.
    pub fn new(trials: u64, weights: &[Real]) -> Result<Self> {
        ensure!(!weights.is_empty(), "multinomial needs at least one category");
        ensure!(
            weights.iter().all(|w| *w >= 0.0 && w.is_finite()),
            "multinomial weights must be non-negative and finite"
        );
        let total: Real = weights.iter().sum();
        ensure!(total > 0.0, "multinomial weights must not all be zero");
        Ok(Self {
            trials,
            probabilities: weights.iter().map(|w| w / total).collect(),
        })
    }

    /// Number of draws `n`.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Normalised category probabilities.
    pub fn probabilities(&self) -> &[Real] {
        &self.probabilities
    }

    /// Probability of the count vector.
    pub fn pmf(&self, counts: &[u64]) -> Result<Real> {
        Ok(self.ln_pmf(counts)?.exp())
    }

    /// `ln n! − Σ ln xᵢ! + Σ xᵢ ln θᵢ`; `−∞` when the counts do not sum to `n`.
    pub fn ln_pmf(&self, counts: &[u64]) -> Result<Real> {
        require_len(self.probabilities.len(), counts.len())?;
        if counts.iter().sum::<u64>() != self.trials {
            return Ok(f64::NEG_INFINITY);
        }
        let mut acc = ln_gamma(self.trials as Real + 1.0);
        for (&x, &theta) in counts.iter().zip(&self.probabilities) {
            if x == 0 {
                continue;
            }
            acc += x as Real * theta.ln() - ln_gamma(x as Real + 1.0);
        }
        Ok(acc)
    }

    /// Sequential conditional binomials.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u64> {
        let k = self.probabilities.len();
        let mut counts = vec![0; k];
        let mut remaining = self.trials;
        let mut mass = 1.0;
        for (i, &theta) in self.probabilities.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            if i == k - 1 || theta >= mass {
                counts[i] = remaining;
                break;
            }
            let x = binomial_count(remaining, (theta / mass).clamp(0.0, 1.0), rng);
            counts[i] = x;
            remaining -= x;
            mass -= theta;
        }
        counts
    }

    /// Expected counts `n θᵢ`.
    pub fn mean(&self) -> Vec<Real> {
        self.probabilities
            .iter()
            .map(|p| self.trials as Real * p)
            .collect()
    }
}

// ── Dirichlet ─────────────────────────────────────────────────────────────────

/// Dirichlet distribution on the probability simplex.
#[derive(Debug, Clone, PartialEq)]
pub struct DirichletDistribution {
    alpha: Vec<Real>,
    ln_normalizer: Real,
}

impl DirichletDistribution {
    /// Concentrations must be positive, with at least two components.
    pub fn new(alpha: &[Real]) -> Result<Self> {
        ensure!(alpha.len() >= 2, "dirichlet needs at least two components");
        for &a in alpha {
            check_positive("dirichlet concentration", a)?;
        }
        let ln_normalizer =
            ln_gamma(alpha.iter().sum()) - alpha.iter().map(|&a| ln_gamma(a)).sum::<Real>();
        Ok(Self {
            alpha: alpha.to_vec(),
            ln_normalizer,
        })
    }

    /// Concentrations α.
    pub fn alpha(&self) -> &[Real] {
        &self.alpha
    }

    /// Density at a point of the simplex.
    pub fn pdf(&self, x: &[Real]) -> Result<Real> {
        Ok(self.ln_pdf(x)?.exp())
    }

    /// `−∞` off the simplex.
    pub fn ln_pdf(&self, x: &[Real]) -> Result<Real> {
        require_len(self.alpha.len(), x.len())?;
        if x.iter().any(|&xi| !(0.0..=1.0).contains(&xi))
            || (x.iter().sum::<Real>() - 1.0).abs() > SIMPLEX_TOLERANCE
        {
            return Ok(f64::NEG_INFINITY);
        }
        let mut acc = self.ln_normalizer;
        for (&xi, &a) in x.iter().zip(&self.alpha) {
            if a == 1.0 {
                continue;
            }
            if xi == 0.0 {
                return Ok(if a < 1.0 {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                });
            }
            acc += (a - 1.0) * xi.ln();
        }
        Ok(acc)
    }

    /// Normalised gamma variates, formed in log space.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Real> {
        let logs: Vec<Real> = self
            .alpha
            .iter()
            .map(|&a| ln_standard_gamma(a, rng))
            .collect();
        let max = logs.iter().copied().fold(f64::NEG_INFINITY, Real::max);
        let weights: Vec<Real> = logs.iter().map(|l| (l - max).exp()).collect();
        let total: Real = weights.iter().sum();
        weights.into_iter().map(|w| w / total).collect()
    }

    /// `αᵢ / Σα`.
    pub fn mean(&self) -> Vec<Real> {
        let total: Real = self.alpha.iter().sum();
        self.alpha.iter().map(|a| a / total).collect()
    }
}

// ── Multivariate normal ───────────────────────────────────────────────────────

/// Multivariate normal with mean `μ` and covariance `Σ`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultivariateNormalDistribution {
    mean: Vec<Real>,
    factor: Matrix,
    precision: Matrix,
    ln_normalizer: Real,
}

impl MultivariateNormalDistribution {
    /// [`Error::Singular`] unless `Σ` is symmetric positive definite.
    pub fn new(mean: &[Real], covariance: &Matrix) -> Result<Self> {
        ensure!(!mean.is_empty(), "multivariate normal needs a non-empty mean");
        covariance.require_shape(mean.len(), mean.len())?;
        let factor = covariance_factor("covariance", covariance)?;
        let ln_det = 2.0 * factor.diagonal().iter().map(|d| d.ln()).sum::<Real>();
        let k = mean.len() as Real;
        Ok(Self {
            mean: mean.to_vec(),
            precision: covariance.try_inverse()?,
            ln_normalizer: -0.5 * (k * (2.0 * PI).ln() + ln_det),
            factor,
        })
    }

    /// Dimension `k`.
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Mean vector `μ`.
    pub fn mean(&self) -> &[Real] {
        &self.mean
    }

    /// Lower Cholesky factor of the covariance.
    pub fn factor(&self) -> &Matrix {
        &self.factor
    }

    /// Density at `x`.
    pub fn pdf(&self, x: &[Real]) -> Result<Real> {
        Ok(self.ln_pdf(x)?.exp())
    }

    /// Log density at `x`.
    pub fn ln_pdf(&self, x: &[Real]) -> Result<Real> {
        require_len(self.mean.len(), x.len())?;
        let delta: Vec<Real> = x.iter().zip(&self.mean).map(|(a, m)| a - m).collect();
        let projected = self.precision.mul_vec(&delta)?;
        let q: Real = delta.iter().zip(&projected).map(|(a, b)| a * b).sum();
        Ok(self.ln_normalizer - 0.5 * q)
    }

    /// `μ + L z` with `z` standard normal.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Real> {
        let z: Vec<Real> = (0..self.mean.len()).map(|_| standard_normal(rng)).collect();
        let n = self.mean.len();
        (0..n)
            .map(|i| self.mean[i] + (0..=i).map(|j| self.factor[(i, j)] * z[j]).sum::<Real>())
            .collect()
    }
}
