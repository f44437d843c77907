//! Matrix-valued families: Wishart, inverse Wishart, matrix normal and
//! matrix t.
//!
//! Shapes are checked on construction and on every density evaluation;
//! a mismatch is [`pd_core::Error::DimensionMismatch`]. A density argument
//! outside the support (not positive definite) has density zero.

use std::f64::consts::{LN_2, PI};

use pd_core::{errors::Result, ensure, Real};
use rand::Rng;

use super::multivariate::covariance_factor;
use crate::matrix::Matrix;
use crate::random_numbers::standard_normal;
use crate::sampling::standard_gamma;
use crate::special::ln_multivariate_gamma;

/// Matrix of independent standard normals.
fn standard_normal_matrix<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    let mut z = Matrix::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            z[(i, j)] = standard_normal(rng);
        }
    }
    z
}

/// Bartlett decomposition: `L A Aᵀ Lᵀ ~ W_p(ν, L Lᵀ)` with `A` lower
/// triangular, `A_ii² ~ χ²_{ν−i}` (0-based `i`) and standard normals below
/// the diagonal.
fn bartlett<R: Rng + ?Sized>(dof: Real, factor: &Matrix, rng: &mut R) -> Matrix {
    let p = factor.rows();
    let mut a = Matrix::zeros(p, p);
    for i in 0..p {
        a[(i, i)] = (2.0 * standard_gamma(0.5 * (dof - i as Real), rng)).sqrt();
        for j in 0..i {
            a[(i, j)] = standard_normal(rng);
        }
    }
    let la = factor * &a;
    &la * &la.transpose()
}

/// `(M + Mᵀ)/2`, removing rounding asymmetry before a Cholesky factorization.
fn symmetrize(m: &Matrix) -> Matrix {
    (m + &m.transpose()).scale(0.5)
}

/// `ln |M|` for a matrix expected to be positive definite; `None` if it is
/// not.
fn ln_det_if_spd(m: &Matrix) -> Option<Real> {
    symmetrize(m).ln_determinant_spd().ok()
}

// ── Wishart ───────────────────────────────────────────────────────────────────

/// Wishart `W_p(ν, V)` with `ν > p − 1` degrees of freedom and scale `V`.
#[derive(Debug, Clone, PartialEq)]
pub struct WishartDistribution {
    dof: Real,
    scale_factor: Matrix,
    scale_inverse: Matrix,
    ln_normalizer: Real,
}

impl WishartDistribution {
    /// Fails unless `V` is symmetric positive definite and `ν > p − 1`.
    pub fn new(dof: Real, scale: &Matrix) -> Result<Self> {
        let p = scale.rows();
        ensure!(p >= 1, "wishart scale must be non-empty");
        ensure!(
            dof > p as Real - 1.0 && dof.is_finite(),
            "wishart needs more than {} degrees of freedom, got {dof}",
            p - 1
        );
        let scale_factor = covariance_factor("wishart scale", scale)?;
        let ln_det = 2.0 * scale_factor.diagonal().iter().map(|d| d.ln()).sum::<Real>();
        let pf = p as Real;
        let ln_normalizer =
            -0.5 * dof * pf * LN_2 - 0.5 * dof * ln_det - ln_multivariate_gamma(p, 0.5 * dof)?;
        Ok(Self {
            dof,
            scale_inverse: scale.try_inverse()?,
            scale_factor,
            ln_normalizer,
        })
    }

    /// Degrees of freedom `ν`.
    pub fn dof(&self) -> Real {
        self.dof
    }

    /// Matrix dimension `p`.
    pub fn dimension(&self) -> usize {
        self.scale_factor.rows()
    }

    /// `ν V`.
    pub fn mean(&self) -> Matrix {
        (&self.scale_factor * &self.scale_factor.transpose()).scale(self.dof)
    }

    /// Density at `W`; zero off the positive-definite cone.
    pub fn pdf(&self, w: &Matrix) -> Result<Real> {
        Ok(self.ln_pdf(w)?.exp())
    }

    /// `((ν − p − 1)/2) ln|W| − tr(V⁻¹W)/2 − (νp/2) ln 2 − (ν/2) ln|V| − ln Γ_p(ν/2)`.
    pub fn ln_pdf(&self, w: &Matrix) -> Result<Real> {
        let p = self.dimension();
        w.require_shape(p, p)?;
        let Some(ln_det_w) = ln_det_if_spd(w) else {
            return Ok(f64::NEG_INFINITY);
        };
        let trace = (&self.scale_inverse * w).trace();
        Ok(self.ln_normalizer + 0.5 * (self.dof - p as Real - 1.0) * ln_det_w - 0.5 * trace)
    }

    /// Bartlett decomposition draw.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix {
        bartlett(self.dof, &self.scale_factor, rng)
    }
}

// ── Inverse Wishart ───────────────────────────────────────────────────────────

/// Inverse Wishart `W⁻¹_p(ν, Ψ)`: `B⁻¹ ~ W_p(ν, Ψ⁻¹)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InverseWishartDistribution {
    dof: Real,
    psi: Matrix,
    inner: WishartDistribution,
    ln_normalizer: Real,
}

impl InverseWishartDistribution {
    /// Fails unless `Ψ` is symmetric positive definite and `ν > p − 1`.
    pub fn new(dof: Real, psi: &Matrix) -> Result<Self> {
        let p = psi.rows();
        let psi_factor = covariance_factor("inverse wishart scale", psi)?;
        let inner = WishartDistribution::new(dof, &symmetrize(&psi.try_inverse()?))?;
        let ln_det_psi = 2.0 * psi_factor.diagonal().iter().map(|d| d.ln()).sum::<Real>();
        let pf = p as Real;
        let ln_normalizer =
            0.5 * dof * ln_det_psi - 0.5 * dof * pf * LN_2 - ln_multivariate_gamma(p, 0.5 * dof)?;
        Ok(Self {
            dof,
            psi: psi.clone(),
            inner,
            ln_normalizer,
        })
    }

    /// Degrees of freedom `ν`.
    pub fn dof(&self) -> Real {
        self.dof
    }

    /// `Ψ/(ν − p − 1)`, defined for `ν > p + 1`.
    pub fn mean(&self) -> Option<Matrix> {
        let p = self.psi.rows() as Real;
        (self.dof > p + 1.0).then(|| self.psi.scale(1.0 / (self.dof - p - 1.0)))
    }

    /// Density at `B`; zero off the positive-definite cone.
    pub fn pdf(&self, b: &Matrix) -> Result<Real> {
        Ok(self.ln_pdf(b)?.exp())
    }

    /// `(ν/2) ln|Ψ| − (νp/2) ln 2 − ln Γ_p(ν/2) − ((ν + p + 1)/2) ln|B| − tr(ΨB⁻¹)/2`.
    pub fn ln_pdf(&self, b: &Matrix) -> Result<Real> {
        let p = self.psi.rows();
        b.require_shape(p, p)?;
        let Some(ln_det_b) = ln_det_if_spd(b) else {
            return Ok(f64::NEG_INFINITY);
        };
        let trace = (&self.psi * &b.try_inverse()?).trace();
        Ok(self.ln_normalizer - 0.5 * (self.dof + p as Real + 1.0) * ln_det_b - 0.5 * trace)
    }

    /// Inverse of a Wishart draw; a numerically singular draw is resampled.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix {
        loop {
            if let Ok(b) = self.inner.sample(rng).try_inverse() {
                return symmetrize(&b);
            }
        }
    }
}

// ── Matrix normal ─────────────────────────────────────────────────────────────

/// Matrix normal `MN_{n,p}(M, U, V)`: `vec(X) ~ N(vec(M), V ⊗ U)` with
/// among-row covariance `U` (`n × n`) and among-column covariance `V`
/// (`p × p`).
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixNormalDistribution {
    mean: Matrix,
    row_factor: Matrix,
    column_factor: Matrix,
    row_inverse: Matrix,
    column_inverse: Matrix,
    ln_normalizer: Real,
}

impl MatrixNormalDistribution {
    /// `n × p` mean with `n × n` row and `p × p` column covariances.
    pub fn new(mean: &Matrix, row_covariance: &Matrix, column_covariance: &Matrix) -> Result<Self> {
        let (n, p) = (mean.rows(), mean.cols());
        row_covariance.require_shape(n, n)?;
        column_covariance.require_shape(p, p)?;
        let row_factor = covariance_factor("row covariance", row_covariance)?;
        let column_factor = covariance_factor("column covariance", column_covariance)?;
        let ln_det_u = 2.0 * row_factor.diagonal().iter().map(|d| d.ln()).sum::<Real>();
        let ln_det_v = 2.0 * column_factor.diagonal().iter().map(|d| d.ln()).sum::<Real>();
        let (nf, pf) = (n as Real, p as Real);
        let ln_normalizer =
            -0.5 * nf * pf * (2.0 * PI).ln() - 0.5 * pf * ln_det_u - 0.5 * nf * ln_det_v;
        Ok(Self {
            mean: mean.clone(),
            row_inverse: row_covariance.try_inverse()?,
            column_inverse: column_covariance.try_inverse()?,
            row_factor,
            column_factor,
            ln_normalizer,
        })
    }

    /// Mean matrix `M`.
    pub fn mean(&self) -> &Matrix {
        &self.mean
    }

    /// Density at `X`.
    pub fn pdf(&self, x: &Matrix) -> Result<Real> {
        Ok(self.ln_pdf(x)?.exp())
    }

    /// `−(np/2) ln 2π − (p/2) ln|U| − (n/2) ln|V| − tr(V⁻¹ Dᵀ U⁻¹ D)/2`
    /// with `D = X − M`.
    pub fn ln_pdf(&self, x: &Matrix) -> Result<Real> {
        x.require_shape(self.mean.rows(), self.mean.cols())?;
        let d = x - &self.mean;
        let inner = &(&(&self.column_inverse * &d.transpose()) * &self.row_inverse) * &d;
        Ok(self.ln_normalizer - 0.5 * inner.trace())
    }

    /// `M + A Z Bᵀ` with `U = AAᵀ`, `V = BBᵀ`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix {
        let z = standard_normal_matrix(self.mean.rows(), self.mean.cols(), rng);
        &self.mean + &(&(&self.row_factor * &z) * &self.column_factor.transpose())
    }
}

// ── Matrix t ──────────────────────────────────────────────────────────────────

/// Matrix t `T_{n,p}(ν, M, Σ, Ω)` with among-row scale `Σ` (`n × n`) and
/// among-column scale `Ω` (`p × p`).
///
/// Constructed as the scale mixture `X | S ~ MN(M, S⁻¹, Ω)` with
/// `S ~ W_n(ν + n − 1, Σ⁻¹)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTDistribution {
    dof: Real,
    mean: Matrix,
    row_scale: Matrix,
    column_inverse: Matrix,
    column_factor: Matrix,
    mixing: WishartDistribution,
    ln_det_row: Real,
    ln_normalizer: Real,
}

impl MatrixTDistribution {
    /// `n × p` mean with `n × n` row and `p × p` column scales.
    pub fn new(dof: Real, mean: &Matrix, row_scale: &Matrix, column_scale: &Matrix) -> Result<Self> {
        ensure!(
            dof > 0.0 && dof.is_finite(),
            "matrix t degrees of freedom must be positive, got {dof}"
        );
        let (n, p) = (mean.rows(), mean.cols());
        row_scale.require_shape(n, n)?;
        column_scale.require_shape(p, p)?;
        let row_factor = covariance_factor("row scale", row_scale)?;
        let column_factor = covariance_factor("column scale", column_scale)?;
        let ln_det_row = 2.0 * row_factor.diagonal().iter().map(|d| d.ln()).sum::<Real>();
        let ln_det_col = 2.0 * column_factor.diagonal().iter().map(|d| d.ln()).sum::<Real>();
        let (nf, pf) = (n as Real, p as Real);
        let ln_normalizer = ln_multivariate_gamma(p, 0.5 * (dof + nf + pf - 1.0))?
            - ln_multivariate_gamma(p, 0.5 * (dof + pf - 1.0))?
            - 0.5 * nf * pf * PI.ln()
            - 0.5 * nf * ln_det_col
            - 0.5 * pf * ln_det_row;
        let mixing = WishartDistribution::new(dof + nf - 1.0, &symmetrize(&row_scale.try_inverse()?))?;
        Ok(Self {
            dof,
            mean: mean.clone(),
            row_scale: row_scale.clone(),
            column_inverse: column_scale.try_inverse()?,
            column_factor,
            mixing,
            ln_det_row,
            ln_normalizer,
        })
    }

    /// Degrees of freedom `ν`.
    pub fn dof(&self) -> Real {
        self.dof
    }

    /// Location matrix `M`.
    pub fn mean(&self) -> &Matrix {
        &self.mean
    }

    /// Density at `X`.
    pub fn pdf(&self, x: &Matrix) -> Result<Real> {
        Ok(self.ln_pdf(x)?.exp())
    }

    /// Uses `|I + Σ⁻¹ D Ω⁻¹ Dᵀ| = |Σ + D Ω⁻¹ Dᵀ| / |Σ|`, which keeps the
    /// determinant on a symmetric positive-definite matrix.
    pub fn ln_pdf(&self, x: &Matrix) -> Result<Real> {
        let (n, p) = (self.mean.rows(), self.mean.cols());
        x.require_shape(n, p)?;
        let d = x - &self.mean;
        let spread = &self.row_scale + &(&(&d * &self.column_inverse) * &d.transpose());
        let ln_det_spread = symmetrize(&spread).ln_determinant_spd()?;
        let exponent = 0.5 * (self.dof + n as Real + p as Real - 1.0);
        Ok(self.ln_normalizer - exponent * (ln_det_spread - self.ln_det_row))
    }

    /// `M + L⁻ᵀ Z Bᵀ` with `S = L Lᵀ ~ W_n(ν + n − 1, Σ⁻¹)` and `Ω = B Bᵀ`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix {
        let (n, p) = (self.mean.rows(), self.mean.cols());
        loop {
            let s = symmetrize(&self.mixing.sample(rng));
            let Ok(l) = s.cholesky() else { continue };
            let Ok(l_inv) = l.try_inverse() else { continue };
            let z = standard_normal_matrix(n, p, rng);
            let noise = &(&l_inv.transpose() * &z) * &self.column_factor.transpose();
            return &self.mean + &noise;
        }
    }
}
