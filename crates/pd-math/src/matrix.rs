//! `Matrix`: a two-dimensional matrix of reals.
//!
//! Thin newtype around `nalgebra::DMatrix<f64>` exposing what the
//! multivariate families need: indexing, transpose, products, determinant,
//! inverse, Cholesky factor and trace. Fallible factorizations return
//! [`Error::Singular`] or [`Error::DimensionMismatch`].

use nalgebra::{DMatrix, DVector};
use pd_core::{
    errors::{Error, Result},
    Real,
};
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

/// A dynamically-sized 2D matrix of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// Create a zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// Create a matrix filled with `value`.
    pub fn from_element(rows: usize, cols: usize, value: Real) -> Self {
        Self(DMatrix::from_element(rows, cols, value))
    }

    /// Create an identity matrix of size `n × n`.
    pub fn identity(n: usize) -> Self {
        Self(DMatrix::identity(n, n))
    }

    /// Create from a row-major data slice.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[Real]) -> Self {
        Self(DMatrix::from_row_slice(rows, cols, data))
    }

    /// Create from column-major data slice (nalgebra's native layout).
    pub fn from_column_slice(rows: usize, cols: usize, data: &[Real]) -> Self {
        Self(DMatrix::from_column_slice(rows, cols, data))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Return `true` if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.0.nrows() == self.0.ncols()
    }

    /// Borrow the inner `DMatrix`.
    pub fn inner(&self) -> &DMatrix<Real> {
        &self.0
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Determinant (only for square matrices).
    pub fn determinant(&self) -> Real {
        self.0.determinant()
    }

    /// Inverse; [`Error::Singular`] if the matrix is singular or not square.
    pub fn try_inverse(&self) -> Result<Self> {
        self.require_square()?;
        self.0
            .clone()
            .try_inverse()
            .map(Self)
            .ok_or_else(|| Error::Singular("matrix is not invertible".into()))
    }

    /// Lower-triangular Cholesky factor `L` with `L Lᵀ = self`.
    ///
    /// [`Error::Singular`] unless the matrix is symmetric positive definite.
    pub fn cholesky(&self) -> Result<Self> {
        self.require_square()?;
        nalgebra::linalg::Cholesky::new(self.0.clone())
            .map(|c| Self(c.unpack()))
            .ok_or_else(|| Error::Singular("matrix is not positive definite".into()))
    }

    /// `ln |det|` of a positive-definite matrix, through its Cholesky factor.
    pub fn ln_determinant_spd(&self) -> Result<Real> {
        let l = self.cholesky()?;
        Ok(2.0 * (0..l.rows()).map(|i| l[(i, i)].ln()).sum::<Real>())
    }

    /// Fail with [`Error::DimensionMismatch`] unless the matrix is square.
    pub fn require_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.rows(),
                found: self.cols(),
            })
        }
    }

    /// Fail with [`Error::DimensionMismatch`] unless the shape is `rows × cols`.
    pub fn require_shape(&self, rows: usize, cols: usize) -> Result<()> {
        if self.rows() != rows {
            return Err(Error::DimensionMismatch {
                expected: rows,
                found: self.rows(),
            });
        }
        if self.cols() != cols {
            return Err(Error::DimensionMismatch {
                expected: cols,
                found: self.cols(),
            });
        }
        Ok(())
    }

    /// Trace (sum of diagonal elements).
    pub fn trace(&self) -> Real {
        self.0.trace()
    }

    /// Frobenius norm.
    pub fn norm(&self) -> Real {
        self.0.norm()
    }

    /// Diagonal elements.
    pub fn diagonal(&self) -> Vec<Real> {
        let n = self.0.nrows().min(self.0.ncols());
        (0..n).map(|i| self.0[(i, i)]).collect()
    }

    /// Matrix-vector product `M * v`.
    pub fn mul_vec(&self, v: &[Real]) -> Result<Vec<Real>> {
        if v.len() != self.cols() {
            return Err(Error::DimensionMismatch {
                expected: self.cols(),
                found: v.len(),
            });
        }
        Ok((&self.0 * DVector::from_column_slice(v)).iter().copied().collect())
    }

    /// Build a matrix from a closure over `(row, col)`.
    pub fn from_fn<F: FnMut(usize, usize) -> Real>(rows: usize, cols: usize, f: F) -> Self {
        Self(DMatrix::from_fn(rows, cols, f))
    }

    /// `true` if `self == selfᵀ` up to `tol` per element.
    pub fn is_symmetric(&self, tol: Real) -> bool {
        self.is_square()
            && (0..self.rows()).all(|i| (0..i).all(|j| (self.0[(i, j)] - self.0[(j, i)]).abs() <= tol))
    }

    /// Element-wise apply.
    pub fn map<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        Self(self.0.map(f))
    }

    /// Multiply every element by `scalar`.
    pub fn scale(&self, scalar: Real) -> Self {
        Self(&self.0 * scalar)
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Real {
        self.0.sum()
    }
}

// ── From / Into ───────────────────────────────────────────────────────────────

impl From<DMatrix<Real>> for Matrix {
    fn from(m: DMatrix<Real>) -> Self {
        Self(m)
    }
}

impl From<Matrix> for DMatrix<Real> {
    fn from(m: Matrix) -> Self {
        m.0
    }
}

// ── Indexing ──────────────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.0[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.0[(i, j)]
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

impl Add for &Matrix {
    type Output = Matrix;
    fn add(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 + &rhs.0)
    }
}

impl Add for Matrix {
    type Output = Matrix;
    fn add(self, rhs: Matrix) -> Matrix {
        Matrix(self.0 + rhs.0)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;
    fn sub(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 - &rhs.0)
    }
}

impl Sub for Matrix {
    type Output = Matrix;
    fn sub(self, rhs: Matrix) -> Matrix {
        Matrix(self.0 - rhs.0)
    }
}

impl Mul for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 * &rhs.0)
    }
}

impl Mul for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix(self.0 * rhs.0)
    }
}

impl Mul<Real> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Real) -> Matrix {
        Matrix(&self.0 * rhs)
    }
}

impl Mul<Real> for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Real) -> Matrix {
        Matrix(self.0 * rhs)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        Matrix(-&self.0)
    }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        Matrix(-self.0)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.0.nrows() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for j in 0..self.0.ncols() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.0[(i, j)])?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
