//! Error types for probdist.
//!
//! Every fallible operation in the workspace returns [`Result`]. Invalid
//! parameters and probabilities are [`Error::Domain`]; iterative kernels
//! that exhaust their budget report [`Error::Convergence`]. Nothing is
//! retried internally.

use thiserror::Error;

/// The top-level error type used throughout probdist.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A parameter or argument is outside the domain of the function.
    #[error("domain error: {0}")]
    Domain(String),

    /// An iterative method exceeded its iteration cap.
    #[error("{method} did not converge within {iterations} iterations")]
    Convergence {
        /// Name of the iterative method.
        method: &'static str,
        /// The cap that was hit.
        iterations: u64,
    },

    /// Vector or matrix dimensions do not agree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Dimension actually supplied.
        found: usize,
    },

    /// A matrix is singular or not positive definite.
    #[error("singular matrix: {0}")]
    Singular(String),

    /// General runtime error (see [`fail!`](crate::fail)).
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// `true` for [`Error::Convergence`].
    pub fn is_convergence(&self) -> bool {
        matches!(self, Error::Convergence { .. })
    }
}

/// Shorthand `Result` type used throughout probdist.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Domain(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use pd_core::{ensure, errors::Error};
/// fn positive(x: f64) -> pd_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Domain(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Domain(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use pd_core::{fail, errors::Error};
/// fn always_err() -> pd_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
