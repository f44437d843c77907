//! Special functions underlying every CDF in the crate.
//!
//! Gamma, log-Gamma, Beta, the regularized incomplete Gamma and Beta
//! functions, Hurwitz/Riemann zeta and the multivariate log-Gamma. The
//! incomplete functions are evaluated with the modified Lentz algorithm from
//! [`continued_fraction`] and fail with
//! [`Error::Convergence`](pd_core::Error::Convergence) rather than returning
//! an inaccurate value.

/// Beta function and the regularized incomplete beta.
pub mod beta;
/// Lentz continued fractions and series summation.
pub mod continued_fraction;
/// Gamma function, factorials and incomplete gamma.
pub mod gamma;
/// Riemann and Hurwitz zeta functions.
pub mod zeta;

pub use beta::{beta, incomplete_beta, ln_beta, regularized_incomplete_beta};
pub use gamma::{
    choose, factorial, gamma, ln_choose, ln_factorial, ln_gamma, ln_multivariate_gamma,
    lower_incomplete_gamma, regularized_lower_gamma, regularized_upper_gamma,
    upper_incomplete_gamma,
};
pub use statrs::function::erf::{erf, erf_inv, erfc};
pub use zeta::{hurwitz_zeta, riemann_zeta};
