//! Modified Lentz evaluation of continued fractions and truncated series.

use pd_core::{
    errors::{Error, Result},
    Real, Settings,
};

/// Magnitudes below this are replaced by it to keep Lentz's ratios finite.
const TINY: Real = 2.220_446_049_250_313_1e-16;

/// Evaluate `b0 + a1/(b1 + a2/(b2 + ...))` with the modified Lentz algorithm.
///
/// `terms(j)` returns `(a_j, b_j)` for `j = 1, 2, ...`. Iteration stops when
/// the multiplicative update `δ` satisfies `|δ − 1| ≤ tolerance`; tolerances
/// below machine epsilon are treated as machine epsilon. Running past
/// `max_iterations` terms is an [`Error::Convergence`], which usually means
/// the parameters are too extreme for the cap.
pub fn lentz<F>(b0: Real, mut terms: F, tolerance: Real, max_iterations: u64) -> Result<Real>
where
    F: FnMut(u64) -> (Real, Real),
{
    let tol = tolerance.max(f64::EPSILON);
    let mut f = if b0.abs() < TINY { TINY } else { b0 };
    let mut c = f;
    let mut d = 0.0;

    for j in 1..=max_iterations {
        let (a, b) = terms(j);
        d = b + a * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = b + a / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = c * d;
        f *= delta;
        if (delta - 1.0).abs() <= tol {
            tracing::trace!(iterations = j, value = f, "continued fraction converged");
            return Ok(f);
        }
        if !f.is_finite() {
            return Err(Error::Runtime(format!(
                "continued fraction diverged after {j} terms"
            )));
        }
    }

    tracing::debug!(max_iterations, "continued fraction hit its iteration cap");
    Err(Error::Convergence {
        method: "continued fraction",
        iterations: max_iterations,
    })
}

/// [`lentz`] with the tolerance and cap taken from [`Settings::instance`].
pub fn lentz_default<F>(b0: Real, terms: F) -> Result<Real>
where
    F: FnMut(u64) -> (Real, Real),
{
    let s = Settings::instance();
    lentz(
        b0,
        terms,
        s.continued_fraction_tolerance,
        s.continued_fraction_max_iterations,
    )
}

/// Sum `t0 + t1 + ...` where `t_n = next(n, t_{n-1})`, stopping once a term
/// is negligible relative to the partial sum.
pub fn sum_series<F>(first: Real, mut next: F, tolerance: Real, max_iterations: u64) -> Result<Real>
where
    F: FnMut(u64, Real) -> Real,
{
    let tol = tolerance.max(f64::EPSILON);
    let mut term = first;
    let mut sum = first;
    for n in 1..=max_iterations {
        term = next(n, term);
        sum += term;
        if term.abs() <= sum.abs() * tol {
            return Ok(sum);
        }
    }
    tracing::debug!(max_iterations, "series hit its iteration cap");
    Err(Error::Convergence {
        method: "series",
        iterations: max_iterations,
    })
}
