//! One-dimensional solvers used to invert CDFs.
//!
//! - [`bisection`]: bracketed search for monotone targets (Beta quantile).
//! - [`bisection_log`]: bracket expansion and geometric bisection on the
//!   positive half-line to a relative precision (heavy and tiny quantiles).
//! - [`newton_safeguarded`]: Newton–Raphson with a halving safeguard
//!   (Gamma quantile).
//! - [`fmin`]: Brent's derivative-free minimizer (highest-density intervals).
//! - [`discrete_quantile`]: integer search for discrete quantiles.
//!
//! All of them take the objective as a fallible closure so that convergence
//! failures inside a CDF propagate unchanged.

mod discrete;
mod fmin;

pub use discrete::discrete_quantile;
pub use fmin::fmin;

use pd_core::{
    errors::{Error, Result},
    ensure, Real, Settings,
};

// ── Bisection ────────────────────────────────────────────────────────────────

/// Bisection for a non-decreasing `f` on `[lower, upper]`.
///
/// Shrinks the bracket toward the side where `f(mid)` disagrees with
/// `target` and returns the midpoint once `upper − lower ≤ precision`.
pub fn bisection<F>(
    mut f: F,
    target: Real,
    lower: Real,
    upper: Real,
    precision: Real,
    max_iterations: u64,
) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    ensure!(
        lower < upper,
        "bisection needs lower < upper, got [{lower}, {upper}]"
    );
    ensure!(
        precision > 0.0,
        "bisection precision must be positive, got {precision}"
    );
    let mut a = lower;
    let mut b = upper;
    for i in 0..max_iterations {
        if b - a <= precision {
            tracing::trace!(iterations = i, "bisection converged");
            return Ok(0.5 * (a + b));
        }
        let mid = 0.5 * (a + b);
        if f(mid)? > target {
            b = mid;
        } else {
            a = mid;
        }
    }
    tracing::debug!(max_iterations, lower = a, upper = b, "bisection hit its iteration cap");
    Err(Error::Convergence {
        method: "bisection",
        iterations: max_iterations,
    })
}

/// [`bisection`] with precision and cap from [`Settings::instance`].
pub fn bisection_default<F>(f: F, target: Real, lower: Real, upper: Real) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    let s = Settings::instance();
    bisection(
        f,
        target,
        lower,
        upper,
        s.bisection_precision,
        s.bisection_max_iterations,
    )
}

// ── Geometric bisection ──────────────────────────────────────────────────────

/// Bisection in `ln x` for a non-decreasing `f` on `(0, ∞)`.
///
/// Starting from `x0`, the bracket is halved or doubled until it straddles
/// `target`, then split at geometric midpoints until
/// `upper / lower − 1 ≤ rel_precision`. A root below the smallest positive
/// float returns `0`; one beyond the largest finite float returns `+∞`.
pub fn bisection_log<F>(
    mut f: F,
    target: Real,
    x0: Real,
    rel_precision: Real,
    max_iterations: u64,
) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    ensure!(
        x0 > 0.0 && x0.is_finite(),
        "log bisection needs a positive finite starting point, got {x0}"
    );
    ensure!(
        rel_precision > 0.0,
        "log bisection precision must be positive, got {rel_precision}"
    );
    let mut iterations = 0;
    let (mut a, mut b) = if f(x0)? > target { (0.5 * x0, x0) } else { (x0, 2.0 * x0) };
    // expand downwards
    while f(a)? > target {
        iterations += 1;
        if a < f64::MIN_POSITIVE || iterations >= max_iterations {
            return if a < f64::MIN_POSITIVE { Ok(0.0) } else { log_cap(max_iterations) };
        }
        b = a;
        a *= 0.5;
    }
    // expand upwards
    while f(b)? <= target {
        iterations += 1;
        if !b.is_finite() || iterations >= max_iterations {
            return if b.is_finite() { log_cap(max_iterations) } else { Ok(f64::INFINITY) };
        }
        a = b;
        b *= 2.0;
    }
    while iterations < max_iterations {
        if b / a - 1.0 <= rel_precision {
            tracing::trace!(iterations, "log bisection converged");
            return Ok(a * (b / a).sqrt());
        }
        let mid = a * (b / a).sqrt();
        if f(mid)? > target {
            b = mid;
        } else {
            a = mid;
        }
        iterations += 1;
    }
    log_cap(max_iterations)
}

fn log_cap(max_iterations: u64) -> Result<Real> {
    tracing::debug!(max_iterations, "log bisection hit its iteration cap");
    Err(Error::Convergence {
        method: "log bisection",
        iterations: max_iterations,
    })
}

/// [`bisection_log`] with the cap from [`Settings::instance`]; the
/// configured bisection precision is read as a relative width.
pub fn bisection_log_default<F>(f: F, target: Real, x0: Real) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    let s = Settings::instance();
    // doubling from 1 to f64::MAX alone takes 1024 steps
    let cap = s.bisection_max_iterations.max(4_096);
    bisection_log(f, target, x0, s.bisection_precision, cap)
}

// ── Safeguarded Newton-Raphson ────────────────────────────────────────────────

/// Newton–Raphson for `F(x) = target` on the positive half-line.
///
/// `f_df(x)` returns `(F(x), F'(x))`. Each step is
/// `x ← x − (F(x) − target) / F'(x)`. A step that would land at or below
/// `tolerance · min(x, 1)` is replaced by halving the current iterate, and a
/// non-finite step (vanishing derivative) halves or doubles `x` depending on
/// which side of the target it is. Iteration stops after a genuine Newton
/// step with `|step| ≤ tolerance · min(x, 1)`.
pub fn newton_safeguarded<F>(
    mut f_df: F,
    target: Real,
    x0: Real,
    tolerance: Real,
    max_iterations: u64,
) -> Result<Real>
where
    F: FnMut(Real) -> Result<(Real, Real)>,
{
    ensure!(
        x0 > 0.0 && x0.is_finite(),
        "newton needs a positive finite starting point, got {x0}"
    );
    ensure!(
        tolerance > 0.0,
        "newton tolerance must be positive, got {tolerance}"
    );
    let mut x = x0;
    for i in 0..max_iterations {
        let (value, slope) = f_df(x)?;
        let step = (value - target) / slope;
        if !step.is_finite() {
            x = if value > target { 0.5 * x } else { 2.0 * x };
            continue;
        }
        let scale = tolerance * x.min(1.0);
        let next = x - step;
        if next <= scale {
            x *= 0.5;
            continue;
        }
        x = next;
        if step.abs() <= scale {
            tracing::trace!(iterations = i + 1, root = x, "newton converged");
            return Ok(x);
        }
    }
    tracing::debug!(max_iterations, last = x, "newton hit its iteration cap");
    Err(Error::Convergence {
        method: "newton",
        iterations: max_iterations,
    })
}

/// [`newton_safeguarded`] with tolerance and cap from [`Settings::instance`].
pub fn newton_default<F>(f_df: F, target: Real, x0: Real) -> Result<Real>
where
    F: FnMut(Real) -> Result<(Real, Real)>,
{
    let s = Settings::instance();
    newton_safeguarded(f_df, target, x0, s.newton_tolerance, s.newton_max_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bisection_sqrt2() {
        let root = bisection(|x| Ok(x * x), 2.0, 0.0, 2.0, 1e-12, 200).unwrap();
        assert_abs_diff_eq!(root, 2.0_f64.sqrt(), epsilon = 1e-11);
    }

    #[test]
    fn bisection_step_target() {
        // smallest x with f(x) ≥ 0.5 for a step at 0.3
        let root = bisection(|x| Ok(if x >= 0.3 { 1.0 } else { 0.0 }), 0.5, 0.0, 1.0, 1e-9, 200).unwrap();
        assert_abs_diff_eq!(root, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn bisection_rejects_bad_bracket() {
        assert!(bisection(|x| Ok(x), 0.5, 1.0, 0.0, 1e-9, 200).is_err());
        assert!(bisection(|x| Ok(x), 0.5, 0.0, 1.0, 0.0, 200).is_err());
    }

    #[test]
    fn bisection_reports_cap() {
        let r = bisection(|x| Ok(x), 0.5, 0.0, 1.0, 1e-12, 5);
        assert!(matches!(r, Err(Error::Convergence { method: "bisection", .. })));
    }

    #[test]
    fn bisection_propagates_errors() {
        let r = bisection(|_| Err(Error::Runtime("boom".into())), 0.5, 0.0, 1.0, 1e-9, 200);
        assert_eq!(r, Err(Error::Runtime("boom".into())));
    }

    #[test]
    fn newton_exponential_quantile() {
        // F(x) = 1 − e^{−x}
        let root = newton_safeguarded(|x| Ok((1.0 - (-x).exp(), (-x).exp())), 0.9, 1.0, 1e-10, 100).unwrap();
        assert_abs_diff_eq!(root, 10.0_f64.ln(), epsilon = 1e-10);
    }

    #[test]
    fn newton_halves_instead_of_crossing_zero() {
        // From x0 = 10 the first step lands far below zero.
        let root = newton_safeguarded(|x| Ok((1.0 - (-x).exp(), (-x).exp())), 0.01, 10.0, 1e-10, 100).unwrap();
        assert_abs_diff_eq!(root, -(0.99_f64.ln()), epsilon = 1e-12);
    }

    #[test]
    fn newton_vanishing_derivative() {
        // e^{-800} underflows, so the first step is infinite.
        let root = newton_safeguarded(|x| Ok((1.0 - (-x).exp(), (-x).exp())), 0.5, 800.0, 1e-10, 100).unwrap();
        assert_abs_diff_eq!(root, 2.0_f64.ln(), epsilon = 1e-10);
    }

    #[test]
    fn newton_reports_cap() {
        let r = newton_safeguarded(|x| Ok((x.atan(), 1.0 / (1.0 + x * x))), 1.5, 1.0, 1e-12, 3);
        assert!(matches!(r, Err(Error::Convergence { method: "newton", .. })));
    }

    #[test]
    fn log_bisection_resolves_tiny_and_huge_roots() {
        let tiny = bisection_log(|x| Ok(x), 1e-250, 1.0, 1e-12, 5_000).unwrap();
        assert!((tiny / 1e-250 - 1.0).abs() < 1e-11);
        let huge = bisection_log(|x| Ok(x.ln()), 600.0, 1.0, 1e-12, 5_000).unwrap();
        assert!((huge.ln() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn log_bisection_saturates() {
        assert_eq!(bisection_log(|_| Ok(1.0), 0.5, 1.0, 1e-9, 5_000).unwrap(), 0.0);
        assert_eq!(bisection_log(|_| Ok(0.0), 0.5, 1.0, 1e-9, 5_000).unwrap(), f64::INFINITY);
        assert!(bisection_log(|x| Ok(x), 0.5, 0.0, 1e-9, 100).is_err());
        let r = bisection_log(|x| Ok(x), 1e-200, 1.0, 1e-12, 10);
        assert!(matches!(r, Err(Error::Convergence { method: "log bisection", .. })));
    }
}
