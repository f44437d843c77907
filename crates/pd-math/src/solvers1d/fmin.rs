//! Brent's derivative-free minimizer (netlib `fmin`).

use pd_core::{
    errors::{Error, Result},
    ensure, Real,
};

/// Evaluation cap; the golden-section fallback guarantees far fewer.
const MAX_ITERATIONS: u64 = 1_000;

/// Locate a minimum of `f` on `[ax, bx]` to within `tol`.
///
/// Golden-section search combined with successive parabolic interpolation.
/// A parabolic step is taken only when it falls strictly inside the current
/// bracket and moves less than half the step before last; `f` is never
/// evaluated within `√ε·|x| + tol/3` of a point already tried. Stops when
/// `|x − m| ≤ 2·tol1 − (b − a)/2`, `m` being the bracket midpoint.
pub fn fmin<F>(mut f: F, ax: Real, bx: Real, tol: Real) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    ensure!(ax < bx, "fmin needs ax < bx, got [{ax}, {bx}]");
    ensure!(tol > 0.0, "fmin tolerance must be positive, got {tol}");

    // (3 − √5) / 2, the squared inverse of the golden ratio
    let c = 0.5 * (3.0 - 5.0_f64.sqrt());
    let eps = f64::EPSILON.sqrt();

    let mut a = ax;
    let mut b = bx;
    let mut v = a + c * (b - a);
    let mut w = v;
    let mut x = v;
    let mut d: Real = 0.0;
    let mut e: Real = 0.0;
    let mut fx = f(x)?;
    let mut fv = fx;
    let mut fw = fx;

    for i in 0..MAX_ITERATIONS {
        let xm = 0.5 * (a + b);
        let tol1 = eps * x.abs() + tol / 3.0;
        let tol2 = 2.0 * tol1;

        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            tracing::trace!(iterations = i, minimum = x, "fmin converged");
            return Ok(x);
        }

        let mut golden = true;
        if e.abs() > tol1 {
            // fit parabola through (v, fv), (w, fw), (x, fx)
            let mut r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = d;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - x) && p < q * (b - x) {
                d = p / q;
                let u = x + d;
                if (u - a) < tol2 || (b - u) < tol2 {
                    d = tol1.copysign(xm - x);
                }
                golden = false;
            }
        }
        if golden {
            e = if x >= xm { a - x } else { b - x };
            d = c * e;
        }

        let u = if d.abs() >= tol1 {
            x + d
        } else {
            x + tol1.copysign(d)
        };
        let fu = f(u)?;

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    tracing::debug!(max_iterations = MAX_ITERATIONS, "fmin hit its iteration cap");
    Err(Error::Convergence {
        method: "fmin",
        iterations: MAX_ITERATIONS,
    })
}
