//! Hurwitz and Riemann zeta functions.

use pd_core::{errors::Result, ensure, Real};

/// Terms summed directly before switching to the Euler–Maclaurin tail.
const DIRECT_TERMS: u32 = 10;

/// Bernoulli numbers `B_2, B_4, ..., B_16`.
const BERNOULLI: [Real; 8] = [
    1.0 / 6.0,
    -1.0 / 30.0,
    1.0 / 42.0,
    -1.0 / 30.0,
    5.0 / 66.0,
    -691.0 / 2730.0,
    7.0 / 6.0,
    -3617.0 / 510.0,
];

/// The Hurwitz zeta function `ζ(s, q) = Σ_{k≥0} (k + q)^{−s}` for `s > 1`,
/// `q > 0`.
///
/// Sums the first ten terms directly and the remainder with the
/// Euler–Maclaurin formula truncated after `B_16`.
pub fn hurwitz_zeta(s: Real, q: Real) -> Result<Real> {
    ensure!(s > 1.0, "hurwitz zeta needs s > 1, got {s}");
    ensure!(q > 0.0, "hurwitz zeta needs q > 0, got {q}");

    let head: Real = (0..DIRECT_TERMS).map(|k| (q + k as Real).powf(-s)).sum();

    let a = q + DIRECT_TERMS as Real;
    let a_pow = a.powf(-s);
    let mut tail = a * a_pow / (s - 1.0) + 0.5 * a_pow;

    // factor = s (s+1) ... (s+2j−2) a^{−s−2j+1} / (2j)!
    let mut factor = s * a_pow / a / 2.0;
    for (j, b) in BERNOULLI.iter().enumerate() {
        let term = b * factor;
        tail += term;
        if term.abs() <= tail.abs() * f64::EPSILON {
            break;
        }
        let k = 2.0 * (j as Real + 1.0);
        factor *= (s + k - 1.0) * (s + k) / (a * a * (k + 1.0) * (k + 2.0));
    }
    Ok(head + tail)
}

/// The Riemann zeta function `ζ(s) = ζ(s, 1)` for `s > 1`.
pub fn riemann_zeta(s: Real) -> Result<Real> {
    hurwitz_zeta(s, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn riemann_even_values() {
        assert_relative_eq!(riemann_zeta(2.0).unwrap(), PI * PI / 6.0, max_relative = 1e-14);
        assert_relative_eq!(riemann_zeta(4.0).unwrap(), PI.powi(4) / 90.0, max_relative = 1e-14);
    }

    #[test]
    fn near_pole() {
        // ζ(1.1) ≈ 10.5844484649508
        assert_relative_eq!(riemann_zeta(1.1).unwrap(), 10.584_448_464_950_8, max_relative = 1e-12);
    }

    #[test]
    fn hurwitz_shift() {
        // ζ(s, q) = q^{−s} + ζ(s, q + 1)
        let (s, q) = (2.5, 0.3);
        assert_relative_eq!(
            hurwitz_zeta(s, q).unwrap(),
            q.powf(-s) + hurwitz_zeta(s, q + 1.0).unwrap(),
            max_relative = 1e-13
        );
    }

    #[test]
    fn rejects_divergent_arguments() {
        assert!(riemann_zeta(1.0).is_err());
        assert!(hurwitz_zeta(2.0, 0.0).is_err());
    }
}
