//! Gamma function family.

use std::f64::consts::PI;

use pd_core::{errors::Result, ensure, Real, Settings};

use super::continued_fraction::{lentz_default, sum_series};

const LANCZOS_G: Real = 7.0;
const LANCZOS_COEFFICIENTS: [Real; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// `ln √(2π)`.
const LN_SQRT_2PI: Real = 0.918_938_533_204_672_7;

/// Smallest argument at which the Stirling series is used without shifting.
const STIRLING_THRESHOLD: Real = 7.0;

/// The Gamma function Γ(x).
///
/// Lanczos approximation (g = 7, nine coefficients) for `x ≥ 0.5` and the
/// reflection formula `Γ(x) = π / (sin(πx) Γ(1 − x))` below. Poles at the
/// non-positive integers come out as infinities.
pub fn gamma(x: Real) -> Real {
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let a = LANCZOS_COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFICIENTS[0], |acc, (i, c)| acc + c / (x + i as Real));
    (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
}

/// The natural logarithm of `|Γ(x)|`.
///
/// Stirling's series with rational corrections through `1/x¹¹`, after
/// shifting the argument up to at least 7 with the recurrence
/// `Γ(x) = Γ(x + n) / (x (x + 1) ... (x + n − 1))`. Negative arguments go
/// through the reflection formula.
pub fn ln_gamma(x: Real) -> Real {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        if x == x.floor() {
            return f64::INFINITY;
        }
        return PI.ln() - (PI * x).sin().abs().ln() - ln_gamma(1.0 - x);
    }
    if x.is_infinite() {
        return f64::INFINITY;
    }

    let mut z = x;
    let mut shift = 1.0;
    while z < STIRLING_THRESHOLD {
        shift *= z;
        z += 1.0;
    }

    let r = 1.0 / (z * z);
    let series = (1.0 / 12.0
        - r * (1.0 / 360.0
            - r * (1.0 / 1260.0 - r * (1.0 / 1680.0 - r * (1.0 / 1188.0 - r * 691.0 / 360_360.0)))))
        / z;
    (z - 0.5) * z.ln() - z + LN_SQRT_2PI + series - shift.ln()
}

/// `ln n!`. Exact products for `n ≤ 170`, Stirling above.
pub fn ln_factorial(n: u64) -> Real {
    if n <= 170 {
        factorial(n).ln()
    } else {
        ln_gamma(n as Real + 1.0)
    }
}

/// `n!` as a float; infinite beyond 170.
pub fn factorial(n: u64) -> Real {
    if n > 170 {
        return f64::INFINITY;
    }
    (2..=n).fold(1.0, |acc, k| acc * k as Real)
}

/// `ln C(n, k)`; `-∞` when `k > n`.
pub fn ln_choose(n: u64, k: u64) -> Real {
    if k > n {
        return f64::NEG_INFINITY;
    }
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}

/// Binomial coefficient `C(n, k)`, rounded to the nearest integer when it
/// is representable exactly.
pub fn choose(n: u64, k: u64) -> Real {
    if k > n {
        return 0.0;
    }
    let c = ln_choose(n, k).exp();
    if c < 2f64.powi(52) {
        c.round()
    } else {
        c
    }
}

/// Multivariate log-Gamma `ln Γ_p(a)`, defined for `a > (p − 1)/2`.
pub fn ln_multivariate_gamma(p: usize, a: Real) -> Result<Real> {
    ensure!(p > 0, "multivariate gamma dimension must be positive");
    ensure!(
        a > (p as Real - 1.0) / 2.0,
        "multivariate gamma needs a > (p - 1)/2, got a = {a}, p = {p}"
    );
    let pf = p as Real;
    let sum: Real = (1..=p)
        .map(|j| ln_gamma(a + (1.0 - j as Real) / 2.0))
        .sum();
    Ok(pf * (pf - 1.0) / 4.0 * PI.ln() + sum)
}

// ── Incomplete Gamma ──────────────────────────────────────────────────────────

fn check_incomplete_gamma_args(s: Real, x: Real) -> Result<()> {
    ensure!(
        s > 0.0 && s.is_finite(),
        "incomplete gamma needs a positive finite shape, got {s}"
    );
    ensure!(
        x >= 0.0,
        "incomplete gamma needs a non-negative argument, got {x}"
    );
    Ok(())
}

/// Returns `(P(s, x), Q(s, x))`, computing whichever side converges fast and
/// taking the complement for the other.
fn incomplete_gamma_pair(s: Real, x: Real) -> Result<(Real, Real)> {
    check_incomplete_gamma_args(s, x)?;
    if x == 0.0 {
        return Ok((0.0, 1.0));
    }
    if x.is_infinite() {
        return Ok((1.0, 0.0));
    }
    let ln_prefactor = -x + s * x.ln() - ln_gamma(s);

    if x < s + 1.0 {
        // Σ xⁿ / (s (s+1) ... (s+n))
        let settings = Settings::instance();
        let series = sum_series(
            1.0 / s,
            |n, t| t * x / (s + n as Real),
            settings.continued_fraction_tolerance,
            settings.continued_fraction_max_iterations,
        )?;
        let p = (ln_prefactor.exp() * series).min(1.0);
        Ok((p, 1.0 - p))
    } else {
        // Legendre's continued fraction for Γ(s, x) eˣ x⁻ˢ
        let cf = lentz_default(x + 1.0 - s, |j| {
            let j = j as Real;
            (-j * (j - s), x + 2.0 * j + 1.0 - s)
        })?;
        let q = (ln_prefactor.exp() / cf).min(1.0);
        Ok((1.0 - q, q))
    }
}

/// Regularized lower incomplete Gamma `P(s, x) = γ(s, x) / Γ(s)`.
///
/// Power series for `x < s + 1`, continued fraction otherwise. Fails with a
/// domain error for `s ≤ 0` or `x < 0`.
pub fn regularized_lower_gamma(s: Real, x: Real) -> Result<Real> {
    incomplete_gamma_pair(s, x).map(|(p, _)| p)
}

/// Regularized upper incomplete Gamma `Q(s, x) = 1 − P(s, x)`.
pub fn regularized_upper_gamma(s: Real, x: Real) -> Result<Real> {
    incomplete_gamma_pair(s, x).map(|(_, q)| q)
}

/// Unregularized lower incomplete Gamma `γ(s, x)`.
pub fn lower_incomplete_gamma(s: Real, x: Real) -> Result<Real> {
    Ok(regularized_lower_gamma(s, x)? * gamma(s))
}

/// Unregularized upper incomplete Gamma `Γ(s, x)`.
pub fn upper_incomplete_gamma(s: Real, x: Real) -> Result<Real> {
    Ok(regularized_upper_gamma(s, x)? * gamma(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pd_core::Error;

    #[test]
    fn gamma_at_integers_is_factorial() {
        let mut f = 1.0;
        for n in 1..15u32 {
            assert_relative_eq!(gamma(n as Real), f, max_relative = 1e-13);
            f *= n as Real;
        }
    }

    #[test]
    fn gamma_half_integers() {
        assert_relative_eq!(gamma(0.5), PI.sqrt(), max_relative = 1e-14);
        assert_relative_eq!(gamma(1.5), 0.5 * PI.sqrt(), max_relative = 1e-14);
        assert_relative_eq!(gamma(-0.5), -2.0 * PI.sqrt(), max_relative = 1e-13);
    }

    #[test]
    fn ln_gamma_matches_gamma() {
        for &x in &[0.1, 0.5, 1.0, 2.5, 6.9, 7.0, 12.3, 50.0] {
            assert_abs_diff_eq!(ln_gamma(x), gamma(x).ln(), epsilon = 1e-10);
        }
        assert_abs_diff_eq!(ln_gamma(1.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ln_gamma(2.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn ln_gamma_large_argument() {
        // ln Γ(1000) = ln 999!
        assert_relative_eq!(ln_gamma(1000.0), 5905.220_423_209_181, max_relative = 1e-12);
    }

    #[test]
    fn ln_gamma_poles() {
        assert!(ln_gamma(0.0).is_infinite());
        assert!(ln_gamma(-3.0).is_infinite());
    }

    #[test]
    fn factorials_and_binomials() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(10), 3_628_800.0);
        assert_eq!(choose(25, 9), 2_042_975.0);
        assert_eq!(choose(3, 5), 0.0);
        assert!(ln_choose(3, 5).is_infinite());
    }

    #[test]
    fn incomplete_gamma_known_values() {
        // Γ(3, 5.5) = e^{-5.5} (x² + 2x + 2)
        assert_abs_diff_eq!(upper_incomplete_gamma(3.0, 5.5).unwrap(), 0.176_752_86, epsilon = 1e-8);
        assert_abs_diff_eq!(regularized_lower_gamma(3.0, 5.5).unwrap(), 0.911_623_57, epsilon = 1e-8);
        // P(1, x) = 1 − e^{−x}
        for &x in &[0.1, 1.0, 2.0, 10.0] {
            assert_abs_diff_eq!(
                regularized_lower_gamma(1.0, x).unwrap(),
                1.0 - (-x as Real).exp(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn incomplete_gamma_complements() {
        for &(s, x) in &[(0.5, 0.2), (2.0, 3.5), (9.0, 8.0), (30.0, 45.0)] {
            let p = regularized_lower_gamma(s, x).unwrap();
            let q = regularized_upper_gamma(s, x).unwrap();
            assert_abs_diff_eq!(p + q, 1.0, epsilon = 1e-14);
            assert_relative_eq!(
                lower_incomplete_gamma(s, x).unwrap() + upper_incomplete_gamma(s, x).unwrap(),
                gamma(s),
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn incomplete_gamma_boundaries() {
        assert_eq!(regularized_lower_gamma(2.0, 0.0).unwrap(), 0.0);
        assert_eq!(regularized_lower_gamma(2.0, f64::INFINITY).unwrap(), 1.0);
        assert!(matches!(regularized_lower_gamma(0.0, 1.0), Err(Error::Domain(_))));
        assert!(matches!(regularized_lower_gamma(-1.0, 1.0), Err(Error::Domain(_))));
        assert!(matches!(regularized_lower_gamma(1.0, -0.5), Err(Error::Domain(_))));
    }

    #[test]
    fn multivariate_gamma_reduces_to_gamma() {
        assert_abs_diff_eq!(ln_multivariate_gamma(1, 3.3).unwrap(), ln_gamma(3.3), epsilon = 1e-14);
        // Γ_2(a) = √π Γ(a) Γ(a − ½)
        let a = 2.7;
        assert_abs_diff_eq!(
            ln_multivariate_gamma(2, a).unwrap(),
            0.5 * PI.ln() + ln_gamma(a) + ln_gamma(a - 0.5),
            epsilon = 1e-12
        );
        assert!(ln_multivariate_gamma(3, 0.9).is_err());
    }
}
