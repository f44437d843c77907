//! Summaries of posterior samples.
//!
//! The quantile interpolates linearly between order statistics
//! (`h = (n − 1)p`), and the CDF is its exact inverse on the sample range.

use pd_core::{errors::Result, ensure, Probability, Real};

use crate::interval::{check_mass, Interval};

fn sorted(samples: &[Real]) -> Result<Vec<Real>> {
    ensure!(!samples.is_empty(), "empirical summaries need at least one sample");
    ensure!(
        samples.iter().all(|x| !x.is_nan()),
        "empirical summaries do not accept NaN samples"
    );
    let mut v = samples.to_vec();
    v.sort_by(Real::total_cmp);
    Ok(v)
}

fn quantile_sorted(x: &[Real], p: Probability) -> Real {
    let h = (x.len() - 1) as Real * p;
    let i = h.floor() as usize;
    if i + 1 >= x.len() {
        return x[x.len() - 1];
    }
    x[i] + (h - i as Real) * (x[i + 1] - x[i])
}

/// Sample quantile at `p`; the input is not modified.
pub fn empirical_quantile(samples: &[Real], p: Probability) -> Result<Real> {
    ensure!(
        (0.0..=1.0).contains(&p),
        "probability must lie in [0, 1], got {p}"
    );
    Ok(quantile_sorted(&sorted(samples)?, p))
}

/// Interpolated sample CDF at `y`: `0` below the minimum, `1` from the
/// maximum on.
pub fn empirical_cdf(samples: &[Real], y: Real) -> Result<Probability> {
    let x = sorted(samples)?;
    let n = x.len();
    if y < x[0] {
        return Ok(0.0);
    }
    if y >= x[n - 1] {
        return Ok(1.0);
    }
    // x[i] ≤ y < x[i + 1]
    let i = x.partition_point(|v| *v <= y) - 1;
    let frac = (y - x[i]) / (x[i + 1] - x[i]);
    Ok((i as Real + frac) / (n - 1) as Real)
}

/// Equal-tail interval holding `mass` of the samples.
pub fn empirical_credible_interval(samples: &[Real], mass: Probability) -> Result<Interval> {
    check_mass(mass)?;
    let x = sorted(samples)?;
    let tail = 0.5 * (1.0 - mass);
    Ok(Interval {
        lower: quantile_sorted(&x, tail),
        upper: quantile_sorted(&x, 1.0 - tail),
    })
}

/// Posterior probability of the one-sided null `θ ≤ θ₀` estimated from
/// samples.
pub fn lower_tail_probability(samples: &[Real], theta0: Real) -> Result<Probability> {
    empirical_cdf(samples, theta0)
}

/// Posterior probability of the one-sided null `θ ≥ θ₀` estimated from
/// samples.
pub fn upper_tail_probability(samples: &[Real], theta0: Real) -> Result<Probability> {
    Ok(1.0 - empirical_cdf(samples, theta0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quantile_interpolates() {
        let x = [5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(empirical_quantile(&x, 0.0).unwrap(), 1.0);
        assert_eq!(empirical_quantile(&x, 1.0).unwrap(), 5.0);
        assert_abs_diff_eq!(empirical_quantile(&x, 0.3).unwrap(), 2.2, epsilon = 1e-12);
        assert!(empirical_quantile(&x, 1.5).is_err());
    }

    #[test]
    fn cdf_inverts_quantile() {
        let x = [0.4, 2.5, -1.0, 3.3, 0.9, 7.0];
        for &p in &[0.1, 0.35, 0.5, 0.92] {
            let q = empirical_quantile(&x, p).unwrap();
            assert_abs_diff_eq!(empirical_cdf(&x, q).unwrap(), p, epsilon = 1e-12);
        }
        assert_eq!(empirical_cdf(&x, -5.0).unwrap(), 0.0);
        assert_eq!(empirical_cdf(&x, 7.0).unwrap(), 1.0);
    }

    #[test]
    fn interval_and_tails() {
        let x: Vec<Real> = (0..=100).map(Real::from).collect();
        let ci = empirical_credible_interval(&x, 0.9).unwrap();
        assert_abs_diff_eq!(ci.lower, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ci.upper, 95.0, epsilon = 1e-12);
        assert_abs_diff_eq!(upper_tail_probability(&x, 75.0).unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn rejects_empty_and_nan() {
        assert!(empirical_quantile(&[], 0.5).is_err());
        assert!(empirical_cdf(&[1.0, Real::NAN], 0.5).is_err());
    }
}
