//! Integer quantile search.

use pd_core::{
    errors::{Error, Result},
    ensure, Integer, Probability,
};

/// Smallest `k ≥ lower` (and `≤ upper` when given) with `cdf(k) ≥ p`.
///
/// Doubles a step from `lower` until the CDF reaches `p`, then bisects on
/// the integers. The target is relaxed by a few ulps so that feeding back
/// `cdf(k)` computed along another path still returns `k`. With no upper
/// bound, `p = 1` yields `Integer::MAX`.
pub fn discrete_quantile<F>(
    mut cdf: F,
    p: Probability,
    lower: Integer,
    upper: Option<Integer>,
) -> Result<Integer>
where
    F: FnMut(Integer) -> Result<Probability>,
{
    ensure!(
        (0.0..=1.0).contains(&p),
        "probability must lie in [0, 1], got {p}"
    );
    if p == 0.0 {
        return Ok(lower);
    }
    if p == 1.0 {
        return Ok(upper.unwrap_or(Integer::MAX));
    }
    let target = p * (1.0 - 64.0 * f64::EPSILON);

    if cdf(lower)? >= target {
        return Ok(lower);
    }

    // cdf(lo) < target ≤ cdf(hi)
    let mut lo = lower;
    let mut step: Integer = 1;
    let mut hi = loop {
        let candidate = lo.saturating_add(step);
        if let Some(u) = upper {
            if candidate >= u {
                break u;
            }
        }
        if cdf(candidate)? >= target {
            break candidate;
        }
        if candidate == Integer::MAX {
            return Err(Error::Convergence {
                method: "discrete quantile",
                iterations: 64,
            });
        }
        lo = candidate;
        step = step.saturating_mul(2);
    };

    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if cdf(mid)? >= target {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometric_cdf(k: Integer) -> Result<Probability> {
        Ok(if k < 0 { 0.0 } else { 1.0 - 0.5_f64.powi(k as i32 + 1) })
    }

    #[test]
    fn finds_smallest_index() {
        assert_eq!(discrete_quantile(geometric_cdf, 0.5, 0, None).unwrap(), 0);
        assert_eq!(discrete_quantile(geometric_cdf, 0.5000001, 0, None).unwrap(), 1);
        assert_eq!(discrete_quantile(geometric_cdf, 0.75, 0, None).unwrap(), 1);
        assert_eq!(discrete_quantile(geometric_cdf, 0.99, 0, None).unwrap(), 6);
    }

    #[test]
    fn respects_upper_bound() {
        let cdf = |k: Integer| Ok((k as f64 + 1.0) / 10.0);
        assert_eq!(discrete_quantile(cdf, 0.95, 0, Some(9)).unwrap(), 9);
        assert_eq!(discrete_quantile(cdf, 1.0, 0, Some(9)).unwrap(), 9);
        assert_eq!(discrete_quantile(cdf, 0.3, 0, Some(9)).unwrap(), 2);
    }

    #[test]
    fn rejects_bad_probability() {
        assert!(discrete_quantile(geometric_cdf, 1.5, 0, None).is_err());
        assert!(discrete_quantile(geometric_cdf, -0.1, 0, None).is_err());
    }
}
