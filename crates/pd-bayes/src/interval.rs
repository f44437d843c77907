//! Credible intervals from a posterior's quantile function.

use pd_core::{errors::Result, ensure, Probability, Real};
use pd_math::distributions::ContinuousDistribution;
use pd_math::solvers1d::fmin;

/// A closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Lower end.
    pub lower: Real,
    /// Upper end.
    pub upper: Real,
}

impl Interval {
    /// `upper − lower`.
    pub fn width(&self) -> Real {
        self.upper - self.lower
    }

    /// Whether `x` lies in the closed interval.
    pub fn contains(&self, x: Real) -> bool {
        (self.lower..=self.upper).contains(&x)
    }
}

/// Which posterior summary stands in for the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointEstimate {
    /// Posterior mean.
    Mean,
    /// Posterior median.
    Median,
    /// Posterior mode.
    Mode,
}

pub(crate) fn check_mass(mass: Probability) -> Result<()> {
    ensure!(
        mass > 0.0 && mass < 1.0,
        "credible mass must lie in (0, 1), got {mass}"
    );
    Ok(())
}

/// Equal-tail interval holding `mass` of the posterior:
/// `[Q((1 − mass)/2), Q((1 + mass)/2)]`.
pub fn credible_interval<D>(dist: &D, mass: Probability) -> Result<Interval>
where
    D: ContinuousDistribution + ?Sized,
{
    check_mass(mass)?;
    let tail = 0.5 * (1.0 - mass);
    Ok(Interval {
        lower: dist.inverse_cdf(tail)?,
        upper: dist.inverse_cdf(1.0 - tail)?,
    })
}

/// Narrowest interval holding `mass` of a unimodal posterior.
///
/// Minimises the width `Q(mass + t) − Q(t)` over the lower tail
/// `t ∈ [0, 1 − mass]` with Brent's method to tolerance `tol`. A failing
/// quantile evaluation aborts the search.
pub fn hdi_of_quantile<D>(dist: &D, mass: Probability, tol: Real) -> Result<Interval>
where
    D: ContinuousDistribution + ?Sized,
{
    check_mass(mass)?;
    let width = |t: Real| -> Result<Real> {
        Ok(dist.inverse_cdf(mass + t)? - dist.inverse_cdf(t)?)
    };
    let t = fmin(width, 0.0, 1.0 - mass, tol)?;
    let interval = Interval {
        lower: dist.inverse_cdf(t)?,
        upper: dist.inverse_cdf(mass + t)?,
    };
    tracing::trace!(lower_tail = t, width = interval.width(), "highest density interval");
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pd_core::Error;
    use pd_math::distributions::{BetaDistribution, GammaDistribution, NormalDistribution};

    #[test]
    fn symmetric_posterior_intervals_coincide() {
        let d = NormalDistribution::new(2.0, 0.5).unwrap();
        let eq = credible_interval(&d, 0.95).unwrap();
        let hdi = hdi_of_quantile(&d, 0.95, 1e-8).unwrap();
        assert_abs_diff_eq!(eq.lower, 2.0 - 0.5 * 1.959_963_984_540_054, epsilon = 1e-8);
        assert_abs_diff_eq!(hdi.lower, eq.lower, epsilon = 1e-4);
        assert_abs_diff_eq!(hdi.upper, eq.upper, epsilon = 1e-4);
    }

    #[test]
    fn hdi_of_skewed_posterior_is_narrower() {
        let d = GammaDistribution::new(2.0, 1.0).unwrap();
        let eq = credible_interval(&d, 0.9).unwrap();
        let hdi = hdi_of_quantile(&d, 0.9, 1e-8).unwrap();
        assert!(hdi.width() < eq.width());
        // equal densities at both ends
        assert_abs_diff_eq!(d.pdf(hdi.lower), d.pdf(hdi.upper), epsilon = 1e-3);
    }

    #[test]
    fn beta_hdi_mass() {
        let d = BetaDistribution::new(3.0, 9.0).unwrap();
        let hdi = hdi_of_quantile(&d, 0.95, 1e-8).unwrap();
        let mass = d.cdf(hdi.upper).unwrap() - d.cdf(hdi.lower).unwrap();
        assert_abs_diff_eq!(mass, 0.95, epsilon = 1e-6);
    }

    #[test]
    fn rejects_degenerate_mass() {
        let d = NormalDistribution::standard();
        assert!(matches!(credible_interval(&d, 1.0), Err(Error::Domain(_))));
        assert!(matches!(hdi_of_quantile(&d, 0.0, 1e-6), Err(Error::Domain(_))));
    }
}
