//! Summaries shared by every one-parameter conjugate posterior.

use pd_core::{errors::Result, Error, Probability, Real};
use pd_math::distributions::{normal_cdf_inverse, ContinuousDistribution};
use rand::Rng;

use crate::interval::{self, check_mass, Interval, PointEstimate};

/// Brent tolerance on the lower tail mass used by [`Posterior::hdi`].
pub const HDI_TOLERANCE: Real = 1e-9;

/// A posterior over one real parameter in closed form.
///
/// Implementors supply the posterior family and its closed-form moments;
/// quantiles, intervals and sampling are derived from those.
pub trait Posterior {
    /// Family of the posterior.
    type Distribution: ContinuousDistribution;

    /// The posterior law.
    fn distribution(&self) -> &Self::Distribution;

    /// Closed-form posterior mean.
    fn mean(&self) -> Real;

    /// Closed-form posterior variance.
    fn variance(&self) -> Real;

    /// Posterior mode, `None` when the density is unbounded at the edge
    /// of its support.
    fn mode(&self) -> Option<Real>;

    /// Posterior standard deviation.
    fn std_dev(&self) -> Real {
        self.variance().sqrt()
    }

    /// `Q(½)`.
    fn median(&self) -> Result<Real> {
        self.quantile(0.5)
    }

    /// The chosen summary; a missing mode is a domain error.
    fn point_estimate(&self, which: PointEstimate) -> Result<Real> {
        match which {
            PointEstimate::Mean => Ok(self.mean()),
            PointEstimate::Median => self.median(),
            PointEstimate::Mode => self
                .mode()
                .ok_or_else(|| Error::Domain("posterior mode does not exist".into())),
        }
    }

    /// Posterior mean square of an estimate: `Var + (E − estimate)²`.
    fn pms(&self, which: PointEstimate) -> Result<Real> {
        let bias = self.mean() - self.point_estimate(which)?;
        Ok(self.variance() + bias * bias)
    }

    /// Posterior quantile `Q(p)`.
    fn quantile(&self, p: Probability) -> Result<Real> {
        self.distribution().inverse_cdf(p)
    }

    /// Posterior CDF.
    fn cdf(&self, x: Real) -> Result<Probability> {
        self.distribution().cdf(x)
    }

    /// Posterior density.
    fn pdf(&self, x: Real) -> Real {
        self.distribution().pdf(x)
    }

    /// One draw from the posterior.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.distribution().sample(rng)
    }

    /// Exact equal-tail interval.
    fn credible_interval(&self, mass: Probability) -> Result<Interval> {
        interval::credible_interval(self.distribution(), mass)
    }

    /// `mean ± z·sd` with `z` the standard normal quantile of the upper tail.
    fn normal_credible_interval(&self, mass: Probability) -> Result<Interval> {
        check_mass(mass)?;
        let z = normal_cdf_inverse(0.5 * (1.0 + mass))?;
        let half = z * self.std_dev();
        Ok(Interval {
            lower: self.mean() - half,
            upper: self.mean() + half,
        })
    }

    /// Highest-density interval holding `mass`, to [`HDI_TOLERANCE`].
    fn hdi(&self, mass: Probability) -> Result<Interval> {
        interval::hdi_of_quantile(self.distribution(), mass, HDI_TOLERANCE)
    }
}
