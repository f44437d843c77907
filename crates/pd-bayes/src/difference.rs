//! Inference on the difference `θ₁ − θ₂` of two independent posteriors.
//!
//! The difference is approximated by a normal law with the summed moments:
//! exact for two normal means, the usual large-sample approximation for
//! two binomial proportions (Bolstad, ch. 13).

use pd_core::{errors::Result, ensure, Probability, Real};
use pd_math::distributions::{
    normal_cdf, ContinuousDistribution, NormalDistribution, StudentTDistribution,
};

use crate::binomial::BinomialProportion;
use crate::interval::{check_mass, Interval};
use crate::normal_mean::NormalMean;
use crate::posterior::Posterior;

/// Normal posterior of `θ₁ − θ₂` with mean `E₁ − E₂` and variance
/// `Var₁ + Var₂`.
#[derive(Debug, Clone)]
pub struct Difference {
    posterior: NormalDistribution,
}

impl Difference {
    /// Difference of two binomial proportions `π₁ − π₂`, each posterior
    /// replaced by the normal with its Beta mean and variance.
    pub fn of_proportions(first: &BinomialProportion, second: &BinomialProportion) -> Result<Self> {
        Self::from_moments(first, second)
    }

    /// Difference of two normal means `μ₁ − μ₂` with known standard
    /// deviations; the result is exact.
    pub fn of_means(first: &NormalMean, second: &NormalMean) -> Result<Self> {
        Self::from_moments(first, second)
    }

    fn from_moments<P: Posterior, Q: Posterior>(first: &P, second: &Q) -> Result<Self> {
        let mean = first.mean() - second.mean();
        let variance = first.variance() + second.variance();
        tracing::debug!(mean, variance, "difference posterior");
        Ok(Self {
            posterior: NormalDistribution::new(mean, variance.sqrt())?,
        })
    }

    /// One-sided `P(θ₁ − θ₂ ≤ 0) = Φ(−μ/σ)`; small values favour
    /// `θ₁ > θ₂`.
    pub fn probability_nonpositive(&self) -> Probability {
        normal_cdf(-self.mean() / self.std_dev())
    }

    /// Two-sided check of `θ₁ = θ₂`: true when zero falls outside the
    /// equal-tail interval holding `mass`.
    pub fn excludes_zero(&self, mass: Probability) -> Result<bool> {
        Ok(!self.credible_interval(mass)?.contains(0.0))
    }
}

impl Posterior for Difference {
    type Distribution = NormalDistribution;

    fn distribution(&self) -> &NormalDistribution {
        &self.posterior
    }

    fn mean(&self) -> Real {
        self.posterior.location()
    }

    fn variance(&self) -> Real {
        self.posterior.scale() * self.posterior.scale()
    }

    fn mode(&self) -> Option<Real> {
        Some(self.posterior.location())
    }
}

/// Satterthwaite's degrees of freedom for `s₁²/n₁ + s₂²/n₂`, rounded to the
/// nearest integer (ties downward):
///
/// `ν = (s₁²/n₁ + s₂²/n₂)² / ((s₁²/n₁)²/(n₁ − 1) + (s₂²/n₂)²/(n₂ − 1))`.
pub fn satterthwaite_dof(var1: Real, n1: u64, var2: Real, n2: u64) -> Result<Real> {
    ensure!(
        n1 >= 2 && n2 >= 2,
        "estimated variances need at least two observations per sample, got {n1} and {n2}"
    );
    ensure!(
        var1 > 0.0 && var2 > 0.0 && var1.is_finite() && var2.is_finite(),
        "sample variances must be positive, got {var1} and {var2}"
    );
    let u1 = var1 / n1 as Real;
    let u2 = var2 / n2 as Real;
    let v = (u1 + u2).powi(2) / (u1 * u1 / (n1 - 1) as Real + u2 * u2 / (n2 - 1) as Real);
    let nu = if v - v.floor() <= v.ceil() - v { v.floor() } else { v.ceil() };
    Ok(nu.max(1.0))
}

/// Equal-tail interval for `μ₁ − μ₂` when each σ is a sample estimate
/// (the Behrens–Fisher setting): `mean ± t·sd` with `t` from Student's t
/// on Satterthwaite's degrees of freedom.
pub fn welch_credible_interval(first: &NormalMean, second: &NormalMean, mass: Probability) -> Result<Interval> {
    check_mass(mass)?;
    let nu = satterthwaite_dof(
        first.sigma() * first.sigma(),
        first.observations(),
        second.sigma() * second.sigma(),
        second.observations(),
    )?;
    let difference = Difference::of_means(first, second)?;
    let t = StudentTDistribution::new(nu)?.inverse_cdf(0.5 * (1.0 + mass))?;
    let half = t * difference.std_dev();
    tracing::trace!(nu, t, "welch interval");
    Ok(Interval {
        lower: difference.mean() - half,
        upper: difference.mean() + half,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binomial::BetaPrior;
    use crate::normal_mean::NormalPrior;
    use approx::assert_abs_diff_eq;
    use pd_core::Error;

    #[test]
    fn proportions_sum_beta_moments() {
        // Beta(15, 7) and Beta(7, 15)
        let first = BinomialProportion::new(14, 20, BetaPrior::Flat).unwrap();
        let second = BinomialProportion::new(6, 20, BetaPrior::Flat).unwrap();
        let d = Difference::of_proportions(&first, &second).unwrap();
        assert_abs_diff_eq!(d.mean(), 8.0 / 22.0, epsilon = 1e-15);
        let var = 2.0 * 15.0 * 7.0 / (22.0 * 22.0 * 23.0);
        assert_abs_diff_eq!(d.variance(), var, epsilon = 1e-15);

        let ci = d.credible_interval(0.95).unwrap();
        assert_abs_diff_eq!(ci.upper - d.mean(), 1.959_963_984_540_054 * var.sqrt(), epsilon = 1e-8);
        assert!(d.excludes_zero(0.95).unwrap());
        assert!(d.probability_nonpositive() < 0.025);
    }

    #[test]
    fn overlapping_proportions_keep_zero() {
        let first = BinomialProportion::new(10, 20, BetaPrior::Jeffreys).unwrap();
        let second = BinomialProportion::new(9, 20, BetaPrior::Jeffreys).unwrap();
        let d = Difference::of_proportions(&first, &second).unwrap();
        assert!(!d.excludes_zero(0.95).unwrap());
        assert!(d.probability_nonpositive() > 0.2 && d.probability_nonpositive() < 0.5);
    }

    #[test]
    fn means_with_known_sigma_are_exact() {
        let first = NormalMean::new(4, 10.0, 2.0, NormalPrior::Flat).unwrap();
        let second = NormalMean::new(9, 7.0, 3.0, NormalPrior::Flat).unwrap();
        let d = Difference::of_means(&first, &second).unwrap();
        assert_abs_diff_eq!(d.mean(), 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d.variance(), 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(d.probability_nonpositive(), normal_cdf(-3.0 / 2.0_f64.sqrt()), epsilon = 1e-15);
        assert_eq!(d.mode(), Some(d.mean()));
    }

    #[test]
    fn satterthwaite_rounds_to_nearest() {
        // u₁ = u₂ = 1 with n − 1 = 9 on both sides gives 4/(2/9) = 18
        assert_eq!(satterthwaite_dof(10.0, 10, 10.0, 10).unwrap(), 18.0);
        // u₁ = 0.5, u₂ = 2: 6.25 / (0.25/4 + 4/4) = 5.88…
        assert_eq!(satterthwaite_dof(2.5, 5, 10.0, 5).unwrap(), 6.0);
        assert!(matches!(satterthwaite_dof(1.0, 1, 1.0, 5), Err(Error::Domain(_))));
        assert!(satterthwaite_dof(0.0, 5, 1.0, 5).is_err());
    }

    #[test]
    fn welch_interval_is_wider_than_normal() {
        let first = NormalMean::new(10, 5.0, 10.0_f64.sqrt(), NormalPrior::Flat).unwrap();
        let second = NormalMean::new(10, 2.0, 10.0_f64.sqrt(), NormalPrior::Flat).unwrap();
        let welch = welch_credible_interval(&first, &second, 0.95).unwrap();
        let exact = Difference::of_means(&first, &second).unwrap().credible_interval(0.95).unwrap();
        // t₁₈ upper 2.5% point times √2
        assert_abs_diff_eq!(welch.upper, 3.0 + 2.100_922_040_240_6 * 2.0_f64.sqrt(), epsilon = 1e-6);
        assert!(welch.width() > exact.width());
        let lonely = NormalMean::new(1, 2.0, 1.0, NormalPrior::Flat).unwrap();
        assert!(welch_credible_interval(&first, &lonely, 0.95).is_err());
    }
}
