//! Student's t distribution.

use std::f64::consts::PI;

use pd_core::{errors::Result, Probability, Real};
use rand::Rng;

use super::normal::normal_cdf_inverse;
use super::{check_positive, check_probability, ContinuousDistribution, Moments};
use crate::random_numbers::standard_normal;
use crate::sampling::standard_gamma;
use crate::solvers1d::bisection_log_default;
use crate::special::{ln_beta, regularized_incomplete_beta};

/// Above this many degrees of freedom the quantile is the normal one.
const NORMAL_LIMIT: Real = 1e20;

/// Student's t distribution with `ν` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentTDistribution {
    dof: Real,
}

impl StudentTDistribution {
    /// A t distribution with `dof > 0` degrees of freedom (fractional allowed).
    pub fn new(dof: Real) -> Result<Self> {
        check_positive("student t degrees of freedom", dof)?;
        Ok(Self { dof })
    }

    /// Degrees of freedom `ν`.
    pub fn dof(&self) -> Real {
        self.dof
    }

    /// `P(|T| > |t|) = I_{ν/(ν+t²)}(ν/2, ½)`.
    fn two_sided_tail(&self, t: Real) -> Result<Probability> {
        let n = self.dof;
        regularized_incomplete_beta(0.5 * n, 0.5, n / (n + t * t))
    }

    /// Hill's approximation (CACM 396) to the upper quantile for the
    /// two-sided probability `pp`, for `ν ≥ 1`.
    fn hill_upper(&self, pp: Probability) -> Result<Real> {
        let n = self.dof;
        if n == 1.0 {
            let half = 0.5 * PI * pp;
            return Ok(half.cos() / half.sin());
        }
        if n == 2.0 {
            return Ok((2.0 / (pp * (2.0 - pp)) - 2.0).sqrt());
        }
        let a = 1.0 / (n - 0.5);
        let b = 48.0 / (a * a);
        let mut c = ((20700.0 * a / b - 98.0) * a - 16.0) * a + 96.36;
        let d = ((94.5 / (b + c) - 3.0) / b + 1.0) * (a * PI / 2.0).sqrt() * n;
        // y = (d·pp)^{2/ν}, kept in logs for the underflow check
        let log_root = (d.ln() + pp.ln()) / n;
        let mut y = (2.0 * log_root).exp();
        if (n < 2.1 && pp > 0.5) || y > 0.05 + a {
            // asymptotic inverse expansion about the normal
            let x = normal_cdf_inverse(0.5 * pp)?;
            y = x * x;
            if n < 5.0 {
                c += 0.3 * (n - 4.5) * (x + 0.6);
            }
            c = (((0.05 * d * x - 5.0) * x - 7.0) * x - 2.0) * x + b + c;
            y = (((((0.4 * y + 6.3) * y + 36.0) * y + 94.5) / c - y - 3.0) / b + 1.0) * x;
            y = (a * y * y).exp_m1();
        } else if y < f64::MIN_POSITIVE {
            return Ok(n.sqrt() * (-log_root).exp());
        } else {
            y = ((1.0 / (((n + 6.0) / (n * y) - 0.089 * d - 0.822) * (n + 2.0) * 3.0)
                + 0.5 / (n + 4.0))
                * y
                - 1.0)
                * (n + 1.0)
                / (n + 2.0)
                + 1.0 / y;
        }
        Ok((n * y).sqrt())
    }
}

impl ContinuousDistribution for StudentTDistribution {
    fn pdf(&self, x: Real) -> Real {
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: Real) -> Real {
        let n = self.dof;
        -0.5 * (n + 1.0) * (x * x / n).ln_1p() - 0.5 * n.ln() - ln_beta(0.5 * n, 0.5)
    }

    fn cdf(&self, x: Real) -> Result<Probability> {
        if x.is_infinite() {
            return Ok(if x > 0.0 { 1.0 } else { 0.0 });
        }
        let tail = 0.5 * self.two_sided_tail(x)?;
        Ok(if x > 0.0 { 1.0 - tail } else { tail })
    }

    /// Hill's algorithm refined by two-term Taylor steps for `ν ≥ 1`. Below
    /// that the upper tail is inverted directly by bisection in `ln t`, since
    /// quantiles grow like `p^{-1/ν}`.
    fn inverse_cdf(&self, p: Probability) -> Result<Real> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        if p == 0.5 {
            return Ok(0.0);
        }
        let n = self.dof;
        if n > NORMAL_LIMIT {
            return normal_cdf_inverse(p);
        }
        let lower = p.min(1.0 - p);
        let sign = if p < 0.5 { -1.0 } else { 1.0 };

        let magnitude = if n < 1.0 {
            // P(|T| > t) falls from 1 to 0 on (0, ∞)
            bisection_log_default(|t| Ok(-self.two_sided_tail(t)?), -2.0 * lower, 1.0)?
        } else {
            let mut q = self.hill_upper(2.0 * lower)?;
            // refine the upper quantile against 1 − lower
            let target = 1.0 - lower;
            for _ in 0..10 {
                let density = self.pdf(q);
                if !(density > 0.0) {
                    break;
                }
                let dx = (self.cdf(q)? - target) / density;
                if !dx.is_finite() {
                    break;
                }
                q -= dx * (1.0 - dx * q * (n + 1.0) / (2.0 * (q * q + n)));
                if dx.abs() <= 1e-14 * q.abs().max(1.0) {
                    break;
                }
            }
            q
        };
        Ok(sign * magnitude)
    }

    /// `Z · √(ν / V)` with `V ~ χ²_ν`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        let z = standard_normal(rng);
        let v = 2.0 * standard_gamma(0.5 * self.dof, rng);
        z * (self.dof / v).sqrt()
    }

    fn support(&self) -> (Real, Real) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }
}

impl Moments for StudentTDistribution {
    fn mean(&self) -> Option<Real> {
        (self.dof > 1.0).then_some(0.0)
    }

    /// Infinite for `1 < ν ≤ 2`, undefined for `ν ≤ 1`.
    fn variance(&self) -> Option<Real> {
        let n = self.dof;
        if n > 2.0 {
            Some(n / (n - 2.0))
        } else if n > 1.0 {
            Some(f64::INFINITY)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn cauchy_case() {
        let d = StudentTDistribution::new(1.0).unwrap();
        assert_abs_diff_eq!(d.cdf(1.0).unwrap(), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(d.inverse_cdf(0.75).unwrap(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.pdf(0.0), 1.0 / PI, epsilon = 1e-14);
    }

    #[test]
    fn textbook_critical_values() {
        let cases = [
            (5.0, 0.975, 2.570_581_835_636_314),
            (10.0, 0.95, 1.812_461_122_811_676),
            (3.0, 0.995, 5.840_909_309_733_35),
            (30.0, 0.9, 1.310_415_025_101_4),
        ];
        for (nu, p, t) in cases {
            let d = StudentTDistribution::new(nu).unwrap();
            assert_abs_diff_eq!(d.inverse_cdf(p).unwrap(), t, epsilon = 1e-6);
            assert_abs_diff_eq!(d.inverse_cdf(1.0 - p).unwrap(), -t, epsilon = 1e-6);
        }
    }

    #[test]
    fn roundtrip_fractional_dof() {
        for &nu in &[0.4, 1.7, 6.3] {
            let d = StudentTDistribution::new(nu).unwrap();
            for &p in &[0.02, 0.3, 0.6, 0.97] {
                let t = d.inverse_cdf(p).unwrap();
                assert_abs_diff_eq!(d.cdf(t).unwrap(), p, epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn heavy_tail_quantiles_invert_the_cdf() {
        let cases = [(0.1, 0.1), (0.1, 0.01), (0.5, 0.001), (0.5, 1e-8), (0.9, 0.25)];
        for (nu, p) in cases {
            let d = StudentTDistribution::new(nu).unwrap();
            let lo = d.inverse_cdf(p).unwrap();
            let hi = d.inverse_cdf(1.0 - p).unwrap();
            assert!(lo < 0.0 && lo.is_finite(), "ν = {nu}, p = {p}: {lo}");
            assert_relative_eq!(d.cdf(lo).unwrap(), p, max_relative = 1e-7);
            assert_relative_eq!(hi, -lo, max_relative = 1e-9);
        }
        // distinct probabilities must give distinct quantiles
        let d = StudentTDistribution::new(0.1).unwrap();
        assert!(d.inverse_cdf(0.01).unwrap() < d.inverse_cdf(0.1).unwrap());
    }

    #[test]
    fn hill_start_near_two_dof() {
        // ν < 2.1 with a central two-sided probability takes the normal expansion
        for &nu in &[1.2, 1.5, 2.05] {
            let d = StudentTDistribution::new(nu).unwrap();
            for &p in &[0.3, 0.45, 0.7] {
                let t = d.inverse_cdf(p).unwrap();
                assert_abs_diff_eq!(d.cdf(t).unwrap(), p, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn far_tail_with_underflowing_start() {
        let d = StudentTDistribution::new(1.5).unwrap();
        // (d·pp)^{2/ν} underflows; t ≈ −√ν (d·pp)^{-1/ν} with d ≈ 1
        let t = d.inverse_cdf(1e-300).unwrap();
        assert!(t.is_finite());
        assert!(t < -1e190 && t > -1e210, "{t}");
        assert!(d.inverse_cdf(1e-290).unwrap() > t);
    }

    #[test]
    fn variance_regimes() {
        assert_eq!(StudentTDistribution::new(1.5).unwrap().variance(), Some(f64::INFINITY));
        assert_eq!(StudentTDistribution::new(0.9).unwrap().variance(), None);
        assert_abs_diff_eq!(StudentTDistribution::new(4.0).unwrap().variance().unwrap(), 2.0);
    }
}
