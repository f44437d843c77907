//! Zipf and Zipf–Mandelbrot distributions on `1..=n`.

use pd_core::{errors::Result, ensure, Integer, Probability, Real};
use rand::Rng;

use super::{check_probability, DiscreteDistribution, Moments};

/// `P(k) = (k + q)^{−s} / H_{n,q,s}` on `1..=n`; plain Zipf when `q = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZipfMandelbrotDistribution {
    n: u64,
    q: Real,
    s: Real,
    normalizer: Real,
}

/// Generalized harmonic number `Σ_{i=1}^{k} (i + q)^{−s}`.
fn harmonic(k: u64, q: Real, s: Real) -> Real {
    (1..=k).map(|i| (i as Real + q).powf(-s)).sum()
}

impl ZipfMandelbrotDistribution {
    /// Zipf–Mandelbrot law over ranks `1..=n` with shift `q` and exponent `s`.
    pub fn new(n: u64, q: Real, s: Real) -> Result<Self> {
        ensure!(n >= 1, "zipf-mandelbrot needs at least one rank");
        ensure!(
            n <= Integer::MAX as u64,
            "zipf-mandelbrot rank count {n} is too large"
        );
        ensure!(
            q >= 0.0 && q.is_finite(),
            "zipf-mandelbrot shift must be non-negative, got {q}"
        );
        ensure!(
            s > 0.0 && s.is_finite(),
            "zipf-mandelbrot exponent must be positive, got {s}"
        );
        Ok(Self {
            n,
            q,
            s,
            normalizer: harmonic(n, q, s),
        })
    }

    /// Zipf's law over `n` ranks with exponent `s`.
    pub fn zipf(n: u64, s: Real) -> Result<Self> {
        Self::new(n, 0.0, s)
    }

    /// Number of ranks `n`.
    pub fn ranks(&self) -> u64 {
        self.n
    }

    /// Shift `q`.
    pub fn shift(&self) -> Real {
        self.q
    }

    /// Exponent `s`.
    pub fn exponent(&self) -> Real {
        self.s
    }

    /// `E[Xᵐ]` by direct summation.
    fn raw_moment(&self, m: i32) -> Real {
        (1..=self.n)
            .map(|k| (k as Real).powi(m) * (k as Real + self.q).powf(-self.s))
            .sum::<Real>()
            / self.normalizer
    }
}

impl DiscreteDistribution for ZipfMandelbrotDistribution {
    fn pmf(&self, k: Integer) -> Real {
        if k < 1 || k as u64 > self.n {
            return 0.0;
        }
        (k as Real + self.q).powf(-self.s) / self.normalizer
    }

    /// Direct summation, linear in `k`; the slow path for many ranks.
    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < 1 {
            return Ok(0.0);
        }
        if k as u64 >= self.n {
            return Ok(1.0);
        }
        Ok((harmonic(k as u64, self.q, self.s) / self.normalizer).min(1.0))
    }

    /// Sequential search over the ranks.
    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        check_probability(p)?;
        let last = self.n as Integer;
        if p == 0.0 {
            return Ok(1);
        }
        if p == 1.0 {
            return Ok(last);
        }
        let target = p * (1.0 - 64.0 * f64::EPSILON);
        let mut acc = 0.0;
        for k in 1..last {
            acc += self.pmf(k);
            if acc >= target {
                return Ok(k);
            }
        }
        Ok(last)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        let u: Real = rng.gen();
        let last = self.n as Integer;
        let mut acc = 0.0;
        for k in 1..last {
            acc += self.pmf(k);
            if u < acc {
                return k;
            }
        }
        last
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (1, Some(self.n as Integer))
    }
}

impl Moments for ZipfMandelbrotDistribution {
    fn mean(&self) -> Option<Real> {
        Some(self.raw_moment(1))
    }

    fn variance(&self) -> Option<Real> {
        let m1 = self.raw_moment(1);
        Some(self.raw_moment(2) - m1 * m1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_numbers::MersenneTwisterUniformRng;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zipf_on_three_ranks() {
        // weights 1, 1/2, 1/3 normalised by 11/6
        let d = ZipfMandelbrotDistribution::zipf(3, 1.0).unwrap();
        assert_abs_diff_eq!(d.pmf(1), 6.0 / 11.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d.cdf(2).unwrap(), 9.0 / 11.0, epsilon = 1e-15);
        assert_eq!(d.pmf(4), 0.0);
        assert_abs_diff_eq!(d.mean().unwrap(), 18.0 / 11.0, epsilon = 1e-14);
    }

    #[test]
    fn shift_flattens_head() {
        let zipf = ZipfMandelbrotDistribution::zipf(100, 1.2).unwrap();
        let zm = ZipfMandelbrotDistribution::new(100, 5.0, 1.2).unwrap();
        assert!(zm.pmf(1) < zipf.pmf(1));
        assert_abs_diff_eq!((1..=100).map(|k| zm.pmf(k)).sum::<Real>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn quantile_and_sampler() {
        let d = ZipfMandelbrotDistribution::new(50, 2.0, 1.5).unwrap();
        for k in 1..50 {
            assert_eq!(d.inverse_cdf(d.cdf(k).unwrap()).unwrap(), k);
        }
        let mut rng = MersenneTwisterUniformRng::new(6);
        let ones = (0..20_000).filter(|_| d.sample(&mut rng) == 1).count();
        assert!((ones as Real / 20_000.0 - d.pmf(1)).abs() < 0.015);
    }
}
