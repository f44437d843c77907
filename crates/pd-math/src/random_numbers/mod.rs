//! Random sources.
//!
//! Samplers take any `rand::Rng`. [`MersenneTwisterUniformRng`] is the
//! reproducible default: an MT19937-64 generator seeded once by the caller.
//! The free functions draw the primitive variates every sampler is built
//! from.

use pd_core::Real;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Exp1, StandardNormal};
use rand_mt::Mt19937GenRand64;

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
#[derive(Clone)]
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // 53 high bits → [0, 1)
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }
}

impl std::fmt::Debug for MersenneTwisterUniformRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MersenneTwisterUniformRng").finish_non_exhaustive()
    }
}

impl RngCore for MersenneTwisterUniformRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MersenneTwisterUniformRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }
}

/// Uniform deviate on the open interval `(0, 1)`.
pub fn uniform_open01<R: Rng + ?Sized>(rng: &mut R) -> Real {
    loop {
        let u: Real = rng.gen();
        if u > 0.0 {
            return u;
        }
    }
}

/// Standard normal deviate.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Real {
    rng.sample(StandardNormal)
}

/// Standard (unit-rate) exponential deviate.
pub fn standard_exponential<R: Rng + ?Sized>(rng: &mut R) -> Real {
    rng.sample(Exp1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mt_range() {
        let mut rng = MersenneTwisterUniformRng::new(42);
        for _ in 0..1_000 {
            let x = rng.next_real();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn seeding_is_reproducible() {
        let mut a = MersenneTwisterUniformRng::new(7);
        let mut b = MersenneTwisterUniformRng::from_seed(7u64.to_le_bytes());
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn open_interval() {
        let mut rng = MersenneTwisterUniformRng::new(1);
        for _ in 0..1_000 {
            let u = uniform_open01(&mut rng);
            assert!(u > 0.0 && u < 1.0);
        }
    }

    #[test]
    fn primitive_variates_reasonable() {
        let mut rng = MersenneTwisterUniformRng::new(42);
        let n = 20_000;
        let normal_mean = (0..n).map(|_| standard_normal(&mut rng)).sum::<Real>() / n as Real;
        let exp_mean = (0..n).map(|_| standard_exponential(&mut rng)).sum::<Real>() / n as Real;
        assert!(normal_mean.abs() < 0.03, "normal mean {normal_mean}");
        assert!((exp_mean - 1.0).abs() < 0.03, "exponential mean {exp_mean}");
    }
}
