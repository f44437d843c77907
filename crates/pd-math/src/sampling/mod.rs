//! Sampling strategies shared by the distribution families.
//!
//! - [`inversion`]: push a uniform deviate through a quantile function.
//! - [`rejection`]: accept/reject against an [`Envelope`] and a bound `K`.
//! - [`standard_gamma`]: composition, rejection and Tadikamalla's algorithm
//!   selected by shape.

mod gamma;

pub use gamma::{ln_standard_gamma, standard_gamma, tadikamalla, GammaSmallShapeEnvelope};

use pd_core::{errors::Result, Integer, Real};
use rand::Rng;

use crate::distributions::{
    ContinuousDistribution, DiscreteDistribution, ExponentialDistribution, UniformDistribution,
};
use crate::random_numbers::uniform_open01;

/// A proposal distribution for [`rejection`].
pub trait Envelope {
    /// Normalized envelope density `g(x)`.
    fn density(&self, x: Real) -> Real;

    /// Draw a proposal from `g`.
    fn propose<R: Rng + ?Sized>(&self, rng: &mut R) -> Real;
}

impl Envelope for ExponentialDistribution {
    fn density(&self, x: Real) -> Real {
        self.pdf(x)
    }

    fn propose<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.sample(rng)
    }
}

impl Envelope for UniformDistribution {
    fn density(&self, x: Real) -> Real {
        self.pdf(x)
    }

    fn propose<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        self.sample(rng)
    }
}

/// `Quantile(U)` for a continuous distribution.
pub fn inversion<D, R>(dist: &D, rng: &mut R) -> Result<Real>
where
    D: ContinuousDistribution + ?Sized,
    R: Rng + ?Sized,
{
    dist.inverse_cdf(uniform_open01(rng))
}

/// `Quantile(U)` for a discrete distribution.
pub fn inversion_discrete<D, R>(dist: &D, rng: &mut R) -> Result<Integer>
where
    D: DiscreteDistribution + ?Sized,
    R: Rng + ?Sized,
{
    dist.inverse_cdf(uniform_open01(rng))
}

/// Rejection sampling from the density `target`.
///
/// Draws `x` from `envelope` and accepts it iff `U < f(x) / (K·g(x))`. The
/// caller guarantees `f ≤ K·g` on the support; the expected number of
/// proposals is then `K`.
pub fn rejection<F, E, R>(target: F, envelope: &E, bound: Real, rng: &mut R) -> Real
where
    F: Fn(Real) -> Real,
    E: Envelope + ?Sized,
    R: Rng + ?Sized,
{
    let mut proposals: u64 = 0;
    loop {
        proposals += 1;
        let x = envelope.propose(rng);
        let u: Real = rng.gen();
        if u * bound * envelope.density(x) < target(x) {
            tracing::trace!(proposals, "rejection sampler accepted");
            return x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{BetaDistribution, NormalDistribution};
    use crate::random_numbers::MersenneTwisterUniformRng;
    use crate::statistics::Statistics;

    #[test]
    fn rejection_beta_from_uniform() {
        // Beta(2, 2) density 6x(1 − x) ≤ 1.5 on [0, 1]
        let target = BetaDistribution::new(2.0, 2.0).unwrap();
        let envelope = UniformDistribution::unit();
        let mut rng = MersenneTwisterUniformRng::new(11);
        let s: Statistics = (0..50_000)
            .map(|_| rejection(|x| target.pdf(x), &envelope, 1.5, &mut rng))
            .collect();
        assert!((s.mean().unwrap() - 0.5).abs() < 0.005);
        assert!((s.variance().unwrap() - 0.05).abs() < 0.002);
    }

    #[test]
    fn inversion_uses_quantile() {
        let d = NormalDistribution::new(10.0, 1.0).unwrap();
        let mut rng = MersenneTwisterUniformRng::new(5);
        let s: Statistics = (0..20_000)
            .map(|_| inversion(&d, &mut rng).unwrap())
            .collect();
        assert!((s.mean().unwrap() - 10.0).abs() < 0.03);
    }
}
