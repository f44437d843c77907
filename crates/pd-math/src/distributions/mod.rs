//! Probability distributions.
//!
//! Every univariate family is an immutable value type validated at
//! construction and implementing either [`ContinuousDistribution`] or
//! [`DiscreteDistribution`]:
//!
//! - densities are total: outside the support they are exactly `0`
//!   (`-∞` in log space);
//! - CDFs return `0`/`1` outside the support and only fail when an
//!   underlying continued fraction exhausts its iteration cap;
//! - `inverse_cdf(p)` is the smallest `x` with `cdf(x) ≥ p`; `p ∉ [0, 1]` is
//!   a domain error and `p ∈ {0, 1}` maps to the support bounds;
//! - samplers take the random generator explicitly.
//!
//! Multivariate and matrix-variate families only expose densities and
//! samplers.

pub mod bernoulli;
pub mod beta;
pub mod binomial;
pub mod categorical;
pub mod chi_square;
pub mod exponential;
pub mod fisher_f;
pub mod gamma;
pub mod geometric;
pub mod hypergeometric;
pub mod inverse_gamma;
pub mod matrix_variate;
pub mod multivariate;
pub mod negative_binomial;
pub mod normal;
pub mod pareto;
pub mod planck;
pub mod poisson;
pub mod student_t;
pub mod uniform;
pub mod yule_simon;
pub mod zeta;
pub mod zipf;

pub use bernoulli::BernoulliDistribution;
pub use beta::BetaDistribution;
pub use binomial::BinomialDistribution;
pub use categorical::CategoricalDistribution;
pub use chi_square::ChiSquareDistribution;
pub use exponential::ExponentialDistribution;
pub use fisher_f::FisherFDistribution;
pub use gamma::GammaDistribution;
pub use geometric::GeometricDistribution;
pub use hypergeometric::HypergeometricDistribution;
pub use inverse_gamma::InverseGammaDistribution;
pub use matrix_variate::{
    InverseWishartDistribution, MatrixNormalDistribution, MatrixTDistribution,
    WishartDistribution,
};
pub use multivariate::{
    DirichletDistribution, MultinomialDistribution, MultivariateNormalDistribution,
};
pub use negative_binomial::NegativeBinomialDistribution;
pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf, NormalDistribution};
pub use pareto::{
    GeneralizedParetoDistribution, LomaxDistribution, ParetoDistribution,
    SingleParameterParetoDistribution, TaperedParetoDistribution,
};
pub use planck::PlanckDistribution;
pub use poisson::PoissonDistribution;
pub use student_t::StudentTDistribution;
pub use uniform::UniformDistribution;
pub use yule_simon::YuleSimonDistribution;
pub use zeta::ZetaDistribution;
pub use zipf::ZipfMandelbrotDistribution;

use pd_core::{errors::Result, ensure, Integer, Probability, Real};
use rand::Rng;

/// A distribution over the reals.
pub trait ContinuousDistribution {
    /// Probability density at `x`; `0` outside the support.
    fn pdf(&self, x: Real) -> Real;

    /// Natural log of the density; `-∞` outside the support.
    fn ln_pdf(&self, x: Real) -> Real {
        self.pdf(x).ln()
    }

    /// `P(X ≤ x)`.
    fn cdf(&self, x: Real) -> Result<Probability>;

    /// Smallest `x` with `cdf(x) ≥ p`.
    fn inverse_cdf(&self, p: Probability) -> Result<Real>;

    /// Draw one variate.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real;

    /// Closure of the support, `(lower, upper)`, possibly infinite.
    fn support(&self) -> (Real, Real);
}

/// A distribution over the integers.
pub trait DiscreteDistribution {
    /// Probability mass at `k`; `0` outside the support.
    fn pmf(&self, k: Integer) -> Real;

    /// Natural log of the mass; `-∞` outside the support.
    fn ln_pmf(&self, k: Integer) -> Real {
        self.pmf(k).ln()
    }

    /// `P(X ≤ k)`.
    fn cdf(&self, k: Integer) -> Result<Probability>;

    /// Smallest `k` with `cdf(k) ≥ p`.
    fn inverse_cdf(&self, p: Probability) -> Result<Integer>;

    /// Draw one variate.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer;

    /// Support bounds; `None` for an unbounded upper end.
    fn support(&self) -> (Integer, Option<Integer>);
}

/// Moments of a distribution, `None` where they do not exist.
pub trait Moments {
    /// Expected value.
    fn mean(&self) -> Option<Real>;

    /// Variance.
    fn variance(&self) -> Option<Real>;

    /// Standard deviation.
    fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }
}

/// Domain check shared by every quantile function.
pub(crate) fn check_probability(p: Probability) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&p),
        "probability must lie in [0, 1], got {p}"
    );
    Ok(())
}

/// Domain check for strictly positive finite parameters.
pub(crate) fn check_positive(name: &str, value: Real) -> Result<()> {
    ensure!(
        value > 0.0 && value.is_finite(),
        "{name} must be positive and finite, got {value}"
    );
    Ok(())
}

/// Domain check for probability-valued parameters.
pub(crate) fn check_unit_interval(name: &str, value: Real) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&value),
        "{name} must lie in [0, 1], got {value}"
    );
    Ok(())
}
