//! End-to-end checks through the façade re-exports.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use probdist::bayes::{BetaPrior, BinomialProportion, Posterior};
use probdist::math::distributions::{GammaDistribution, PoissonDistribution};
use probdist::{ContinuousDistribution, DiscreteDistribution, MersenneTwisterUniformRng, Moments};

#[test]
fn settings_defaults_are_visible() {
    let s = probdist::Settings::instance();
    assert_eq!(s.bisection_max_iterations, 200);
    assert!(s.newton_tolerance > 0.0);
}

#[test]
fn samplers_accept_any_rng() {
    let d = GammaDistribution::new(4.0, 2.0).unwrap();
    let mut mt = MersenneTwisterUniformRng::new(11);
    let mut std_rng = StdRng::seed_from_u64(11);
    let n = 20_000;
    let a = (0..n).map(|_| d.sample(&mut mt)).sum::<f64>() / n as f64;
    let b = (0..n).map(|_| d.sample(&mut std_rng)).sum::<f64>() / n as f64;
    assert_abs_diff_eq!(a, d.mean().unwrap(), epsilon = 0.05);
    assert_abs_diff_eq!(b, d.mean().unwrap(), epsilon = 0.05);
}

#[test]
fn discrete_quantile_brackets_probability() {
    let d = PoissonDistribution::new(3.2).unwrap();
    let k = d.inverse_cdf(0.8).unwrap();
    assert!(d.cdf(k).unwrap() >= 0.8);
    assert!(d.cdf(k - 1).unwrap() < 0.8);
}

#[test]
fn posterior_interval_through_facade() {
    let post = BinomialProportion::new(7, 24, BetaPrior::Jeffreys).unwrap();
    let ci = post.credible_interval(0.9).unwrap();
    assert!(ci.contains(post.mean()));
    assert!(matches!(post.credible_interval(1.2), Err(probdist::Error::Domain(_))));
}
