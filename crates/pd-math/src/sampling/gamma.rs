//! Gamma variate generation.

use std::f64::consts::E;

use pd_core::Real;
use rand::Rng;

use super::{rejection, Envelope};
use crate::random_numbers::{standard_exponential, uniform_open01};
use crate::special::gamma as gamma_fn;

/// Largest integer shape drawn as a plain sum of exponentials.
const MAX_EXPONENTIAL_SUM: Real = 15.0;

/// Envelope for shapes `α < 1`: `x^{α−1}` on `(0, 1]` joined to `e^{−x}` on
/// `(1, ∞)`, normalized by `1/α + 1/e`.
///
/// Bounds the unit-rate Gamma(α) density with
/// `K = (1/α + 1/e) / Γ(α)`, since `f/g` is `e^{−x}` on the left piece and
/// `x^{α−1}` on the right one, both at most 1 after scaling.
#[derive(Debug, Clone, Copy)]
pub struct GammaSmallShapeEnvelope {
    shape: Real,
    mass: Real,
}

impl GammaSmallShapeEnvelope {
    /// Envelope for `Gamma(shape, 1)`; requires `0 < shape < 1`.
    pub fn new(shape: Real) -> Self {
        Self {
            shape,
            mass: 1.0 / shape + 1.0 / E,
        }
    }

    /// The bounding constant `K`.
    pub fn bound(&self) -> Real {
        self.mass / gamma_fn(self.shape)
    }
}

impl Envelope for GammaSmallShapeEnvelope {
    fn density(&self, x: Real) -> Real {
        if x <= 0.0 {
            0.0
        } else if x <= 1.0 {
            x.powf(self.shape - 1.0) / self.mass
        } else {
            (-x).exp() / self.mass
        }
    }

    fn propose<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        let left = 1.0 / self.shape / self.mass;
        if rng.gen::<Real>() < left {
            uniform_open01(rng).powf(1.0 / self.shape)
        } else {
            1.0 + standard_exponential(rng)
        }
    }
}

/// Tadikamalla's Laplace-envelope algorithm for `Gamma(α, 1)`, `α > 1`.
pub fn tadikamalla<R: Rng + ?Sized>(shape: Real, rng: &mut R) -> Real {
    let a = shape - 1.0;
    let b = 0.5 + 0.5 * (4.0 * shape - 3.0).sqrt();
    let c = a * (1.0 + b) / b;
    let d = (b - 1.0) / (a * b);
    let s = a / b;
    let p = 1.0 / (2.0 - (-s).exp());

    loop {
        let u: Real = uniform_open01(rng);
        let (x, y) = if u > p {
            // left branch: an exponential folded onto [0, S] is the
            // exponential truncated to [0, S]
            let e = -((1.0 - u) / (1.0 - p)).ln();
            let e = if e > s { e % s } else { e };
            let x = a - b * e;
            (x, a - x)
        } else {
            let x = a - b * (u / p).ln();
            (x, x - a)
        };
        let u2 = uniform_open01(rng);
        if u2.ln() <= a * (d * x).ln() - x + y / b + c {
            return x;
        }
    }
}

/// Unit-rate `Gamma(α, 1)` variate.
///
/// Integer shapes up to 15 are sums of exponentials, shapes below 1 use
/// [`rejection`] against [`GammaSmallShapeEnvelope`], and every other shape
/// uses [`tadikamalla`].
pub fn standard_gamma<R: Rng + ?Sized>(shape: Real, rng: &mut R) -> Real {
    if shape == shape.floor() && shape <= MAX_EXPONENTIAL_SUM {
        return (0..shape as u32).map(|_| standard_exponential(rng)).sum();
    }
    if shape < 1.0 {
        let envelope = GammaSmallShapeEnvelope::new(shape);
        let ln_norm = crate::special::ln_gamma(shape);
        let target = |x: Real| {
            if x <= 0.0 {
                0.0
            } else {
                ((shape - 1.0) * x.ln() - x - ln_norm).exp()
            }
        };
        return rejection(target, &envelope, envelope.bound(), rng);
    }
    tadikamalla(shape, rng)
}

/// Natural log of a unit-rate `Gamma(α, 1)` variate.
///
/// For `α < 1` uses `G_α = G_{α+1} · U^{1/α}` in log space, which stays
/// finite when the variate itself would underflow.
pub fn ln_standard_gamma<R: Rng + ?Sized>(shape: Real, rng: &mut R) -> Real {
    if shape < 1.0 {
        standard_gamma(shape + 1.0, rng).ln() + uniform_open01(rng).ln() / shape
    } else {
        standard_gamma(shape, rng).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_numbers::MersenneTwisterUniformRng;
    use crate::statistics::Statistics;

    fn check_moments(shape: Real, seed: u64) {
        let mut rng = MersenneTwisterUniformRng::new(seed);
        let n = 100_000;
        let s: Statistics = (0..n).map(|_| standard_gamma(shape, &mut rng)).collect();
        // mean α, variance α; generous bound on the variance estimate
        let se = (shape / n as Real).sqrt();
        assert!(
            (s.mean().unwrap() - shape).abs() < 4.0 * se,
            "shape {shape}: mean {}",
            s.mean().unwrap()
        );
        assert!(
            (s.variance().unwrap() - shape).abs() < 0.05 * shape.max(1.0),
            "shape {shape}: variance {}",
            s.variance().unwrap()
        );
        assert!(s.minimum().unwrap() >= 0.0);
    }

    #[test]
    fn integer_shape() {
        check_moments(3.0, 1);
    }

    #[test]
    fn small_shape() {
        check_moments(0.3, 2);
        check_moments(0.8, 3);
    }

    #[test]
    fn tadikamalla_shapes() {
        check_moments(1.5, 4);
        check_moments(7.25, 5);
        check_moments(40.0, 6);
    }

    #[test]
    fn log_variate_tiny_shape() {
        let mut rng = MersenneTwisterUniformRng::new(9);
        for _ in 0..1_000 {
            let l = ln_standard_gamma(0.001, &mut rng);
            assert!(l.is_finite());
        }
    }

    #[test]
    fn envelope_dominates_target() {
        for &shape in &[0.1, 0.5, 0.9] {
            let env = GammaSmallShapeEnvelope::new(shape);
            let k = env.bound();
            for i in 1..200 {
                let x = i as Real * 0.05;
                let f = x.powf(shape - 1.0) * (-x).exp() / gamma_fn(shape);
                assert!(f <= k * env.density(x) * (1.0 + 1e-12), "shape {shape} x {x}");
            }
        }
    }
}
