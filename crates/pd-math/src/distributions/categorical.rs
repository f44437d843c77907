//! Categorical distribution over `0..n`.

use pd_core::{errors::Result, ensure, Integer, Probability, Real};
use rand::Rng;

use super::{check_probability, DiscreteDistribution, Moments};

/// Finite distribution over category indices `0..n` given by a weight per
/// category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalDistribution {
    probabilities: Vec<Probability>,
    cumulative: Vec<Probability>,
}

impl CategoricalDistribution {
    /// Build from non-negative weights; they are normalised to sum to one.
    pub fn new(weights: &[Real]) -> Result<Self> {
        ensure!(!weights.is_empty(), "categorical needs at least one category");
        ensure!(
            weights.iter().all(|w| *w >= 0.0 && w.is_finite()),
            "categorical weights must be non-negative and finite"
        );
        let total: Real = weights.iter().sum();
        ensure!(total > 0.0, "categorical weights must not all be zero");

        let probabilities: Vec<Probability> = weights.iter().map(|w| w / total).collect();
        let mut running = 0.0;
        let mut cumulative: Vec<Probability> = probabilities
            .iter()
            .map(|p| {
                running += p;
                running
            })
            .collect();
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }
        Ok(Self {
            probabilities,
            cumulative,
        })
    }

    /// Build from unnormalised log-weights, shifting by the maximum before
    /// exponentiating.
    pub fn from_log_weights(log_weights: &[Real]) -> Result<Self> {
        ensure!(!log_weights.is_empty(), "categorical needs at least one category");
        let max = log_weights
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, Real::max);
        ensure!(
            max.is_finite(),
            "categorical log-weights need a finite maximum, got {max}"
        );
        let weights: Vec<Real> = log_weights.iter().map(|lw| (lw - max).exp()).collect();
        Self::new(&weights)
    }

    /// Number of categories.
    pub fn categories(&self) -> usize {
        self.probabilities.len()
    }

    /// Normalised category probabilities.
    pub fn probabilities(&self) -> &[Probability] {
        &self.probabilities
    }

    fn last(&self) -> Integer {
        self.probabilities.len() as Integer - 1
    }
}

impl DiscreteDistribution for CategoricalDistribution {
    fn pmf(&self, k: Integer) -> Real {
        usize::try_from(k)
            .ok()
            .and_then(|i| self.probabilities.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    fn cdf(&self, k: Integer) -> Result<Probability> {
        if k < 0 {
            return Ok(0.0);
        }
        Ok(usize::try_from(k)
            .ok()
            .and_then(|i| self.cumulative.get(i))
            .copied()
            .unwrap_or(1.0))
    }

    /// First index whose prefix sum reaches `p`, skipping zero-weight
    /// categories.
    fn inverse_cdf(&self, p: Probability) -> Result<Integer> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0);
        }
        let i = self.cumulative.partition_point(|c| *c < p);
        Ok((i as Integer).min(self.last()))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        let u: Real = rng.gen();
        let i = self.cumulative.partition_point(|c| *c <= u);
        (i as Integer).min(self.last())
    }

    fn support(&self) -> (Integer, Option<Integer>) {
        (0, Some(self.last()))
    }
}

impl Moments for CategoricalDistribution {
    fn mean(&self) -> Option<Real> {
        Some(
            self.probabilities
                .iter()
                .enumerate()
                .map(|(i, p)| i as Real * p)
                .sum(),
        )
    }

    fn variance(&self) -> Option<Real> {
        let mean = self.mean()?;
        Some(
            self.probabilities
                .iter()
                .enumerate()
                .map(|(i, p)| p * (i as Real - mean).powi(2))
                .sum(),
        )
    }
}
