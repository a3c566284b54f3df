//! Correlated multi-asset path generation.
//!
//! # Memory layout
//!
//! A [`MultiPath`] stores `(steps + 1) × assets` levels row-major by
//! step, row 0 holding the initial asset levels. Paths are created per
//! sample and reused in place across samples.

use basket_core::math::covariance::{CholeskyFactor, DecompositionError};

use super::diffusion::DiffusionParams;
use crate::rng::SimulationRng;

/// One simulated multi-asset price path.
///
/// Row 0 holds the initial levels; row `t` holds the levels after `t`
/// steps. Owned by the sampling iteration that fills it and discarded
/// (or refilled) after payoff evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiPath {
    /// Levels, row-major by step: `data[step * n_assets + asset]`.
    data: Vec<f64>,
    n_assets: usize,
    n_steps: usize,
}

impl MultiPath {
    /// Creates a zero-filled path buffer for `n_assets` assets over
    /// `n_steps` steps.
    pub fn new(n_assets: usize, n_steps: usize) -> Self {
        Self {
            data: vec![0.0; (n_steps + 1) * n_assets],
            n_assets,
            n_steps,
        }
    }

    /// Number of assets per step.
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Number of evolution steps (rows minus the initial one).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Level of `asset` after `step` steps.
    #[inline]
    pub fn level(&self, step: usize, asset: usize) -> f64 {
        self.data[step * self.n_assets + asset]
    }

    /// Sets the level of `asset` after `step` steps.
    #[inline]
    pub fn set_level(&mut self, step: usize, asset: usize, value: f64) {
        self.data[step * self.n_assets + asset] = value;
    }

    /// All asset levels at one step.
    #[inline]
    pub fn step_levels(&self, step: usize) -> &[f64] {
        let offset = step * self.n_assets;
        &self.data[offset..offset + self.n_assets]
    }

    /// Terminal asset levels (the last step).
    #[inline]
    pub fn terminal(&self) -> &[f64] {
        self.step_levels(self.n_steps)
    }
}

/// Capability seam for producing one path per invocation.
///
/// Generators are reusable across calls and hold no per-call state, so
/// a single instance can be shared read-only by many workers, each with
/// its own RNG and path buffer.
pub trait PathGenerator {
    /// Number of assets per generated path.
    fn n_assets(&self) -> usize;

    /// Number of evolution steps per generated path.
    fn n_steps(&self) -> usize;

    /// Fills `path` with one freshly simulated path.
    ///
    /// # Panics
    ///
    /// Panics if `path` was not allocated for this generator's
    /// dimensions.
    fn generate_into(&self, rng: &mut SimulationRng, path: &mut MultiPath);

    /// Allocates a correctly shaped buffer for
    /// [`generate_into`](Self::generate_into).
    fn empty_path(&self) -> MultiPath {
        MultiPath::new(self.n_assets(), self.n_steps())
    }

    /// Allocating convenience wrapper: generates one path.
    fn generate(&self, rng: &mut SimulationRng) -> MultiPath {
        let mut path = self.empty_path();
        self.generate_into(rng, &mut path);
        path
    }
}

/// Gaussian path generator for correlated geometric Brownian motion.
///
/// Holds the initial levels, the per-step drift vector, and the
/// Cholesky factor of the per-step covariance (computed once at
/// construction). Per step it draws one independent standard normal per
/// asset, correlates the draws through the factor, and applies the
/// resulting log-increment multiplicatively:
///
/// ```text
/// S[t+1][i] = S[t][i] * exp(drift[i] + (L z)[i])
/// ```
#[derive(Clone, Debug)]
pub struct CorrelatedPathGenerator {
    initial: Vec<f64>,
    drift: Vec<f64>,
    factor: CholeskyFactor<f64>,
    n_steps: usize,
}

impl CorrelatedPathGenerator {
    /// Builds a generator bound to the given initial levels and derived
    /// diffusion parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DecompositionError`] if the per-step covariance matrix
    /// is not positive semi-definite.
    pub fn new(
        initial: Vec<f64>,
        n_steps: usize,
        params: &DiffusionParams,
    ) -> Result<Self, DecompositionError> {
        let factor = params.step_covariance().cholesky()?;
        Ok(Self {
            initial,
            drift: params.drift().to_vec(),
            factor,
            n_steps,
        })
    }
}

impl PathGenerator for CorrelatedPathGenerator {
    #[inline]
    fn n_assets(&self) -> usize {
        self.initial.len()
    }

    #[inline]
    fn n_steps(&self) -> usize {
        self.n_steps
    }

    fn generate_into(&self, rng: &mut SimulationRng, path: &mut MultiPath) {
        let n = self.initial.len();
        assert!(
            path.n_assets() == n && path.n_steps() == self.n_steps,
            "path buffer shape ({} assets, {} steps) does not match generator ({}, {})",
            path.n_assets(),
            path.n_steps(),
            n,
            self.n_steps,
        );

        for (asset, &level) in self.initial.iter().enumerate() {
            path.set_level(0, asset, level);
        }

        let mut draws = vec![0.0; n];
        let mut increments = vec![0.0; n];
        for step in 0..self.n_steps {
            rng.fill_normal(&mut draws);
            self.factor.transform_into(&draws, &mut increments);
            for asset in 0..n {
                let previous = path.level(step, asset);
                let next = previous * (self.drift[asset] + increments[asset]).exp();
                path.set_level(step + 1, asset, next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use basket_core::types::MarketInputs;

    fn test_inputs(covariance: Vec<Vec<f64>>) -> MarketInputs {
        let n = covariance.len();
        MarketInputs {
            asset_levels: vec![100.0; n],
            dividend_yields: vec![0.0; n],
            covariance,
            risk_free_rate: 0.05,
            residual_time: 1.0,
            time_steps: 12,
            sample_count: 100,
            seed: 42,
        }
    }

    fn generator(covariance: Vec<Vec<f64>>) -> CorrelatedPathGenerator {
        let inputs = test_inputs(covariance);
        let params = DiffusionParams::derive(&inputs).unwrap();
        CorrelatedPathGenerator::new(inputs.asset_levels.clone(), inputs.time_steps, &params)
            .unwrap()
    }

    #[test]
    fn test_path_starts_at_initial_levels() {
        let generator = generator(vec![vec![0.04, 0.018], vec![0.018, 0.0225]]);
        let mut rng = SimulationRng::from_seed(42);
        let path = generator.generate(&mut rng);

        assert_eq!(path.step_levels(0), &[100.0, 100.0]);
        assert_eq!(path.n_steps(), 12);
        assert_eq!(path.n_assets(), 2);
    }

    #[test]
    fn test_path_levels_positive_and_finite() {
        let generator = generator(vec![vec![0.04, 0.018], vec![0.018, 0.0225]]);
        let mut rng = SimulationRng::from_seed(42);
        let mut path = generator.empty_path();

        for _ in 0..50 {
            generator.generate_into(&mut rng, &mut path);
            for step in 0..=path.n_steps() {
                for &level in path.step_levels(step) {
                    assert!(level > 0.0 && level.is_finite(), "level = {}", level);
                }
            }
        }
    }

    #[test]
    fn test_reproducible_for_equal_seeds() {
        let generator = generator(vec![vec![0.04, 0.018], vec![0.018, 0.0225]]);
        let mut rng1 = SimulationRng::from_seed(7);
        let mut rng2 = SimulationRng::from_seed(7);

        assert_eq!(generator.generate(&mut rng1), generator.generate(&mut rng2));
    }

    #[test]
    fn test_zero_covariance_is_pure_drift() {
        // No randomness: each step multiplies by exp(drift) exactly.
        let generator = generator(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        let mut rng = SimulationRng::from_seed(42);
        let path = generator.generate(&mut rng);

        let dt = 1.0 / 12.0;
        for step in 0..=12 {
            let expected = 100.0 * (0.05 * dt * step as f64).exp();
            for asset in 0..2 {
                assert_relative_eq!(path.level(step, asset), expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_perfect_correlation_moves_in_lockstep() {
        // Identical variance with correlation one: both assets share a
        // single driving normal, so their paths coincide.
        let generator = generator(vec![vec![0.04, 0.04], vec![0.04, 0.04]]);
        let mut rng = SimulationRng::from_seed(9);
        let path = generator.generate(&mut rng);

        for step in 0..=12 {
            assert_relative_eq!(
                path.level(step, 0),
                path.level(step, 1),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    #[should_panic(expected = "path buffer shape")]
    fn test_mismatched_buffer_panics() {
        let generator = generator(vec![vec![0.04]]);
        let mut rng = SimulationRng::from_seed(1);
        let mut wrong = MultiPath::new(2, 12);
        generator.generate_into(&mut rng, &mut wrong);
    }
}
