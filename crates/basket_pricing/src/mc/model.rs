//! Generic Monte Carlo sampling loop.
//!
//! [`MonteCarloModel`] composes the three capability seams — a path
//! generator, a path payoff, and a sample accumulator — into the plain
//! sampling loop. Static dispatch only; each collaborator is
//! independently substitutable.

use basket_core::math::stats::SampleAccumulator;

use super::paths::{MultiPath, PathGenerator};
use super::payoff::PathPayoff;
use crate::rng::SimulationRng;

/// Composition of path generation, payoff evaluation, and aggregation.
///
/// The model owns its RNG and a single path buffer that is refilled in
/// place for every sample, so the sampling loop allocates nothing.
pub struct MonteCarloModel<G, P, A> {
    generator: G,
    payoff: P,
    accumulator: A,
    rng: SimulationRng,
    /// Reused across samples; overwritten by each generation.
    path: MultiPath,
}

impl<G, P, A> MonteCarloModel<G, P, A>
where
    G: PathGenerator,
    P: PathPayoff,
    A: SampleAccumulator,
{
    /// Assembles a model from its collaborators.
    pub fn new(generator: G, payoff: P, accumulator: A, rng: SimulationRng) -> Self {
        let path = generator.empty_path();
        Self {
            generator,
            payoff,
            accumulator,
            rng,
            path,
        }
    }

    /// Simulates `n` additional samples, feeding each discounted payoff
    /// into the accumulator.
    pub fn add_samples(&mut self, n: usize) {
        for _ in 0..n {
            self.generator.generate_into(&mut self.rng, &mut self.path);
            let sample = self.payoff.evaluate(&self.path);
            self.accumulator.add(sample);
        }
    }

    /// Read access to the accumulated statistics.
    #[inline]
    pub fn statistics(&self) -> &A {
        &self.accumulator
    }

    /// Consumes the model, returning the accumulated statistics.
    #[inline]
    pub fn into_statistics(self) -> A {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basket_core::math::stats::SampleStatistics;
    use basket_core::types::MarketInputs;

    use crate::mc::diffusion::DiffusionParams;
    use crate::mc::paths::CorrelatedPathGenerator;
    use crate::mc::payoff::{BasketPayoff, PayoffSpec};

    fn test_model() -> MonteCarloModel<CorrelatedPathGenerator, BasketPayoff, SampleStatistics> {
        let inputs = MarketInputs {
            asset_levels: vec![100.0, 95.0],
            dividend_yields: vec![0.0, 0.0],
            covariance: vec![vec![0.04, 0.018], vec![0.018, 0.0225]],
            risk_free_rate: 0.05,
            residual_time: 1.0,
            time_steps: 4,
            sample_count: 100,
            seed: 42,
        };
        let params = DiffusionParams::derive(&inputs).unwrap();
        let generator =
            CorrelatedPathGenerator::new(inputs.asset_levels.clone(), inputs.time_steps, &params)
                .unwrap();
        let payoff = BasketPayoff::new(
            &PayoffSpec::arithmetic_call(100.0),
            2,
            (-0.05_f64).exp(),
        )
        .unwrap();
        MonteCarloModel::new(
            generator,
            payoff,
            SampleStatistics::new(),
            SimulationRng::from_seed(42),
        )
    }

    #[test]
    fn test_add_samples_accumulates() {
        let mut model = test_model();
        model.add_samples(10);
        assert_eq!(model.statistics().count(), 10);

        model.add_samples(15);
        assert_eq!(model.statistics().count(), 25);
    }

    #[test]
    fn test_samples_are_non_negative_for_call() {
        let mut model = test_model();
        model.add_samples(500);
        // A clamped call payoff can never average below zero.
        assert!(model.statistics().mean().unwrap() >= 0.0);
    }

    #[test]
    fn test_into_statistics() {
        let mut model = test_model();
        model.add_samples(50);
        let stats = model.into_statistics();
        assert_eq!(stats.count(), 50);
    }
}
