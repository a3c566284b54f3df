//! European basket option pricer.
//!
//! [`BasketOptionPricer`] is the orchestration layer: it validates the
//! market inputs, derives the per-step diffusion parameters once, binds
//! a correlated path generator and a basket payoff to them, and drives
//! the sampling loop for the configured number of samples.
//!
//! # Determinism
//!
//! For a fixed seed and sample count, [`price`](BasketOptionPricer::price)
//! is bit-identical across calls and across processes.
//! [`price_parallel`](BasketOptionPricer::price_parallel) is equally
//! deterministic regardless of the number of worker threads, because the
//! sample count is split into fixed-size chunks with independently
//! seeded random streams and the per-chunk aggregates are merged in
//! chunk order.

use rayon::prelude::*;

use basket_core::math::stats::{SampleAccumulator, SampleStatistics};
use basket_core::types::MarketInputs;

use super::diffusion::DiffusionParams;
use super::error::PricerError;
use super::model::MonteCarloModel;
use super::paths::CorrelatedPathGenerator;
use super::payoff::{BasketPayoff, PayoffSpec};
use crate::rng::SimulationRng;

/// Samples per parallel chunk.
///
/// Fixed (rather than derived from the thread count) so that parallel
/// results do not depend on the machine they run on.
const PARALLEL_CHUNK: usize = 4_096;

/// Monte Carlo price estimate with its statistical uncertainty.
///
/// # Examples
///
/// ```rust
/// use basket_pricing::mc::PricingResult;
///
/// let result = PricingResult { price: 10.5, std_error: 0.05 };
/// println!("price: {} +/- {}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value estimate of the basket option.
    pub price: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Monte Carlo pricer for a European basket option on correlated
/// geometric Brownian underlyings.
///
/// # Examples
///
/// ```rust
/// use basket_core::types::MarketInputs;
/// use basket_pricing::mc::{BasketOptionPricer, PayoffSpec};
///
/// let inputs = MarketInputs {
///     asset_levels: vec![100.0, 95.0],
///     dividend_yields: vec![0.0, 0.01],
///     covariance: vec![vec![0.04, 0.018], vec![0.018, 0.0225]],
///     risk_free_rate: 0.05,
///     residual_time: 1.0,
///     time_steps: 12,
///     sample_count: 10_000,
///     seed: 42,
/// };
///
/// let pricer = BasketOptionPricer::new(inputs, PayoffSpec::arithmetic_call(100.0)).unwrap();
/// let result = pricer.price().unwrap();
/// assert!(result.price >= 0.0);
/// ```
pub struct BasketOptionPricer {
    inputs: MarketInputs,
    generator: CorrelatedPathGenerator,
    payoff: BasketPayoff,
}

impl BasketOptionPricer {
    /// Validates the inputs and builds the pricer.
    ///
    /// All validation happens here, before any sampling: structural
    /// input checks, covariance symmetry, and the Cholesky
    /// decomposition of the per-step covariance.
    ///
    /// # Errors
    ///
    /// Returns [`PricerError`] if the covariance matrix is not square,
    /// its dimension disagrees with the asset-level or dividend-yield
    /// sequence, the residual time, step count, or sample count is not
    /// strictly positive, the payoff weights mismatch the basket size,
    /// or the covariance matrix is not positive semi-definite.
    pub fn new(inputs: MarketInputs, payoff: PayoffSpec) -> Result<Self, PricerError> {
        inputs.validate()?;

        let params = DiffusionParams::derive(&inputs)?;
        let discount = (-inputs.risk_free_rate * inputs.residual_time).exp();
        let generator =
            CorrelatedPathGenerator::new(inputs.asset_levels.clone(), inputs.time_steps, &params)?;
        let payoff = BasketPayoff::new(&payoff, inputs.n_assets(), discount)?;

        tracing::debug!(
            assets = inputs.n_assets(),
            steps = inputs.time_steps,
            samples = inputs.sample_count,
            dt = params.dt(),
            "constructed basket option pricer"
        );

        Ok(Self {
            inputs,
            generator,
            payoff,
        })
    }

    /// The validated inputs this pricer was built from.
    #[inline]
    pub fn inputs(&self) -> &MarketInputs {
        &self.inputs
    }

    /// Runs the configured number of independent path simulations and
    /// returns the discounted price estimate with its standard error.
    ///
    /// # Errors
    ///
    /// Returns [`PricerError::Statistics`] if the configured sample
    /// count is one, in which case a standard error cannot be
    /// estimated.
    pub fn price(&self) -> Result<PricingResult, PricerError> {
        let mut model = MonteCarloModel::new(
            self.generator.clone(),
            self.payoff.clone(),
            SampleStatistics::new(),
            SimulationRng::from_seed(self.inputs.seed),
        );
        model.add_samples(self.inputs.sample_count);

        self.result_from(model.statistics())
    }

    /// Like [`price`](Self::price), with the sampling fanned out over
    /// rayon's thread pool.
    ///
    /// Each fixed-size chunk of samples draws from an independent
    /// random stream and accumulates into its own partial aggregate;
    /// the partials are merged in chunk order once all chunks finish.
    /// The estimate differs from the serial one (different random
    /// streams) but is deterministic for a fixed seed.
    ///
    /// # Errors
    ///
    /// As [`price`](Self::price).
    pub fn price_parallel(&self) -> Result<PricingResult, PricerError> {
        let total = self.inputs.sample_count;
        let n_chunks = (total + PARALLEL_CHUNK - 1) / PARALLEL_CHUNK;

        let partials: Vec<SampleStatistics> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let remaining = total - chunk * PARALLEL_CHUNK;
                let count = remaining.min(PARALLEL_CHUNK);
                let rng = SimulationRng::derive_stream(self.inputs.seed, chunk as u64);
                let mut model = MonteCarloModel::new(
                    self.generator.clone(),
                    self.payoff.clone(),
                    SampleStatistics::new(),
                    rng,
                );
                model.add_samples(count);
                model.into_statistics()
            })
            .collect();

        let mut statistics = SampleStatistics::new();
        for partial in &partials {
            statistics.merge(partial);
        }

        self.result_from(&statistics)
    }

    fn result_from(&self, statistics: &SampleStatistics) -> Result<PricingResult, PricerError> {
        let price = statistics.mean()?;
        let std_error = statistics.standard_error()?;

        tracing::debug!(price, std_error, samples = statistics.count(), "basket pricing complete");

        Ok(PricingResult { price, std_error })
    }
}
