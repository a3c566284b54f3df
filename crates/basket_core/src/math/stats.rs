//! Running sample statistics for Monte Carlo aggregation.
//!
//! [`SampleStatistics`] accumulates a stream of scalar samples in O(1)
//! memory via running count, sum, and sum of squares. The unbiased
//! variance estimator is computed from the running sums; sample
//! magnitudes in pricing use are bounded, so the running-sum formulation
//! does not suffer catastrophic cancellation in double precision.
//!
//! Partial aggregates can be [`merge`](SampleAccumulator::merge)d, which
//! is how parallel simulation workers combine their results without
//! sharing mutable state.

use crate::types::error::StatsError;

/// Capability seam for aggregating payoff samples.
///
/// Implementations accumulate scalar samples incrementally and expose
/// the running estimate and its uncertainty. The error-estimation
/// method is substitutable behind this trait without touching the
/// simulation loop.
pub trait SampleAccumulator {
    /// Adds one sample. Pure numeric update, never fails.
    fn add(&mut self, sample: f64);

    /// Number of samples accumulated so far.
    fn count(&self) -> u64;

    /// Sample mean.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptySample`] if no samples were added.
    fn mean(&self) -> Result<f64, StatsError>;

    /// Standard error of the mean: sample standard deviation divided by
    /// the square root of the count.
    ///
    /// # Errors
    ///
    /// [`StatsError::InsufficientSamples`] if fewer than two samples
    /// were added.
    fn standard_error(&self) -> Result<f64, StatsError>;

    /// Folds another partial aggregate into this one.
    fn merge(&mut self, other: &Self)
    where
        Self: Sized;
}

/// Running-sum sample statistics.
///
/// # Examples
///
/// ```rust
/// use basket_core::math::stats::{SampleAccumulator, SampleStatistics};
///
/// let mut stats = SampleStatistics::new();
/// for sample in [1.0, 2.0, 3.0, 4.0, 5.0] {
///     stats.add(sample);
/// }
/// assert_eq!(stats.mean().unwrap(), 3.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleStatistics {
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl SampleStatistics {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unbiased sample variance.
    ///
    /// Computed as `(sum_sq - sum^2 / n) / (n - 1)`, clamped at zero to
    /// absorb rounding on near-constant samples.
    ///
    /// # Errors
    ///
    /// [`StatsError::InsufficientSamples`] if fewer than two samples
    /// were added.
    pub fn variance(&self) -> Result<f64, StatsError> {
        if self.count < 2 {
            return Err(StatsError::InsufficientSamples(self.count));
        }
        let n = self.count as f64;
        let variance = (self.sum_sq - self.sum * self.sum / n) / (n - 1.0);
        Ok(variance.max(0.0))
    }
}

impl SampleAccumulator for SampleStatistics {
    #[inline]
    fn add(&mut self, sample: f64) {
        self.count += 1;
        self.sum += sample;
        self.sum_sq += sample * sample;
    }

    #[inline]
    fn count(&self) -> u64 {
        self.count
    }

    fn mean(&self) -> Result<f64, StatsError> {
        if self.count == 0 {
            return Err(StatsError::EmptySample);
        }
        Ok(self.sum / self.count as f64)
    }

    fn standard_error(&self) -> Result<f64, StatsError> {
        let variance = self.variance()?;
        Ok((variance / self.count as f64).sqrt())
    }

    fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
    }
}
