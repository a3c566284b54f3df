//! Per-step diffusion parameters derived from market inputs.
//!
//! Risk-neutral geometric Brownian motion discretised over `k` steps of
//! an horizon `T` gives, per step of length `dt = T / k`, a log-increment
//! with drift `dt * (r - q_i - 0.5 * cov_ii)` per asset and covariance
//! `cov * dt` across assets.

use basket_core::math::covariance::{CovarianceError, CovarianceMatrix};
use basket_core::types::MarketInputs;

/// Derived diffusion parameters shared by all simulation workers.
///
/// Derived once at pricer construction and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffusionParams {
    /// Per-step time increment, in years.
    dt: f64,
    /// Per-step log-drift, one entry per asset.
    drift: Vec<f64>,
    /// Per-step covariance of log-increments.
    step_covariance: CovarianceMatrix<f64>,
}

impl DiffusionParams {
    /// Derives per-step parameters from validated market inputs.
    ///
    /// # Errors
    ///
    /// Returns [`CovarianceError`] if the covariance entries are not
    /// finite or the matrix is not symmetric. Structural shape errors
    /// are expected to have been caught by
    /// [`MarketInputs::validate`](basket_core::types::MarketInputs::validate)
    /// beforehand.
    pub fn derive(inputs: &MarketInputs) -> Result<Self, CovarianceError> {
        let covariance = CovarianceMatrix::from_rows(&inputs.covariance)?;
        let dt = inputs.residual_time / inputs.time_steps as f64;

        let drift = inputs
            .dividend_yields
            .iter()
            .enumerate()
            .map(|(i, &q)| dt * (inputs.risk_free_rate - q - 0.5 * covariance.get(i, i)))
            .collect();

        Ok(Self {
            dt,
            drift,
            step_covariance: covariance.scale(dt),
        })
    }

    /// Per-step time increment.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Per-step log-drift vector.
    #[inline]
    pub fn drift(&self) -> &[f64] {
        &self.drift
    }

    /// Per-step covariance matrix.
    #[inline]
    pub fn step_covariance(&self) -> &CovarianceMatrix<f64> {
        &self.step_covariance
    }
}
