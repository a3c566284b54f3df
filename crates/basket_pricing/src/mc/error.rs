//! Umbrella error for the pricing engine.

use basket_core::math::covariance::{CovarianceError, DecompositionError};
use basket_core::types::error::{InputError, StatsError};
use thiserror::Error;

/// Any failure of pricer construction or of the final aggregate query.
///
/// Construction failures (`Input`, `Covariance`, `Decomposition`) are
/// detected eagerly, before any sampling begins. `Statistics` can only
/// surface when the configured sample count is too small for the
/// requested estimate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricerError {
    /// Malformed or inconsistent market inputs.
    #[error("invalid market inputs: {0}")]
    Input(#[from] InputError),

    /// Covariance entries are not finite or the matrix is asymmetric.
    #[error("invalid covariance matrix: {0}")]
    Covariance(#[from] CovarianceError),

    /// The covariance matrix admits no real square root.
    #[error("covariance decomposition failed: {0}")]
    Decomposition(#[from] DecompositionError),

    /// The aggregate was queried with too few samples.
    #[error("statistics unavailable: {0}")]
    Statistics(#[from] StatsError),
}
