//! Market inputs for basket option pricing.
//!
//! [`MarketInputs`] is the complete construction contract of the engine:
//! initial asset levels, dividend yields, the covariance matrix of asset
//! log-returns, the risk-free rate, the time horizon and discretisation,
//! and the sampling configuration (sample count and seed).

use crate::types::error::InputError;

/// Market and simulation inputs for a basket option pricer.
///
/// The covariance matrix is given in nested row-major form so that
/// malformed (non-square) input can be detected and reported rather
/// than being unrepresentable by construction.
///
/// # Invariants
///
/// Checked by [`validate`](Self::validate), eagerly at pricer
/// construction:
///
/// - the covariance matrix is square, with dimension equal to both the
///   asset-level and dividend-yield sequence lengths
/// - every asset level is strictly positive and finite
/// - residual time is strictly positive and finite
/// - time-step count and sample count are strictly positive
///
/// # Examples
///
/// ```rust
/// use basket_core::types::MarketInputs;
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
/// assert!(inputs.validate().is_ok());
/// assert_eq!(inputs.n_assets(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketInputs {
    /// Initial asset levels (spot prices), one per asset.
    pub asset_levels: Vec<f64>,
    /// Continuous dividend yields, one per asset.
    pub dividend_yields: Vec<f64>,
    /// Covariance matrix of annualised asset log-returns, row-major.
    pub covariance: Vec<Vec<f64>>,
    /// Annualised risk-free rate.
    pub risk_free_rate: f64,
    /// Residual time to maturity, in years.
    pub residual_time: f64,
    /// Number of time steps per simulated path.
    pub time_steps: usize,
    /// Number of Monte Carlo samples to draw.
    pub sample_count: usize,
    /// Seed for the random sequence.
    pub seed: u64,
}

impl MarketInputs {
    /// Returns the number of assets in the basket.
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.asset_levels.len()
    }

    /// Validates the inputs against all structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as an [`InputError`].
    /// Validation is ordered: shape errors (squareness, dimension
    /// agreement) are reported before value errors (positivity).
    pub fn validate(&self) -> Result<(), InputError> {
        if self.asset_levels.is_empty() {
            return Err(InputError::EmptyBasket);
        }

        let dim = self.covariance.len();
        for (row, entries) in self.covariance.iter().enumerate() {
            if entries.len() != dim {
                return Err(InputError::CovarianceNotSquare {
                    rows: dim,
                    row,
                    cols: entries.len(),
                });
            }
        }

        if self.asset_levels.len() != dim {
            return Err(InputError::DimensionMismatch {
                name: "asset levels",
                got: self.asset_levels.len(),
                expected: dim,
            });
        }
        if self.dividend_yields.len() != dim {
            return Err(InputError::DimensionMismatch {
                name: "dividend yields",
                got: self.dividend_yields.len(),
                expected: dim,
            });
        }

        for (index, &value) in self.asset_levels.iter().enumerate() {
            if !(value > 0.0 && value.is_finite()) {
                return Err(InputError::InvalidAssetLevel { index, value });
            }
        }

        if !(self.residual_time > 0.0 && self.residual_time.is_finite()) {
            return Err(InputError::InvalidResidualTime(self.residual_time));
        }
        if self.time_steps == 0 {
            return Err(InputError::ZeroTimeSteps);
        }
        if self.sample_count == 0 {
            return Err(InputError::ZeroSampleCount);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_inputs() -> MarketInputs {
        MarketInputs {
            asset_levels: vec![100.0, 95.0],
            dividend_yields: vec![0.0, 0.01],
            covariance: vec![vec![0.04, 0.018], vec![0.018, 0.0225]],
            risk_free_rate: 0.05,
            residual_time: 1.0,
            time_steps: 12,
            sample_count: 10_000,
            seed: 42,
        }
    }

    #[test]
    fn test_valid_inputs() {
        assert!(valid_inputs().validate().is_ok());
    }

    #[test]
    fn test_empty_basket() {
        let mut inputs = valid_inputs();
        inputs.asset_levels.clear();
        assert_eq!(inputs.validate(), Err(InputError::EmptyBasket));
    }

    #[test]
    fn test_non_square_covariance() {
        let mut inputs = valid_inputs();
        inputs.covariance = vec![vec![0.04, 0.018], vec![0.018]];
        assert!(matches!(
            inputs.validate(),
            Err(InputError::CovarianceNotSquare {
                rows: 2,
                row: 1,
                cols: 1
            })
        ));
    }

    #[test]
    fn test_asset_level_dimension_mismatch() {
        let mut inputs = valid_inputs();
        inputs.asset_levels.push(50.0);
        assert!(matches!(
            inputs.validate(),
            Err(InputError::DimensionMismatch {
                name: "asset levels",
                ..
            })
        ));
    }

    #[test]
    fn test_dividend_yield_dimension_mismatch() {
        let mut inputs = valid_inputs();
        inputs.dividend_yields.pop();
        assert!(matches!(
            inputs.validate(),
            Err(InputError::DimensionMismatch {
                name: "dividend yields",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_asset_level() {
        let mut inputs = valid_inputs();
        inputs.asset_levels[1] = 0.0;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::InvalidAssetLevel { index: 1, .. })
        ));
    }

    #[test]
    fn test_non_positive_residual_time() {
        let mut inputs = valid_inputs();
        inputs.residual_time = 0.0;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::InvalidResidualTime(_))
        ));

        inputs.residual_time = -1.0;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::InvalidResidualTime(_))
        ));

        inputs.residual_time = f64::NAN;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::InvalidResidualTime(_))
        ));
    }

    #[test]
    fn test_zero_time_steps() {
        let mut inputs = valid_inputs();
        inputs.time_steps = 0;
        assert_eq!(inputs.validate(), Err(InputError::ZeroTimeSteps));
    }

    #[test]
    fn test_zero_sample_count() {
        let mut inputs = valid_inputs();
        inputs.sample_count = 0;
        assert_eq!(inputs.validate(), Err(InputError::ZeroSampleCount));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let inputs = valid_inputs();
        let json = serde_json::to_string(&inputs).unwrap();
        let deserialised: MarketInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs, deserialised);
    }
}
