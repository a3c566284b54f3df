//! Error types for input validation and statistics queries.
//!
//! This module provides:
//! - `InputError`: malformed or inconsistent market inputs, detected
//!   eagerly before any simulation runs
//! - `StatsError`: statistics queried before enough samples exist
//!
//! Covariance-specific errors live next to the matrix types in
//! [`crate::math::covariance`].

use thiserror::Error;

/// Malformed or inconsistent market inputs.
///
/// All variants are detected eagerly when a pricer is constructed;
/// no partial simulation is ever performed on invalid input. There is
/// no retry policy: these are deterministic configuration failures and
/// the application layer is expected to surface them to the user.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputError {
    /// The basket contains no assets at all.
    #[error("basket must contain at least one asset")]
    EmptyBasket,

    /// Covariance matrix has a row whose length differs from the row count.
    #[error("covariance matrix is not square: {rows} rows but row {row} has {cols} columns")]
    CovarianceNotSquare {
        /// Number of rows in the matrix.
        rows: usize,
        /// Index of the first offending row.
        row: usize,
        /// Length of the offending row.
        cols: usize,
    },

    /// A per-asset sequence disagrees with the basket dimension.
    #[error("{name} length {got} does not match basket dimension {expected}")]
    DimensionMismatch {
        /// Name of the mismatched sequence.
        name: &'static str,
        /// Length that was provided.
        got: usize,
        /// Expected length (one entry per asset).
        expected: usize,
    },

    /// An initial asset level is zero, negative, or not finite.
    #[error("asset level at index {index} must be strictly positive and finite, got {value}")]
    InvalidAssetLevel {
        /// Index of the offending asset.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Residual time to maturity is zero, negative, or not finite.
    #[error("residual time must be strictly positive and finite, got {0}")]
    InvalidResidualTime(f64),

    /// Time-step count is zero.
    #[error("time-step count must be strictly positive")]
    ZeroTimeSteps,

    /// Sample count is zero.
    #[error("sample count must be strictly positive")]
    ZeroSampleCount,
}

/// Statistics queried before enough samples were accumulated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatsError {
    /// The mean of zero samples is undefined.
    #[error("no samples accumulated")]
    EmptySample,

    /// The unbiased variance estimator needs at least two samples.
    #[error("standard error requires at least two samples, got {0}")]
    InsufficientSamples(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        let err = InputError::CovarianceNotSquare {
            rows: 3,
            row: 1,
            cols: 2,
        };
        assert!(err.to_string().contains("not square"));
        assert!(err.to_string().contains("3 rows"));

        let err = InputError::DimensionMismatch {
            name: "dividend yields",
            got: 2,
            expected: 3,
        };
        assert!(err.to_string().contains("dividend yields"));

        let err = InputError::InvalidResidualTime(-0.5);
        assert!(err.to_string().contains("-0.5"));
    }

    #[test]
    fn test_stats_error_display() {
        assert_eq!(
            StatsError::EmptySample.to_string(),
            "no samples accumulated"
        );
        assert!(StatsError::InsufficientSamples(1)
            .to_string()
            .contains("at least two samples"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = InputError::ZeroTimeSteps;
        let _: &dyn std::error::Error = &err;

        let err = StatsError::EmptySample;
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = InputError::InvalidAssetLevel {
            index: 0,
            value: -1.0,
        };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
