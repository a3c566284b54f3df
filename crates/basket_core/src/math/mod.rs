//! Numerical building blocks: covariance algebra and sample statistics.

pub mod covariance;
pub mod stats;

pub use covariance::{CholeskyFactor, CovarianceError, CovarianceMatrix, DecompositionError};
pub use stats::{SampleAccumulator, SampleStatistics};
