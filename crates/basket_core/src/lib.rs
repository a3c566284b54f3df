//! # Basket Core (Foundation Layer)
//!
//! Foundation types for the basket Monte Carlo pricing engine:
//!
//! - Market inputs with eager validation ([`types::MarketInputs`])
//! - Covariance matrix algebra and Cholesky decomposition
//!   ([`math::covariance`])
//! - Running sample statistics with O(1) memory ([`math::stats`])
//! - Structured error types ([`types::error`])
//!
//! This crate carries no simulation logic; the engine layer
//! (`basket_pricing`) builds path generation and pricing on top of it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod types;

// Re-export commonly used items for convenience
pub use math::covariance::{CholeskyFactor, CovarianceError, CovarianceMatrix, DecompositionError};
pub use math::stats::{SampleAccumulator, SampleStatistics};
pub use types::error::{InputError, StatsError};
pub use types::MarketInputs;
