//! Monte Carlo engine for correlated multi-asset baskets.
//!
//! # Architecture
//!
//! ```text
//! BasketOptionPricer
//! ├── DiffusionParams           (dt, drift vector, per-step covariance)
//! ├── CorrelatedPathGenerator   (Cholesky-correlated GBM paths)
//! ├── BasketPayoff              (terminal basket value vs strike, discounted)
//! └── MonteCarloModel           (sampling loop over the three seams)
//!     └── SampleStatistics      (running mean and standard error)
//! ```
//!
//! The three seams — [`PathGenerator`], [`PathPayoff`], and
//! [`SampleAccumulator`](basket_core::math::stats::SampleAccumulator) —
//! keep the diffusion model, the basket payoff shape, and the
//! error-estimation method independently replaceable.

pub mod diffusion;
pub mod error;
pub mod model;
pub mod paths;
pub mod payoff;
pub mod pricer;

// Re-exports for convenient access
pub use diffusion::DiffusionParams;
pub use error::PricerError;
pub use model::MonteCarloModel;
pub use paths::{CorrelatedPathGenerator, MultiPath, PathGenerator};
pub use payoff::{BasketPayoff, OptionKind, PathPayoff, PayoffSpec};
pub use pricer::{BasketOptionPricer, PricingResult};
