//! Core data types: market inputs and error taxonomy.

pub mod error;
pub mod market;

pub use error::{InputError, StatsError};
pub use market::MarketInputs;
