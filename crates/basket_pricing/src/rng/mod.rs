//! Random number generation for the simulation engine.
//!
//! Seeded, reproducible generation of standard normal draws with
//! zero-allocation batch fills. Parallel workers obtain independent
//! streams via [`SimulationRng::derive_stream`].

mod prng;

pub use prng::SimulationRng;
