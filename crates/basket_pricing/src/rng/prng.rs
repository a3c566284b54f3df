//! Seeded PRNG wrapper producing standard normal variates.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Source of independent standard normal draws for the simulation.
///
/// The same seed always produces the same sequence, which makes whole
/// simulations reproducible bit for bit. Normal sampling uses the
/// Ziggurat algorithm via `rand_distr::StandardNormal`.
///
/// # Examples
///
/// ```rust
/// use basket_pricing::rng::SimulationRng;
///
/// let mut rng1 = SimulationRng::from_seed(12345);
/// let mut rng2 = SimulationRng::from_seed(12345);
/// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
/// ```
pub struct SimulationRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation.
    seed: u64,
}

impl SimulationRng {
    /// Creates a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the generator for an independent worker stream.
    ///
    /// Stream `index` draws from the sequence seeded `base_seed + index`;
    /// distinct indices give statistically independent StdRng streams, so
    /// parallel workers never overlap and chunked runs stay reproducible.
    #[inline]
    pub fn derive_stream(base_seed: u64, index: u64) -> Self {
        Self::from_seed(base_seed.wrapping_add(index))
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single standard normal variate.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Zero-allocation operation; the buffer must be pre-allocated by
    /// the caller.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimulationRng::from_seed(42);
        let mut b = SimulationRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.gen_normal(), b.gen_normal());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = SimulationRng::from_seed(42);
        let mut b = SimulationRng::from_seed(43);
        let different = (0..16).any(|_| a.gen_normal() != b.gen_normal());
        assert!(different);
    }

    #[test]
    fn test_fill_matches_single_draws() {
        let mut a = SimulationRng::from_seed(7);
        let mut b = SimulationRng::from_seed(7);

        let mut buffer = [0.0; 32];
        a.fill_normal(&mut buffer);
        for &value in &buffer {
            assert_eq!(value, b.gen_normal());
        }
    }

    #[test]
    fn test_derive_stream_independent() {
        let mut s0 = SimulationRng::derive_stream(42, 0);
        let mut s1 = SimulationRng::derive_stream(42, 1);
        assert_eq!(s0.seed(), 42);
        assert_eq!(s1.seed(), 43);
        assert_ne!(s0.gen_normal(), s1.gen_normal());
    }

    #[test]
    fn test_normal_sample_moments() {
        // Loose sanity check on the first two moments.
        let mut rng = SimulationRng::from_seed(2024);
        let n = 100_000;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for _ in 0..n {
            let z = rng.gen_normal();
            sum += z;
            sum_sq += z * z;
        }
        let mean = sum / n as f64;
        let var = sum_sq / n as f64 - mean * mean;
        assert!(mean.abs() < 0.02, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.03, "var = {}", var);
    }
}
