//! Injectable randomness for the delivery simulation.

use rand::Rng;

/// Source of uniformly distributed values in `[0, 1)`.
///
/// Every [`rand::Rng`] is a source; seed a `StdRng` for reproducible quotes.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(
        &mut self,
        len: usize,
    ) -> usize {
        let index = (self.next_unit() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random()
    }

    fn next_index(
        &mut self,
        len: usize,
    ) -> usize {
        self.random_range(0..len)
    }
}
