use rand::Rng;

/// Random draws consumed by sprite placement.
///
/// Implemented for every [`rand::Rng`]; tests substitute scripted sequences.
pub trait PlacementRng {
    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn coordinate(&mut self, low: i64, high: i64) -> i64;

    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn choose(&mut self, len: usize) -> usize;
}

impl<R: Rng> PlacementRng for R {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn coordinate(&mut self, low: i64, high: i64) -> i64 {
        self.random_range(low..=high)
    }

    fn choose(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}
