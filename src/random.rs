//! Injectable random source.
//!
//! Every random decision in the search (seeding, culling, parent selection,
//! crossover, mutation) is drawn through [`RandomSource`], so a run is fully
//! reproducible from the source it was handed.
//!
//! Any [`rand::RngCore`] is a `RandomSource`. Use [`create_rng`] for a
//! seeded generator.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform random integers.
///
/// Implementors supply only [`next_in_range`](RandomSource::next_in_range);
/// the floating-point helpers are derived from it.
pub trait RandomSource {
    /// Returns a uniform integer in `[0, bound)`.
    ///
    /// `bound` must be positive.
    fn next_in_range(&mut self, bound: usize) -> usize;

    /// Returns a uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        const RESOLUTION: usize = 1 << 24;
        self.next_in_range(RESOLUTION) as f64 / RESOLUTION as f64
    }

    /// Returns `true` with the given probability.
    ///
    /// Probabilities outside `[0, 1]` are clamped.
    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.next_unit() < probability
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_in_range(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "bound must be positive");
        self.random_range(0..bound)
    }
}

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator seeded from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    create_rng(seed.unwrap_or_else(rand::random))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn next_in_range(&mut self, bound: usize) -> usize {
            self.0.min(bound - 1)
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        let xs: Vec<usize> = (0..32).map(|_| a.next_in_range(1000)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.next_in_range(1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_next_in_range_bounds() {
        let mut rng = create_rng(42);
        for bound in 1..50 {
            for _ in 0..20 {
                assert!(rng.next_in_range(bound) < bound);
            }
        }
    }

    #[test]
    fn test_next_unit_in_unit_interval() {
        let mut rng = create_rng(3);
        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u), "got {u}");
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = create_rng(1);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
            assert!(!rng.chance(-3.0));
            assert!(rng.chance(2.0));
        }
    }

    #[test]
    fn test_custom_source_drives_helpers() {
        let mut low = Fixed(0);
        assert_eq!(low.next_unit(), 0.0);
        assert!(low.chance(0.5));

        let mut high = Fixed(usize::MAX);
        assert!(high.next_unit() < 1.0);
        assert!(!high.chance(0.5));
    }
}
