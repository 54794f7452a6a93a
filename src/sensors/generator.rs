//! Random sample generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of simulated readings
#[cfg_attr(test, mockall::automock)]
pub trait SampleSource: Send {
    /// Return a value in `[min, max)`
    fn next_in_range(&mut self, min: f64, max: f64) -> f64;
}

/// Uniform value in `[min, max)`. An empty range yields `min`.
pub fn random_in_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }

    let value = min + rng.random::<f64>() * (max - min);
    // Float rounding can land exactly on the open upper bound
    if value >= max { min } else { value }
}

/// `SampleSource` backed by a standard RNG
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seeded for reproducible runs, or from the OS when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl SampleSource for RandomSource {
    fn next_in_range(&mut self, min: f64, max: f64) -> f64 {
        random_in_range(&mut self.rng, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Always yields all-ones bits, so a uniform `f64` comes out just below 1.0
    struct SaturatedRng;

    impl RngCore for SaturatedRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff);
        }
    }

    #[test]
    fn test_values_stay_in_half_open_range() {
        let mut source = RandomSource::new(Some(7));
        for (lo, hi) in [(20.0, 30.0), (30.0, 70.0), (0.0, 500.0), (30.0, 90.0)] {
            for _ in 0..10_000 {
                let v = source.next_in_range(lo, hi);
                assert!(lo <= v && v < hi, "{} not in [{}, {})", v, lo, hi);
            }
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut source = RandomSource::new(Some(1));
        assert_eq!(source.next_in_range(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_rounding_onto_upper_bound_falls_back_to_min() {
        let mut rng = SaturatedRng;
        let u = rng.random::<f64>();
        assert!(u < 1.0);
        // 1e6 + u rounds to 1e6 + 1 at this magnitude
        assert_eq!(1_000_000.0 + u * 1.0, 1_000_001.0);
        assert_eq!(random_in_range(&mut rng, 1_000_000.0, 1_000_001.0), 1_000_000.0);
    }

    #[test]
    fn test_values_below_the_bound_are_kept() {
        let mut rng = SaturatedRng;
        let v = random_in_range(&mut rng, 0.0, 3.0);
        assert!(v > 2.999 && v < 3.0);
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomSource::new(Some(42));
        let mut b = RandomSource::new(Some(42));
        for _ in 0..100 {
            assert_eq!(a.next_in_range(0.0, 1.0), b.next_in_range(0.0, 1.0));
        }
    }
}
