//! Pluggable uniform random sources.
//!
//! The automaton never touches global random state; callers hand it a
//! [`UniformSource`]. Every [`rand::Rng`] is one, so a seeded
//! `StdRng` gives reproducible runs and `rand::rng()` gives fresh ones.

use rand::Rng;

/// A source of uniform samples in `[0, 1)`.
pub trait UniformSource {
    /// Draws the next sample.
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> UniformSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Adapts a closure into a [`UniformSource`].
///
/// ```
/// use weft_automata::{FnSource, UniformSource};
///
/// let mut half = FnSource(|| 0.5);
/// assert_eq!(half.next_unit(), 0.5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> f64> UniformSource for FnSource<F> {
    fn next_unit(&mut self) -> f64 {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rng_samples_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn test_fn_source() {
        let mut values = [0.25, 0.75].into_iter().cycle();
        let mut source = FnSource(move || values.next().unwrap_or(0.0));
        assert_eq!(source.next_unit(), 0.25);
        assert_eq!(source.next_unit(), 0.75);
        assert_eq!(source.next_unit(), 0.25);
    }
}
