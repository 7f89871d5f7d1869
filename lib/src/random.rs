//! Sources of randomness.
//!
//! Every random decision an automaton makes is a single draw from
//! a [`RandomSource`], a uniformly distributed number in `[0, 1)`.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A source of uniformly distributed numbers in `[0, 1)`.
pub trait RandomSource {
    /// The next draw.
    fn next_f64(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Adapts any [`rand`] generator to a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R: Rng>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.0.gen()
    }
}

impl RngSource<StdRng> {
    /// A generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }

    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }

    /// Seeded when a seed is given, from the operating system otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

/// Replays a fixed list of draws, starting over when it runs out.
///
/// An empty list always yields `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceSource {
    draws: Vec<f64>,
    next: usize,
}

impl SequenceSource {
    /// Creates a source from a list of draws.
    ///
    /// Values outside `[0, 1)` are not rejected; they simply compare
    /// accordingly against the probabilities the automata use.
    pub fn new<I: IntoIterator<Item = f64>>(draws: I) -> Self {
        SequenceSource {
            draws: draws.into_iter().collect(),
            next: 0,
        }
    }

    /// A source that always yields the same value.
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }

    /// How many draws have been taken so far.
    pub fn taken(&self) -> usize {
        self.next
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_cycles() {
        let mut source = SequenceSource::new([0.1, 0.7]);
        assert_eq!(source.next_f64(), 0.1);
        assert_eq!(source.next_f64(), 0.7);
        assert_eq!(source.next_f64(), 0.1);
        assert_eq!(source.taken(), 3);
        assert_eq!(SequenceSource::new([]).next_f64(), 0.0);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..16 {
            let x = a.next_f64();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.next_f64());
        }
    }
}
