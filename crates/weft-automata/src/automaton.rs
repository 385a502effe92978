//! The automaton: one ring advanced by the density-guarded rule.

use std::io::{self, Write};

use sha2::Digest;
use tracing::{debug, trace};

use crate::error::Result;
use crate::history::CellSink;
use crate::ring::{Generation, Ring};
use crate::rule::{Perturbation, base_generation};
use crate::seed;
use crate::source::UniformSource;

/// A one-dimensional automaton on a circular row of cells.
///
/// Only [`advance`](Self::advance) changes the row, and it takes
/// `&mut self`: callers sharing an automaton across threads must serialize
/// access themselves.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use weft_automata::{Automaton, Perturbation};
///
/// let mut automaton = Automaton::from_sha256(
///     b"Input Test",
///     Some(50),
///     Perturbation::NONE,
///     StdRng::seed_from_u64(1),
/// )
/// .unwrap();
///
/// let first = automaton.advance();
/// assert_eq!(first.len(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct Automaton<R> {
    row: Ring,
    perturbation: Perturbation,
    rng: R,
    generation: usize,
}

impl<R: UniformSource> Automaton<R> {
    /// Creates an automaton from an explicit seed.
    ///
    /// Each element becomes 1 unless it equals `T::default()`.
    pub fn from_seed<T, I>(seed: I, perturbation: Perturbation, rng: R) -> Result<Self>
    where
        T: Copy + Default + PartialEq,
        I: IntoIterator<Item = T>,
    {
        let row = Ring::from_truthy(seed)?;
        Ok(Self::from_ring(row, perturbation, rng))
    }

    /// Creates an automaton whose cells start alive with probability `chance`.
    ///
    /// The seed is drawn from `rng`, which then drives the perturbation.
    pub fn random(
        length: usize,
        chance: f64,
        perturbation: Perturbation,
        mut rng: R,
    ) -> Result<Self> {
        let bits = seed::random_bits(length, chance, &mut rng)?;
        Ok(Self::from_ring(Ring::new(bits)?, perturbation, rng))
    }

    /// Seeds the automaton from the digest of `data` under algorithm `D`.
    ///
    /// See [`seed::digest_bits`] for how the digest becomes cells.
    pub fn from_digest<D: Digest>(
        data: &[u8],
        length: Option<usize>,
        perturbation: Perturbation,
        rng: R,
    ) -> Result<Self> {
        let bits = seed::digest_bits::<D>(data, length)?;
        Ok(Self::from_ring(Ring::new(bits)?, perturbation, rng))
    }

    /// Seeds the automaton from the SHA-256 digest of `data`.
    pub fn from_sha256(
        data: &[u8],
        length: Option<usize>,
        perturbation: Perturbation,
        rng: R,
    ) -> Result<Self> {
        Self::from_digest::<sha2::Sha256>(data, length, perturbation, rng)
    }

    /// Wraps an existing ring.
    pub fn from_ring(row: Ring, perturbation: Perturbation, rng: R) -> Self {
        debug!(
            length = row.len(),
            population = row.population(),
            toggle = perturbation.toggle(),
            erase = perturbation.erase(),
            fill = perturbation.fill(),
            "automaton seeded"
        );
        Self {
            row,
            perturbation,
            rng,
            generation: 0,
        }
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.row.len()
    }

    /// Returns true if the row has no cells (never, after construction).
    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    /// Number of completed advances.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The random overrides in effect.
    pub fn perturbation(&self) -> Perturbation {
        self.perturbation
    }

    /// Replaces the random overrides.
    pub fn set_perturbation(&mut self, perturbation: Perturbation) {
        self.perturbation = perturbation;
    }

    /// The current row.
    pub fn row(&self) -> &Ring {
        &self.row
    }

    /// Mutable access to the random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Returns the current generation without advancing.
    pub fn peek(&self) -> Generation {
        self.row.snapshot()
    }

    /// Computes and commits the next generation.
    ///
    /// Returns the generation that was current before the call.
    pub fn advance(&mut self) -> Generation {
        let perturbation = self.perturbation;
        let next: Vec<u8> = base_generation(&self.row)
            .into_iter()
            .map(|base| perturbation.apply(base, &mut self.rng))
            .collect();

        let previous = self.row.install(next);
        self.generation += 1;
        trace!(
            generation = self.generation,
            population = self.row.population(),
            "advanced"
        );
        previous
    }

    /// Iterates over successive [`advance`](Self::advance) results forever.
    pub fn generations(&mut self) -> Generations<'_, R> {
        Generations { automaton: self }
    }

    /// Runs `generations` advances and collects the returned rows.
    ///
    /// The first row is the generation current at the time of the call.
    pub fn generate_pattern(&mut self, generations: usize) -> Vec<Generation> {
        self.generations().take(generations).collect()
    }

    /// Feeds `generations` advances to `sink`, one cell at a time.
    ///
    /// Generation indices count from this automaton's
    /// [`generation`](Self::generation) at the time each row was current.
    pub fn drive<K: CellSink + ?Sized>(&mut self, generations: usize, sink: &mut K) {
        for _ in 0..generations {
            let index = self.generation;
            let row = self.advance();
            for (cell, &value) in row.iter().enumerate() {
                sink.accept(index, cell, value);
            }
        }
    }

    /// Writes `generations` rows as text, one line per generation.
    pub fn show<W: Write + ?Sized>(&mut self, generations: usize, out: &mut W) -> io::Result<()> {
        for _ in 0..generations {
            let row = self.advance();
            writeln!(out, "{}", row)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`Automaton::generations`].
#[derive(Debug)]
pub struct Generations<'a, R> {
    automaton: &'a mut Automaton<R>,
}

impl<R: UniformSource> Iterator for Generations<'_, R> {
    type Item = Generation;

    fn next(&mut self) -> Option<Generation> {
        Some(self.automaton.advance())
    }
}
