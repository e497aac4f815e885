//! Contracts through which the engine handles candidate solutions without
//! ever looking inside their genomes.

use crate::random::RandomSource;

/// A candidate solution.
///
/// The engine never inspects genome values itself. It only copies whole
/// individuals into preallocated slots, so implementations are free to use
/// any representation: bit-packed strings, integer vectors, etc.
pub trait Individual: Clone {
  /// Type of a single gene as reported by [`value`](Individual::value).
  type Value: Clone;

  /// Returns the number of genes.
  fn len(&self) -> usize;

  /// Returns `true` if the individual has no genes.
  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the gene at position `index`.
  fn value(&self, index: usize) -> Self::Value;

  /// Copies genes `start..end` of `source` into the same positions of
  /// `self`, in place.
  fn copy_from(&mut self, source: &Self, start: usize, end: usize);

  /// Mutates the genes at the given `positions`, in place.
  fn mutate<R: RandomSource + ?Sized>(
    &mut self,
    positions: &[usize],
    rng: &mut R,
  );
}

/// An ordered, fixed-size collection of individuals.
pub trait Population {
  /// Type of individuals this population holds.
  type Individual: Individual;

  /// Returns the number of individuals.
  fn len(&self) -> usize;

  /// Returns `true` if the population holds no individuals.
  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns a reference to the individual at slot `index`.
  fn individual(&self, index: usize) -> &Self::Individual;

  /// Returns a mutable reference to the individual at slot `index`.
  fn individual_mut(&mut self, index: usize) -> &mut Self::Individual;
}

impl<I: Individual> Population for Vec<I> {
  type Individual = I;

  fn len(&self) -> usize {
    self.as_slice().len()
  }

  fn individual(&self, index: usize) -> &I {
    &self[index]
  }

  fn individual_mut(&mut self, index: usize) -> &mut I {
    &mut self[index]
  }
}

/// Overwrites the individual at `slot` of `population` with a full copy of
/// `source`.
pub(crate) fn overwrite<P: Population>(
  population: &mut P,
  slot: usize,
  source: &P::Individual,
) {
  population
    .individual_mut(slot)
    .copy_from(source, 0, source.len());
}
