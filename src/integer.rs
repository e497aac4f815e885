//! A bounded integer-vector representation of individuals.

use crate::{individual::Individual, random::RandomSource};

/// Half-open range `min..max` a gene is drawn from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Bound {
  /// Smallest value a gene can take.
  pub min: i64,
  /// Upper limit of a gene, never reached unless `min == max`.
  pub max: i64,
}

impl Bound {
  /// Creates a new bound.
  pub fn new(min: i64, max: i64) -> Self {
    Self { min, max }
  }

  fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> i64 {
    // the span of the widest bounds only fits in 128 bits
    let span = (i128::from(self.max) - i128::from(self.min)) as f64;
    (i128::from(self.min) + (span * rng.float64()) as i128) as i64
  }
}

/// An individual made of integer genes, each one bounded separately.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct IntegerIndividual {
  genes: Vec<i64>,
  bounds: Vec<Bound>,
}

impl IntegerIndividual {
  /// Creates an individual from explicit genes.
  ///
  /// # Panics
  ///
  /// Panics if the number of genes and bounds differ.
  pub fn new(genes: Vec<i64>, bounds: Vec<Bound>) -> Self {
    assert_eq!(
      genes.len(),
      bounds.len(),
      "each gene must have its own bound"
    );
    Self { genes, bounds }
  }

  /// Creates an individual with one random gene per bound.
  pub fn random<R: RandomSource + ?Sized>(
    bounds: &[Bound],
    rng: &mut R,
  ) -> Self {
    Self {
      genes: bounds.iter().map(|b| b.sample(rng)).collect(),
      bounds: bounds.to_vec(),
    }
  }

  /// Returns the genes.
  pub fn genes(&self) -> &[i64] {
    &self.genes
  }
}

impl Individual for IntegerIndividual {
  type Value = i64;

  fn len(&self) -> usize {
    self.genes.len()
  }

  fn value(&self, index: usize) -> i64 {
    self.genes[index]
  }

  fn copy_from(&mut self, source: &Self, start: usize, end: usize) {
    self.genes[start..end].copy_from_slice(&source.genes[start..end]);
  }

  fn mutate<R: RandomSource + ?Sized>(
    &mut self,
    positions: &[usize],
    rng: &mut R,
  ) {
    for &p in positions {
      self.genes[p] = self.bounds[p].sample(rng);
    }
  }
}

/// Creates `size` random individuals with one gene per bound.
pub fn random_population<R: RandomSource + ?Sized>(
  size: usize,
  bounds: &[Bound],
  rng: &mut R,
) -> Vec<IntegerIndividual> {
  (0..size)
    .map(|_| IntegerIndividual::random(bounds, rng))
    .collect()
}
