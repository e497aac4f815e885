//! Non-dominated sorting: partitioning a pool of individuals into ordered
//! Pareto fronts.
//!
//! Fronts are peeled one at a time. An `elite` accumulator is seeded with the
//! first unranked individual, then every other unranked individual challenges
//! the elite: whoever it dominates is evicted back into the pool, and it
//! joins the elite unless some elite member dominates it. Once the pool has
//! been walked through, the elite is exactly the next non-dominated front.
//!
//! The walk order decides which of two equivalent individuals comes first in
//! a front, and therefore which one wins ties later. It must stay as is.

use std::cmp::Ordering;

use crate::{
  dominance::compare,
  score::{Scores, Violation},
};

/// Reusable arena for peeling fronts off a pool of individuals.
///
/// Both internal buffers are allocated once with the capacity of the largest
/// pool and never grow past it. Every pool index lives in exactly one of
/// them at any time: either it's still unranked, or it belongs to the front
/// being built.
#[derive(Clone, Debug, Default)]
pub struct NondominatedSorter {
  pool: Vec<usize>,
  elite: Vec<usize>,
}

impl NondominatedSorter {
  /// Creates a sorter able to handle pools of up to `capacity` individuals
  /// without reallocating.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      pool: Vec::with_capacity(capacity),
      elite: Vec::with_capacity(capacity),
    }
  }

  /// Marks individuals `0..len` as unranked.
  pub fn reset(&mut self, len: usize) {
    self.elite.clear();
    self.pool.clear();
    self.pool.extend(0..len);
  }

  /// Returns the number of individuals not assigned to any front yet.
  pub fn unranked(&self) -> usize {
    self.pool.len()
  }

  /// Peels the next non-dominated front off the unranked individuals and
  /// returns its indices. Returns an empty slice once every individual has
  /// been ranked.
  pub fn next_front<const N: usize>(
    &mut self,
    scores: &[Scores<N>],
    violations: &[Violation],
  ) -> &[usize] {
    self.elite.clear();
    if self.pool.is_empty() {
      return &self.elite;
    }
    self.elite.push(self.pool.remove(0));

    let mut j = 0;
    while j < self.pool.len() {
      let challenger = self.pool[j];
      let mut ord = Ordering::Equal;
      let mut k = 0;
      while k < self.elite.len() {
        ord = compare(scores, violations, challenger, self.elite[k]);
        match ord {
          Ordering::Less => {
            // evicted members are challenged again later in this same pass
            let evicted = self.elite.remove(k);
            self.pool.push(evicted);
          }
          Ordering::Greater => break,
          Ordering::Equal => k += 1,
        }
      }
      if ord == Ordering::Greater {
        j += 1;
      } else {
        self.elite.push(challenger);
        self.pool.remove(j);
      }
    }

    &self.elite
  }
}

/// Sorts individuals `0..scores.len()` into non-dominated fronts, ordered by
/// rank.
///
/// # Panics
///
/// Panics if `scores` and `violations` have different lengths.
pub fn sort<const N: usize>(
  scores: &[Scores<N>],
  violations: &[Violation],
) -> Vec<Vec<usize>> {
  assert_eq!(
    scores.len(),
    violations.len(),
    "each individual must have a violation value"
  );
  let mut sorter = NondominatedSorter::with_capacity(scores.len());
  sorter.reset(scores.len());
  let mut fronts = Vec::new();
  while sorter.unranked() > 0 {
    fronts.push(sorter.next_front(scores, violations).to_vec());
  }
  fronts
}
