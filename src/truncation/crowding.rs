//! NSGA-II truncation: the least crowded members survive.

use std::cmp::Ordering;

use super::Truncation;
use crate::{error::Result, random::RandomSource, score::Scores};

/// Keeps the members of the overflowing front with the largest crowding
/// distance.
///
/// Ties are resolved towards members that come later in the front.
#[derive(Clone, Debug, Default)]
pub struct CrowdingTruncation {
  order: Vec<usize>,
}

impl<const N: usize> Truncation<N> for CrowdingTruncation {
  fn initialize(&mut self, population_size: usize) {
    self.order = Vec::with_capacity(2 * population_size);
  }

  fn truncate<R: RandomSource + ?Sized>(
    &mut self,
    front: &[usize],
    remaining: usize,
    _: &[Scores<N>],
    distances: &[f64],
    survivors: &mut Vec<usize>,
    _: &mut R,
  ) -> Result<()> {
    self.order.clear();
    self.order.extend_from_slice(front);
    self.order.sort_by(|&a, &b| {
      distances[a]
        .partial_cmp(&distances[b])
        .unwrap_or(Ordering::Equal)
    });
    survivors.extend(self.order.iter().rev().take(remaining));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{crowding::CrowdingDistance, random::Xorshift};

  fn truncate(
    scores: &[[f64; 1]],
    front: &[usize],
    remaining: usize,
  ) -> Vec<usize> {
    let mut distances = vec![0.0; scores.len()];
    CrowdingDistance::with_capacity(front.len()).assign(
      scores,
      front,
      &mut distances,
    );
    let mut truncation = CrowdingTruncation::default();
    Truncation::<1>::initialize(&mut truncation, scores.len());
    let mut survivors = Vec::new();
    truncation
      .truncate(
        front,
        remaining,
        scores,
        &distances,
        &mut survivors,
        &mut Xorshift::default(),
      )
      .unwrap();
    survivors
  }

  #[test]
  fn test_most_crowded_dropped() {
    let scores = [[0.0], [1.0], [2.5], [3.0]];
    assert_eq!(truncate(&scores, &[0, 1, 2, 3], 3), vec![3, 0, 1]);
  }

  #[test]
  fn test_ties_prefer_later_members() {
    let scores = [[0.0]; 8];
    assert_eq!(
      truncate(&scores, &[0, 1, 2, 3, 4, 5, 6, 7], 4),
      vec![0, 7, 6, 5]
    );
  }

  #[test]
  fn test_survivor_count() {
    let scores = [[4.0], [1.0], [3.0], [0.0], [2.0]];
    for remaining in 0..=5 {
      let survivors = truncate(&scores, &[0, 1, 2, 3, 4], remaining);
      assert_eq!(survivors.len(), remaining);
    }
  }
}
