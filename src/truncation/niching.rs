//! NSGA-III truncation: survivors are spread over reference directions.

use itertools::Itertools;
use typed_builder::TypedBuilder;

use super::{
  hyperplane,
  reference::{self, Association, ReferencePoint},
  Truncation,
};
use crate::{error::Result, random::RandomSource, score::Scores};

/// Fills the remaining slots from the overflowing front one niche at a
/// time, always serving the least represented reference point first.
///
/// Reference points are generated by [`initialize`](Truncation::initialize)
/// and reused on every call. Their niches are emptied after each pass.
///
/// # Examples
/// ```
/// use moea::truncation::{ReferencePointNiching, Truncation};
///
/// let mut niching = ReferencePointNiching::<3>::builder()
///   .divisions(12)
///   .build();
/// niching.initialize(100);
/// assert_eq!(niching.reference_points().len(), 91);
/// ```
#[derive(TypedBuilder, Clone, Debug)]
pub struct ReferencePointNiching<const N: usize> {
  /// Number of divisions of each objective axis.
  divisions: usize,
  #[builder(setter(skip), default)]
  points: Vec<ReferencePoint<N>>,
  #[builder(setter(skip), default)]
  active: Vec<usize>,
  #[builder(setter(skip), default)]
  snapshot: Vec<usize>,
}

impl<const N: usize> ReferencePointNiching<N> {
  /// Returns the number of divisions of each objective axis.
  pub fn divisions(&self) -> usize {
    self.divisions
  }

  /// Returns the reference points. Empty until initialized.
  pub fn reference_points(&self) -> &[ReferencePoint<N>] {
    &self.points
  }

  /// Attaches each `front` member to the reference point whose line passes
  /// closest to its normalized objectives.
  fn associate(
    &mut self,
    front: &[usize],
    scores: &[Scores<N>],
    intercepts: &[f64; N],
    ideal: &[f64; N],
  ) {
    for &index in front {
      let normalized = hyperplane::normalize(&scores[index], intercepts, ideal);
      let nearest = self
        .points
        .iter()
        .map(|p| reference::perpendicular_distance(&normalized, p.position()))
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b));
      if let Some((point, distance)) = nearest {
        self.points[point]
          .associations
          .push(Association { index, distance });
      }
    }
  }

  fn fill<R: RandomSource + ?Sized>(
    &mut self,
    remaining: usize,
    survivors: &mut Vec<usize>,
    rng: &mut R,
  ) {
    self.active.clear();
    self.active.extend(0..self.points.len());
    let target = survivors.len() + remaining;
    while survivors.len() < target {
      let min_count = self
        .active
        .iter()
        .map(|&p| self.points[p].count)
        .min()
        .expect("every candidate belongs to some reference point");
      self.snapshot.clear();
      self.snapshot.extend(
        self
          .active
          .iter()
          .copied()
          .filter(|&p| self.points[p].count == min_count),
      );
      let chosen = self.snapshot[rng.index(self.snapshot.len())];

      let point = &mut self.points[chosen];
      if point.associations.is_empty() {
        self.active.retain(|&p| p != chosen);
        continue;
      }
      let pick = if point.count > 0 {
        point
          .associations
          .iter()
          .position_min_by(|a, b| a.distance.total_cmp(&b.distance))
          .unwrap_or(0)
      } else {
        rng.index(point.associations.len())
      };
      let admitted = point.associations.remove(pick);
      point.count += 1;
      survivors.push(admitted.index);
    }
  }
}

impl<const N: usize> Truncation<N> for ReferencePointNiching<N> {
  fn initialize(&mut self, population_size: usize) {
    self.points = reference::generate(self.divisions);
    self.active = Vec::with_capacity(self.points.len());
    self.snapshot = Vec::with_capacity(self.points.len());
    // an even spread of the largest possible front
    let share = (2 * population_size).div_ceil(self.points.len());
    for point in &mut self.points {
      point.associations.reserve(share);
    }
  }

  fn truncate<R: RandomSource + ?Sized>(
    &mut self,
    front: &[usize],
    remaining: usize,
    scores: &[Scores<N>],
    _: &[f64],
    survivors: &mut Vec<usize>,
    rng: &mut R,
  ) -> Result<()> {
    assert!(
      !self.points.is_empty(),
      "reference points must be initialized before niching"
    );
    assert!(
      remaining <= front.len(),
      "cannot keep more members than the front has"
    );
    if remaining == 0 {
      return Ok(());
    }

    let ideal = hyperplane::ideal_point(scores, front);
    let extremes = hyperplane::extreme_points(scores, front);
    let intercepts = hyperplane::intercepts(scores, front, &extremes)?;
    self.associate(front, scores, &intercepts, &ideal);
    self.fill(remaining, survivors, rng);
    self.points.iter_mut().for_each(ReferencePoint::clear);
    Ok(())
  }
}
