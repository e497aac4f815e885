//! Reference directions on the unit simplex.

/// A candidate associated with a reference point.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Association {
  /// Index of the candidate in the pool.
  pub index: usize,
  /// Perpendicular distance between the candidate's normalized objectives
  /// and the reference line.
  pub distance: f64,
}

/// A point on the unit simplex, defining a reference line through the
/// origin, and the niche of candidates currently closest to it.
#[derive(Clone, PartialEq, Debug)]
pub struct ReferencePoint<const N: usize> {
  position: [f64; N],
  pub(crate) count: usize,
  pub(crate) associations: Vec<Association>,
}

impl<const N: usize> ReferencePoint<N> {
  fn new(position: [f64; N]) -> Self {
    Self {
      position,
      count: 0,
      associations: Vec::new(),
    }
  }

  /// Returns coordinates of the point. They are non-negative and sum to 1.
  pub fn position(&self) -> &[f64; N] {
    &self.position
  }

  /// Returns the number of candidates admitted from this point's niche
  /// during the current niching pass.
  pub fn count(&self) -> usize {
    self.count
  }

  /// Returns candidates associated with this point and not admitted yet.
  pub fn associations(&self) -> &[Association] {
    &self.associations
  }

  /// Forgets everything collected during a niching pass.
  pub(crate) fn clear(&mut self) {
    self.count = 0;
    self.associations.clear();
  }
}

/// Generates every point of the unit simplex whose coordinates are multiples
/// of `1 / divisions`. There are `C(divisions + N - 1, N - 1)` of them.
///
/// # Panics
///
/// Panics if `divisions` or `N` is `0`.
pub fn generate<const N: usize>(divisions: usize) -> Vec<ReferencePoint<N>> {
  assert!(N > 0, "reference points need at least one objective");
  assert!(divisions > 0, "reference points need at least one division");
  let mut points = Vec::new();
  let mut current = [0.0; N];
  generate_recursive(&mut points, &mut current, divisions, divisions, 0);
  points
}

fn generate_recursive<const N: usize>(
  points: &mut Vec<ReferencePoint<N>>,
  current: &mut [f64; N],
  left: usize,
  total: usize,
  element: usize,
) {
  if element == N - 1 {
    current[element] = left as f64 / total as f64;
    points.push(ReferencePoint::new(*current));
  } else {
    for i in 0..=left {
      current[element] = i as f64 / total as f64;
      generate_recursive(points, current, left - i, total, element + 1);
    }
  }
}

/// Returns the distance between `point` and the line through the origin
/// and `direction`.
pub fn perpendicular_distance<const N: usize>(
  point: &[f64; N],
  direction: &[f64; N],
) -> f64 {
  let numerator: f64 = direction.iter().zip(point).map(|(r, v)| r * v).sum();
  let denominator: f64 = direction.iter().map(|r| r * r).sum();
  let k = numerator / denominator;
  direction
    .iter()
    .zip(point)
    .map(|(r, v)| (k * r - v).powi(2))
    .sum::<f64>()
    .sqrt()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn binomial(n: usize, k: usize) -> usize {
    (1..=k).fold(1, |acc, i| acc * (n + 1 - i) / i)
  }

  #[test]
  fn test_two_objectives_three_divisions() {
    let points = generate::<2>(3);
    let positions: Vec<_> = points.iter().map(|p| *p.position()).collect();
    assert_eq!(
      positions,
      vec![
        [0.0, 1.0],
        [1.0 / 3.0, 2.0 / 3.0],
        [2.0 / 3.0, 1.0 / 3.0],
        [1.0, 0.0],
      ]
    );
  }

  #[test]
  fn test_point_count() {
    for divisions in 1..8 {
      assert_eq!(generate::<1>(divisions).len(), 1);
      assert_eq!(generate::<2>(divisions).len(), binomial(divisions + 1, 1));
      assert_eq!(generate::<3>(divisions).len(), binomial(divisions + 2, 2));
      assert_eq!(generate::<5>(divisions).len(), binomial(divisions + 4, 4));
    }
    assert_eq!(generate::<3>(12).len(), 91);
  }

  #[test]
  fn test_points_on_simplex() {
    for point in generate::<4>(5) {
      let sum: f64 = point.position().iter().sum();
      assert!((sum - 1.0).abs() < 1e-12);
      assert!(point.position().iter().all(|&c| c >= 0.0));
      assert_eq!(point.count(), 0);
      assert!(point.associations().is_empty());
    }
  }

  #[test]
  #[should_panic(expected = "at least one division")]
  fn test_zero_divisions() {
    generate::<3>(0);
  }

  #[test]
  fn test_perpendicular_distance() {
    assert!(perpendicular_distance(&[1.0, 1.0], &[0.5, 0.5]).abs() < 1e-12);
    let d = perpendicular_distance(&[1.0, 0.0], &[0.0, 1.0]);
    assert!((d - 1.0).abs() < 1e-12);
    let d = perpendicular_distance(&[1.0, 0.0], &[0.5, 0.5]);
    assert!((d - 2f64.sqrt() / 2.0).abs() < 1e-12);
  }
}
