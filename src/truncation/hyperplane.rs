//! Objective normalization for reference-point niching: ideal point,
//! extreme points and the hyperplane they span.

use tracing::debug;

use crate::{
  error::{Error, Result},
  score::Scores,
};

/// Normalization denominators with a magnitude at or below this value are
/// replaced by it.
pub const NORMALIZATION_EPSILON: f64 = 1e-20;

/// Returns the component-wise minimum of the negated objectives of
/// `members`, i.e. minus the component-wise maximum.
pub fn ideal_point<const N: usize>(
  scores: &[Scores<N>],
  members: &[usize],
) -> [f64; N] {
  let mut ideal = [f64::INFINITY; N];
  for &i in members {
    for (ideal, score) in ideal.iter_mut().zip(&scores[i]) {
      *ideal = ideal.min(-score);
    }
  }
  ideal
}

/// Returns, for each objective, the member that maximizes the negated
/// objective. The first member wins ties.
///
/// # Panics
///
/// Panics if `members` is empty.
pub fn extreme_points<const N: usize>(
  scores: &[Scores<N>],
  members: &[usize],
) -> [usize; N] {
  assert!(!members.is_empty(), "extreme points of an empty set");
  std::array::from_fn(|m| {
    let mut best = members[0];
    let mut best_value = f64::NEG_INFINITY;
    for &i in members {
      if -scores[i][m] > best_value {
        best_value = -scores[i][m];
        best = i;
      }
    }
    best
  })
}

/// Returns intercepts of the hyperplane through the `extremes` with each
/// objective axis.
///
/// If two of `members` share all objective values, the hyperplane is not
/// built and each extreme point's own coordinate serves as the intercept on
/// its axis.
///
/// # Errors
///
/// Returns [`Error::DegenerateHyperplane`] if the extreme points are
/// linearly dependent or an intercept isn't finite.
pub fn intercepts<const N: usize>(
  scores: &[Scores<N>],
  members: &[usize],
  extremes: &[usize; N],
) -> Result<[f64; N]> {
  if has_duplicates(scores, members) {
    debug!("duplicate candidates, using extreme coordinates as intercepts");
    return Ok(std::array::from_fn(|m| scores[extremes[m]][m]));
  }
  let a = extremes.map(|e| scores[e]);
  let x = solve(a, [1.0; N])?;
  let mut intercepts = [0.0; N];
  for (m, (intercept, x)) in intercepts.iter_mut().zip(x).enumerate() {
    *intercept = 1.0 / x;
    if !intercept.is_finite() {
      return Err(Error::DegenerateHyperplane { column: m });
    }
  }
  Ok(intercepts)
}

/// Returns `true` if any two `members` have identical objective values.
fn has_duplicates<const N: usize>(
  scores: &[Scores<N>],
  members: &[usize],
) -> bool {
  members.iter().enumerate().any(|(k, &i)| {
    members[k + 1..].iter().any(|&j| scores[i] == scores[j])
  })
}

/// Solves `a · x = b` by Gaussian elimination with partial pivoting.
///
/// # Errors
///
/// Returns [`Error::DegenerateHyperplane`] on a zero or non-finite pivot.
pub fn solve<const N: usize>(
  mut a: [[f64; N]; N],
  mut b: [f64; N],
) -> Result<[f64; N]> {
  for col in 0..N {
    let pivot_row = (col..N)
      .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
      .unwrap_or(col);
    let pivot = a[pivot_row][col];
    if pivot == 0.0 || !pivot.is_finite() {
      return Err(Error::DegenerateHyperplane { column: col });
    }
    a.swap(col, pivot_row);
    b.swap(col, pivot_row);
    for row in col + 1..N {
      let ratio = a[row][col] / pivot;
      for term in col..N {
        a[row][term] -= a[col][term] * ratio;
      }
      b[row] -= b[col] * ratio;
    }
  }

  let mut x = [0.0; N];
  for i in (0..N).rev() {
    let known: f64 = (i + 1..N).map(|k| a[i][k] * x[k]).sum();
    x[i] = (b[i] - known) / a[i][i];
  }
  Ok(x)
}

/// Scales raw objective values by the distance between intercepts and the
/// ideal point.
pub fn normalize<const N: usize>(
  raw: &Scores<N>,
  intercepts: &[f64; N],
  ideal: &[f64; N],
) -> [f64; N] {
  std::array::from_fn(|m| {
    let denominator = intercepts[m] - ideal[m];
    if denominator.abs() > NORMALIZATION_EPSILON {
      raw[m] / denominator
    } else {
      raw[m] / NORMALIZATION_EPSILON
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_all_close<const N: usize>(actual: [f64; N], expected: [f64; N]) {
    for (a, e) in actual.iter().zip(&expected) {
      assert!(
        (a - e).abs() < 1e-9,
        "expected {expected:?} but was {actual:?}"
      );
    }
  }

  #[test]
  fn test_ideal_point_sign() {
    let scores = [[1.0, 4.0], [3.0, 2.0], [2.0, 3.0]];
    assert_eq!(ideal_point(&scores, &[0, 1, 2]), [-3.0, -4.0]);
    assert_eq!(ideal_point(&scores, &[0]), [-1.0, -4.0]);
  }

  #[test]
  fn test_extreme_points() {
    let scores = [[1.0, 4.0], [3.0, 2.0], [2.0, 3.0], [1.0, 5.0]];
    assert_eq!(extreme_points(&scores, &[0, 1, 2, 3]), [0, 1]);
    assert_eq!(extreme_points(&scores, &[3, 2, 0]), [3, 2]);
  }

  #[test]
  fn test_solve() {
    let x = solve([[2.0, 1.0], [1.0, 3.0]], [3.0, 5.0]).unwrap();
    assert_all_close(x, [0.8, 1.4]);
    // needs a row swap, plain elimination would divide by zero
    let x = solve([[0.0, 1.0], [1.0, 0.0]], [2.0, 3.0]).unwrap();
    assert_all_close(x, [3.0, 2.0]);
    let x = solve(
      [[1.0, 2.0, 0.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
      [1.0, 1.0, 1.0],
    )
    .unwrap();
    assert_all_close(x, [1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0]);
  }

  #[test]
  fn test_solve_singular() {
    assert_eq!(
      solve([[1.0, 2.0], [2.0, 4.0]], [1.0, 1.0]),
      Err(Error::DegenerateHyperplane { column: 1 })
    );
    assert_eq!(
      solve([[0.0, 0.0], [0.0, 1.0]], [1.0, 1.0]),
      Err(Error::DegenerateHyperplane { column: 0 })
    );
  }

  #[test]
  fn test_intercepts() {
    let scores = [[1.0, 2.0], [2.0, 1.0]];
    let extremes = extreme_points(&scores, &[0, 1]);
    assert_all_close(intercepts(&scores, &[0, 1], &extremes).unwrap(), [
      3.0, 3.0,
    ]);
  }

  #[test]
  fn test_intercepts_with_duplicates() {
    let scores = [[1.0, 4.0], [4.0, 1.0], [1.0, 4.0]];
    let extremes = extreme_points(&scores, &[0, 1, 2]);
    assert_eq!(
      intercepts(&scores, &[0, 1, 2], &extremes).unwrap(),
      [1.0, 1.0]
    );
  }

  #[test]
  fn test_intercepts_degenerate() {
    // extremes are linearly dependent
    let scores = [[1.0, 1.0, 0.0], [2.0, 2.0, 0.0], [0.0, 0.0, 1.0]];
    let extremes = [0, 1, 2];
    assert_eq!(
      intercepts(&scores, &[0, 1, 2], &extremes),
      Err(Error::DegenerateHyperplane { column: 1 })
    );
  }

  #[test]
  fn test_normalize() {
    let normalized = normalize(&[2.0, 3.0], &[4.0, 1.0], &[-2.0, -5.0]);
    assert_all_close(normalized, [2.0 / 6.0, 3.0 / 6.0]);
    let normalized = normalize(&[2.0, 3.0], &[1.0, 1.0], &[1.0, 0.0]);
    assert_eq!(normalized[0], 2.0 / NORMALIZATION_EPSILON);
  }
}
