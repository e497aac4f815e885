//! Pareto dominance comparison, aware of constraint violations.

use std::cmp::Ordering;

use crate::score::{Score, Scores, Violation};

/// Describes pareto dominance for arrays of `Score`s.
pub trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`. `self` dominates `other` if no
  /// `self` value is greater than the respective `other` value and at least
  /// one of them is strictly less.
  fn dominance(&self, other: &Self) -> Ordering;
}

impl ParetoDominance for [Score] {
  fn dominance(&self, other: &Self) -> Ordering {
    let mut ord = Ordering::Equal;
    for (a, b) in self.iter().zip(other) {
      // incomparable values (NaN) neither help nor hurt
      let Some(next_ord) = a.partial_cmp(b) else {
        continue;
      };
      match (ord, next_ord) {
        (Ordering::Equal, next_ord) => ord = next_ord,
        (Ordering::Greater, Ordering::Less)
        | (Ordering::Less, Ordering::Greater) => return Ordering::Equal,
        _ => {}
      }
    }
    ord
  }
}

/// Compares individuals `a` and `b`, returning `Less` if `a` dominates `b`,
/// `Greater` if `b` dominates `a` and `Equal` if neither does.
///
/// Feasibility is checked before objectives:
/// - if both individuals are infeasible, the less infeasible one dominates;
/// - if exactly one of them is infeasible, the feasible one dominates;
/// - if both are feasible, the strict Pareto rule decides.
///
/// # Panics
///
/// Panics if `a` or `b` is out of bounds of `scores` or `violations`.
pub fn compare<const N: usize>(
  scores: &[Scores<N>],
  violations: &[Violation],
  a: usize,
  b: usize,
) -> Ordering {
  let (va, vb) = (violations[a], violations[b]);
  if va < 0.0 && vb < 0.0 {
    // closer to zero is less infeasible
    vb.partial_cmp(&va).unwrap_or(Ordering::Equal)
  } else if va < 0.0 && vb == 0.0 {
    Ordering::Greater
  } else if va == 0.0 && vb < 0.0 {
    Ordering::Less
  } else {
    scores[a].dominance(&scores[b])
  }
}
