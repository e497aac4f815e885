//! Crowding distance: a per-front density estimate used to prefer
//! individuals in sparse regions of a front.

use std::cmp::Ordering;

use crate::score::{Scores, INFINITE_DISTANCE};

/// Assigns crowding distances to members of a front.
///
/// Holds a single scratch buffer for sorting a front by one objective, so it
/// never allocates after construction as long as fronts fit its capacity.
#[derive(Clone, Debug, Default)]
pub struct CrowdingDistance {
  order: Vec<usize>,
}

impl CrowdingDistance {
  /// Creates an assigner for fronts of up to `capacity` members.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      order: Vec::with_capacity(capacity),
    }
  }

  /// Computes the crowding distance of every member of `front` and writes it
  /// into `distances`, at the member's own index. Members' indices point into
  /// both `scores` and `distances`; other entries of `distances` are left
  /// untouched.
  ///
  /// Fronts of one or two members get [`INFINITE_DISTANCE`] everywhere.
  /// Otherwise, for each objective, the members with the lowest and the
  /// highest value get [`INFINITE_DISTANCE`], and each member in between
  /// accumulates the normalized gap between its neighbours. If all members
  /// share the same value of an objective, only the first of them is marked
  /// as a boundary and nobody accumulates anything for that objective.
  /// Finite distances are averaged over the number of objectives at the end.
  pub fn assign<const N: usize>(
    &mut self,
    scores: &[Scores<N>],
    front: &[usize],
    distances: &mut [f64],
  ) {
    if front.len() <= 2 {
      for &i in front {
        distances[i] = INFINITE_DISTANCE;
      }
      return;
    }

    for &i in front {
      distances[i] = 0.0;
    }
    for m in 0..N {
      self.order.clear();
      self.order.extend_from_slice(front);
      self.order.sort_by(|&a, &b| {
        scores[a][m]
          .partial_cmp(&scores[b][m])
          .unwrap_or(Ordering::Equal)
      });

      let first = self.order[0];
      let last = self.order[self.order.len() - 1];
      distances[first] = INFINITE_DISTANCE;
      let range = scores[last][m] - scores[first][m];
      if range == 0.0 {
        continue;
      }
      distances[last] = INFINITE_DISTANCE;

      for w in self.order.windows(3) {
        let (prev, i, next) = (w[0], w[1], w[2]);
        if distances[i] != INFINITE_DISTANCE {
          distances[i] += (scores[next][m] - scores[prev][m]) / range;
        }
      }
    }

    if N > 0 {
      for &i in front {
        if distances[i] != INFINITE_DISTANCE {
          distances[i] /= N as f64;
        }
      }
    }
  }
}
