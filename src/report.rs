//! Result record produced once a run is over.

use std::cmp::Ordering;

use crate::{
  dominance::ParetoDominance,
  individual::{Individual, Population},
  score::{Score, Scores},
};

/// Everything known about a single individual of the final population.
#[derive(Clone, PartialEq, Debug)]
pub struct IndividualReport<V, const N: usize> {
  /// Objective values, lower is better.
  pub objectives: Scores<N>,
  /// Genes of the individual.
  pub values: Vec<V>,
  /// Pareto rank, starting with `1`. `None` if the selection doesn't rank.
  pub rank: Option<usize>,
  /// Crowding distance within the individual's front. `None` if the
  /// selection doesn't compute it.
  pub crowding_distance: Option<f64>,
}

/// Final population of a run, along with its best individual by the first
/// objective.
#[derive(Clone, Debug)]
pub struct Report<I: Individual, const N: usize> {
  /// One entry per individual, in population order.
  pub individuals: Vec<IndividualReport<I::Value, N>>,
  /// Lowest value of the first objective. Infinite if nobody had one.
  pub best_objective: Score,
  /// Copy of the individual reaching `best_objective`.
  pub best_individual: Option<I>,
  /// Slot of `best_individual` in the final population.
  pub best_index: Option<usize>,
}

impl<I: Individual, const N: usize> Report<I, N> {
  /// Builds a report of `population`. `rank` and `crowding_distance`, if
  /// given, are indexed by population slot.
  ///
  /// # Panics
  ///
  /// Panics if `scores`, `rank` or `crowding_distance` are shorter than the
  /// population.
  pub fn collect<P: Population<Individual = I>>(
    population: &P,
    scores: &[Scores<N>],
    rank: Option<&[usize]>,
    crowding_distance: Option<&[f64]>,
  ) -> Self {
    let mut report = Self {
      individuals: Vec::with_capacity(population.len()),
      best_objective: Score::INFINITY,
      best_individual: None,
      best_index: None,
    };
    for i in 0..population.len() {
      let individual = population.individual(i);
      report.individuals.push(IndividualReport {
        objectives: scores[i],
        values: (0..individual.len()).map(|j| individual.value(j)).collect(),
        rank: rank.map(|r| r[i]),
        crowding_distance: crowding_distance.map(|d| d[i]),
      });
      if let Some(&first) = scores[i].first() {
        if first < report.best_objective {
          report.best_objective = first;
          report.best_individual = Some(individual.clone());
          report.best_index = Some(i);
        }
      }
    }
    report
  }

  /// Returns the entries no other entry dominates, in report order.
  pub fn pareto_frontier(&self) -> Vec<&IndividualReport<I::Value, N>> {
    self
      .individuals
      .iter()
      .filter(|a| {
        !self.individuals.iter().any(|b| {
          b.objectives.dominance(&a.objectives) == Ordering::Less
        })
      })
      .collect()
  }
}
