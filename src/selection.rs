//! Environmental selection hooks and parent selection.

pub mod ranking;
pub mod sharing;

pub use ranking::{Nsga2Selection, Nsga3Selection, RankingSelection};
pub use sharing::SharingSelection;

use crate::{
  error::Result,
  individual::{Individual, Population},
  random::RandomSource,
  report::Report,
  score::Scores,
};

/// The capability an evolutionary loop hands each generation over to.
///
/// The loop calls [`initialize`](Selection::initialize) once with the
/// initial population, then [`on_generation`](Selection::on_generation) every
/// time it has produced and evaluated a new population, picking parents for
/// the next one with [`select`](Selection::select) in between. Once the run
/// is over, it calls [`finalize`](Selection::finalize).
///
/// Every hook except `initialize` and `select` has a default implementation
/// that does nothing beyond what its description requires, so a plain
/// parent selection strategy only has to implement those two.
pub trait Selection<I: Individual, const N: usize> {
  /// Prepares the selection for populations shaped like `population`.
  fn initialize<P: Population<Individual = I>>(&mut self, population: &P);

  /// Replaces `population` and its `scores` in place with the individuals
  /// that survive into the next generation.
  ///
  /// Does nothing by default.
  fn on_generation<P, R>(
    &mut self,
    population: &mut P,
    scores: &mut [Scores<N>],
    rng: &mut R,
  ) -> Result<()>
  where
    P: Population<Individual = I>,
    R: RandomSource + ?Sized,
  {
    let _ = (population, scores, rng);
    Ok(())
  }

  /// Runs the last generation and reports the final population.
  ///
  /// By default, reports `population` as is, without ranks or crowding
  /// distances.
  fn finalize<P, R>(
    &mut self,
    population: &mut P,
    scores: &mut [Scores<N>],
    rng: &mut R,
  ) -> Result<Report<I, N>>
  where
    P: Population<Individual = I>,
    R: RandomSource + ?Sized,
  {
    self.on_generation(population, scores, rng)?;
    Ok(Report::collect(population, scores, None, None))
  }

  /// Returns the slot of an individual picked as a parent.
  ///
  /// Strategies drawing parents without replacement consume their pool
  /// here.
  fn select<R: RandomSource + ?Sized>(
    &mut self,
    scores: &[Scores<N>],
    rng: &mut R,
  ) -> usize;
}
