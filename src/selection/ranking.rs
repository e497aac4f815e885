//! Elitist environmental selection by Pareto rank, the core of NSGA-II and
//! NSGA-III.

use std::cmp::Ordering;

use tracing::{debug, trace};
use typed_builder::TypedBuilder;

use super::Selection;
use crate::{
  crowding::CrowdingDistance,
  dominance::compare,
  error::Result,
  individual::{overwrite, Individual, Population},
  random::RandomSource,
  report::Report,
  score::{Scores, Violation},
  sorting::NondominatedSorter,
  truncation::{CrowdingTruncation, ReferencePointNiching, Truncation},
};

/// NSGA-II: ranking selection truncating the last front by crowding
/// distance.
pub type Nsga2Selection<I, const N: usize> =
  RankingSelection<I, CrowdingTruncation, N>;

/// NSGA-III: ranking selection truncating the last front by reference point
/// niching.
pub type Nsga3Selection<I, const N: usize> =
  RankingSelection<I, ReferencePointNiching<N>, N>;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
enum Phase {
  /// No generation has been recorded yet.
  #[default]
  Cold,
  /// The previous generation sits in the first half of the mixed pool.
  Warm,
}

/// Environmental selection that merges every new population with the
/// previous one and keeps the best ranked half.
///
/// The first call only ranks the population it is given. Every later call
/// merges the previous generation (recorded by the selection itself) with
/// the new one into a pool of `2N` individuals, peels non-dominated fronts
/// off it and copies whole fronts into the population as long as they fit.
/// The front that doesn't fit is cut down by the `truncation` policy.
///
/// Rank and crowding distance of every slot stay available after each call,
/// and drive the binary tournament of [`select`](Selection::select).
///
/// # Examples
/// ```
/// use moea::{
///   integer::{random_population, Bound},
///   random::Xorshift,
///   selection::{Nsga2Selection, Selection},
/// };
///
/// let mut rng = Xorshift::default();
/// let bounds = [Bound::new(0, 10), Bound::new(0, 10)];
/// let mut population = random_population(4, &bounds, &mut rng);
/// let evaluate = |p: &[moea::integer::IntegerIndividual]| {
///   p.iter()
///     .map(|i| [i.genes()[0] as f64, i.genes()[1] as f64])
///     .collect::<Vec<_>>()
/// };
///
/// let mut selection = Nsga2Selection::nsga2();
/// selection.initialize(&population);
/// let mut scores = evaluate(&population);
/// selection
///   .on_generation(&mut population, &mut scores, &mut rng)
///   .unwrap();
/// assert!(selection.rank().iter().all(|&r| r >= 1));
/// ```
#[derive(TypedBuilder, Clone, Debug)]
pub struct RankingSelection<I, T, const N: usize> {
  /// Policy cutting down the front that overflows the next generation.
  truncation: T,
  #[builder(setter(skip), default)]
  phase: Phase,
  #[builder(setter(skip), default)]
  rank: Vec<usize>,
  #[builder(setter(skip), default)]
  crowding_distance: Vec<f64>,
  #[builder(setter(skip), default)]
  violations: Vec<Violation>,
  #[builder(setter(skip), default)]
  pending_violations: Vec<Violation>,
  #[builder(setter(skip), default)]
  mixed: Vec<I>,
  #[builder(setter(skip), default)]
  mixed_scores: Vec<Scores<N>>,
  #[builder(setter(skip), default)]
  mixed_violations: Vec<Violation>,
  #[builder(setter(skip), default)]
  mixed_distance: Vec<f64>,
  #[builder(setter(skip), default)]
  sorter: NondominatedSorter,
  #[builder(setter(skip), default)]
  crowding: CrowdingDistance,
  #[builder(setter(skip), default)]
  survivors: Vec<usize>,
  #[builder(setter(skip), default)]
  survivor_rank: Vec<usize>,
}

impl<I: Individual, const N: usize>
  RankingSelection<I, CrowdingTruncation, N>
{
  /// Creates an NSGA-II selection.
  pub fn nsga2() -> Self {
    Self::builder().truncation(CrowdingTruncation::default()).build()
  }
}

impl<I: Individual, const N: usize>
  RankingSelection<I, ReferencePointNiching<N>, N>
{
  /// Creates an NSGA-III selection with reference points splitting each
  /// objective axis into `divisions` parts.
  pub fn nsga3(divisions: usize) -> Self {
    Self::builder()
      .truncation(ReferencePointNiching::builder().divisions(divisions).build())
      .build()
  }
}

impl<I, T, const N: usize> RankingSelection<I, T, N>
where
  I: Individual,
  T: Truncation<N>,
{
  /// Returns the truncation policy.
  pub fn truncation(&self) -> &T {
    &self.truncation
  }

  /// Returns the Pareto rank of each slot of the current population,
  /// starting with `1`.
  pub fn rank(&self) -> &[usize] {
    &self.rank
  }

  /// Returns the crowding distance of each slot of the current population,
  /// computed within the slot's front.
  pub fn crowding_distance(&self) -> &[f64] {
    &self.crowding_distance
  }

  /// Returns the constraint violation of each slot of the current
  /// population.
  pub fn violations(&self) -> &[Violation] {
    &self.violations
  }

  /// Records constraint violations of the population that the next
  /// generation call will receive, one value per slot. Zero marks a feasible
  /// individual, negative values mark infeasible ones.
  ///
  /// Violations are forgotten after that call. Individuals no violation was
  /// recorded for are feasible.
  ///
  /// # Panics
  ///
  /// Panics if the number of violations differs from the population size.
  pub fn constrain(&mut self, violations: &[Violation]) {
    assert_eq!(
      violations.len(),
      self.pending_violations.len(),
      "each individual must have exactly one violation value"
    );
    self.pending_violations.copy_from_slice(violations);
  }

  fn size(&self) -> usize {
    self.rank.len()
  }

  fn generation<P, R>(
    &mut self,
    population: &mut P,
    scores: &mut [Scores<N>],
    rng: &mut R,
  ) -> Result<()>
  where
    P: Population<Individual = I>,
    R: RandomSource + ?Sized,
  {
    let n = self.size();
    assert!(n > 0, "selection must be initialized before use");
    assert_eq!(
      population.len(),
      n,
      "population size cannot change between generations"
    );
    assert_eq!(scores.len(), n, "each individual must have its scores");

    match self.phase {
      Phase::Cold => {
        debug!(size = n, "ranking initial generation");
        self.violations.copy_from_slice(&self.pending_violations);
        self.pending_violations.fill(0.0);
        self.assign_rank_and_crowding_distance(scores);
        self.phase = Phase::Warm;
      }
      Phase::Warm => {
        debug!(size = n, "selecting next generation");
        self.merge(population, scores);
        self.pending_violations.fill(0.0);
        // the current generation stays untouched until truncation succeeds
        self.fill_nondominated_sort(rng)?;
        for (slot, &index) in self.survivors.iter().enumerate() {
          overwrite(population, slot, &self.mixed[index]);
          scores[slot] = self.mixed_scores[index];
          self.violations[slot] = self.mixed_violations[index];
          self.crowding_distance[slot] = self.mixed_distance[index];
        }
        self.rank.copy_from_slice(&self.survivor_rank);
      }
    }
    self.record(population, scores);
    Ok(())
  }

  /// Ranks the population in place, without any truncation.
  fn assign_rank_and_crowding_distance(&mut self, scores: &[Scores<N>]) {
    self.sorter.reset(scores.len());
    let mut rank = 1;
    while self.sorter.unranked() > 0 {
      let front = self.sorter.next_front(scores, &self.violations);
      trace!(rank, size = front.len(), "front peeled");
      for &slot in front {
        self.rank[slot] = rank;
      }
      self.crowding.assign(scores, front, &mut self.crowding_distance);
      rank += 1;
    }
  }

  /// Fills the second half of the mixed pool with the new population.
  fn merge<P: Population<Individual = I>>(
    &mut self,
    population: &P,
    scores: &[Scores<N>],
  ) {
    let n = self.size();
    for i in 0..n {
      overwrite(&mut self.mixed, n + i, population.individual(i));
    }
    self.mixed_scores[n..].copy_from_slice(scores);
    self.mixed_violations[n..].copy_from_slice(&self.pending_violations);
  }

  /// Collects the mixed pool indices of the next generation into
  /// `survivors` and their ranks into `survivor_rank`.
  fn fill_nondominated_sort<R: RandomSource + ?Sized>(
    &mut self,
    rng: &mut R,
  ) -> Result<()> {
    let n = self.size();
    self.sorter.reset(self.mixed.len());
    self.survivors.clear();
    self.survivor_rank.clear();
    let mut rank = 1;
    while self.survivors.len() < n {
      let front = self
        .sorter
        .next_front(&self.mixed_scores, &self.mixed_violations);
      trace!(rank, size = front.len(), "front peeled");
      self
        .crowding
        .assign(&self.mixed_scores, front, &mut self.mixed_distance);

      let start = self.survivors.len();
      if start + front.len() <= n {
        self.survivors.extend_from_slice(front);
      } else {
        debug!(
          fronts = rank,
          size = front.len(),
          remaining = n - start,
          "truncating last front"
        );
        self.truncation.truncate(
          front,
          n - start,
          &self.mixed_scores,
          &self.mixed_distance,
          &mut self.survivors,
          rng,
        )?;
      }
      self.survivor_rank.resize(self.survivors.len(), rank);
      rank += 1;
    }
    Ok(())
  }

  /// Copies the population into the first half of the mixed pool, where
  /// the next call expects the previous generation.
  fn record<P: Population<Individual = I>>(
    &mut self,
    population: &P,
    scores: &[Scores<N>],
  ) {
    let n = self.size();
    for i in 0..n {
      overwrite(&mut self.mixed, i, population.individual(i));
    }
    self.mixed_scores[..n].copy_from_slice(scores);
    self.mixed_violations[..n].copy_from_slice(&self.violations);
  }

  /// Binary tournament between two random slots.
  fn tournament<R: RandomSource + ?Sized>(
    &self,
    scores: &[Scores<N>],
    rng: &mut R,
  ) -> usize {
    let draw = |rng: &mut R| {
      (rng.float64() * scores.len().saturating_sub(1) as f64) as usize
    };
    let a = draw(rng);
    let b = draw(rng);
    let ord = compare(scores, &self.violations, a, b)
      .then_with(|| self.rank[a].cmp(&self.rank[b]))
      .then_with(|| {
        self.crowding_distance[b]
          .partial_cmp(&self.crowding_distance[a])
          .unwrap_or(Ordering::Equal)
      });
    match ord {
      Ordering::Less => a,
      Ordering::Greater => b,
      Ordering::Equal if rng.fair_flip() => a,
      Ordering::Equal => b,
    }
  }
}

impl<I, T, const N: usize> Selection<I, N> for RankingSelection<I, T, N>
where
  I: Individual,
  T: Truncation<N>,
{
  /// Preallocates every buffer for populations of the size of `population`.
  ///
  /// # Panics
  ///
  /// Panics if `population` is empty.
  fn initialize<P: Population<Individual = I>>(&mut self, population: &P) {
    let n = population.len();
    assert!(n > 0, "initial population cannot be empty");
    self.phase = Phase::Cold;
    self.rank = vec![0; n];
    self.crowding_distance = vec![0.0; n];
    self.violations = vec![0.0; n];
    self.pending_violations = vec![0.0; n];
    self.mixed = (0..2 * n)
      .map(|i| population.individual(i % n).clone())
      .collect();
    self.mixed_scores = vec![[0.0; N]; 2 * n];
    self.mixed_violations = vec![0.0; 2 * n];
    self.mixed_distance = vec![0.0; 2 * n];
    self.sorter = NondominatedSorter::with_capacity(2 * n);
    self.crowding = CrowdingDistance::with_capacity(2 * n);
    self.survivors = Vec::with_capacity(n);
    self.survivor_rank = Vec::with_capacity(n);
    self.truncation.initialize(n);
  }

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
    self.generation(population, scores, rng)
  }

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
    self.generation(population, scores, rng)?;
    Ok(Report::collect(
      population,
      scores,
      Some(self.rank.as_slice()),
      Some(self.crowding_distance.as_slice()),
    ))
  }

  /// Picks the better of two random slots: the one that dominates, then the
  /// one with the lower rank, then the one with the larger crowding
  /// distance. A fair coin decides between equals.
  ///
  /// Like the classic implementation, slots are drawn from all but the last
  /// one.
  fn select<R: RandomSource + ?Sized>(
    &mut self,
    scores: &[Scores<N>],
    rng: &mut R,
  ) -> usize {
    self.tournament(scores, rng)
  }
}
