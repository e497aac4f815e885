//! Parent selection of the first NSGA: Pareto fronts turned into a shared
//! dummy fitness, and parents drawn by stochastic remainder selection.

use std::{marker::PhantomData, ops::Range};

use tracing::{debug, trace};
use typed_builder::TypedBuilder;

use super::Selection;
use crate::{
  error::Result,
  individual::{Individual, Population},
  random::RandomSource,
  report::Report,
  score::{Score, Scores},
};

/// Share of the population size separating the dummy fitness of two
/// consecutive fronts.
const FITNESS_STEP: f64 = 0.1;

/// Members closer than this share a niche completely.
const SAME_NICHE: f64 = 1e-6;

/// Non-dominated sorting with fitness sharing, as in the first NSGA.
///
/// **Larger objective values are better here**, unlike in
/// [`RankingSelection`](super::RankingSelection). A member joins the next
/// front when no other unranked member is larger in every objective.
///
/// Members of the first front get a dummy fitness equal to the population
/// size, members of each later front slightly less than the lowest fitness
/// of the front before. Within a front, fitness is divided by a niche count
/// so that members close to each other in decision space share it. Genes
/// are turned into decision variables by `decode`, and distances along each
/// variable are scaled by the width of its range in `bounds`.
///
/// Parents are drawn without replacement from a pool filled by stochastic
/// remainder selection on that fitness. The pool is refilled when it runs
/// out. Populations are never modified.
///
/// # Examples
/// ```
/// use moea::{
///   integer::{Bound, IntegerIndividual},
///   random::Xorshift,
///   selection::{Selection, SharingSelection},
/// };
///
/// let bounds = vec![Bound::new(0, 10)];
/// let mut population: Vec<_> = (0..4)
///   .map(|x| IntegerIndividual::new(vec![x], bounds.clone()))
///   .collect();
/// let mut scores: Vec<_> = (0..4).map(|x| [x as f64]).collect();
///
/// let mut selection = SharingSelection::<IntegerIndividual, _, 1>::builder()
///   .decode(|gene: i64| gene as f64)
///   .bounds(vec![0.0..10.0])
///   .build();
/// let mut rng = Xorshift::default();
/// selection.initialize(&population);
/// selection
///   .on_generation(&mut population, &mut scores, &mut rng)
///   .unwrap();
/// assert_eq!(selection.rank(), &[4, 3, 2, 1]);
/// assert!(selection.select(&scores, &mut rng) < 4);
/// ```
#[derive(TypedBuilder, Clone, Debug)]
pub struct SharingSelection<I, F, const N: usize> {
  /// Turns a gene into a decision variable.
  decode: F,
  /// Range of each decision variable. Distances aren't scaled if empty.
  #[builder(default, setter(into))]
  bounds: Vec<Range<f64>>,
  /// Distance beyond which members don't share fitness.
  #[builder(default = 0.1)]
  niche_radius: f64,
  #[builder(setter(skip), default)]
  rank: Vec<usize>,
  #[builder(setter(skip), default)]
  fitness: Vec<f64>,
  #[builder(setter(skip), default)]
  fraction: Vec<f64>,
  #[builder(setter(skip), default)]
  choices: Vec<usize>,
  #[builder(setter(skip), default)]
  members: Vec<usize>,
  #[builder(setter(skip), default)]
  variables: Vec<f64>,
  #[builder(setter(skip), default)]
  genes: usize,
  #[builder(setter(skip), default)]
  individual: PhantomData<I>,
}

/// Returns `true` if `a` is larger than `b` in every objective.
fn beats(a: &[Score], b: &[Score]) -> bool {
  !a.is_empty() && a.iter().zip(b).all(|(a, b)| a > b)
}

impl<I, F, const N: usize> SharingSelection<I, F, N>
where
  I: Individual,
  F: Fn(I::Value) -> f64,
{
  /// Returns the front of each slot of the current population, starting
  /// with `1`.
  pub fn rank(&self) -> &[usize] {
    &self.rank
  }

  /// Returns the shared dummy fitness of each slot of the current
  /// population.
  pub fn fitness(&self) -> &[f64] {
    &self.fitness
  }

  /// Returns the distance beyond which members don't share fitness.
  pub fn niche_radius(&self) -> f64 {
    self.niche_radius
  }

  fn decode_variables<P>(&mut self, population: &P)
  where
    P: Population<Individual = I>,
  {
    self.genes = population.individual(0).len();
    if !self.bounds.is_empty() {
      assert_eq!(
        self.bounds.len(),
        self.genes,
        "each decision variable must have its own bounds"
      );
    }
    self.variables.clear();
    for i in 0..population.len() {
      let individual = population.individual(i);
      self.variables.extend(
        (0..self.genes).map(|g| (self.decode)(individual.value(g))),
      );
    }
  }

  /// Scaled euclidean distance between slots `a` and `b` in decision space.
  fn distance(&self, a: usize, b: usize) -> f64 {
    let x = &self.variables[a * self.genes..(a + 1) * self.genes];
    let y = &self.variables[b * self.genes..(b + 1) * self.genes];
    x.iter()
      .zip(y)
      .enumerate()
      .map(|(g, (x, y))| {
        let width = self.bounds.get(g).map_or(1.0, |r| r.end - r.start);
        ((x - y) / width).powi(2)
      })
      .sum::<f64>()
      .sqrt()
  }

  /// Peels fronts off the population and gives each member its shared
  /// dummy fitness.
  fn assign_fitness(&mut self, scores: &[Scores<N>]) {
    let n = scores.len();
    let step = FITNESS_STEP * n as f64;
    self.rank.fill(0);
    self.fitness.fill(0.0);
    let mut ranked = 0;
    let mut rank = 1;
    let mut lowest = n as f64;
    while ranked < n {
      self.members.clear();
      for i in 0..n {
        if self.rank[i] != 0 {
          continue;
        }
        let beaten = (0..n).any(|j| {
          j != i && self.rank[j] == 0 && beats(&scores[j], &scores[i])
        });
        if !beaten {
          self.members.push(i);
        }
      }

      let dummy = if rank == 1 {
        n as f64
      } else {
        if lowest <= step {
          // lift ranked members so the new front still gets some fitness
          let lift = 2.0 * step - lowest;
          for (fitness, &r) in self.fitness.iter_mut().zip(&self.rank) {
            if r != 0 {
              *fitness += lift;
            }
          }
          lowest += lift;
        }
        lowest - step
      };
      for &i in &self.members {
        self.rank[i] = rank;
        self.fitness[i] = dummy;
      }
      self.share();
      lowest = self
        .members
        .iter()
        .map(|&i| self.fitness[i])
        .fold(f64::INFINITY, f64::min);
      trace!(rank, size = self.members.len(), dummy, "front shared");

      ranked += self.members.len();
      rank += 1;
    }
  }

  /// Divides the fitness of each member of the current front by its niche
  /// count.
  fn share(&mut self) {
    for k in 0..self.members.len() {
      let i = self.members[k];
      let niche_count = 1.0
        + self
          .members
          .iter()
          .filter(|&&j| j != i)
          .map(|&j| {
            let d = self.distance(i, j);
            if d <= SAME_NICHE {
              1.0
            } else if d < self.niche_radius {
              (1.0 - d / self.niche_radius).powi(2)
            } else {
              0.0
            }
          })
          .sum::<f64>();
      self.fitness[i] /= niche_count;
    }
  }

  /// Fills the pool of parents by stochastic remainder selection: each slot
  /// gets the integer part of its expected number of copies, and the rest
  /// of the pool is drawn by coin flips on the fractional parts.
  fn preselect<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
    let n = self.fitness.len();
    let average = self.fitness.iter().sum::<f64>() / n as f64;
    self.choices.clear();
    if average == 0.0 || !average.is_finite() {
      self.choices.extend(0..n);
      return;
    }

    for (i, &fitness) in self.fitness.iter().enumerate() {
      let expected = fitness / average;
      let copies = expected.floor();
      self.fraction[i] = expected - copies;
      self
        .choices
        .extend(std::iter::repeat(i).take(copies as usize));
    }
    self.choices.truncate(n);
    while self.choices.len() < n {
      if !self.fraction.iter().any(|&f| f > 0.0) {
        // rounding left slots no fraction accounts for
        self.choices.extend(0..n - self.choices.len());
        break;
      }
      for i in 0..n {
        if self.choices.len() == n {
          break;
        }
        if self.fraction[i] > 0.0 && rng.flip(self.fraction[i]) {
          self.choices.push(i);
          self.fraction[i] -= 1.0;
        }
      }
    }
  }
}

impl<I, F, const N: usize> Selection<I, N> for SharingSelection<I, F, N>
where
  I: Individual,
  F: Fn(I::Value) -> f64,
{
  /// Preallocates every buffer for populations of the size of `population`.
  ///
  /// # Panics
  ///
  /// Panics if `population` is empty.
  fn initialize<P: Population<Individual = I>>(&mut self, population: &P) {
    let n = population.len();
    assert!(n > 0, "initial population cannot be empty");
    self.rank = vec![0; n];
    self.fitness = vec![0.0; n];
    self.fraction = vec![0.0; n];
    self.choices = Vec::with_capacity(n);
    self.members = Vec::with_capacity(n);
    self.genes = population.individual(0).len();
    self.variables = Vec::with_capacity(n * self.genes);
  }

  /// Ranks the population, shares fitness within fronts and refills the
  /// pool of parents.
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
    let n = self.rank.len();
    assert!(n > 0, "selection must be initialized before use");
    assert_eq!(
      population.len(),
      n,
      "population size cannot change between generations"
    );
    assert_eq!(scores.len(), n, "each individual must have its scores");

    debug!(size = n, "sharing fitness");
    self.decode_variables(population);
    self.assign_fitness(scores);
    self.preselect(rng);
    Ok(())
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
    self.on_generation(population, scores, rng)?;
    Ok(Report::collect(
      population,
      scores,
      Some(self.rank.as_slice()),
      None,
    ))
  }

  /// Takes a random parent out of the pool, all but its last entry being
  /// candidates.
  fn select<R: RandomSource + ?Sized>(
    &mut self,
    _: &[Scores<N>],
    rng: &mut R,
  ) -> usize {
    assert!(
      !self.fitness.is_empty(),
      "selection must be initialized before use"
    );
    if self.choices.is_empty() {
      self.preselect(rng);
    }
    let pick =
      (rng.float64() * self.choices.len().saturating_sub(1) as f64) as usize;
    self.choices.swap_remove(pick)
  }
}
