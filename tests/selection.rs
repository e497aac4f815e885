use std::{cmp::Ordering, collections::HashMap};

use moea::{
  dominance::ParetoDominance,
  individual::Individual,
  integer::{random_population, Bound, IntegerIndividual},
  random::Xorshift,
  score::Scores,
  selection::{Nsga2Selection, Nsga3Selection, RankingSelection, Selection},
  truncation::Truncation,
  Error,
};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

const SIZE: usize = 24;

/// A population of individuals whose only gene is a unique id.
fn tagged_population(first_id: i64) -> Vec<IntegerIndividual> {
  (first_id..first_id + SIZE as i64)
    .map(|id| IntegerIndividual::new(vec![id], vec![Bound::new(0, i64::MAX)]))
    .collect()
}

fn random_scores<const N: usize>(
  normal: &Normal<f64>,
  rng: &mut StdRng,
) -> Vec<Scores<N>> {
  (0..SIZE)
    .map(|_| std::array::from_fn(|_| normal.sample(rng)))
    .collect()
}

/// Checks what every generation must satisfy, whatever the objectives.
fn check_generation<T: Truncation<N>, const N: usize>(
  selection: &RankingSelection<IntegerIndividual, T, N>,
  population: &[IntegerIndividual],
  scores: &[Scores<N>],
) {
  let rank = selection.rank();
  assert_eq!(population.len(), SIZE);
  assert_eq!(scores.len(), SIZE);
  assert_eq!(rank[0], 1);
  assert!(rank.windows(2).all(|w| w[1] == w[0] || w[1] == w[0] + 1));
  assert!(selection.crowding_distance().iter().all(|&d| d >= 0.0));

  for (i, score) in scores.iter().enumerate() {
    if rank[i] == 1 {
      assert!(
        scores.iter().all(|s| s.dominance(score) != Ordering::Less),
        "slot {i} is in the first front but dominated"
      );
    } else {
      assert!(
        scores.iter().zip(rank).any(|(s, &r)| {
          r == rank[i] - 1 && s.dominance(score) == Ordering::Less
        }),
        "slot {i} of rank {} isn't dominated by the previous front",
        rank[i]
      );
    }
  }
}

#[test]
fn test_nsga2_run() {
  let mut rng = StdRng::seed_from_u64(42);
  let normal = Normal::new(0.0, 1.0).unwrap();
  let mut selection = Nsga2Selection::<_, 2>::nsga2();

  let mut population = tagged_population(0);
  let mut scores = random_scores(&normal, &mut rng);
  let mut known: HashMap<i64, Scores<2>> = HashMap::new();
  for (individual, score) in population.iter().zip(&scores) {
    known.insert(individual.value(0), *score);
  }
  selection.initialize(&population);
  selection
    .on_generation(&mut population, &mut scores, &mut rng)
    .unwrap();
  check_generation(&selection, &population, &scores);

  let mut best = scores.iter().map(|s| s[0]).fold(f64::INFINITY, f64::min);
  for generation in 1..30 {
    let mut offspring = tagged_population(generation * SIZE as i64);
    let mut offspring_scores = random_scores(&normal, &mut rng);
    for (individual, score) in offspring.iter().zip(&offspring_scores) {
      known.insert(individual.value(0), *score);
    }
    selection
      .on_generation(&mut offspring, &mut offspring_scores, &mut rng)
      .unwrap();
    check_generation(&selection, &offspring, &offspring_scores);

    // survivors keep their own scores
    for (individual, score) in offspring.iter().zip(&offspring_scores) {
      assert_eq!(known[&individual.value(0)], *score);
    }
    // boundaries of the first front always survive
    let new_best = offspring_scores
      .iter()
      .map(|s| s[0])
      .fold(f64::INFINITY, f64::min);
    assert!(new_best <= best);
    best = new_best;

    population = offspring;
    scores = offspring_scores;
  }

  let report = selection
    .finalize(&mut population, &mut scores, &mut rng)
    .unwrap();
  assert_eq!(report.individuals.len(), SIZE);
  assert_eq!(report.best_objective, best);
  let frontier = report.pareto_frontier();
  assert!(!frontier.is_empty());
  assert!(frontier.iter().all(|entry| entry.rank == Some(1)));
}

#[test]
fn test_nsga3_run() {
  let mut rng = StdRng::seed_from_u64(7);
  let normal = Normal::new(5.0, 2.0).unwrap();
  let mut selection = Nsga3Selection::<_, 3>::nsga3(5);

  let mut population = tagged_population(0);
  let mut scores = random_scores(&normal, &mut rng);
  selection.initialize(&population);
  selection
    .on_generation(&mut population, &mut scores, &mut rng)
    .unwrap();
  check_generation(&selection, &population, &scores);

  for generation in 1..30 {
    let mut offspring = tagged_population(generation * SIZE as i64);
    let mut offspring_scores = random_scores(&normal, &mut rng);
    match selection.on_generation(
      &mut offspring,
      &mut offspring_scores,
      &mut rng,
    ) {
      Ok(()) => {
        check_generation(&selection, &offspring, &offspring_scores);
        for point in selection.truncation().reference_points() {
          assert_eq!(point.count(), 0);
          assert!(point.associations().is_empty());
        }
      }
      Err(Error::DegenerateHyperplane { .. }) => {}
    }
  }
}

#[test]
fn test_runs_are_reproducible() {
  let run = |seed: u32| {
    let mut rng = Xorshift::with_seed(seed);
    let bounds = [Bound::new(0, 32); 3];
    let evaluate = |population: &[IntegerIndividual]| {
      population
        .iter()
        .map(|i| {
          let g = i.genes();
          [g[0] as f64, g[1] as f64, (64 - g[0] - g[1] + g[2]) as f64]
        })
        .collect::<Vec<_>>()
    };
    let mut selection = Nsga3Selection::nsga3(4);
    let mut population = random_population(SIZE, &bounds, &mut rng);
    let mut scores = evaluate(&population);
    selection.initialize(&population);
    let mut outcomes = vec![];
    for _ in 0..10 {
      outcomes.push(
        selection
          .on_generation(&mut population, &mut scores, &mut rng)
          .is_ok(),
      );
      population = (0..SIZE)
        .map(|_| {
          let mut child = population[selection.select(&scores, &mut rng)]
            .clone();
          child.mutate(&[0, 1, 2], &mut rng);
          child
        })
        .collect();
      scores = evaluate(&population);
    }
    (population, scores, outcomes)
  };

  assert_eq!(run(3), run(3));
}
