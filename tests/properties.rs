use std::cmp::Ordering;

use moea::{
  crowding::CrowdingDistance,
  dominance::{compare, ParetoDominance},
  integer::{Bound, IntegerIndividual},
  random::Xorshift,
  selection::{Nsga2Selection, Selection},
  sorting::sort,
};
use proptest::prelude::*;

/// Small integer grids produce plenty of ties and duplicates.
fn grid_scores() -> impl Strategy<Value = Vec<[f64; 2]>> {
  prop::collection::vec(prop::array::uniform2(0u8..5), 1..40).prop_map(|v| {
    v.into_iter()
      .map(|[a, b]| [f64::from(a), f64::from(b)])
      .collect()
  })
}

proptest! {
  #[test]
  fn dominance_is_antisymmetric(
    a in prop::array::uniform3(-10.0f64..10.0),
    b in prop::array::uniform3(-10.0f64..10.0),
  ) {
    prop_assert_eq!(a.dominance(&b), b.dominance(&a).reverse());
    prop_assert_eq!(a.dominance(&a), Ordering::Equal);
  }

  #[test]
  fn violations_decide_before_objectives(
    a in prop::array::uniform2(-10.0f64..10.0),
    b in prop::array::uniform2(-10.0f64..10.0),
    va in -5.0f64..0.0,
  ) {
    let scores = [a, b];
    prop_assert_eq!(compare(&scores, &[va, 0.0], 0, 1), Ordering::Greater);
    prop_assert_eq!(compare(&scores, &[0.0, va], 0, 1), Ordering::Less);
  }

  #[test]
  fn fronts_partition_the_pool(scores in grid_scores()) {
    let violations = vec![0.0; scores.len()];
    let fronts = sort(&scores, &violations);

    let mut seen = vec![false; scores.len()];
    for &i in fronts.iter().flatten() {
      prop_assert!(!seen[i], "{} ranked twice", i);
      seen[i] = true;
    }
    prop_assert!(seen.iter().all(|&s| s));

    for (k, front) in fronts.iter().enumerate() {
      prop_assert!(!front.is_empty());
      for &a in front {
        for &b in front {
          prop_assert_ne!(scores[a].dominance(&scores[b]), Ordering::Less);
        }
        if k > 0 {
          prop_assert!(fronts[k - 1]
            .iter()
            .any(|&p| scores[p].dominance(&scores[a]) == Ordering::Less));
        }
      }
    }
  }

  #[test]
  fn crowding_marks_boundaries(scores in grid_scores()) {
    let front: Vec<usize> = (0..scores.len()).collect();
    let mut distances = vec![-1.0; scores.len()];
    CrowdingDistance::with_capacity(front.len())
      .assign(&scores, &front, &mut distances);

    prop_assert!(distances.iter().all(|&d| d >= 0.0));
    let boundaries = distances.iter().filter(|d| d.is_infinite()).count();
    prop_assert!(boundaries >= 1);
    if front.len() <= 2 {
      prop_assert_eq!(boundaries, front.len());
    }
    // no more than two boundaries per objective
    prop_assert!(boundaries <= 4);
  }

  #[test]
  fn selection_keeps_population_size(
    previous in grid_scores(),
    seed in any::<u32>(),
  ) {
    let size = previous.len();
    let individual = |id: usize| {
      IntegerIndividual::new(vec![id as i64], vec![Bound::new(0, 100)])
    };
    let mut population: Vec<_> = (0..size).map(individual).collect();
    let mut scores = previous.clone();
    let mut rng = Xorshift::with_seed(seed);
    let mut selection = Nsga2Selection::nsga2();
    selection.initialize(&population);
    selection
      .on_generation(&mut population, &mut scores, &mut rng)
      .unwrap();

    let mut offspring: Vec<_> = (size..2 * size).map(individual).collect();
    let mut offspring_scores: Vec<_> = previous.iter().rev().copied().collect();
    selection
      .on_generation(&mut offspring, &mut offspring_scores, &mut rng)
      .unwrap();

    prop_assert_eq!(offspring.len(), size);
    prop_assert_eq!(selection.rank().len(), size);
    let mut ids: Vec<_> = offspring.iter().map(|i| i.genes()[0]).collect();
    ids.sort_unstable();
    ids.dedup();
    prop_assert_eq!(ids.len(), size);
    prop_assert!(selection.select(&offspring_scores, &mut rng) < size);
  }
}
