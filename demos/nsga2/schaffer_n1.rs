//! Schaffer's Problem No.1 solution using NSGA-II.

use std::{io::Write, path::Path};

use moea::{
  individual::Individual,
  random::RandomSource,
  selection::{Nsga2Selection, Selection},
};
use rand::prelude::*;
use rand_distr::Normal;
use tracing_subscriber::EnvFilter;

const LOW: f64 = -10.0;
const HIGH: f64 = 10.0;

// our individual is a single floating point value between `LOW` and `HIGH`
#[derive(Clone, Debug)]
struct Point(Vec<f64>);

impl Individual for Point {
  type Value = f64;

  fn len(&self) -> usize {
    self.0.len()
  }

  fn value(&self, index: usize) -> f64 {
    self.0[index]
  }

  fn copy_from(&mut self, source: &Self, start: usize, end: usize) {
    self.0[start..end].copy_from_slice(&source.0[start..end]);
  }

  // mutated genes are drawn again from the whole range
  fn mutate<R: RandomSource + ?Sized>(
    &mut self,
    positions: &[usize],
    rng: &mut R,
  ) {
    for &p in positions {
      self.0[p] = LOW + (HIGH - LOW) * rng.float64();
    }
  }
}

fn main() {
  // run with `RUST_LOG=moea=debug` to see what happens each generation
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let mut rng = StdRng::seed_from_u64(1);

  // objective functions f1(x) = x^2 and f2(x) = (x - 2)^2
  let f1 = |p: &Point| p.0[0].powi(2);
  let f2 = |p: &Point| (p.0[0] - 2.0).powi(2);
  let evaluate = |population: &[Point]| -> Vec<[f64; 2]> {
    population.iter().map(|p| [f1(p), f2(p)]).collect()
  };

  // initial population of 100 individuals spread over the whole range
  let mut population: Vec<Point> = (0..100)
    .map(|_| Point(vec![rng.gen_range(LOW..HIGH)]))
    .collect();
  let mut scores = evaluate(&population);

  let mut selection = Nsga2Selection::nsga2();
  selection.initialize(&population);
  selection
    .on_generation(&mut population, &mut scores, &mut rng)
    .unwrap();

  // offspring are tournament winners blended with each other and shaken by
  // noise from a normal distribution
  let noise = Normal::new(0.0, 0.1).unwrap();
  for _ in 0..100 {
    let mut offspring = population.clone();
    for child in offspring.iter_mut() {
      let x = &population[selection.select(&scores, &mut rng)];
      let y = &population[selection.select(&scores, &mut rng)];
      let r: f64 = rng.gen_range(-0.5..1.5);
      child.0[0] = (x.0[0] + r * (y.0[0] - x.0[0]) + noise.sample(&mut rng))
        .clamp(LOW, HIGH);
      if rng.flip(0.05) {
        child.mutate(&[0], &mut rng);
      }
    }
    let mut offspring_scores = evaluate(&offspring);
    selection
      .on_generation(&mut offspring, &mut offspring_scores, &mut rng)
      .unwrap();
    population = offspring;
    scores = offspring_scores;
  }

  let report = selection
    .finalize(&mut population, &mut scores, &mut rng)
    .unwrap();
  let frontier = report.pareto_frontier();

  // write the frontier to file in demos/nsga2/schaffer_n1.csv
  let _ =
    std::fs::File::create(Path::new(file!()).with_file_name("schaffer_n1.csv"))
      .unwrap()
      .write_all(
        frontier
          .iter()
          .map(|e| format!("{} {}", e.objectives[0], e.objectives[1]))
          .collect::<Vec<_>>()
          .join("\n")
          .as_bytes(),
      );

  // and print 10 of its individuals
  println!("    x    |   f1    |   f2    ");
  for entry in frontier.into_iter().choose_multiple(&mut rng, 10) {
    let [f1, f2] = entry.objectives;
    println!("{:>8.4} | {f1:>7.4} | {f2:>7.4}", entry.values[0]);
  }
  println!("   ...   |   ...   |   ...   ");
}
