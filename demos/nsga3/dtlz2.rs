//! DTLZ2 with three objectives solved using NSGA-III.

use std::{f64::consts::FRAC_PI_2, io::Write, path::Path};

use moea::{
  individual::Individual,
  random::RandomSource,
  selection::{Nsga3Selection, Selection},
};
use rand::prelude::*;
use rand_distr::Normal;
use tracing_subscriber::EnvFilter;

/// Number of decision variables. The first two place an individual on the
/// front, the rest measure how far from it the individual is.
const VARIABLES: usize = 12;

// our individual is a vector of values between 0 and 1
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

  fn mutate<R: RandomSource + ?Sized>(
    &mut self,
    positions: &[usize],
    rng: &mut R,
  ) {
    for &p in positions {
      self.0[p] = rng.float64();
    }
  }
}

/// DTLZ2 with three objectives. Its Pareto front is the positive octant of
/// the unit sphere.
fn dtlz2(p: &Point) -> [f64; 3] {
  let g: f64 = p.0[2..].iter().map(|x| (x - 0.5).powi(2)).sum();
  let (a, b) = (p.0[0] * FRAC_PI_2, p.0[1] * FRAC_PI_2);
  [
    (1.0 + g) * a.cos() * b.cos(),
    (1.0 + g) * a.cos() * b.sin(),
    (1.0 + g) * a.sin(),
  ]
}

fn main() {
  // run with `RUST_LOG=moea=debug` to see what happens each generation
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let mut rng = StdRng::seed_from_u64(2);
  let evaluate = |population: &[Point]| -> Vec<[f64; 3]> {
    population.iter().map(dtlz2).collect()
  };

  let mut population: Vec<Point> = (0..92)
    .map(|_| Point((0..VARIABLES).map(|_| rng.gen()).collect()))
    .collect();
  let mut scores = evaluate(&population);

  // 12 divisions give 91 reference points for 3 objectives
  let mut selection = Nsga3Selection::nsga3(12);
  selection.initialize(&population);
  selection
    .on_generation(&mut population, &mut scores, &mut rng)
    .unwrap();

  // uniform crossover followed by gaussian noise on every gene
  let noise = Normal::new(0.0, 0.02).unwrap();
  for generation in 0..200 {
    let mut offspring = population.clone();
    for child in offspring.iter_mut() {
      let x = &population[selection.select(&scores, &mut rng)];
      let y = &population[selection.select(&scores, &mut rng)];
      for i in 0..VARIABLES {
        let parent = if rng.fair_flip() { x } else { y };
        child.0[i] = (parent.0[i] + noise.sample(&mut rng)).clamp(0.0, 1.0);
      }
      let positions: Vec<usize> =
        (0..VARIABLES).filter(|_| rng.flip(0.01)).collect();
      child.mutate(&positions, &mut rng);
    }
    let mut offspring_scores = evaluate(&offspring);
    match selection.on_generation(
      &mut offspring,
      &mut offspring_scores,
      &mut rng,
    ) {
      Ok(()) => {
        population = offspring;
        scores = offspring_scores;
      }
      // keep the previous population and try again with new offspring
      Err(error) => tracing::warn!(generation, %error, "generation skipped"),
    }
  }

  let report = selection
    .finalize(&mut population, &mut scores, &mut rng)
    .unwrap();
  let frontier = report.pareto_frontier();

  // write the frontier to file in demos/nsga3/dtlz2.csv
  let _ = std::fs::File::create(Path::new(file!()).with_file_name("dtlz2.csv"))
    .unwrap()
    .write_all(
      frontier
        .iter()
        .map(|e| {
          let [f1, f2, f3] = e.objectives;
          format!("{f1} {f2} {f3}")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .as_bytes(),
    );

  // points of the true front lie on the unit sphere
  let radius = |o: &[f64; 3]| o.iter().map(|f| f * f).sum::<f64>().sqrt();
  println!("   f1   |   f2   |   f3   | radius ");
  for entry in frontier.into_iter().choose_multiple(&mut rng, 10) {
    let [f1, f2, f3] = entry.objectives;
    println!(
      "{f1:.4} | {f2:.4} | {f3:.4} | {:.4}",
      radius(&entry.objectives)
    );
  }
  println!("  ...   |  ...   |  ...   |  ...   ");
}
