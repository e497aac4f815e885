//! **MOEA** is the environmental selection and ranking engine of a
//! Multi-Objective Evolutionary Algorithm. Each generation, it takes the
//! population your evolutionary loop has just produced and evaluated, merges
//! it with the previous one and decides which individuals survive, what
//! their Pareto rank is and how crowded their neighbourhood is.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! The crate doesn't run the evolutionary loop for you. Crossover, mutation
//! and evaluation of objectives stay in your hands, because **genetic
//! operators must be tailored to each problem to solve**. What this crate
//! handles is the part that is the same for every problem and is easy to get
//! subtly wrong:
//! - **Dominance** - comparison of two individuals by their objectives and
//!   constraint violations, see [`compare`]
//! - **Non-dominated sorting** - partitioning of a pool of individuals into
//!   Pareto fronts, see [`NondominatedSorter`]
//! - **Crowding distance** - a density estimate within a front, see
//!   [`CrowdingDistance`]
//! - **Truncation** - deciding which members of the front that overflows the
//!   next generation survive. NSGA-II keeps the least crowded ones, NSGA-III
//!   spreads them over a simplex of reference directions. See [`Truncation`]
//! - **Parent selection** - a binary tournament by dominance, rank and
//!   crowding distance
//!
//! All objectives are **minimized**, except by [`SharingSelection`] which
//! follows the first NSGA in maximizing them. Objective vectors are
//! fixed-size arrays of `N` [`Score`]s, so the number of objectives is known
//! at compile time.
//!
//! # Selection
//!
//! Your loop talks to the engine through the [`Selection`] trait:
//! 1. [`initialize`](Selection::initialize) it once with the initial
//!    population, so it can preallocate every buffer it needs
//! 2. hand every evaluated population to
//!    [`on_generation`](Selection::on_generation). The first call just ranks
//!    it, every later call replaces it in place with the survivors of the
//!    previous and the new population combined
//! 3. pick parents for the next population with
//!    [`select`](Selection::select)
//! 4. once the run is over, [`finalize`](Selection::finalize) it to get a
//!    [`Report`] of the final population
//!
//! [`RankingSelection`] is the engine itself. It's configured with a
//! [`Truncation`] policy: [`Nsga2Selection`] uses [`CrowdingTruncation`],
//! [`Nsga3Selection`] uses [`ReferencePointNiching`]. Prefer the latter for
//! three objectives or more. [`SharingSelection`] is the first NSGA: it
//! leaves populations alone and only picks parents, by a fitness shared
//! between neighbours in decision space.
//!
//! Individuals are accessed through the [`Individual`] and [`Population`]
//! traits only. The engine copies them into preallocated slots and never
//! looks at their genes, so any representation will do.
//! [`IntegerIndividual`](integer::IntegerIndividual) is provided for
//! convenience.
//!
//! Randomness is consumed through [`RandomSource`], implemented for every
//! generator of the [rand] crate. [`Xorshift`](random::Xorshift) is a tiny
//! one for cheap reproducible runs.
//!
//! # Example
//!
//! Here's a solution for the textbook *Schaffer's Problem No.1* over
//! integers with NSGA-II. It's oversimplified, but it demonstrates the
//! workflow.
//! ```
//! use moea::{
//!   individual::Individual,
//!   integer::{random_population, Bound, IntegerIndividual},
//!   random::{RandomSource, Xorshift},
//!   selection::{Nsga2Selection, Selection},
//! };
//!
//! // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`
//! let evaluate = |population: &[IntegerIndividual]| {
//!   population
//!     .iter()
//!     .map(|i| {
//!       let x = i.value(0) as f64;
//!       [x.powi(2), (x - 2.0).powi(2)]
//!     })
//!     .collect::<Vec<_>>()
//! };
//! let mut rng = Xorshift::default();
//! // initial individuals lie between -100 and 100
//! let bounds = [Bound::new(-100, 100)];
//! let mut population = random_population(20, &bounds, &mut rng);
//! let mut scores = evaluate(&population);
//!
//! let mut selection = Nsga2Selection::nsga2();
//! selection.initialize(&population);
//! selection
//!   .on_generation(&mut population, &mut scores, &mut rng)
//!   .unwrap();
//!
//! for _ in 0..50 {
//!   // each offspring copies a tournament winner and maybe mutates
//!   let mut offspring = population.clone();
//!   for child in offspring.iter_mut() {
//!     let parent = selection.select(&scores, &mut rng);
//!     child.copy_from(&population[parent], 0, 1);
//!     if rng.flip(0.3) {
//!       child.mutate(&[0], &mut rng);
//!     }
//!   }
//!   let mut offspring_scores = evaluate(&offspring);
//!   selection
//!     .on_generation(&mut offspring, &mut offspring_scores, &mut rng)
//!     .unwrap();
//!   population = offspring;
//!   scores = offspring_scores;
//! }
//!
//! let report = selection
//!   .finalize(&mut population, &mut scores, &mut rng)
//!   .unwrap();
//! assert_eq!(report.individuals.len(), 20);
//! assert!(!report.pareto_frontier().is_empty());
//! ```
//!
//! # Errors and panics
//!
//! The only failure that depends on the data being ranked is a degenerate
//! NSGA-III normalization hyperplane, reported as
//! [`Error::DegenerateHyperplane`]. Misuse of the API, like handing over a
//! population of a different size than the one the engine was initialized
//! with, panics.
//!
//! # Logging
//!
//! The engine emits [tracing] events: one `debug` event per generation and
//! per truncated front, and a `trace` event per peeled front. It never
//! installs a subscriber.
//!
//! [`compare`]: crate::dominance::compare
//! [`NondominatedSorter`]: crate::sorting::NondominatedSorter
//! [`CrowdingDistance`]: crate::crowding::CrowdingDistance
//! [`Truncation`]: crate::truncation::Truncation
//! [`CrowdingTruncation`]: crate::truncation::CrowdingTruncation
//! [`ReferencePointNiching`]: crate::truncation::ReferencePointNiching
//! [`Score`]: crate::score::Score
//! [`Selection`]: crate::selection::Selection
//! [`RankingSelection`]: crate::selection::RankingSelection
//! [`Nsga2Selection`]: crate::selection::Nsga2Selection
//! [`Nsga3Selection`]: crate::selection::Nsga3Selection
//! [`SharingSelection`]: crate::selection::SharingSelection
//! [`Report`]: crate::report::Report
//! [`Individual`]: crate::individual::Individual
//! [`Population`]: crate::individual::Population
//! [`RandomSource`]: crate::random::RandomSource
//! [`Error::DegenerateHyperplane`]: crate::error::Error::DegenerateHyperplane
//! [rand]: https://docs.rs/rand
//! [tracing]: https://docs.rs/tracing

#![warn(missing_docs)]

pub mod crowding;
pub mod dominance;
pub mod error;
pub mod individual;
pub mod integer;
pub mod random;
pub mod report;
pub mod score;
pub mod selection;
pub mod sorting;
pub mod truncation;

pub use error::{Error, Result};
