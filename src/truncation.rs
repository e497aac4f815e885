//! Policies deciding which members of the last, overflowing front make it
//! into the next generation.
//!
//! Whole fronts are copied into the next generation as long as they fit.
//! The first front that doesn't fit is handed over to a [`Truncation`]
//! policy together with the number of slots left. This crate provides two:
//! - [`CrowdingTruncation`] keeps the members with the largest crowding
//!   distance, as NSGA-II does;
//! - [`ReferencePointNiching`] spreads survivors over a simplex of reference
//!   directions, as NSGA-III does. Prefer it for three or more objectives.

pub mod crowding;
pub mod hyperplane;
pub mod niching;
pub mod reference;

pub use crowding::CrowdingTruncation;
pub use niching::ReferencePointNiching;

use crate::{error::Result, random::RandomSource, score::Scores};

/// Decides which members of an overflowing front survive.
pub trait Truncation<const N: usize> {
  /// Prepares the policy for populations of `population_size` individuals.
  /// Called once, before any truncation.
  fn initialize(&mut self, population_size: usize);

  /// Pushes exactly `remaining` distinct members of `front` into
  /// `survivors`, in the order they should take the free slots.
  ///
  /// Indices in `front` point into `scores` and `distances`. `distances`
  /// already holds crowding distances of all `front` members, computed over
  /// that front alone.
  fn truncate<R: RandomSource + ?Sized>(
    &mut self,
    front: &[usize],
    remaining: usize,
    scores: &[Scores<N>],
    distances: &[f64],
    survivors: &mut Vec<usize>,
    rng: &mut R,
  ) -> Result<()>;
}
