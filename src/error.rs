//! Errors surfaced by the selection engine.

use thiserror::Error;

/// An alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the selection engine that depend on the data being ranked,
/// rather than on misuse of the API.
#[derive(Error, Clone, Copy, PartialEq, Debug)]
pub enum Error {
  /// Extreme points of the last front don't span a hyperplane: elimination
  /// met a zero pivot in `column`, or an intercept came out non-finite.
  #[error("extreme points do not define a hyperplane (column {column})")]
  DegenerateHyperplane {
    /// Objective whose pivot or intercept broke down.
    column: usize,
  },
}
