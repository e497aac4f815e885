//! Objective values and constraint violations, as the engine sees them.

/// An alias for a single objective value.
///
/// Every objective is minimized: the lower the value, the better the
/// individual performs on that objective. If your objective should be
/// maximized, negate it before handing it over.
pub type Score = f64;

/// An alias for an array of `N` values of `Score` type, one per objective.
pub type Scores<const N: usize> = [Score; N];

/// An alias for a constraint violation value.
///
/// `0.0` marks a feasible individual. Negative values mark infeasible ones,
/// and the closer a value is to zero, the less infeasible the individual is.
pub type Violation = f64;

/// Value assigned to boundary individuals of a front by crowding distance.
pub const INFINITE_DISTANCE: f64 = f64::INFINITY;
