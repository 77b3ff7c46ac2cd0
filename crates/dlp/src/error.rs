use thiserror::Error;

/// Failures surfaced by the discrete logarithm solvers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The search interval `[a, b)` contains no scalar.
    #[error("search interval [a, b) is empty")]
    EmptyInterval,
}
