// Pollard λ ("kangaroo") solvers for the elliptic curve discrete logarithm
// problem restricted to an interval.

mod error;
mod lambda;
mod parallel;

pub use error::SolveError;
pub use lambda::pollard_lambda;
pub use parallel::pollard_lambda_parallel;
