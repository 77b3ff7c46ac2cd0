use thiserror::Error;

/// Failures surfaced by field operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The zero element has no multiplicative inverse.
    #[error("inverse of zero is undefined")]
    UndefinedInverse,
}
