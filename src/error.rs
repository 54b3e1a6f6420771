use thiserror::Error;

/// Failures reported while building or evaluating a [Spline](crate::Spline).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// Malformed knots, degree/boundary mismatch or nonsensical query arguments.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Assembled linear system has no unique solution.
    #[error("Singular spline system: {0}")]
    SingularSystem(String),

    /// Query point outside the knot range while extrapolation is rejected.
    #[error("Query point {x} outside spline domain [{min}, {max}]")]
    OutOfDomain {
        /// The rejected query point
        x: f64,
        /// First knot x
        min: f64,
        /// Last knot x
        max: f64,
    },
}

impl SplineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SplineError::InvalidInput(message.into())
    }
}
