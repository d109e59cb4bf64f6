use thiserror::Error;

use crate::solution::SolutionStatus;

/// Malformed problem input, detected before any pivoting happens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Objective has no coefficients")]
    EmptyObjective,
    #[error("Problem has no constraints")]
    NoConstraints,
    #[error("Constraint {row} has {found} coefficients, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Right-hand side has {found} entries for {expected} constraints")]
    RhsLength { expected: usize, found: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Invalid problem shape: {0}")]
    Shape(#[from] ShapeError),
    /// No row qualified in the ratio test; the objective improves without limit
    /// along `column`.
    #[error("The method is not applicable: column {column} has no leaving row (unbounded)")]
    Unbounded { column: usize },
    #[error("Iteration limit of {iterations} pivots reached")]
    IterationLimit { iterations: usize },
    #[error("Rounding epsilon must be finite and positive, got {epsilon}")]
    InvalidEpsilon { epsilon: f64 },
}

impl SolveError {
    /// Flat status value for callers that report outcomes uniformly
    pub fn status(&self) -> SolutionStatus {
        match self {
            SolveError::Shape(_) => SolutionStatus::ShapeError,
            SolveError::Unbounded { .. } => SolutionStatus::Unbounded,
            SolveError::IterationLimit { .. } => SolutionStatus::IterationLimit,
            SolveError::InvalidEpsilon { .. } => SolutionStatus::InvalidInput,
        }
    }
}
