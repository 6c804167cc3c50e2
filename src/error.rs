//! This module defines the custom error types for the library.
//!
//! All failure conditions raised by the eigensolvers, polynomial methods and
//! triangular factorizations are centralized in a single enum,
//! [`LinalgErrorKind`], wrapped by the public [`LinalgError`].
//!
//! Failures coming out of the dense linear-algebra provider have their own
//! type, [`ProviderError`]. Algorithms either reclassify them (inverse power
//! iteration reports [`LinalgErrorKind::SingularMatrix`], Rayleigh quotient
//! iteration reports [`LinalgErrorKind::ShiftSingular`]) or let them through
//! unchanged as [`LinalgErrorKind::Provider`].
//!
//! Non-convergence within the iteration budget is *not* an error: it is
//! reported through the `converged` flag of the result records.
use thiserror::Error;

/// Represents all possible errors that can occur in a kernel invocation.
#[derive(Error, Debug, Clone)]
#[error(transparent)]
pub struct LinalgError(#[from] LinalgErrorKind);

impl LinalgError {
    /// Returns the kind of failure, for callers that branch on the taxonomy.
    pub fn kind(&self) -> &LinalgErrorKind {
        &self.0
    }

    /// Consumes the error and returns its kind.
    pub fn into_kind(self) -> LinalgErrorKind {
        self.0
    }
}

impl From<ProviderError> for LinalgError {
    fn from(err: ProviderError) -> Self {
        LinalgError(LinalgErrorKind::Provider(err))
    }
}

/// The distinct kinds of errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgErrorKind {
    /// The input buffer has no rows or no columns.
    #[error("Shape error: a matrix must have at least one row and one column.")]
    EmptyMatrix,

    /// A jagged input buffer whose rows do not all have the same length.
    #[error("Shape error: row {row} has {actual} entries, expected {expected}.")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A square-only operation received a rectangular matrix.
    #[error("Shape error: {operation} requires a square matrix, got {rows}x{cols}.")]
    NotSquare {
        operation: &'static str,
        rows: usize,
        cols: usize,
    },

    /// Operand dimensions are incompatible.
    #[error("Dimension mismatch: expected {expected}, got {actual}.")]
    DimensionMismatch { expected: String, actual: String },

    /// A linear solve against the input matrix hit a singular or near-singular system.
    #[error("Matrix is singular or near-singular.")]
    SingularMatrix,

    /// The shifted system `A - λI` of Rayleigh quotient iteration could not be solved.
    #[error("Matrix A - λI is singular or near-singular (λ = {shift}).")]
    ShiftSingular { shift: f64 },

    /// Unpivoted elimination encountered an exactly zero pivot.
    #[error(
        "Zero pivot encountered at position ({index}, {index}). LU decomposition without pivoting failed."
    )]
    ZeroPivot { index: usize },

    /// The Cholesky recurrence produced a non-positive value under the square root.
    #[error("Matrix is not positive definite: diagonal residual {value} at position {index}.")]
    NotPositiveDefinite { index: usize, value: f64 },

    /// An invalid numeric parameter was supplied to a kernel.
    #[error("Invalid input parameter: {0}")]
    InvalidParameter(String),

    /// An error raised by the linear-algebra provider, propagated unchanged.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl LinalgErrorKind {
    /// True for every variant describing an unusable matrix shape.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            LinalgErrorKind::EmptyMatrix
                | LinalgErrorKind::RaggedRows { .. }
                | LinalgErrorKind::NotSquare { .. }
                | LinalgErrorKind::DimensionMismatch { .. }
        )
    }
}

/// Errors raised by a [`crate::provider::LinearAlgebraProvider`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The system matrix is singular (or numerically so) and cannot be solved or inverted.
    #[error("Provider error: matrix is singular and cannot be solved or inverted.")]
    Singular,

    /// Operand shapes do not agree.
    #[error("Provider error: dimension mismatch, expected {expected} but got {actual}.")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The requested operation is only defined for square matrices.
    #[error("Provider error: {0} is only defined for square matrices.")]
    NotSquare(&'static str),

    /// The singular value decomposition did not converge.
    #[error("Provider error: singular value decomposition did not converge.")]
    SvdNoConvergence,
}

// Manually implement PartialEq for the public error type.
// We compare the inner `LinalgErrorKind`.
impl PartialEq for LinalgError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
