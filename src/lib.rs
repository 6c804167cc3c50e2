//! Classical eigenvalue algorithms and matrix factorizations for small dense real matrices.
//!
//! This crate collects the textbook methods for computing eigenvalues,
//! eigenvectors and characteristic polynomials of dense `f64` matrices, each
//! implemented as a stateless function that takes a [`Matrix`] and returns an
//! owned result record. The methods are written out by hand so their behavior
//! (iteration counts, tie-breaks, failure modes) stays observable; general
//! purpose dense linear algebra (QR, pivoted LU solves, SVD) is delegated to
//! [`faer`] behind the [`provider::LinearAlgebraProvider`] trait.
//!
//! ## Algorithms
//!
//! **Single eigenpair** ([`power_iteration`], [`inverse_power_iteration`],
//! [`rayleigh_quotient_iteration`]): converge to the dominant eigenvalue, the
//! eigenvalue of smallest magnitude, or the eigenvalue nearest a shift.
//!
//! **Full spectrum** ([`jacobi_eigen`], [`qr_eigenvalues`], [`lr_eigenvalues`]):
//! Jacobi rotations for symmetric matrices (eigenvectors included), unshifted
//! QR iteration, and Rutishauser's LR iteration.
//!
//! **Estimates and polynomials** ([`gershgorin_discs`], [`leverrier_faddeev`],
//! [`krylov_polynomial`]): eigenvalue inclusion intervals and the monic
//! characteristic polynomial.
//!
//! **Factorizations** ([`lu_decompose`], [`cholesky`]): unpivoted Doolittle LU
//! and Cholesky.
//!
//! Non-convergence is never an error: iterative methods report it through the
//! `converged` flag of their result. Errors ([`LinalgError`]) are reserved for
//! inputs the method cannot work with at all.
//!
//! ## Example Usage
//!
//! ```rust
//! use eigenlab::{Matrix, power_iteration, leverrier_faddeev};
//!
//! let a = Matrix::from_rows(&[[4.0, 1.0], [2.0, 3.0]]).unwrap();
//!
//! let dominant = power_iteration(&a).unwrap();
//! assert!(dominant.converged);
//! assert!((dominant.eigenvalue - 5.0).abs() < 1e-10);
//!
//! // λ² - 7λ + 10 = (λ - 5)(λ - 2)
//! let p = leverrier_faddeev(&a).unwrap();
//! assert!(p.evaluate(5.0).abs() < 1e-10);
//! assert!(p.evaluate(2.0).abs() < 1e-10);
//! ```
//!
//! The functions re-exported at the crate root use default parameters; the
//! modules under [`algorithms`] expose the same kernels with explicit
//! [`algorithms::IterationOptions`] and provider arguments.

// Declare the modules that form the crate's API structure.
pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod matrix;
pub mod provider;
pub mod results;
pub mod solvers;
pub mod utils;

pub use error::{LinalgError, LinalgErrorKind, ProviderError};
pub use matrix::Matrix;
pub use results::{
    Disc, EigenResult, GershgorinResult, JacobiResult, PolynomialResult, SpectrumResult,
    TriangularPair,
};

// Re-export the main API from solvers for convenient access.
// These are the primary functions that users should use.
pub use solvers::{
    cholesky, condition_number, gershgorin_discs, inverse_power_iteration, jacobi_eigen,
    krylov_polynomial, leverrier_faddeev, lr_eigenvalues, lu_decompose, matrix_report,
    power_iteration, qr_eigenvalues, rayleigh_quotient_iteration, singular_values,
};
