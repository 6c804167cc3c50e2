//! This module provides the high-level, user-friendly API: every eigenvalue
//! method, polynomial construction and factorization with its default
//! parameters and the [`FaerProvider`].
//!
//! Each function forwards to its counterpart in [`crate::algorithms`] (or
//! [`crate::diagnostics`]); use those directly to tune [`IterationOptions`] or
//! to inject a different [`LinearAlgebraProvider`](crate::provider::LinearAlgebraProvider).

use crate::{
    algorithms::{IterationOptions, decomposition, gershgorin, jacobi, lr, polynomial, power, qr},
    diagnostics::{self, MatrixReport},
    error::LinalgError,
    matrix::Matrix,
    provider::FaerProvider,
    results::{
        EigenResult, GershgorinResult, JacobiResult, PolynomialResult, SpectrumResult,
        TriangularPair,
    },
};

/// Approximates the dominant eigenpair of `a` by power iteration.
///
/// Uses at most 1000 iterations and a tolerance of `1e-10` on successive
/// eigenvalue estimates.
///
/// # Arguments
/// * `a`: A square matrix with one eigenvalue strictly dominant in magnitude.
///
/// # Returns
/// The last estimate; `converged` is `false` if the budget ran out. Fails only
/// on a rectangular input.
pub fn power_iteration(a: &Matrix) -> Result<EigenResult, LinalgError> {
    power::power_iteration(a, IterationOptions::POWER)
}

/// Approximates the eigenpair of smallest magnitude by inverse power iteration.
///
/// Uses at most 1000 iterations and a tolerance of `1e-6`.
///
/// # Returns
/// The last estimate, or [`LinalgErrorKind::SingularMatrix`](crate::error::LinalgErrorKind::SingularMatrix)
/// if `a` cannot be factored.
pub fn inverse_power_iteration(a: &Matrix) -> Result<EigenResult, LinalgError> {
    power::inverse_power_iteration(a, &FaerProvider, IterationOptions::INVERSE_POWER)
}

/// Refines an eigenpair by Rayleigh quotient iteration.
///
/// Uses at most 100 iterations and a tolerance of `1e-10`.
///
/// # Arguments
/// * `a`: A square matrix.
/// * `initial_shift`: An eigenvalue guess. With `None` the iteration starts
///   from the Rayleigh quotient of the normalized all-ones vector.
///
/// # Returns
/// The last estimate, or [`LinalgErrorKind::ShiftSingular`](crate::error::LinalgErrorKind::ShiftSingular)
/// if a shift lands exactly on an eigenvalue.
pub fn rayleigh_quotient_iteration(
    a: &Matrix,
    initial_shift: Option<f64>,
) -> Result<EigenResult, LinalgError> {
    power::rayleigh_quotient_iteration(a, &FaerProvider, IterationOptions::RAYLEIGH, initial_shift)
}

/// Full eigendecomposition of a symmetric matrix by Jacobi rotations.
///
/// At most 100 rotations; converged once every off-diagonal entry is below `1e-10`.
pub fn jacobi_eigen(a: &Matrix) -> Result<JacobiResult, LinalgError> {
    jacobi::jacobi_eigen(a, IterationOptions::JACOBI)
}

/// All eigenvalues by unshifted QR iteration (at most 1000 steps, tolerance `1e-10`).
pub fn qr_eigenvalues(a: &Matrix) -> Result<SpectrumResult, LinalgError> {
    qr::qr_eigenvalues(a, &FaerProvider, IterationOptions::QR)
}

/// All eigenvalues by LR iteration (at most 1000 steps, tolerance `1e-6`).
pub fn lr_eigenvalues(a: &Matrix) -> Result<SpectrumResult, LinalgError> {
    lr::lr_eigenvalues(a, IterationOptions::LR)
}

pub fn gershgorin_discs(a: &Matrix) -> Result<GershgorinResult, LinalgError> {
    gershgorin::gershgorin_discs(a)
}

pub fn leverrier_faddeev(a: &Matrix) -> Result<PolynomialResult, LinalgError> {
    polynomial::leverrier_faddeev(a)
}

pub fn krylov_polynomial(a: &Matrix) -> Result<PolynomialResult, LinalgError> {
    polynomial::krylov_polynomial(a, &FaerProvider)
}

pub fn lu_decompose(a: &Matrix) -> Result<TriangularPair, LinalgError> {
    decomposition::lu_decompose(a)
}

pub fn cholesky(a: &Matrix) -> Result<TriangularPair, LinalgError> {
    decomposition::cholesky(a)
}

pub fn condition_number(a: &Matrix) -> Result<f64, LinalgError> {
    diagnostics::condition_number(a, &FaerProvider)
}

pub fn singular_values(a: &Matrix) -> Result<Vec<f64>, LinalgError> {
    diagnostics::singular_values(a, &FaerProvider)
}

pub fn matrix_report(a: &Matrix) -> Result<MatrixReport, LinalgError> {
    MatrixReport::new(a, &FaerProvider)
}
