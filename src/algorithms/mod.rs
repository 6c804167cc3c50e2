//! Hand-written numerical kernels.
//!
//! ** NOTE: We recommend using the high-level functions in [`crate::solvers`]
//! instead. The functions here take explicit [`IterationOptions`] and an
//! explicit [`LinearAlgebraProvider`](crate::provider::LinearAlgebraProvider)
//! where one is needed, which is useful for tuning and for testing against a
//! mock provider.
//!
//! Every kernel is a stateless function of its inputs. The input matrix is only
//! read; scratch matrices are clones owned by the call.
//!
//! - [`power`]: power, inverse power and Rayleigh quotient iteration
//! - [`jacobi`]: Jacobi rotations for symmetric matrices
//! - [`qr`]: unshifted QR iteration
//! - [`lr`]: Rutishauser's LR iteration
//! - [`gershgorin`]: Gershgorin disc bounds
//! - [`polynomial`]: Leverrier-Faddeev and Krylov characteristic polynomials
//! - [`decomposition`]: LU without pivoting and Cholesky

pub mod decomposition;
pub mod gershgorin;
pub mod jacobi;
pub mod lr;
pub mod polynomial;
pub mod power;
pub mod qr;

use crate::{
    error::{LinalgError, LinalgErrorKind},
    matrix::Matrix,
};

/// Iteration budget and convergence tolerance for an iterative kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationOptions {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl IterationOptions {
    pub const POWER: Self = Self::new(1000, 1e-10);
    pub const INVERSE_POWER: Self = Self::new(1000, 1e-6);
    /// Smaller budget: Rayleigh quotient iteration converges quadratically or better.
    pub const RAYLEIGH: Self = Self::new(100, 1e-10);
    pub const JACOBI: Self = Self::new(100, 1e-10);
    pub const QR: Self = Self::new(1000, 1e-10);
    pub const LR: Self = Self::new(1000, 1e-6);

    pub const fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), LinalgError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(LinalgErrorKind::InvalidParameter(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            ))
            .into());
        }
        if self.max_iterations == 0 {
            return Err(LinalgErrorKind::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Rejects NaN or infinite entries. The iterative kernels could never meet their
/// tolerance on such input and would silently burn the whole budget.
pub(crate) fn require_finite(a: &Matrix, operation: &str) -> Result<(), LinalgError> {
    let (m, n) = a.shape();
    for i in 0..m {
        for j in 0..n {
            let value = a.get(i, j);
            if !value.is_finite() {
                return Err(LinalgErrorKind::InvalidParameter(format!(
                    "{operation} requires finite entries, got {value} at ({i}, {j})"
                ))
                .into());
            }
        }
    }
    Ok(())
}

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Scales `v` to unit Euclidean length. Returns `None` for the zero vector.
pub(crate) fn normalize(v: &[f64]) -> Option<Vec<f64>> {
    let norm = dot(v, v).sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    Some(v.iter().map(|x| x / norm).collect())
}

/// The all-ones vector scaled to unit length, shared start vector of the power family.
pub(crate) fn start_vector(n: usize) -> Vec<f64> {
    vec![1.0 / (n as f64).sqrt(); n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_validation() {
        assert!(IterationOptions::POWER.validate().is_ok());
        assert!(
            IterationOptions::POWER
                .with_tolerance(0.0)
                .validate()
                .is_err()
        );
        assert!(
            IterationOptions::POWER
                .with_tolerance(f64::NAN)
                .validate()
                .is_err()
        );
        let err = IterationOptions::QR
            .with_max_iterations(0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input parameter: max_iterations must be at least 1"
        );
    }

    #[test]
    fn test_non_finite_entries_are_rejected() {
        let finite = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert!(require_finite(&finite, "QR iteration").is_ok());

        let a = Matrix::from_rows(&[[1.0, 2.0], [f64::NAN, 4.0]]).unwrap();
        let err = require_finite(&a, "QR iteration").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input parameter: QR iteration requires finite entries, got NaN at (1, 0)"
        );
    }

    #[test]
    fn test_vector_helpers() {
        let v = start_vector(4);
        assert!((dot(&v, &v) - 1.0).abs() < 1e-15);
        assert_eq!(normalize(&[3.0, 4.0]), Some(vec![0.6, 0.8]));
        assert_eq!(normalize(&[0.0, 0.0]), None);
    }
}
