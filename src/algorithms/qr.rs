//! Unshifted QR iteration.
//!
//! `A_{k+1} = R_k·Q_k` where `A_k = Q_k·R_k`. Every iterate is orthogonally
//! similar to the input, and for real eigenvalues of distinct magnitude the
//! strictly-lower part decays geometrically. There are no shifts and no
//! deflation: close or complex eigenvalues converge slowly or not at all.

use super::{IterationOptions, require_finite};
use crate::{
    error::LinalgError, matrix::Matrix, provider::LinearAlgebraProvider, results::SpectrumResult,
};

/// Computes all eigenvalues of a square matrix by unshifted QR iteration.
///
/// The factorization is delegated to `provider`. Converged once every
/// strictly-lower entry satisfies `|a_ij| <= tolerance`; the eigenvalues are
/// then read off the diagonal in their resulting order, unsorted.
pub fn qr_eigenvalues<P: LinearAlgebraProvider>(
    a: &Matrix,
    provider: &P,
    options: IterationOptions,
) -> Result<SpectrumResult, LinalgError> {
    a.require_square("QR iteration")?;
    options.validate()?;
    require_finite(a, "QR iteration")?;

    let mut current = a.clone();
    for iter in 0..options.max_iterations {
        let (q, r) = provider.qr(&current)?;
        current = r.matmul(&q)?;

        if is_upper_triangular(&current, options.tolerance) {
            return Ok(SpectrumResult {
                eigenvalues: current.diagonal(),
                iterations: iter + 1,
                converged: true,
            });
        }
    }

    log::debug!(
        "QR iteration did not reach upper-triangular form in {} iterations",
        options.max_iterations
    );
    Ok(SpectrumResult {
        eigenvalues: current.diagonal(),
        iterations: options.max_iterations,
        converged: false,
    })
}

fn is_upper_triangular(a: &Matrix, tolerance: f64) -> bool {
    (1..a.rows()).all(|i| (0..i).all(|j| a.get(i, j).abs() <= tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{LinalgErrorKind, ProviderError},
        provider::{FaerLu, FaerProvider, NormKind, SvdOutput},
    };
    use std::cell::Cell;

    /// Delegates to [`FaerProvider`] and counts QR factorizations.
    #[derive(Default)]
    struct CountingProvider {
        qr_calls: Cell<usize>,
        fail_qr: bool,
    }

    impl LinearAlgebraProvider for CountingProvider {
        type Lu = FaerLu;

        fn qr(&self, a: &Matrix) -> Result<(Matrix, Matrix), ProviderError> {
            self.qr_calls.set(self.qr_calls.get() + 1);
            if self.fail_qr {
                return Err(ProviderError::NotSquare("QR factorization"));
            }
            FaerProvider.qr(a)
        }
        fn factorize(&self, a: &Matrix) -> Result<FaerLu, ProviderError> {
            FaerProvider.factorize(a)
        }
        fn svd(&self, a: &Matrix) -> Result<SvdOutput, ProviderError> {
            FaerProvider.svd(a)
        }
        fn determinant(&self, a: &Matrix) -> Result<f64, ProviderError> {
            FaerProvider.determinant(a)
        }
        fn inverse(&self, a: &Matrix) -> Result<Matrix, ProviderError> {
            FaerProvider.inverse(a)
        }
        fn pseudo_inverse(&self, a: &Matrix) -> Result<Matrix, ProviderError> {
            FaerProvider.pseudo_inverse(a)
        }
        fn rank(&self, a: &Matrix) -> Result<usize, ProviderError> {
            FaerProvider.rank(a)
        }
        fn norm(&self, a: &Matrix, kind: NormKind) -> Result<f64, ProviderError> {
            FaerProvider.norm(a, kind)
        }
    }

    #[test]
    fn test_symmetric_two_by_two() {
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
        let provider = CountingProvider::default();
        let result = qr_eigenvalues(&a, &provider, IterationOptions::QR).unwrap();
        assert!(result.converged);
        assert_eq!(provider.qr_calls.get(), result.iterations);

        // Largest magnitude settles first on the diagonal.
        let (large, small) = ((5.0 + 5f64.sqrt()) / 2.0, (5.0 - 5f64.sqrt()) / 2.0);
        assert!((result.eigenvalues[0] - large).abs() < 1e-9);
        assert!((result.eigenvalues[1] - small).abs() < 1e-9);
    }

    #[test]
    fn test_upper_triangular_input_converges_on_first_step() {
        let a = Matrix::from_rows(&[[3.0, 1.0, 2.0], [0.0, 2.0, 1.0], [0.0, 0.0, 1.0]]).unwrap();
        let result = qr_eigenvalues(&a, &FaerProvider, IterationOptions::QR).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        for (got, want) in result.eigenvalues.iter().zip([3.0, 2.0, 1.0]) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_complex_pair_does_not_converge() {
        // Rotation by 90 degrees: eigenvalues ±i.
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
        let opts = IterationOptions::QR.with_max_iterations(50);
        let result = qr_eigenvalues(&a, &FaerProvider, opts).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 50);
    }

    #[test]
    fn test_provider_failure_propagates() {
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
        let provider = CountingProvider {
            fail_qr: true,
            ..Default::default()
        };
        let err = qr_eigenvalues(&a, &provider, IterationOptions::QR).unwrap_err();
        assert!(matches!(err.kind(), LinalgErrorKind::Provider(_)));
        assert_eq!(provider.qr_calls.get(), 1);
    }

    #[test]
    fn test_non_finite_input_is_rejected_before_factoring() {
        let a = Matrix::from_rows(&[[2.0, f64::INFINITY], [1.0, 3.0]]).unwrap();
        let provider = CountingProvider::default();
        let err = qr_eigenvalues(&a, &provider, IterationOptions::QR).unwrap_err();
        assert!(matches!(err.kind(), LinalgErrorKind::InvalidParameter(_)));
        assert_eq!(provider.qr_calls.get(), 0);
    }

    #[test]
    fn test_scalar_input() {
        let a = Matrix::from_rows(&[[5.0]]).unwrap();
        let result = qr_eigenvalues(&a, &FaerProvider, IterationOptions::QR).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert!((result.eigenvalues[0] - 5.0).abs() < 1e-12);
    }
}
