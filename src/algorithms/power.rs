//! Power iteration and its relatives: single-eigenpair methods.
//!
//! All three start from the normalized all-ones vector and stop as soon as two
//! consecutive eigenvalue estimates differ by less than the tolerance. Running
//! out of iterations is reported through `converged = false`, never as an
//! error.
//!
//! - [`power_iteration`] converges to the dominant eigenvalue. It assumes one
//!   eigenvalue strictly dominates in magnitude; ties oscillate and report
//!   non-convergence.
//! - [`inverse_power_iteration`] works with `A⁻¹` through one LU factorization
//!   and converges to the eigenvalue of smallest magnitude.
//! - [`rayleigh_quotient_iteration`] solves a freshly shifted system
//!   `(A - λI)·x = v` on every step. The shift approaches an eigenvalue, so the
//!   system approaches singularity; hitting an exactly singular shift is
//!   reported as [`LinalgErrorKind::ShiftSingular`] and should be read as a
//!   signal that the shift already sits on an eigenvalue.
//!
//! A 1x1 matrix is its own eigenvalue: every method returns it on iteration 1.

use super::{IterationOptions, dot, normalize, require_finite, start_vector};
use crate::{
    error::{LinalgError, LinalgErrorKind, ProviderError},
    matrix::Matrix,
    provider::{LinearAlgebraProvider, LuSolver},
    results::EigenResult,
};

/// Approximates the dominant eigenpair of a square matrix.
///
/// Each step computes `y = A·v`, takes `y·v` as the eigenvalue estimate and
/// `y / ‖y‖` as the next vector. The first estimate is compared against `0`.
///
/// # Arguments
/// * `a`: A square matrix.
/// * `options`: Iteration budget and tolerance, see [`IterationOptions::POWER`].
///
/// # Returns
/// The last estimate, converged or not, or a shape / parameter error.
pub fn power_iteration(a: &Matrix, options: IterationOptions) -> Result<EigenResult, LinalgError> {
    let n = a.require_square("Power iteration")?;
    options.validate()?;
    require_finite(a, "Power iteration")?;
    if n == 1 {
        return Ok(EigenResult::scalar(a.get(0, 0)));
    }

    let mut v = start_vector(n);
    let mut eigenvalue = 0.0;

    for iter in 0..options.max_iterations {
        let y = a.apply(&v);
        let candidate = dot(&y, &v);
        // `A·v = 0` means `v` already spans part of the null space.
        let next = normalize(&y).unwrap_or_else(|| v.clone());

        if (candidate - eigenvalue).abs() < options.tolerance {
            return Ok(EigenResult {
                eigenvalue: candidate,
                eigenvector: next,
                iterations: iter + 1,
                converged: true,
            });
        }

        v = next;
        eigenvalue = candidate;
    }

    log::debug!(
        "Power iteration did not converge in {} iterations (last estimate {})",
        options.max_iterations,
        eigenvalue
    );
    Ok(EigenResult {
        eigenvalue,
        eigenvector: v,
        iterations: options.max_iterations,
        converged: false,
    })
}

/// Approximates the eigenpair of smallest magnitude.
///
/// The matrix is factored once through `provider`; each step solves
/// `A·y = x`, normalizes `y` and takes the Rayleigh quotient `yᵗ·A·y` as the
/// eigenvalue estimate.
///
/// # Errors
/// [`LinalgErrorKind::SingularMatrix`] if the provider cannot factor or solve
/// the system. This is fatal: there is no retry.
pub fn inverse_power_iteration<P: LinearAlgebraProvider>(
    a: &Matrix,
    provider: &P,
    options: IterationOptions,
) -> Result<EigenResult, LinalgError> {
    let n = a.require_square("Inverse power iteration")?;
    options.validate()?;
    require_finite(a, "Inverse power iteration")?;

    let lu = provider.factorize(a).map_err(singular_to_error)?;
    if n == 1 {
        return Ok(EigenResult::scalar(a.get(0, 0)));
    }

    let mut x = start_vector(n);
    let mut lambda_old = 0.0;
    let mut lambda_new = 0.0;

    for iter in 0..options.max_iterations {
        let y = lu.solve(&x).map_err(singular_to_error)?;
        let y = normalize(&y).ok_or(LinalgErrorKind::SingularMatrix)?;
        lambda_new = dot(&y, &a.apply(&y));

        if (lambda_new - lambda_old).abs() < options.tolerance {
            return Ok(EigenResult {
                eigenvalue: lambda_new,
                eigenvector: y,
                iterations: iter + 1,
                converged: true,
            });
        }

        lambda_old = lambda_new;
        x = y;
    }

    log::debug!(
        "Inverse power iteration did not converge in {} iterations (last estimate {})",
        options.max_iterations,
        lambda_new
    );
    Ok(EigenResult {
        eigenvalue: lambda_new,
        eigenvector: x,
        iterations: options.max_iterations,
        converged: false,
    })
}

/// Rayleigh quotient iteration, optionally seeded with an eigenvalue guess.
///
/// Without `initial_shift` the first shift is the Rayleigh quotient of the
/// start vector.
///
/// # Errors
/// [`LinalgErrorKind::ShiftSingular`] as soon as `A - λI` cannot be solved,
/// [`LinalgErrorKind::InvalidParameter`] for a non-finite `initial_shift`.
pub fn rayleigh_quotient_iteration<P: LinearAlgebraProvider>(
    a: &Matrix,
    provider: &P,
    options: IterationOptions,
    initial_shift: Option<f64>,
) -> Result<EigenResult, LinalgError> {
    let n = a.require_square("Rayleigh quotient iteration")?;
    options.validate()?;
    require_finite(a, "Rayleigh quotient iteration")?;
    if let Some(shift) = initial_shift.filter(|s| !s.is_finite()) {
        return Err(LinalgErrorKind::InvalidParameter(format!(
            "initial shift must be finite, got {shift}"
        ))
        .into());
    }
    if n == 1 {
        return Ok(EigenResult::scalar(a.get(0, 0)));
    }

    let mut v = start_vector(n);
    let mut lambda = initial_shift.unwrap_or_else(|| dot(&v, &a.apply(&v)));

    for iter in 0..options.max_iterations {
        let shifted = a.shifted(lambda);
        let x = provider
            .solve(&shifted, &v)
            .map_err(|_| LinalgErrorKind::ShiftSingular { shift: lambda })?;
        let next = normalize(&x).ok_or(LinalgErrorKind::ShiftSingular { shift: lambda })?;
        let next_lambda = dot(&next, &a.apply(&next));

        if (next_lambda - lambda).abs() < options.tolerance {
            return Ok(EigenResult {
                eigenvalue: next_lambda,
                eigenvector: next,
                iterations: iter + 1,
                converged: true,
            });
        }

        lambda = next_lambda;
        v = next;
    }

    log::debug!(
        "Rayleigh quotient iteration did not converge in {} iterations (last shift {})",
        options.max_iterations,
        lambda
    );
    Ok(EigenResult {
        eigenvalue: lambda,
        eigenvector: v,
        iterations: options.max_iterations,
        converged: false,
    })
}

fn singular_to_error(err: ProviderError) -> LinalgError {
    match err {
        ProviderError::Singular => LinalgErrorKind::SingularMatrix.into(),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FaerProvider;

    fn assert_parallel(v: &[f64], expected: &[f64], tol: f64) {
        let norm = dot(expected, expected).sqrt();
        let cos = dot(v, expected) / norm;
        assert!(
            (cos.abs() - 1.0).abs() < tol,
            "vectors not parallel: {v:?} vs {expected:?}"
        );
    }

    #[test]
    fn test_power_iteration_dominant_pair() {
        let a = Matrix::from_rows(&[[4.0, 1.0], [2.0, 3.0]]).unwrap();
        let result = power_iteration(&a, IterationOptions::POWER).unwrap();
        assert!(result.converged);
        assert!((result.eigenvalue - 5.0).abs() < 1e-10);
        assert_parallel(&result.eigenvector, &[1.0, 1.0], 1e-12);
        assert!((dot(&result.eigenvector, &result.eigenvector) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_iteration_reports_non_convergence() {
        // Complex pair 1 ± 2i: no dominant real eigenvalue, the quotient keeps moving.
        let a = Matrix::from_rows(&[[1.0, -4.0], [1.0, 1.0]]).unwrap();
        let opts = IterationOptions::POWER.with_max_iterations(25);
        let result = power_iteration(&a, opts).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 25);
        assert_eq!(result.eigenvector.len(), 2);
    }

    #[test]
    fn test_power_iteration_on_start_eigenvector() {
        // The normalized all-ones vector is already an eigenvector of the swap matrix.
        let a = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let result = power_iteration(&a, IterationOptions::POWER).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 2);
        assert!((result.eigenvalue - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_power_iteration_smallest_pair() {
        // Eigenvalues (5 ± √5) / 2.
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
        let result = inverse_power_iteration(&a, &FaerProvider, IterationOptions::INVERSE_POWER)
            .unwrap();
        assert!(result.converged);
        assert!((result.eigenvalue - (5.0 - 5f64.sqrt()) / 2.0).abs() < 1e-6);
        assert_parallel(&result.eigenvector, &[1.0, (1.0 - 5f64.sqrt()) / 2.0], 1e-6);
    }

    #[test]
    fn test_inverse_power_iteration_singular_is_fatal() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let err = inverse_power_iteration(&a, &FaerProvider, IterationOptions::INVERSE_POWER)
            .unwrap_err();
        assert_eq!(err.into_kind(), LinalgErrorKind::SingularMatrix);
    }

    #[test]
    fn test_rayleigh_quotient_iteration_converges() {
        // Eigenvalues (5 ± √5) / 2; the default first shift 3.5 is closest to the larger one.
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
        let opts = IterationOptions::RAYLEIGH.with_tolerance(1e-6);
        let result = rayleigh_quotient_iteration(&a, &FaerProvider, opts, None).unwrap();
        assert!(result.converged);
        assert!((result.eigenvalue - (5.0 + 5f64.sqrt()) / 2.0).abs() < 1e-9);
        assert!(result.residual_norm(&a).unwrap() < 1e-6);

        let seeded = rayleigh_quotient_iteration(&a, &FaerProvider, opts, Some(1.0)).unwrap();
        assert!(seeded.converged);
        assert!((seeded.eigenvalue - (5.0 - 5f64.sqrt()) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rayleigh_quotient_iteration_exact_shift_is_singular() {
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
        let err = rayleigh_quotient_iteration(&a, &FaerProvider, IterationOptions::RAYLEIGH, Some(3.0))
            .unwrap_err();
        assert_eq!(err.into_kind(), LinalgErrorKind::ShiftSingular { shift: 3.0 });

        let err = rayleigh_quotient_iteration(
            &a,
            &FaerProvider,
            IterationOptions::RAYLEIGH,
            Some(f64::INFINITY),
        )
        .unwrap_err();
        assert!(matches!(err.kind(), LinalgErrorKind::InvalidParameter(_)));
    }

    #[test]
    fn test_scalar_matrix_converges_immediately() {
        let a = Matrix::from_rows(&[[5.0]]).unwrap();
        let results = [
            power_iteration(&a, IterationOptions::POWER).unwrap(),
            inverse_power_iteration(&a, &FaerProvider, IterationOptions::INVERSE_POWER).unwrap(),
            rayleigh_quotient_iteration(&a, &FaerProvider, IterationOptions::RAYLEIGH, None)
                .unwrap(),
        ];
        for result in results {
            assert_eq!(result.eigenvalue, 5.0);
            assert_eq!(result.eigenvector, vec![1.0]);
            assert!(result.converged);
            assert!(result.iterations <= 1);
        }
    }

    #[test]
    fn test_nan_entry_is_rejected() {
        let a = Matrix::from_rows(&[[f64::NAN]]).unwrap();
        let err = power_iteration(&a, IterationOptions::POWER).unwrap_err();
        assert!(matches!(err.kind(), LinalgErrorKind::InvalidParameter(_)));

        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, f64::NAN]]).unwrap();
        let err = rayleigh_quotient_iteration(&a, &FaerProvider, IterationOptions::RAYLEIGH, None)
            .unwrap_err();
        assert!(matches!(err.kind(), LinalgErrorKind::InvalidParameter(_)));
    }

    #[test]
    fn test_rectangular_input_is_rejected() {
        let a = Matrix::zeros(2, 3).unwrap();
        let err = power_iteration(&a, IterationOptions::POWER).unwrap_err();
        assert!(err.kind().is_shape_error());
        let err = inverse_power_iteration(&a, &FaerProvider, IterationOptions::INVERSE_POWER)
            .unwrap_err();
        assert!(err.kind().is_shape_error());
    }
}
