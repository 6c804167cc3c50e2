//! Matrix norms, singular values and the 2-norm condition number.
//!
//! Everything here is delegated to the [`LinearAlgebraProvider`]; the module
//! only adds the conventions on top (which singular values count, how the
//! condition number treats a rank-deficient matrix).

use crate::{
    error::{LinalgError, LinalgErrorKind},
    matrix::Matrix,
    provider::{LinearAlgebraProvider, NormKind},
};
use serde::Serialize;

/// Squared singular values (eigenvalues of `AᵗA`) at or below this are ignored
/// by [`condition_number`].
pub const CONDITION_EIGENVALUE_CUTOFF: f64 = 1e-12;

pub fn frobenius_norm<P: LinearAlgebraProvider>(a: &Matrix, provider: &P) -> Result<f64, LinalgError> {
    Ok(provider.norm(a, NormKind::Frobenius)?)
}

/// Maximum absolute column sum.
pub fn one_norm<P: LinearAlgebraProvider>(a: &Matrix, provider: &P) -> Result<f64, LinalgError> {
    Ok(provider.norm(a, NormKind::One)?)
}

/// Maximum absolute row sum.
pub fn infinity_norm<P: LinearAlgebraProvider>(a: &Matrix, provider: &P) -> Result<f64, LinalgError> {
    Ok(provider.norm(a, NormKind::Infinity)?)
}

/// Spectral norm, the largest singular value.
pub fn two_norm<P: LinearAlgebraProvider>(a: &Matrix, provider: &P) -> Result<f64, LinalgError> {
    Ok(provider.norm(a, NormKind::Two)?)
}

/// Singular values in non-increasing order.
pub fn singular_values<P: LinearAlgebraProvider>(
    a: &Matrix,
    provider: &P,
) -> Result<Vec<f64>, LinalgError> {
    Ok(provider.svd(a)?.singular_values)
}

/// The 2-norm condition number `σ_max / σ_min` of a square matrix.
///
/// Only singular values whose square exceeds [`CONDITION_EIGENVALUE_CUTOFF`]
/// take part, so a rank-deficient matrix reports the condition number of its
/// numerically non-zero part rather than infinity.
///
/// # Errors
/// [`LinalgErrorKind::SingularMatrix`] when every singular value is cut off.
pub fn condition_number<P: LinearAlgebraProvider>(
    a: &Matrix,
    provider: &P,
) -> Result<f64, LinalgError> {
    a.require_square("Condition number")?;
    let kept: Vec<f64> = singular_values(a, provider)?
        .into_iter()
        .filter(|s| s * s > CONDITION_EIGENVALUE_CUTOFF)
        .collect();

    let (Some(max), Some(min)) = (
        kept.iter().copied().reduce(f64::max),
        kept.iter().copied().reduce(f64::min),
    ) else {
        return Err(LinalgErrorKind::SingularMatrix.into());
    };
    Ok(max / min)
}

/// Summary statistics of a matrix, as printed by the `eigenlab stats` command.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatrixReport {
    pub rows: usize,
    pub cols: usize,
    pub frobenius_norm: f64,
    pub one_norm: f64,
    pub infinity_norm: f64,
    pub two_norm: f64,
    pub rank: usize,
    pub singular_values: Vec<f64>,
    /// Square matrices only.
    pub trace: Option<f64>,
    /// Square matrices only.
    pub determinant: Option<f64>,
    /// `None` for rectangular input or when every singular value is cut off.
    pub condition_number: Option<f64>,
    pub symmetric: bool,
}

impl MatrixReport {
    pub fn new<P: LinearAlgebraProvider>(a: &Matrix, provider: &P) -> Result<Self, LinalgError> {
        let square = a.is_square();
        let condition_number = if square {
            match condition_number(a, provider) {
                Ok(value) => Some(value),
                Err(err) if *err.kind() == LinalgErrorKind::SingularMatrix => None,
                Err(err) => return Err(err),
            }
        } else {
            None
        };

        Ok(Self {
            rows: a.rows(),
            cols: a.cols(),
            frobenius_norm: frobenius_norm(a, provider)?,
            one_norm: one_norm(a, provider)?,
            infinity_norm: infinity_norm(a, provider)?,
            two_norm: two_norm(a, provider)?,
            rank: provider.rank(a)?,
            singular_values: singular_values(a, provider)?,
            trace: if square { Some(a.trace()?) } else { None },
            determinant: if square { Some(provider.determinant(a)?) } else { None },
            condition_number,
            symmetric: a.is_symmetric(1e-12),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FaerProvider;

    #[test]
    fn test_norms_of_small_matrix() {
        let a = Matrix::from_rows(&[[1.0, -2.0], [3.0, 4.0]]).unwrap();
        assert!((frobenius_norm(&a, &FaerProvider).unwrap() - 30f64.sqrt()).abs() < 1e-12);
        assert_eq!(one_norm(&a, &FaerProvider).unwrap(), 6.0);
        assert_eq!(infinity_norm(&a, &FaerProvider).unwrap(), 7.0);
        let sigma = singular_values(&a, &FaerProvider).unwrap();
        assert!((two_norm(&a, &FaerProvider).unwrap() - sigma[0]).abs() < 1e-12);
    }

    #[test]
    fn test_condition_number_of_diagonal() {
        let a = Matrix::from_rows(&[[4.0, 0.0], [0.0, 0.5]]).unwrap();
        assert!((condition_number(&a, &FaerProvider).unwrap() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_condition_number_ignores_null_space() {
        // Singular values 5 and 0: the zero is cut off, leaving a single value.
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert!((condition_number(&a, &FaerProvider).unwrap() - 1.0).abs() < 1e-10);

        let zero = Matrix::zeros(2, 2).unwrap();
        let err = condition_number(&zero, &FaerProvider).unwrap_err();
        assert_eq!(err.into_kind(), LinalgErrorKind::SingularMatrix);
    }

    #[test]
    fn test_condition_number_requires_square() {
        let a = Matrix::zeros(2, 3).unwrap();
        assert!(condition_number(&a, &FaerProvider).unwrap_err().kind().is_shape_error());
    }

    #[test]
    fn test_report_for_rectangular_input() {
        let a = Matrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 2.0, 0.0]]).unwrap();
        let report = MatrixReport::new(&a, &FaerProvider).unwrap();
        assert_eq!((report.rows, report.cols), (2, 3));
        assert_eq!(report.rank, 2);
        assert_eq!(report.trace, None);
        assert_eq!(report.condition_number, None);
        assert!(!report.symmetric);
    }

    #[test]
    fn test_report_for_singular_square_input() {
        let a = Matrix::zeros(2, 2).unwrap();
        let report = MatrixReport::new(&a, &FaerProvider).unwrap();
        assert_eq!(report.rank, 0);
        assert_eq!(report.determinant, Some(0.0));
        assert_eq!(report.condition_number, None);
        assert!(report.symmetric);
    }
}
