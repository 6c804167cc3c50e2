//! Hand-written triangular factorizations.
//!
//! Both return a [`TriangularPair`] whose product reproduces the input.
//! Neither pivots.

use crate::{
    error::{LinalgError, LinalgErrorKind},
    matrix::Matrix,
    results::TriangularPair,
};

/// Doolittle LU decomposition without pivoting: `A = L·U`, `L` unit lower-triangular.
///
/// Row `i` of `U` is formed first, then column `i` of `L` below the diagonal.
/// The pivot `U[i][i]` is only divided by when there are rows below it, so a
/// singular matrix whose sole zero pivot is the last one still factors.
///
/// # Errors
/// [`LinalgErrorKind::ZeroPivot`] when an earlier pivot is exactly zero.
pub fn lu_decompose(a: &Matrix) -> Result<TriangularPair, LinalgError> {
    let n = a.require_square("LU decomposition")?;
    let mut l = Matrix::identity(n)?;
    let mut u = Matrix::zeros(n, n)?;

    for i in 0..n {
        for k in i..n {
            let sum: f64 = (0..i).map(|j| l.get(i, j) * u.get(j, k)).sum();
            u.set(i, k, a.get(i, k) - sum);
        }

        let pivot = u.get(i, i);
        if i + 1 < n && pivot == 0.0 {
            return Err(LinalgErrorKind::ZeroPivot { index: i }.into());
        }
        for k in (i + 1)..n {
            let sum: f64 = (0..i).map(|j| l.get(k, j) * u.get(j, i)).sum();
            l.set(k, i, (a.get(k, i) - sum) / pivot);
        }
    }

    Ok(TriangularPair { lower: l, upper: u })
}

/// Cholesky decomposition `A = L·Lᵗ` of a symmetric positive-definite matrix.
///
/// Only the lower triangle of `A` is read. The returned pair is `(L, Lᵗ)`;
/// everything above the diagonal of `L` is exactly zero.
///
/// # Errors
/// [`LinalgErrorKind::NotPositiveDefinite`] as soon as a diagonal residual
/// `a_ii - Σ l_ik²` is not strictly positive.
pub fn cholesky(a: &Matrix) -> Result<TriangularPair, LinalgError> {
    let n = a.require_square("Cholesky decomposition")?;
    let mut l = Matrix::zeros(n, n)?;

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l.get(i, k) * l.get(j, k)).sum();
            if i == j {
                let value = a.get(i, i) - sum;
                // `!(value > 0)` also rejects NaN.
                if !(value > 0.0) {
                    return Err(LinalgErrorKind::NotPositiveDefinite { index: i, value }.into());
                }
                l.set(i, i, value.sqrt());
            } else {
                l.set(i, j, (a.get(i, j) - sum) / l.get(j, j));
            }
        }
    }

    let upper = l.transpose();
    Ok(TriangularPair { lower: l, upper })
}
