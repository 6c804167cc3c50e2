//! Rutishauser's LR iteration.
//!
//! `A_k = L·R` by unpivoted Gaussian elimination (`L` unit lower-triangular),
//! then `A_{k+1} = R·L`. Pivoting would change the algorithm, so a zero pivot
//! is a hard failure rather than something to work around.

use super::{IterationOptions, require_finite};
use crate::{
    error::{LinalgError, LinalgErrorKind},
    matrix::Matrix,
    results::SpectrumResult,
};

/// Computes the eigenvalues of a square matrix by LR iteration.
///
/// Converged once the Frobenius norm of `A_{k+1} - A_k` drops below the
/// tolerance; the eigenvalues then come from the diagonal of `A_{k+1}`.
/// Otherwise the diagonal of the last iterate is returned with
/// `converged = false`. Iterates that overflow are not reported as errors:
/// the comparison against the tolerance simply never succeeds.
///
/// # Errors
/// [`LinalgErrorKind::ZeroPivot`] when a diagonal pivot is exactly zero
/// during any factorization, e.g. on the very first step for `[[0, 1], [1, 0]]`.
pub fn lr_eigenvalues(a: &Matrix, options: IterationOptions) -> Result<SpectrumResult, LinalgError> {
    a.require_square("LR iteration")?;
    options.validate()?;
    require_finite(a, "LR iteration")?;

    let mut current = a.clone();
    for iter in 0..options.max_iterations {
        let (l, r) = eliminate(&current)?;
        let next = r.matmul(&l)?;
        let change = frobenius_distance(&current, &next);

        if change < options.tolerance {
            return Ok(SpectrumResult {
                eigenvalues: next.diagonal(),
                iterations: iter + 1,
                converged: true,
            });
        }
        current = next;
    }

    log::debug!(
        "LR iteration did not converge in {} iterations",
        options.max_iterations
    );
    Ok(SpectrumResult {
        eigenvalues: current.diagonal(),
        iterations: options.max_iterations,
        converged: false,
    })
}

/// Gaussian elimination without row exchanges, returning `(L, R)`.
fn eliminate(a: &Matrix) -> Result<(Matrix, Matrix), LinalgError> {
    let n = a.rows();
    let mut l = Matrix::identity(n)?;
    let mut r = a.clone();

    for k in 0..n.saturating_sub(1) {
        let pivot = r.get(k, k);
        if pivot == 0.0 {
            log::trace!("LR step aborted: zero pivot at {k}");
            return Err(LinalgErrorKind::ZeroPivot { index: k }.into());
        }
        for i in (k + 1)..n {
            let factor = r.get(i, k) / pivot;
            l.set(i, k, factor);
            for j in k..n {
                r.set(i, j, r.get(i, j) - factor * r.get(k, j));
            }
        }
    }
    Ok((l, r))
}

fn frobenius_distance(a: &Matrix, b: &Matrix) -> f64 {
    let (rows, cols) = a.shape();
    (0..rows)
        .flat_map(|i| (0..cols).map(move |j| (i, j)))
        .map(|(i, j)| (a.get(i, j) - b.get(i, j)).powi(2))
        .sum::<f64>()
        .sqrt()
}
