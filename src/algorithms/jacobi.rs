//! Cyclic-by-maximum Jacobi method for real symmetric matrices.
//!
//! Each step zeroes the largest off-diagonal entry with a plane rotation
//! `Jᵗ·A·J` and accumulates `V ← V·J`. Symmetry of the input is assumed and
//! never checked; only the upper triangle is scanned for the pivot.

use super::{IterationOptions, require_finite};
use crate::{error::LinalgError, matrix::Matrix, results::JacobiResult};

/// Computes all eigenvalues and eigenvectors of a symmetric matrix.
///
/// The eigenvalues come back in diagonal order, unsorted. Column `i` of the
/// eigenvector matrix belongs to `eigenvalues[i]`. Hitting the rotation cap
/// returns the current diagonal with `converged = false`.
///
/// # Arguments
/// * `a`: A square, symmetric matrix.
/// * `options`: Rotation cap and the off-diagonal threshold, see [`IterationOptions::JACOBI`].
pub fn jacobi_eigen(a: &Matrix, options: IterationOptions) -> Result<JacobiResult, LinalgError> {
    let n = a.require_square("Jacobi method")?;
    options.validate()?;
    require_finite(a, "Jacobi method")?;

    let mut current = a.clone();
    let mut v = Matrix::identity(n)?;

    for iter in 0..options.max_iterations {
        let (p, q, max) = largest_off_diagonal(&current);
        if max < options.tolerance {
            return Ok(JacobiResult {
                eigenvalues: current.diagonal(),
                eigenvectors: v,
                iterations: iter + 1,
                converged: true,
            });
        }

        let theta = 0.5 * f64::atan2(2.0 * current.get(p, q), current.get(q, q) - current.get(p, p));
        let (sin, cos) = theta.sin_cos();
        current = rotate(&current, p, q, cos, sin);

        for i in 0..n {
            let vip = v.get(i, p);
            let viq = v.get(i, q);
            v.set(i, p, cos * vip - sin * viq);
            v.set(i, q, sin * vip + cos * viq);
        }
    }

    log::debug!(
        "Jacobi method hit the rotation cap ({}) before the off-diagonal dropped below {}",
        options.max_iterations,
        options.tolerance
    );
    Ok(JacobiResult {
        eigenvalues: current.diagonal(),
        eigenvectors: v,
        iterations: options.max_iterations,
        converged: false,
    })
}

/// Position and magnitude of the largest `|a_ij|` with `i < j`.
///
/// Row-major scan starting from `(0, 1)`; a later entry replaces the current
/// maximum only when strictly greater, so the first of equal maxima wins.
/// A 1x1 matrix has no off-diagonal part and reports `(0, 0, 0.0)`.
fn largest_off_diagonal(a: &Matrix) -> (usize, usize, f64) {
    let n = a.rows();
    if n < 2 {
        return (0, 0, 0.0);
    }

    let (mut p, mut q) = (0, 1);
    let mut max = a.get(0, 1).abs();
    for i in 0..n {
        for j in (i + 1)..n {
            let value = a.get(i, j).abs();
            if value > max {
                max = value;
                p = i;
                q = j;
            }
        }
    }
    (p, q, max)
}

/// Applies the rotation in the `(p, q)` plane. All updates read `a`; the
/// result is written into a fresh copy.
fn rotate(a: &Matrix, p: usize, q: usize, cos: f64, sin: f64) -> Matrix {
    let n = a.rows();
    let mut next = a.clone();

    for i in (0..n).filter(|&i| i != p && i != q) {
        let aip = a.get(i, p);
        let aiq = a.get(i, q);
        let new_ip = cos * aip - sin * aiq;
        let new_iq = sin * aip + cos * aiq;
        next.set(i, p, new_ip);
        next.set(p, i, new_ip);
        next.set(i, q, new_iq);
        next.set(q, i, new_iq);
    }

    let (app, aqq, apq) = (a.get(p, p), a.get(q, q), a.get(p, q));
    next.set(p, p, cos * cos * app - 2.0 * sin * cos * apq + sin * sin * aqq);
    next.set(q, q, sin * sin * app + 2.0 * sin * cos * apq + cos * cos * aqq);
    next.set(p, q, 0.0);
    next.set(q, p, 0.0);
    next
}
