//! The narrow interface to a general dense linear-algebra provider.
//!
//! The hand-written kernels in [`crate::algorithms`] only need a handful of
//! general-purpose operations they do not implement themselves: a QR
//! factorization (QR iteration), a reusable linear solve (inverse power,
//! Rayleigh quotient and Krylov methods), and, for the diagnostics, an SVD
//! and matrix norms. [`LinearAlgebraProvider`] formalizes that contract so the
//! algorithms can be exercised against a mock in tests.
//!
//! [`FaerProvider`] is the production implementation, built on [`faer`]'s
//! dense decompositions.

use crate::{error::ProviderError, matrix::Matrix};
use faer::{Mat, linalg::solvers::PartialPivLu, prelude::*};
use serde::{Deserialize, Serialize};

/// Threshold under which `|det(A)|` is treated as singular by [`LinearAlgebraProvider::inverse`].
pub const INVERSE_DETERMINANT_THRESHOLD: f64 = 1e-12;

/// The matrix norms understood by [`LinearAlgebraProvider::norm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormKind {
    /// Square root of the sum of squared entries.
    Frobenius,
    /// Maximum absolute column sum.
    One,
    /// Maximum absolute row sum.
    Infinity,
    /// Largest singular value (spectral norm).
    Two,
}

/// Output of a singular value decomposition `A = U·Σ·Vᵗ`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SvdOutput {
    pub u: Matrix,
    /// Singular values in non-increasing order, `min(rows, cols)` of them.
    pub singular_values: Vec<f64>,
    pub vt: Matrix,
}

/// A factorized square system that can be solved for many right-hand sides.
pub trait LuSolver {
    /// Order of the factorized matrix.
    fn order(&self) -> usize;

    /// Solves `A·x = b` for `x`.
    fn solve(&self, b: &[f64]) -> Result<Vec<f64>, ProviderError>;
}

/// General dense linear algebra consumed, but not implemented, by the kernels.
pub trait LinearAlgebraProvider {
    /// The factorization handle returned by [`LinearAlgebraProvider::factorize`].
    type Lu: LuSolver;

    /// Factors `A = Q·R` with `Q` orthogonal and `R` upper-triangular.
    fn qr(&self, a: &Matrix) -> Result<(Matrix, Matrix), ProviderError>;

    /// Factors a square matrix for repeated solves. Fails with
    /// [`ProviderError::Singular`] if the matrix cannot be factored.
    fn factorize(&self, a: &Matrix) -> Result<Self::Lu, ProviderError>;

    /// Solves `A·x = b` once.
    fn solve(&self, a: &Matrix, b: &[f64]) -> Result<Vec<f64>, ProviderError> {
        self.factorize(a)?.solve(b)
    }

    fn svd(&self, a: &Matrix) -> Result<SvdOutput, ProviderError>;

    fn determinant(&self, a: &Matrix) -> Result<f64, ProviderError>;

    fn inverse(&self, a: &Matrix) -> Result<Matrix, ProviderError>;

    /// Moore-Penrose pseudo-inverse.
    fn pseudo_inverse(&self, a: &Matrix) -> Result<Matrix, ProviderError>;

    fn rank(&self, a: &Matrix) -> Result<usize, ProviderError>;

    fn norm(&self, a: &Matrix, kind: NormKind) -> Result<f64, ProviderError>;
}

/// [`LinearAlgebraProvider`] backed by [`faer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FaerProvider;

/// A partial-pivoting LU factorization held by [`FaerProvider`].
pub struct FaerLu {
    lu: PartialPivLu<f64>,
    n: usize,
}

impl LuSolver for FaerLu {
    fn order(&self) -> usize {
        self.n
    }

    fn solve(&self, b: &[f64]) -> Result<Vec<f64>, ProviderError> {
        if b.len() != self.n {
            return Err(ProviderError::DimensionMismatch {
                expected: self.n,
                actual: b.len(),
            });
        }
        let rhs = Mat::from_fn(self.n, 1, |i, _| b[i]);
        let x = self.lu.solve(&rhs);
        let x: Vec<f64> = (0..self.n).map(|i| x.as_ref()[(i, 0)]).collect();

        // A tiny but non-zero pivot can still overflow the solution.
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ProviderError::Singular);
        }
        Ok(x)
    }
}

impl FaerProvider {
    fn require_square(a: &Matrix, operation: &'static str) -> Result<usize, ProviderError> {
        if a.is_square() {
            Ok(a.rows())
        } else {
            Err(ProviderError::NotSquare(operation))
        }
    }

    /// Sign of a permutation given by its forward index array.
    fn permutation_sign(forward: &[usize]) -> f64 {
        let mut visited = vec![false; forward.len()];
        let mut sign = 1.0;
        for start in 0..forward.len() {
            if visited[start] {
                continue;
            }
            let mut len = 0;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                i = forward[i];
                len += 1;
            }
            if len % 2 == 0 {
                sign = -sign;
            }
        }
        sign
    }

    /// Partial pivoting only leaves an exact zero on the diagonal of U when a
    /// whole sub-column vanished, i.e. the matrix is singular. faer divides by
    /// that zero, so every pivot after it may be NaN.
    fn has_zero_pivot(lu: &PartialPivLu<f64>, n: usize) -> bool {
        let u = lu.U();
        (0..n).any(|i| u[(i, i)] == 0.0 || !u[(i, i)].is_finite())
    }

    /// Relative cut-off under which a singular value counts as zero.
    fn rank_tolerance(a: &Matrix, singular_values: &[f64]) -> f64 {
        let largest = singular_values.iter().copied().fold(0.0, f64::max);
        a.rows().max(a.cols()) as f64 * f64::EPSILON * largest
    }
}

impl LinearAlgebraProvider for FaerProvider {
    type Lu = FaerLu;

    fn qr(&self, a: &Matrix) -> Result<(Matrix, Matrix), ProviderError> {
        let qr = a.as_faer().qr();
        let q = Matrix::from_faer_unchecked(qr.compute_Q());
        let r = Matrix::from_faer_unchecked(qr.R().to_owned());
        Ok((q, r))
    }

    fn factorize(&self, a: &Matrix) -> Result<FaerLu, ProviderError> {
        let n = Self::require_square(a, "LU factorization")?;
        let lu = a.as_faer().partial_piv_lu();

        if Self::has_zero_pivot(&lu, n) {
            log::trace!("LU factorization rejected: zero pivot on the diagonal of U");
            return Err(ProviderError::Singular);
        }

        Ok(FaerLu { lu, n })
    }

    fn svd(&self, a: &Matrix) -> Result<SvdOutput, ProviderError> {
        let svd = a
            .as_faer()
            .svd()
            .map_err(|_| ProviderError::SvdNoConvergence)?;
        let k = a.rows().min(a.cols());
        let s = svd.S();
        let singular_values = (0..k).map(|i| s[i]).collect();

        Ok(SvdOutput {
            u: Matrix::from_faer_unchecked(svd.U().to_owned()),
            singular_values,
            vt: Matrix::from_faer_unchecked(svd.V().transpose().to_owned()),
        })
    }

    fn determinant(&self, a: &Matrix) -> Result<f64, ProviderError> {
        let n = Self::require_square(a, "Determinant")?;
        let lu = a.as_faer().partial_piv_lu();
        if Self::has_zero_pivot(&lu, n) {
            return Ok(0.0);
        }
        let u = lu.U();
        let (forward, _) = lu.P().arrays();
        let product: f64 = (0..n).map(|i| u[(i, i)]).product();
        Ok(Self::permutation_sign(forward) * product)
    }

    fn inverse(&self, a: &Matrix) -> Result<Matrix, ProviderError> {
        let n = Self::require_square(a, "Inverse")?;
        // Negated so that a NaN determinant is rejected too.
        if !(self.determinant(a)?.abs() >= INVERSE_DETERMINANT_THRESHOLD) {
            return Err(ProviderError::Singular);
        }
        let lu = a.as_faer().partial_piv_lu();
        let identity = Mat::<f64>::identity(n, n);
        Ok(Matrix::from_faer_unchecked(lu.solve(&identity)))
    }

    fn pseudo_inverse(&self, a: &Matrix) -> Result<Matrix, ProviderError> {
        let SvdOutput {
            u,
            singular_values,
            vt,
        } = self.svd(a)?;
        let tol = Self::rank_tolerance(a, &singular_values);

        // A⁺ = V·Σ⁺·Uᵗ, dropping singular values under the rank tolerance.
        let pinv = Mat::from_fn(a.cols(), a.rows(), |i, j| {
            singular_values
                .iter()
                .enumerate()
                .filter(|&(_, &s)| s > tol)
                .map(|(k, &s)| vt.get(k, i) * u.get(j, k) / s)
                .sum()
        });
        Ok(Matrix::from_faer_unchecked(pinv))
    }

    fn rank(&self, a: &Matrix) -> Result<usize, ProviderError> {
        let singular_values = self.svd(a)?.singular_values;
        let tol = Self::rank_tolerance(a, &singular_values);
        Ok(singular_values.iter().filter(|&&s| s > tol).count())
    }

    fn norm(&self, a: &Matrix, kind: NormKind) -> Result<f64, ProviderError> {
        let (m, n) = a.shape();
        let value = match kind {
            NormKind::Frobenius => a.as_faer().norm_l2(),
            NormKind::One => (0..n)
                .map(|j| (0..m).map(|i| a.get(i, j).abs()).sum::<f64>())
                .fold(0.0, f64::max),
            NormKind::Infinity => (0..m)
                .map(|i| (0..n).map(|j| a.get(i, j).abs()).sum::<f64>())
                .fold(0.0, f64::max),
            NormKind::Two => self
                .svd(a)?
                .singular_values
                .into_iter()
                .fold(0.0, f64::max),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(&[[4.0, -2.0, 1.0], [3.0, 6.0, -4.0], [2.0, 1.0, 8.0]]).unwrap()
    }

    #[test]
    fn test_qr_reproduces_input() {
        let a = sample();
        let (q, r) = FaerProvider.qr(&a).unwrap();
        let qr = q.matmul(&r).unwrap();
        assert!(qr.max_abs_diff(&a).unwrap() < 1e-12);
        for i in 0..3 {
            for j in 0..i {
                assert!(r.get(i, j).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_solve_and_singular_detection() {
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
        let x = FaerProvider.solve(&a, &[3.0, 5.0]).unwrap();
        assert!((x[0] - 0.8).abs() < 1e-14);
        assert!((x[1] - 1.4).abs() < 1e-14);

        let singular = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(
            FaerProvider.factorize(&singular).err(),
            Some(ProviderError::Singular)
        );

        let lu = FaerProvider.factorize(&a).unwrap();
        assert_eq!(lu.order(), 2);
        assert_eq!(
            lu.solve(&[1.0]).unwrap_err(),
            ProviderError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_determinant_inverse_and_rank() {
        let a = sample();
        // 4(48 + 4) + 2(24 + 8) + 1(3 - 12) = 263
        assert!((FaerProvider.determinant(&a).unwrap() - 263.0).abs() < 1e-10);

        let inv = FaerProvider.inverse(&a).unwrap();
        let id = a.matmul(&inv).unwrap();
        assert!(id.max_abs_diff(&Matrix::identity(3).unwrap()).unwrap() < 1e-12);

        let swapped = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        assert!((FaerProvider.determinant(&swapped).unwrap() + 1.0).abs() < 1e-15);

        let singular = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(
            FaerProvider.inverse(&singular).unwrap_err(),
            ProviderError::Singular
        );
        assert_eq!(FaerProvider.rank(&singular).unwrap(), 1);
        assert_eq!(FaerProvider.rank(&a).unwrap(), 3);
    }

    #[test]
    fn test_zero_leading_column_is_singular() {
        let a = Matrix::from_rows(&[[0.0, 1.0], [0.0, 2.0]]).unwrap();
        assert_eq!(FaerProvider.determinant(&a).unwrap(), 0.0);
        assert_eq!(FaerProvider.inverse(&a).unwrap_err(), ProviderError::Singular);
        assert_eq!(FaerProvider.factorize(&a).err(), Some(ProviderError::Singular));

        let zero = Matrix::zeros(3, 3).unwrap();
        assert_eq!(FaerProvider.determinant(&zero).unwrap(), 0.0);
        assert_eq!(FaerProvider.inverse(&zero).unwrap_err(), ProviderError::Singular);
    }

    #[test]
    fn test_pseudo_inverse_of_rectangular_matrix() {
        let a = Matrix::from_rows(&[[1.0, 0.0], [0.0, 2.0], [0.0, 0.0]]).unwrap();
        let pinv = FaerProvider.pseudo_inverse(&a).unwrap();
        assert_eq!(pinv.shape(), (2, 3));
        let expected = Matrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 0.5, 0.0]]).unwrap();
        assert!(pinv.max_abs_diff(&expected).unwrap() < 1e-12);
    }

    #[test]
    fn test_norms() {
        let a = Matrix::from_rows(&[[1.0, -2.0], [-3.0, 4.0]]).unwrap();
        let p = FaerProvider;
        assert!((p.norm(&a, NormKind::Frobenius).unwrap() - 30f64.sqrt()).abs() < 1e-12);
        assert_eq!(p.norm(&a, NormKind::One).unwrap(), 6.0);
        assert_eq!(p.norm(&a, NormKind::Infinity).unwrap(), 7.0);

        let diag = Matrix::from_rows(&[[3.0, 0.0], [0.0, -5.0]]).unwrap();
        assert!((p.norm(&diag, NormKind::Two).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_svd_reconstructs_input() {
        let a = sample();
        let svd = FaerProvider.svd(&a).unwrap();
        assert_eq!(svd.singular_values.len(), 3);
        let sigma = Matrix::from_fn(3, 3, |i, j| {
            if i == j { svd.singular_values[i] } else { 0.0 }
        })
        .unwrap();
        let rebuilt = svd.u.matmul(&sigma).unwrap().matmul(&svd.vt).unwrap();
        assert!(rebuilt.max_abs_diff(&a).unwrap() < 1e-10);
    }
}
