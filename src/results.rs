//! Result records returned by the kernels.
//!
//! Every record is produced by a single call, returned by value and owned by
//! the caller; none keeps a reference to the input matrix. All of them derive
//! [`serde::Serialize`] so presentation layers can marshal them directly.

use crate::{error::LinalgError, matrix::Matrix};
use serde::Serialize;
use std::fmt;

/// A single eigenpair estimate from the power-iteration family.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EigenResult {
    pub eigenvalue: f64,
    /// Unit-length (Euclidean) eigenvector estimate.
    pub eigenvector: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

impl EigenResult {
    /// The exact eigenpair of a 1x1 matrix.
    pub(crate) fn scalar(value: f64) -> Self {
        Self {
            eigenvalue: value,
            eigenvector: vec![1.0],
            iterations: 1,
            converged: true,
        }
    }

    /// Euclidean norm of the residual `A·v - λ·v`.
    pub fn residual_norm(&self, a: &Matrix) -> Result<f64, LinalgError> {
        let av = a.mul_vec(&self.eigenvector)?;
        Ok(av
            .iter()
            .zip(&self.eigenvector)
            .map(|(x, v)| (x - self.eigenvalue * v).powi(2))
            .sum::<f64>()
            .sqrt())
    }
}

/// All eigenvalues of a matrix, in diagonal order (not sorted).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpectrumResult {
    pub eigenvalues: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Full eigendecomposition of a symmetric matrix from the Jacobi method.
///
/// Column `i` of `eigenvectors` belongs to `eigenvalues[i]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JacobiResult {
    pub eigenvalues: Vec<f64>,
    pub eigenvectors: Matrix,
    pub iterations: usize,
    pub converged: bool,
}

impl JacobiResult {
    /// Drops the eigenvectors.
    pub fn into_spectrum(self) -> SpectrumResult {
        SpectrumResult {
            eigenvalues: self.eigenvalues,
            iterations: self.iterations,
            converged: self.converged,
        }
    }

    /// Rebuilds `V·diag(λ)·Vᵗ`.
    pub fn reconstruct(&self) -> Result<Matrix, LinalgError> {
        let n = self.eigenvalues.len();
        let lambda = Matrix::from_fn(n, n, |i, j| if i == j { self.eigenvalues[i] } else { 0.0 })?;
        self.eigenvectors
            .matmul(&lambda)?
            .matmul(&self.eigenvectors.transpose())
    }
}

/// A Gershgorin interval on the real line: `[center - radius, center + radius]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Disc {
    pub center: f64,
    pub radius: f64,
}

impl Disc {
    pub fn lower(&self) -> f64 {
        self.center - self.radius
    }

    pub fn upper(&self) -> f64 {
        self.center + self.radius
    }

    pub fn contains(&self, x: f64) -> bool {
        (x - self.center).abs() <= self.radius
    }
}

/// One disc per row plus the global bound on the real spectrum.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GershgorinResult {
    pub discs: Vec<Disc>,
    pub min_bound: f64,
    pub max_bound: f64,
}

/// Characteristic polynomial coefficients, leading term first.
///
/// `coefficients[0]` is always `1.0` and there are `n + 1` entries for an
/// `n x n` matrix, so `p(λ) = Σ coefficients[i] · λ^(n - i)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolynomialResult {
    pub coefficients: Vec<f64>,
}

impl PolynomialResult {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at `x` by Horner's rule.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Renders `λ^n - 3.0000λ^(n-1) + ... + c` with four decimals per coefficient.
impl fmt::Display for PolynomialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degree = self.degree();
        for (i, &coeff) in self.coefficients.iter().enumerate() {
            let power = degree - i;
            if i > 0 {
                f.write_str(if coeff >= 0.0 { " + " } else { " - " })?;
            } else if coeff < 0.0 {
                f.write_str("-")?;
            }
            write!(f, "{:.4}", coeff.abs())?;
            match power {
                0 => {}
                1 => f.write_str("λ")?,
                _ => write!(f, "λ^{power}")?,
            }
        }
        Ok(())
    }
}

/// A pair of triangular factors: `(L, U)` from LU or `(L, Lᵗ)` from Cholesky.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TriangularPair {
    pub lower: Matrix,
    pub upper: Matrix,
}

impl TriangularPair {
    /// The product `lower · upper`, which approximates the factored matrix.
    pub fn reconstruct(&self) -> Result<Matrix, LinalgError> {
        self.lower.matmul(&self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polynomial_evaluation_and_rendering() {
        // λ² - 7λ + 10 = (λ - 2)(λ - 5)
        let p = PolynomialResult {
            coefficients: vec![1.0, -7.0, 10.0],
        };
        assert_eq!(p.degree(), 2);
        assert_eq!(p.evaluate(2.0), 0.0);
        assert_eq!(p.evaluate(5.0), 0.0);
        assert_eq!(p.evaluate(0.0), 10.0);
        assert_eq!(p.to_string(), "1.0000λ^2 - 7.0000λ + 10.0000");
    }

    #[test]
    fn test_disc_bounds() {
        let disc = Disc {
            center: 3.0,
            radius: 2.0,
        };
        assert_eq!((disc.lower(), disc.upper()), (1.0, 5.0));
        assert!(disc.contains(1.0));
        assert!(!disc.contains(5.5));
    }

    #[test]
    fn test_eigen_result_residual() {
        let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 3.0]]).unwrap();
        let exact = EigenResult {
            eigenvalue: 3.0,
            eigenvector: vec![0.0, 1.0],
            iterations: 1,
            converged: true,
        };
        assert_eq!(exact.residual_norm(&a).unwrap(), 0.0);
        assert_eq!(EigenResult::scalar(7.0).eigenvector, vec![1.0]);
    }
}
