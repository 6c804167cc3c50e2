//! This module defines the dense matrix substrate shared by every kernel.
//!
//! [`Matrix`] is a thin owner of a [`faer::Mat<f64>`] that enforces the one
//! structural invariant the algorithms rely on: both dimensions are at least
//! one. The shape is fixed at construction; element writes through
//! [`Matrix::set`] never change it.
//!
//! Algorithms never mutate a caller's matrix. Whenever scratch space is needed
//! they clone the input and work on the copy, so concurrent read-only calls
//! against the same `Matrix` are safe without locking.
//!
//! Conversions to and from nested rows (`Vec<Vec<f64>>`) are lossless, which is
//! the form presentation layers marshal matrices in.

use crate::error::{LinalgError, LinalgErrorKind};
use faer::{Mat, MatRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dense, rectangular matrix of `f64` values with at least one row and one column.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Mat<f64>,
}

impl Matrix {
    /// Builds a matrix from a sequence of rows.
    ///
    /// Fails with a shape error if there are no rows, the first row is empty, or
    /// any row differs in length from the first one.
    ///
    /// ```
    /// use eigenlab::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[4.0, 1.0], [2.0, 3.0]]).unwrap();
    /// assert_eq!(a.shape(), (2, 2));
    /// assert_eq!(a.get(1, 0), 2.0);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        if nrows == 0 || ncols == 0 {
            return Err(LinalgErrorKind::EmptyMatrix.into());
        }

        for (row, values) in rows.iter().enumerate() {
            let actual = values.as_ref().len();
            if actual != ncols {
                return Err(LinalgErrorKind::RaggedRows {
                    row,
                    expected: ncols,
                    actual,
                }
                .into());
            }
        }

        Ok(Self {
            data: Mat::from_fn(nrows, ncols, |i, j| rows[i].as_ref()[j]),
        })
    }

    /// Builds a `rows x cols` matrix whose entry `(i, j)` is `f(i, j)`.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, LinalgError> {
        if rows == 0 || cols == 0 {
            return Err(LinalgErrorKind::EmptyMatrix.into());
        }
        Ok(Self {
            data: Mat::from_fn(rows, cols, f),
        })
    }

    /// A `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, LinalgError> {
        Self::from_fn(rows, cols, |_, _| 0.0)
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, LinalgError> {
        Self::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Wraps an owned `faer` matrix, rejecting degenerate shapes.
    pub fn from_faer(data: Mat<f64>) -> Result<Self, LinalgError> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(LinalgErrorKind::EmptyMatrix.into());
        }
        Ok(Self { data })
    }

    /// Wraps a `faer` matrix produced from an existing non-empty `Matrix`.
    pub(crate) fn from_faer_unchecked(data: Mat<f64>) -> Self {
        debug_assert!(data.nrows() > 0 && data.ncols() > 0);
        Self { data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Returns the entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data.as_ref()[(row, col)]
    }

    /// Overwrites the entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data.as_mut()[(row, col)] = value;
    }

    /// A read-only `faer` view of the backing storage.
    #[inline]
    pub fn as_faer(&self) -> MatRef<'_, f64> {
        self.data.as_ref()
    }

    /// Consumes the matrix and returns the backing `faer` matrix.
    pub fn into_faer(self) -> Mat<f64> {
        self.data
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows())
            .map(|i| (0..self.cols()).map(|j| self.get(i, j)).collect())
            .collect()
    }

    /// Copies column `col` out as a vector.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows()).map(|i| self.get(i, col)).collect()
    }

    /// The main diagonal, of length `min(rows, cols)`.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows().min(self.cols()))
            .map(|i| self.get(i, i))
            .collect()
    }

    /// Fails with [`LinalgErrorKind::NotSquare`] unless the matrix is square,
    /// returning its order otherwise.
    pub fn require_square(&self, operation: &'static str) -> Result<usize, LinalgError> {
        if !self.is_square() {
            return Err(LinalgErrorKind::NotSquare {
                operation,
                rows: self.rows(),
                cols: self.cols(),
            }
            .into());
        }
        Ok(self.rows())
    }

    pub fn transpose(&self) -> Matrix {
        Self::from_faer_unchecked(self.data.transpose().to_owned())
    }

    /// Matrix product `self * rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols() != rhs.rows() {
            return Err(LinalgErrorKind::DimensionMismatch {
                expected: format!("{} rows on the right operand", self.cols()),
                actual: format!("{}x{}", rhs.rows(), rhs.cols()),
            }
            .into());
        }
        Ok(Self::from_faer_unchecked(&self.data * &rhs.data))
    }

    /// Entry-wise sum.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(Self::from_faer_unchecked(&self.data + &rhs.data))
    }

    /// Entry-wise difference.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(Self::from_faer_unchecked(&self.data - &rhs.data))
    }

    /// Multiplies every entry by `factor`.
    pub fn scale(&self, factor: f64) -> Matrix {
        Self::from_faer_unchecked(Mat::from_fn(self.rows(), self.cols(), |i, j| {
            factor * self.get(i, j)
        }))
    }

    /// `self - shift * I` for a square matrix.
    pub(crate) fn shifted(&self, shift: f64) -> Matrix {
        let mut out = self.clone();
        for i in 0..self.rows().min(self.cols()) {
            out.set(i, i, self.get(i, i) - shift);
        }
        out
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>, LinalgError> {
        if v.len() != self.cols() {
            return Err(LinalgErrorKind::DimensionMismatch {
                expected: format!("vector of length {}", self.cols()),
                actual: format!("vector of length {}", v.len()),
            }
            .into());
        }
        Ok(self.apply(v))
    }

    /// Matrix-vector product without the length check; callers guarantee `v.len() == cols`.
    pub(crate) fn apply(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols());
        (0..self.rows())
            .map(|i| {
                let mut sum = 0.0;
                for (j, &vj) in v.iter().enumerate() {
                    sum += self.get(i, j) * vj;
                }
                sum
            })
            .collect()
    }

    /// Sum of the diagonal entries of a square matrix.
    pub fn trace(&self) -> Result<f64, LinalgError> {
        let n = self.require_square("Trace")?;
        Ok((0..n).map(|i| self.get(i, i)).sum())
    }

    /// Raises a square matrix to a non-negative integer power; `k = 0` yields the identity.
    pub fn power(&self, k: u32) -> Result<Matrix, LinalgError> {
        let n = self.require_square("Matrix power")?;
        if k == 0 {
            return Self::identity(n);
        }
        let mut result = self.clone();
        for _ in 1..k {
            result = result.matmul(self)?;
        }
        Ok(result)
    }

    /// The symmetric part `(A + Aᵗ) / 2` of a square matrix.
    pub fn symmetrize(&self) -> Result<Matrix, LinalgError> {
        let n = self.require_square("Symmetrization")?;
        Ok(Self::from_faer_unchecked(Mat::from_fn(n, n, |i, j| {
            0.5 * (self.get(i, j) + self.get(j, i))
        })))
    }

    /// True if the matrix is square and `|a_ij - a_ji| <= tolerance` for all entries.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows();
        (0..n).all(|i| (i + 1..n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance))
    }

    /// Largest entry-wise absolute difference between two matrices of equal shape.
    pub fn max_abs_diff(&self, other: &Matrix) -> Result<f64, LinalgError> {
        self.check_same_shape(other)?;
        let mut max = 0.0_f64;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                max = max.max((self.get(i, j) - other.get(i, j)).abs());
            }
        }
        Ok(max)
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<(), LinalgError> {
        if self.shape() != other.shape() {
            return Err(LinalgErrorKind::DimensionMismatch {
                expected: format!("{}x{}", self.rows(), self.cols()),
                actual: format!("{}x{}", other.rows(), other.cols()),
            }
            .into());
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = LinalgError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(&rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.to_rows()
    }
}

/// Fixed-width rendering: one line per row, 8-wide cells with two decimals.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                write!(f, "{:8.2}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Serialized as nested rows so that JSON/CSV consumers never see faer's layout.
impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        Matrix::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}
