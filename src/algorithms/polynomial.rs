//! Characteristic polynomial `p(λ) = det(λI - A)` in monic form.
//!
//! Two constructions are offered. [`leverrier_faddeev`] needs nothing but
//! matrix products and traces. [`krylov_polynomial`] solves one linear system
//! built from the Krylov sequence of `e_n`, and fails when that sequence does
//! not span the whole space (e.g. `A` diagonal, or `e_n` an eigenvector).

use crate::{
    error::LinalgError,
    matrix::Matrix,
    provider::LinearAlgebraProvider,
    results::PolynomialResult,
};

/// Leverrier-Faddeev recursion.
///
/// With `B_0 = I`: `c_k = -tr(A·B_{k-1}) / k` and `B_k = A·B_{k-1} + c_k·I`.
/// The last `B_n` is never formed.
pub fn leverrier_faddeev(a: &Matrix) -> Result<PolynomialResult, LinalgError> {
    let n = a.require_square("Leverrier-Faddeev method")?;
    let identity = Matrix::identity(n)?;

    let mut coefficients = Vec::with_capacity(n + 1);
    coefficients.push(1.0);

    let mut b = identity.clone();
    for k in 1..=n {
        let ab = a.matmul(&b)?;
        let c_k = -ab.trace()? / k as f64;
        coefficients.push(c_k);
        if k < n {
            b = ab.add(&identity.scale(c_k))?;
        }
    }

    Ok(PolynomialResult { coefficients })
}

/// Krylov method.
///
/// Builds `K = [v, A·v, …, A^(n-1)·v]` from `v = e_n` and solves
/// `K·c = -A^n·v` through `provider`. The solution holds the coefficients in
/// ascending order, so they are reversed behind the leading `1`.
///
/// # Errors
/// [`ProviderError::Singular`](crate::error::ProviderError::Singular), wrapped
/// as [`LinalgErrorKind::Provider`](crate::error::LinalgErrorKind::Provider),
/// when the Krylov matrix is singular.
pub fn krylov_polynomial<P: LinearAlgebraProvider>(
    a: &Matrix,
    provider: &P,
) -> Result<PolynomialResult, LinalgError> {
    let n = a.require_square("Krylov method")?;

    let mut current = vec![0.0; n];
    current[n - 1] = 1.0;

    let mut columns = Vec::with_capacity(n);
    for _ in 0..n {
        let next = a.apply(&current);
        columns.push(std::mem::replace(&mut current, next));
    }
    let krylov = Matrix::from_fn(n, n, |i, j| columns[j][i])?;
    let rhs: Vec<f64> = current.iter().map(|x| -x).collect();

    let ascending = provider.solve(&krylov, &rhs)?;

    let mut coefficients = Vec::with_capacity(n + 1);
    coefficients.push(1.0);
    coefficients.extend(ascending.iter().rev());
    Ok(PolynomialResult { coefficients })
}
