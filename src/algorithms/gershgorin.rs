//! Gershgorin disc bounds.
//!
//! Every eigenvalue lies in at least one disc centered at `a_ii` with radius
//! `Σ_{j≠i} |a_ij|`. Only the real axis is reported, so each disc is an
//! interval and the union is bounded by `[min_bound, max_bound]`.

use crate::{
    error::LinalgError,
    matrix::Matrix,
    results::{Disc, GershgorinResult},
};

/// Computes one disc per row and the global interval containing every real eigenvalue.
pub fn gershgorin_discs(a: &Matrix) -> Result<GershgorinResult, LinalgError> {
    let n = a.require_square("Gershgorin discs")?;

    let discs: Vec<Disc> = (0..n)
        .map(|i| Disc {
            center: a.get(i, i),
            radius: (0..n).filter(|&j| j != i).map(|j| a.get(i, j).abs()).sum(),
        })
        .collect();

    let min_bound = discs.iter().map(Disc::lower).fold(f64::INFINITY, f64::min);
    let max_bound = discs.iter().map(Disc::upper).fold(f64::NEG_INFINITY, f64::max);

    Ok(GershgorinResult {
        discs,
        min_bound,
        max_bound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tridiagonal_discs() {
        let a = Matrix::from_rows(&[[4.0, -1.0, 0.0], [-1.0, 3.0, -1.0], [0.0, -1.0, 2.0]]).unwrap();
        let result = gershgorin_discs(&a).unwrap();
        let centers: Vec<f64> = result.discs.iter().map(|d| d.center).collect();
        let radii: Vec<f64> = result.discs.iter().map(|d| d.radius).collect();
        assert_eq!(centers, vec![4.0, 3.0, 2.0]);
        assert_eq!(radii, vec![1.0, 2.0, 1.0]);
        assert_eq!((result.min_bound, result.max_bound), (1.0, 5.0));
    }

    #[test]
    fn test_scalar_disc_is_a_point() {
        let a = Matrix::from_rows(&[[5.0]]).unwrap();
        let result = gershgorin_discs(&a).unwrap();
        assert_eq!(result.discs, vec![Disc { center: 5.0, radius: 0.0 }]);
        assert_eq!((result.min_bound, result.max_bound), (5.0, 5.0));
    }

    #[test]
    fn test_rectangular_input_is_rejected() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let err = gershgorin_discs(&a).unwrap_err();
        assert!(err.kind().is_shape_error());
    }
}
