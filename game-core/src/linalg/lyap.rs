//! Discrete Lyapunov equation solver.
//!
//! Solves `a·X·aᵀ − X + q = 0` by Kronecker vectorization: with column-major
//! vec, `vec(a X aᵀ) = (a ⊗ a) vec X`, so the equation becomes the dense
//! linear system `(I − a ⊗ a) vec X = vec q`. An O(n⁶) solve, which is fine
//! at the state dimensions these games run at; a Bartels-Stewart variant
//! would be the upgrade path for large n.

use nalgebra::{DMatrix, DVector};

use super::dense::{specrad, symmetrize, LinalgError};

/// Solve the discrete Lyapunov equation `a·X·aᵀ − X + q = 0`.
///
/// Returns the unique symmetric solution for symmetric `q`. Fails with
/// [`LinalgError::NotSchurStable`] when `specrad(a) >= 1`, since no bounded
/// solution exists.
pub fn dlyap(a: &DMatrix<f64>, q: &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    let n = a.nrows();
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if q.shape() != (n, n) {
        return Err(LinalgError::DimensionMismatch {
            expected: (n, n),
            actual: q.shape(),
        });
    }

    let rho = specrad(a)?;
    if rho >= 1.0 {
        return Err(LinalgError::NotSchurStable {
            spectral_radius: rho,
        });
    }

    let lhs = DMatrix::identity(n * n, n * n) - a.kronecker(a);
    let rhs = DVector::from_column_slice(q.as_slice());
    let x = lhs.lu().solve(&rhs).ok_or(LinalgError::SingularMatrix)?;

    let solution = DMatrix::from_column_slice(n, n, x.as_slice());
    Ok(symmetrize(&solution))
}
