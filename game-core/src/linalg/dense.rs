//! Dense matrix primitives.

use nalgebra::DMatrix;
use thiserror::Error;

/// Dense linear algebra errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// Square matrix required
    #[error("expected square matrix, got {rows}×{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Incompatible operand shapes
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Chained product called with fewer than two factors
    #[error("matrix product requires at least two factors")]
    EmptyProduct,

    /// Matrix not invertible to working precision
    #[error("singular matrix")]
    SingularMatrix,

    /// No bounded Lyapunov solution exists for a non-Schur-stable matrix
    #[error("matrix is not Schur-stable: spectral radius {spectral_radius} >= 1")]
    NotSchurStable { spectral_radius: f64 },
}

/// Chained product of two or more matrices.
///
/// Validates the dimension chain before multiplying, so a shape bug in the
/// caller surfaces as a [`LinalgError::DimensionMismatch`] instead of a
/// panic deep inside an engine loop.
pub fn mdot(factors: &[&DMatrix<f64>]) -> Result<DMatrix<f64>, LinalgError> {
    let (first, rest) = match factors {
        [first, rest @ ..] if !rest.is_empty() => (first, rest),
        _ => return Err(LinalgError::EmptyProduct),
    };

    let mut acc: DMatrix<f64> = (*first).clone();
    for factor in rest {
        if acc.ncols() != factor.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: (acc.ncols(), factor.ncols()),
                actual: factor.shape(),
            });
        }
        acc = &acc * *factor;
    }
    Ok(acc)
}

/// Right-division solve: the X with `X·b = a`, behaviorally `a · b⁻¹`.
///
/// Implemented as an LU solve of the transposed system `bᵀ Xᵀ = aᵀ`; the
/// inverse of `b` is never formed.
pub fn solveb(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    if !b.is_square() {
        return Err(LinalgError::NotSquare {
            rows: b.nrows(),
            cols: b.ncols(),
        });
    }
    if a.ncols() != b.nrows() {
        return Err(LinalgError::DimensionMismatch {
            expected: (a.nrows(), b.nrows()),
            actual: a.shape(),
        });
    }

    let xt = b
        .transpose()
        .lu()
        .solve(&a.transpose())
        .ok_or(LinalgError::SingularMatrix)?;
    Ok(xt.transpose())
}

/// Spectral radius: maximum eigenvalue modulus.
///
/// The discrete-time stability criterion: a closed-loop map is Schur-stable
/// iff its spectral radius is < 1.
pub fn specrad(m: &DMatrix<f64>) -> Result<f64, LinalgError> {
    if !m.is_square() {
        return Err(LinalgError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    let eigenvalues = m.complex_eigenvalues();
    Ok(eigenvalues.iter().map(|e| e.norm()).fold(0.0, f64::max))
}

/// Symmetric part `(M + Mᵀ) / 2`.
///
/// Used after every Lyapunov/Riccati solve to keep floating-point asymmetry
/// from accumulating across iterations.
pub fn symmetrize(m: &DMatrix<f64>) -> DMatrix<f64> {
    (m + m.transpose()) * 0.5
}
