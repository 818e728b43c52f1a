//! GARE residual verifier.
//!
//! Diagnostic comparison of the two sides of the Riccati equation at a
//! candidate cost matrix. A correct fixed point drives the residual to
//! (near) zero; the engines themselves never look at it — convergence
//! assessment is deliberately left to the caller.

use nalgebra::DMatrix;

use super::qfun::gare_rhs;
use crate::linalg::LinalgError;
use crate::problem::GameData;

/// Residual of the GARE at `p`: `gare_rhs(data, p) − p`.
///
/// Read-only; neither `data` nor `p` is modified.
pub fn gare_residual(data: &GameData, p: &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    Ok(gare_rhs(data, p)? - p)
}

/// Frobenius norm of the GARE residual at `p`.
pub fn gare_residual_norm(data: &GameData, p: &DMatrix<f64>) -> Result<f64, LinalgError> {
    Ok(gare_residual(data, p)?.norm())
}
