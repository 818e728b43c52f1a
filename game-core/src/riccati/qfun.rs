//! Q-function blocks of the one-step action-value function.
//!
//! At a cost matrix P, the action-value function of the game is the
//! quadratic form in (x, u, v) with blocks
//!
//! ```text
//! Qux = BᵀPA     Quu = R + BᵀPB     Quv = BᵀPC
//! Qvx = CᵀPA     Qvu = Quvᵀ         Qvv = −S + CᵀPC
//! ```
//!
//! The saddle point of the local quadratic game is the stacked gain solving
//! `[[Quu, Quv], [Qvu, Qvv]] · [u; v] = −[Qux; Qvx]`. Solving the full 2×2
//! block system with one LU factorization sidesteps the choice between the
//! two Schur-complement elimination orderings, which are only equivalent
//! when both diagonal blocks are invertible.

use nalgebra::DMatrix;

use crate::linalg::{mdot, symmetrize, LinalgError};
use crate::problem::GameData;

/// Quadratic-form blocks of the action-value function at a cost matrix P.
///
/// `Qvu` is not stored; it is materialized as `Quvᵀ` during assembly.
#[derive(Debug, Clone)]
pub struct QBlocks {
    /// BᵀPA (m × n)
    pub qux: DMatrix<f64>,

    /// CᵀPA (p × n)
    pub qvx: DMatrix<f64>,

    /// R + BᵀPB (m × m)
    pub quu: DMatrix<f64>,

    /// BᵀPC (m × p)
    pub quv: DMatrix<f64>,

    /// −S + CᵀPC (p × p)
    pub qvv: DMatrix<f64>,
}

impl QBlocks {
    /// Evaluate the blocks at `p`. Fails when `p` is not n×n.
    pub fn new(data: &GameData, p: &DMatrix<f64>) -> Result<Self, LinalgError> {
        let bt = data.B.transpose();
        let ct = data.C.transpose();

        Ok(Self {
            qux: mdot(&[&bt, p, &data.A])?,
            qvx: mdot(&[&ct, p, &data.A])?,
            quu: &data.R + mdot(&[&bt, p, &data.B])?,
            quv: mdot(&[&bt, p, &data.C])?,
            qvv: -&data.S + mdot(&[&ct, p, &data.C])?,
        })
    }

    /// Stacked state coupling `[Qux; Qvx]`, shape (m+p) × n.
    pub fn stacked_rhs(&self) -> DMatrix<f64> {
        let (m, n) = self.qux.shape();
        let p = self.qvx.nrows();

        let mut stacked = DMatrix::zeros(m + p, n);
        stacked.view_mut((0, 0), (m, n)).copy_from(&self.qux);
        stacked.view_mut((m, 0), (p, n)).copy_from(&self.qvx);
        stacked
    }

    /// Full action-coupling matrix `[[Quu, Quv], [Qvu, Qvv]]`, shape
    /// (m+p) × (m+p). Symmetric whenever P is.
    pub fn block_matrix(&self) -> DMatrix<f64> {
        let m = self.quu.nrows();
        let p = self.qvv.nrows();

        let mut block = DMatrix::zeros(m + p, m + p);
        block.view_mut((0, 0), (m, m)).copy_from(&self.quu);
        block.view_mut((0, m), (m, p)).copy_from(&self.quv);
        block
            .view_mut((m, 0), (p, m))
            .copy_from(&self.quv.transpose());
        block.view_mut((m, m), (p, p)).copy_from(&self.qvv);
        block
    }

    /// Saddle-point gains: solve the stacked block system for `[K; L]` and
    /// split. Fails with [`LinalgError::SingularMatrix`] when the block
    /// matrix is not invertible to working precision.
    pub fn solve_gains(&self) -> Result<(DMatrix<f64>, DMatrix<f64>), LinalgError> {
        let m = self.quu.nrows();
        let p = self.qvv.nrows();

        let gains = self
            .block_matrix()
            .lu()
            .solve(&(-self.stacked_rhs()))
            .ok_or(LinalgError::SingularMatrix)?;

        Ok((gains.rows(0, m).into_owned(), gains.rows(m, p).into_owned()))
    }
}

/// One-step GARE operator: `Q + AᵀPA − [Qux;Qvx]ᵀ · block⁻¹ · [Qux;Qvx]`.
///
/// This is both the value-iteration update and the right-hand side the
/// residual verifier compares against. The result is symmetrized so that
/// repeated application cannot drift off the symmetric manifold.
pub fn gare_rhs(data: &GameData, p: &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    let blocks = QBlocks::new(data, p)?;
    let stacked = blocks.stacked_rhs();
    let solved = blocks
        .block_matrix()
        .lu()
        .solve(&stacked)
        .ok_or(LinalgError::SingularMatrix)?;

    let at = data.A.transpose();
    let rhs = &data.Q + mdot(&[&at, p, &data.A])? - stacked.transpose() * solved;
    Ok(symmetrize(&rhs))
}
