//! Iterative solvers for the game Riccati equation.
//!
//! The generalized algebraic Riccati equation (GARE) of the zero-sum game is
//! the fixed point of the one-step Bellman operator
//!
//! ```text
//! P = Q + AᵀPA − [Qux; Qvx]ᵀ [[Quu, Quv], [Qvu, Qvv]]⁻¹ [Qux; Qvx]
//! ```
//!
//! where the Q-blocks are the quadratic-form coefficients of the action-value
//! function at P (see [`QBlocks`]). Two engines solve it:
//!
//! - [`policy_iteration`]: Newton-type, quadratically convergent, needs a
//!   stabilizing initial policy pair.
//! - [`value_iteration`]: fixed-point application of the operator itself,
//!   linearly convergent, no precondition.
//!
//! [`gare_residual`] checks a candidate solution by comparing the two sides
//! of the equation.

pub mod policy;
pub mod qfun;
pub mod residual;
pub mod value;

pub use policy::policy_iteration;
pub use qfun::{gare_rhs, QBlocks};
pub use residual::{gare_residual, gare_residual_norm};
pub use value::value_iteration;

use thiserror::Error;

use crate::linalg::LinalgError;

/// Riccati solver errors.
///
/// There is no "failed to converge" variant: both engines run the requested
/// iteration budget and always return a result. Assessing convergence is the
/// caller's job, via the cost-trace history or [`gare_residual_norm`].
#[derive(Debug, Error)]
pub enum RiccatiError {
    /// Problem or warm-start dimensions are inconsistent
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// Policy iteration's precondition failed; supply a different K₀/L₀
    #[error(
        "initial policies are not stabilizing: closed-loop spectral radius {spectral_radius} >= 1"
    )]
    NonStabilizingInitialPolicy { spectral_radius: f64 },

    /// A matrix primitive failed (singular block, unstable closed loop, ...).
    /// Fatal: the iteration halts at the point of failure with no retry and
    /// no partial results.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
