//! Gamix: saddle-point Riccati solvers for two-player zero-sum LQ dynamic games
//!
//! This library computes a stabilizing feedback policy pair for a discrete-time
//! zero-sum linear-quadratic dynamic game: a controller minimizes a quadratic
//! cost while an adversary maximizes it, both acting through shared linear
//! dynamics
//!
//! ```text
//! x⁺ = A x + B u + C v,    cost  Σ  xᵀQx + uᵀRu − vᵀSv
//! ```
//!
//! The saddle-point solution is characterized by a symmetric cost-to-go matrix
//! P satisfying a generalized algebraic Riccati equation (GARE), together with
//! linear feedback gains u = Kx and v = Lx. Two iterative solvers are provided:
//!
//! - **Policy iteration** ([`policy_iteration`]): Newton-type method that
//!   alternates exact policy evaluation (a discrete Lyapunov solve) with a
//!   saddle-point policy improvement. Requires a stabilizing initial policy
//!   pair.
//! - **Value iteration** ([`value_iteration`]): fixed-point method that
//!   repeatedly applies the one-step Riccati operator to the cost matrix.
//!   No stabilization precondition.
//!
//! Both engines run a fixed iteration budget by default and return the full
//! per-iteration history, leaving convergence assessment to the caller; the
//! GARE residual ([`gare_residual_norm`]) is the standard diagnostic.
//!
//! # Example
//!
//! ```ignore
//! use game_core::{policy_iteration, GameData, SolverSettings};
//! use nalgebra::DMatrix;
//!
//! let data = GameData {
//!     A: DMatrix::from_row_slice(2, 2, &[0.9, 0.1, 0.0, 0.8]),
//!     B: DMatrix::from_row_slice(2, 1, &[1.0, 0.0]),
//!     C: DMatrix::from_row_slice(2, 1, &[0.0, 1.0]),
//!     Q: DMatrix::identity(2, 2),
//!     R: DMatrix::identity(1, 1),
//!     S: DMatrix::identity(1, 1) * 5.0,
//! };
//!
//! let settings = SolverSettings { num_iterations: 50, ..Default::default() };
//! let result = policy_iteration(&data, &settings)?;
//!
//! println!("trace(P) = {}", result.p.trace());
//! println!("K = {}", result.k);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod linalg;
pub mod problem;
pub mod riccati;

// Re-export main types
pub use problem::{
    GameData, PolicyIterationResult, SolveInfo, SolverSettings, ValueIterationResult, WarmStart,
};
pub use riccati::{
    gare_residual, gare_residual_norm, gare_rhs, policy_iteration, value_iteration, QBlocks,
    RiccatiError,
};
