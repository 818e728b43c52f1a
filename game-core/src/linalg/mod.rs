//! Dense linear algebra layer.
//!
//! Matrix primitives the Riccati engines are built on: chained products,
//! a right-division solve, the discrete Lyapunov equation, and the
//! spectral-radius stability test. All solves go through LU factorization;
//! no explicit inverses are formed anywhere.

pub mod dense;
pub mod lyap;

pub use dense::{mdot, solveb, specrad, symmetrize, LinalgError};
pub use lyap::dlyap;
