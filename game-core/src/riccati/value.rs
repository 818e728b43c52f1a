//! Value iteration for the game Riccati equation.
//!
//! Fixed-point method: repeatedly applies the one-step GARE operator
//! ([`gare_rhs`]) to the cost matrix, then synthesizes the final gain pair
//! from the converged blocks. Unlike policy iteration there is no
//! stabilization precondition — the operator is contractive for well-posed
//! problems regardless of the starting point. There is deliberately no
//! divergence safeguard either: value iteration trusts the problem to be
//! well-posed, and an ill-posed instance simply produces a diverging cost
//! trace for the caller to inspect.

use std::time::Instant;

use nalgebra::DMatrix;

use super::qfun::{gare_rhs, QBlocks};
use super::RiccatiError;
use crate::problem::{GameData, SolveInfo, SolverSettings, ValueIterationResult};

/// Solve the GARE by value iteration.
///
/// Runs `settings.num_iterations` applications of the one-step operator
/// starting from `P₀` (warm start, default identity), recording `(P,
/// trace P)` before each update, then solves the stacked saddle-point
/// system at the final P for the gains.
///
/// With a zero iteration budget, `P₀` is returned unmodified with empty
/// histories and gains synthesized directly from it.
///
/// # Errors
///
/// - [`RiccatiError::InvalidProblem`] on inconsistent dimensions.
/// - [`RiccatiError::Linalg`] when the stacked block matrix is singular at
///   any step. Fatal: no retry, no partial history.
pub fn value_iteration(
    data: &GameData,
    settings: &SolverSettings,
) -> Result<ValueIterationResult, RiccatiError> {
    data.validate().map_err(RiccatiError::InvalidProblem)?;
    let start = Instant::now();

    let n = data.num_states();
    let mut p = match settings.warm_start.as_ref().and_then(|w| w.p0.as_ref()) {
        Some(p0) => {
            if p0.shape() != (n, n) {
                return Err(RiccatiError::InvalidProblem(format!(
                    "P0 has shape {}×{}, expected {}×{}",
                    p0.nrows(),
                    p0.ncols(),
                    n,
                    n
                )));
            }
            p0.clone()
        }
        None => DMatrix::identity(n, n),
    };

    if settings.verbose {
        println!("Gamix value iteration");
        println!(
            "Problem: n = {}, m = {}, p = {}",
            n,
            data.num_controls(),
            data.num_disturbances()
        );
        println!("{:>4} {:>18} {:>14}", "Iter", "trace(P)", "Cost delta");
    }

    let budget = settings.num_iterations;
    let mut p_history = Vec::with_capacity(budget);
    let mut cost_history = Vec::with_capacity(budget);
    let mut iters = 0;

    for i in 0..budget {
        p_history.push(p.clone());
        cost_history.push(p.trace());

        let p_next = gare_rhs(data, &p)?;
        let delta = (&p_next - &p).norm();
        p = p_next;
        iters = i + 1;

        if settings.verbose {
            println!("{:>4} {:>18.12} {:>14.6e}", iters, p.trace(), delta);
        }

        if let Some(tol) = settings.tol {
            if delta < tol {
                break;
            }
        }
    }

    // Gain synthesis from the final cost matrix
    let blocks = QBlocks::new(data, &p)?;
    let (k, l) = blocks.solve_gains()?;

    Ok(ValueIterationResult {
        p,
        k,
        l,
        p_history,
        cost_history,
        info: SolveInfo {
            iters,
            solve_time_ms: start.elapsed().as_millis() as u64,
        },
    })
}
