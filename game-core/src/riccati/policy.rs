//! Policy iteration for the game Riccati equation.
//!
//! Newton-type method: each iteration evaluates the current policy pair
//! exactly (a discrete Lyapunov solve) and then improves it to the saddle
//! point of the local quadratic game. Convergence is quadratic near the
//! solution, but the method requires a stabilizing initial pair — the
//! Lyapunov equation has no bounded solution otherwise, so the spectral
//! radius of the initial closed loop is checked before any solve.

use std::time::Instant;

use nalgebra::DMatrix;

use super::qfun::QBlocks;
use super::RiccatiError;
use crate::linalg::{dlyap, specrad, LinalgError};
use crate::problem::{GameData, PolicyIterationResult, SolveInfo, SolverSettings};

/// Exact cost-to-go of a fixed policy pair.
///
/// With closed loop `F = A + BK + CL` and stage cost
/// `W = Q + KᵀRK − LᵀSL`, P solves `FᵀPF − P + W = 0`.
fn evaluate_policy(
    data: &GameData,
    k: &DMatrix<f64>,
    l: &DMatrix<f64>,
) -> Result<DMatrix<f64>, LinalgError> {
    let f = &data.A + &data.B * k + &data.C * l;
    let w = &data.Q + k.transpose() * &data.R * k - l.transpose() * &data.S * l;
    dlyap(&f.transpose(), &w)
}

/// Solve the GARE by policy iteration.
///
/// Runs `settings.num_iterations` evaluation/improvement rounds (or fewer
/// when `settings.tol` triggers an early exit on the gain update). Returns
/// the cost-to-go of the last evaluated pair, the final improved gains, and
/// the full per-iteration history.
///
/// With a zero iteration budget the initial gains are returned unmodified,
/// together with their exact cost-to-go and empty histories.
///
/// # Errors
///
/// - [`RiccatiError::InvalidProblem`] on inconsistent dimensions.
/// - [`RiccatiError::NonStabilizingInitialPolicy`] when
///   `specrad(A + B·K₀ + C·L₀) >= 1`; checked before any Lyapunov solve.
/// - [`RiccatiError::Linalg`] when a saddle-point block is singular. Fatal:
///   no retry, no partial history.
pub fn policy_iteration(
    data: &GameData,
    settings: &SolverSettings,
) -> Result<PolicyIterationResult, RiccatiError> {
    data.validate().map_err(RiccatiError::InvalidProblem)?;
    let start = Instant::now();

    let n = data.num_states();
    let m = data.num_controls();
    let p_dim = data.num_disturbances();

    let warm = settings.warm_start.as_ref();
    let mut k = match warm.and_then(|w| w.k0.as_ref()) {
        Some(k0) => {
            if k0.shape() != (m, n) {
                return Err(RiccatiError::InvalidProblem(format!(
                    "K0 has shape {}×{}, expected {}×{}",
                    k0.nrows(),
                    k0.ncols(),
                    m,
                    n
                )));
            }
            k0.clone()
        }
        None => DMatrix::zeros(m, n),
    };
    let mut l = match warm.and_then(|w| w.l0.as_ref()) {
        Some(l0) => {
            if l0.shape() != (p_dim, n) {
                return Err(RiccatiError::InvalidProblem(format!(
                    "L0 has shape {}×{}, expected {}×{}",
                    l0.nrows(),
                    l0.ncols(),
                    p_dim,
                    n
                )));
            }
            l0.clone()
        }
        None => DMatrix::zeros(p_dim, n),
    };

    // Stability gate, before any Lyapunov solve
    let closed_loop = &data.A + &data.B * &k + &data.C * &l;
    let rho = specrad(&closed_loop)?;
    if rho >= 1.0 {
        return Err(RiccatiError::NonStabilizingInitialPolicy {
            spectral_radius: rho,
        });
    }

    if settings.verbose {
        println!("Gamix policy iteration");
        println!("Problem: n = {}, m = {}, p = {}", n, m, p_dim);
        println!("Initial closed-loop spectral radius: {:.6}", rho);
        println!("{:>4} {:>18} {:>14}", "Iter", "trace(P)", "Gain delta");
    }

    let budget = settings.num_iterations;
    let mut p_history = Vec::with_capacity(budget);
    let mut k_history = Vec::with_capacity(budget);
    let mut l_history = Vec::with_capacity(budget);
    let mut cost_history = Vec::with_capacity(budget);

    let mut p = evaluate_policy(data, &k, &l)?;
    let mut iters = 0;

    for i in 0..budget {
        p_history.push(p.clone());
        k_history.push(k.clone());
        l_history.push(l.clone());
        cost_history.push(p.trace());

        // Policy improvement: saddle point of the local quadratic game
        let blocks = QBlocks::new(data, &p)?;
        let (k_next, l_next) = blocks.solve_gains()?;
        let delta = (&k_next - &k).norm().max((&l_next - &l).norm());
        k = k_next;
        l = l_next;
        iters = i + 1;

        if settings.verbose {
            println!("{:>4} {:>18.12} {:>14.6e}", iters, p.trace(), delta);
        }

        if let Some(tol) = settings.tol {
            if delta < tol {
                break;
            }
        }

        // Evaluate the improved pair unless this was the last round
        if iters < budget {
            p = evaluate_policy(data, &k, &l)?;
        }
    }

    Ok(PolicyIterationResult {
        p,
        k,
        l,
        p_history,
        k_history,
        l_history,
        cost_history,
        info: SolveInfo {
            iters,
            solve_time_ms: start.elapsed().as_millis() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stable_game() -> GameData {
        GameData {
            A: DMatrix::from_row_slice(2, 2, &[0.5, 0.1, 0.0, 0.4]),
            B: DMatrix::from_row_slice(2, 1, &[1.0, 0.0]),
            C: DMatrix::from_row_slice(2, 1, &[0.0, 1.0]),
            Q: DMatrix::identity(2, 2),
            R: DMatrix::identity(1, 1),
            S: DMatrix::identity(1, 1) * 10.0,
        }
    }

    #[test]
    fn test_zero_iterations_returns_initial_gains() {
        let data = stable_game();
        let settings = SolverSettings {
            num_iterations: 0,
            ..Default::default()
        };

        let result = policy_iteration(&data, &settings).unwrap();
        assert_eq!(result.k, DMatrix::zeros(1, 2));
        assert_eq!(result.l, DMatrix::zeros(1, 2));
        assert!(result.p_history.is_empty());
        assert!(result.cost_history.is_empty());
        assert_eq!(result.info.iters, 0);

        // P is still the exact cost-to-go of the (zero) initial pair
        let expected = evaluate_policy(&data, &result.k, &result.l).unwrap();
        assert!((&result.p - expected).norm() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_warm_start_shape() {
        let data = stable_game();
        let settings = SolverSettings {
            warm_start: Some(crate::problem::WarmStart {
                k0: Some(DMatrix::zeros(2, 2)),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(matches!(
            policy_iteration(&data, &settings),
            Err(RiccatiError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_history_lengths_match_budget() {
        let data = stable_game();
        let settings = SolverSettings {
            num_iterations: 7,
            ..Default::default()
        };

        let result = policy_iteration(&data, &settings).unwrap();
        assert_eq!(result.info.iters, 7);
        assert_eq!(result.p_history.len(), 7);
        assert_eq!(result.k_history.len(), 7);
        assert_eq!(result.l_history.len(), 7);
        assert_eq!(result.cost_history.len(), 7);
    }

    #[test]
    fn test_returned_p_is_symmetric() {
        let data = stable_game();
        let settings = SolverSettings {
            num_iterations: 10,
            ..Default::default()
        };
        let result = policy_iteration(&data, &settings).unwrap();
        assert!((&result.p - result.p.transpose()).norm() < 1e-12);
    }
}
