//! Zero-sum game example demonstrating both Riccati engines.
//!
//! Solves a 3-state game with two controller inputs and two adversary
//! inputs, first by policy iteration from the zero policy pair, then by
//! value iteration from the cost matrix of that same pair, and verifies
//! both solutions against the GARE.

use game_core::linalg::dlyap;
use game_core::{
    gare_residual_norm, gare_rhs, policy_iteration, value_iteration, GameData, SolverSettings,
    WarmStart,
};
use nalgebra::DMatrix;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Gamix - Zero-Sum LQ Game Example");
    println!("================================");
    println!();

    let data = GameData {
        A: DMatrix::from_row_slice(3, 3, &[0.7, 0.2, 0.0, 0.3, 0.5, 0.2, 0.2, 0.4, 0.3]),
        B: DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 0.2, 0.6]),
        C: DMatrix::from_row_slice(3, 2, &[1.0, 0.3, 0.4, 1.0, 0.6, 0.4]),
        Q: DMatrix::identity(3, 3),
        R: DMatrix::identity(2, 2),
        S: DMatrix::identity(2, 2) * 5.0,
    };

    let settings = SolverSettings {
        num_iterations: 20,
        ..Default::default()
    };

    // Policy iteration from the zero policy pair (A is Schur-stable)
    let pi = policy_iteration(&data, &settings)?;

    println!("Policy iteration");
    println!("----------------");
    println!(
        "{} iterations in {} ms",
        pi.info.iters, pi.info.solve_time_ms
    );
    println!("Cost trace: {:?}", pi.cost_history);
    println!("P = {:.6}", pi.p);
    println!("K = {:.6}", pi.k);
    println!("L = {:.6}", pi.l);
    println!("Left-hand side of the GARE  = {:.6}", pi.p);
    println!("Right-hand side of the GARE = {:.6}", gare_rhs(&data, &pi.p)?);
    println!(
        "GARE residual norm: {:.3e}",
        gare_residual_norm(&data, &pi.p)?
    );
    println!();

    // Value iteration, started at the same initial cost matrix policy
    // iteration starts from: the Lyapunov evaluation of the zero gains.
    let p0 = dlyap(&data.A.transpose(), &data.Q)?;
    let vi_settings = SolverSettings {
        num_iterations: 20,
        warm_start: Some(WarmStart {
            p0: Some(p0),
            ..Default::default()
        }),
        ..Default::default()
    };
    let vi = value_iteration(&data, &vi_settings)?;

    println!("Value iteration");
    println!("---------------");
    println!(
        "{} iterations in {} ms",
        vi.info.iters, vi.info.solve_time_ms
    );
    println!("Cost trace: {:?}", vi.cost_history);
    println!("P = {:.6}", vi.p);
    println!("K = {:.6}", vi.k);
    println!("L = {:.6}", vi.l);
    println!(
        "GARE residual norm: {:.3e}",
        gare_residual_norm(&data, &vi.p)?
    );
    println!();

    println!(
        "Methods agree to {:.3e} in P",
        (&pi.p - &vi.p).norm()
    );

    Ok(())
}
