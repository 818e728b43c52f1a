//! End-to-end tests for the game Riccati solvers.
//!
//! These exercise both engines on a fixed 3-state / 2-control /
//! 2-disturbance game and cross-check them against each other and against
//! the GARE residual verifier.

use game_core::linalg::dlyap;
use game_core::{
    gare_residual_norm, policy_iteration, value_iteration, GameData, RiccatiError, SolverSettings,
    WarmStart,
};
use nalgebra::DMatrix;

/// Tolerance for cross-method agreement
const CROSS_TOL: f64 = 1e-6;

/// Tolerance for fixed-point idempotence
const IDEMPOTENCE_TOL: f64 = 1e-9;

fn reference_game() -> GameData {
    GameData {
        A: DMatrix::from_row_slice(3, 3, &[0.7, 0.2, 0.0, 0.3, 0.5, 0.2, 0.2, 0.4, 0.3]),
        B: DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 0.2, 0.6]),
        C: DMatrix::from_row_slice(3, 2, &[1.0, 0.3, 0.4, 1.0, 0.6, 0.4]),
        Q: DMatrix::identity(3, 3),
        R: DMatrix::identity(2, 2),
        S: DMatrix::identity(2, 2) * 5.0,
    }
}

#[test]
fn test_policy_iteration_reference_game() {
    let data = reference_game();
    let settings = SolverSettings {
        num_iterations: 20,
        ..Default::default()
    };

    // A itself is Schur-stable, so the default zero gains pass the gate
    let result = policy_iteration(&data, &settings).expect("solve failed");
    assert_eq!(result.info.iters, 20);

    // Cost trace is monotonically non-increasing
    for w in result.cost_history.windows(2) {
        assert!(
            w[1] <= w[0] + 1e-12,
            "cost increased: {} -> {}",
            w[0],
            w[1]
        );
    }

    // Converged value, independently computed
    assert!((result.p.trace() - 3.810399751559).abs() < CROSS_TOL);
    assert!((result.p[(0, 0)] - 1.454776822).abs() < CROSS_TOL);
    assert!((result.k[(0, 0)] - (-0.530527383)).abs() < CROSS_TOL);
    assert!((result.l[(0, 0)] - 0.132798358).abs() < CROSS_TOL);

    // The GARE holds at the solution
    let residual = gare_residual_norm(&data, &result.p).unwrap();
    assert!(residual < 1e-8, "residual {residual}");
}

#[test]
fn test_value_iteration_matches_policy_iteration() {
    let data = reference_game();

    let pi = policy_iteration(
        &data,
        &SolverSettings {
            num_iterations: 20,
            ..Default::default()
        },
    )
    .unwrap();

    // Start value iteration from the Lyapunov evaluation of the zero policy
    // pair, the same cost matrix policy iteration starts from.
    let p0 = dlyap(&data.A.transpose(), &data.Q).unwrap();
    let vi = value_iteration(
        &data,
        &SolverSettings {
            num_iterations: 20,
            warm_start: Some(WarmStart {
                p0: Some(p0),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .unwrap();

    assert!((&vi.p - &pi.p).norm() < CROSS_TOL, "P mismatch");
    assert!((&vi.k - &pi.k).norm() < CROSS_TOL, "K mismatch");
    assert!((&vi.l - &pi.l).norm() < CROSS_TOL, "L mismatch");
}

#[test]
fn test_stability_gate_rejects_unstable_initial_policy() {
    let mut data = reference_game();
    // Blow up the dynamics; the default zero gains leave the loop unstable
    data.A *= 2.0;

    let err = policy_iteration(&data, &SolverSettings::default()).unwrap_err();
    match err {
        RiccatiError::NonStabilizingInitialPolicy { spectral_radius } => {
            assert!(spectral_radius >= 1.0);
        }
        other => panic!("expected NonStabilizingInitialPolicy, got {other}"),
    }
}

#[test]
fn test_stability_gate_checks_closed_loop_not_open_loop() {
    let mut data = reference_game();
    data.A *= 2.0;

    // A stabilizing warm start gets past the gate even though A is unstable
    let k0 = DMatrix::from_row_slice(
        2,
        3,
        &[-1.4, -0.4, 0.0, -0.6, -1.0, -0.4],
    );
    let settings = SolverSettings {
        num_iterations: 30,
        warm_start: Some(WarmStart {
            k0: Some(k0),
            ..Default::default()
        }),
        ..Default::default()
    };

    let result = policy_iteration(&data, &settings).expect("warm-started solve failed");
    let residual = gare_residual_norm(&data, &result.p).unwrap();
    assert!(residual < 1e-8, "residual {residual}");
}

#[test]
fn test_fixed_point_idempotence() {
    let data = reference_game();
    let converged = policy_iteration(
        &data,
        &SolverSettings {
            num_iterations: 20,
            ..Default::default()
        },
    )
    .unwrap();

    // One more policy iteration from the converged gains moves nothing
    let again = policy_iteration(
        &data,
        &SolverSettings {
            num_iterations: 1,
            warm_start: Some(WarmStart {
                k0: Some(converged.k.clone()),
                l0: Some(converged.l.clone()),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .unwrap();
    assert!((&again.p - &converged.p).norm() < IDEMPOTENCE_TOL);
    assert!((&again.k - &converged.k).norm() < IDEMPOTENCE_TOL);
    assert!((&again.l - &converged.l).norm() < IDEMPOTENCE_TOL);

    // Same for one more value iteration from the converged cost matrix
    let vi = value_iteration(
        &data,
        &SolverSettings {
            num_iterations: 1,
            warm_start: Some(WarmStart {
                p0: Some(converged.p.clone()),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
    .unwrap();
    assert!((&vi.p - &converged.p).norm() < IDEMPOTENCE_TOL);
}

#[test]
fn test_value_iteration_residual_convergence() {
    let data = reference_game();
    let result = value_iteration(
        &data,
        &SolverSettings {
            num_iterations: 60,
            ..Default::default()
        },
    )
    .unwrap();

    let final_residual = gare_residual_norm(&data, &result.p).unwrap();
    assert!(final_residual < 1e-6, "residual {final_residual}");

    // The residual shrinks along the way: compare an early iterate
    let early_residual = gare_residual_norm(&data, &result.p_history[5]).unwrap();
    assert!(final_residual < early_residual);
}

#[test]
fn test_early_exit_tolerance() {
    let data = reference_game();
    let settings = SolverSettings {
        num_iterations: 100,
        tol: Some(1e-10),
        ..Default::default()
    };

    // Newton converges quadratically; the tolerance fires long before the
    // budget is spent, and the answer is unaffected.
    let result = policy_iteration(&data, &settings).unwrap();
    assert!(result.info.iters < 20, "ran {} iterations", result.info.iters);
    assert_eq!(result.cost_history.len(), result.info.iters);
    assert!((result.p.trace() - 3.810399751559).abs() < CROSS_TOL);

    let vi = value_iteration(&data, &settings).unwrap();
    assert!(vi.info.iters < 100);
    assert!((&vi.p - &result.p).norm() < CROSS_TOL);
}

#[test]
fn test_engines_do_not_mutate_inputs() {
    let data = reference_game();
    let snapshot = data.clone();
    let settings = SolverSettings {
        num_iterations: 10,
        ..Default::default()
    };

    let _ = policy_iteration(&data, &settings).unwrap();
    let _ = value_iteration(&data, &settings).unwrap();

    assert_eq!(data.A, snapshot.A);
    assert_eq!(data.Q, snapshot.Q);
    assert_eq!(data.S, snapshot.S);
}
