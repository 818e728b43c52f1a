//! Problem data structures and solver configuration.
//!
//! This module defines the canonical game representation and all associated
//! settings and result types.

use nalgebra::DMatrix;

/// Two-player zero-sum LQ dynamic game in canonical form.
///
/// The dynamics and stage cost are
///
/// ```text
/// x⁺ = A x + B u + C v
/// g(x, u, v) = xᵀ Q x + uᵀ R u − vᵀ S v
/// ```
///
/// where u is the minimizing (controller) input and v the maximizing
/// (adversary) input. S enters with a negative sign: the adversary pays
/// for its disturbance energy.
///
/// # Dimensions
///
/// - `n`: number of states (A is n×n)
/// - `m`: number of controller inputs (B is n×m, R is m×m)
/// - `p`: number of adversary inputs (C is n×p, S is p×p)
///
/// Q, R, and S are expected to be symmetric (Q PSD, R and S PD). The
/// engines do not enforce symmetry of the inputs; they only guarantee a
/// symmetric cost-to-go matrix given symmetric inputs.
#[derive(Debug, Clone)]
#[allow(non_snake_case)] // A, B, C, Q, R, S are standard mathematical notation
pub struct GameData {
    /// State transition matrix A (n × n)
    pub A: DMatrix<f64>,

    /// Controller input matrix B (n × m)
    pub B: DMatrix<f64>,

    /// Adversary input matrix C (n × p)
    pub C: DMatrix<f64>,

    /// State cost Q (n × n, symmetric PSD)
    pub Q: DMatrix<f64>,

    /// Controller cost R (m × m, symmetric PD)
    pub R: DMatrix<f64>,

    /// Adversary cost S (p × p, symmetric PD)
    pub S: DMatrix<f64>,
}

impl GameData {
    /// Number of states (n)
    pub fn num_states(&self) -> usize {
        self.A.nrows()
    }

    /// Number of controller inputs (m)
    pub fn num_controls(&self) -> usize {
        self.B.ncols()
    }

    /// Number of adversary inputs (p)
    pub fn num_disturbances(&self) -> usize {
        self.C.ncols()
    }

    /// Validate matrix dimensions.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.num_states();
        let m = self.num_controls();
        let p = self.num_disturbances();

        if n == 0 {
            return Err("A must have at least one state".to_string());
        }
        if !self.A.is_square() {
            return Err(format!(
                "A has shape {}×{}, expected square",
                self.A.nrows(),
                self.A.ncols()
            ));
        }
        if m == 0 || p == 0 {
            return Err("B and C must each have at least one column".to_string());
        }
        if self.B.nrows() != n {
            return Err(format!("B has {} rows, expected {}", self.B.nrows(), n));
        }
        if self.C.nrows() != n {
            return Err(format!("C has {} rows, expected {}", self.C.nrows(), n));
        }
        if self.Q.shape() != (n, n) {
            return Err(format!(
                "Q has shape {}×{}, expected {}×{}",
                self.Q.nrows(),
                self.Q.ncols(),
                n,
                n
            ));
        }
        if self.R.shape() != (m, m) {
            return Err(format!(
                "R has shape {}×{}, expected {}×{}",
                self.R.nrows(),
                self.R.ncols(),
                m,
                m
            ));
        }
        if self.S.shape() != (p, p) {
            return Err(format!(
                "S has shape {}×{}, expected {}×{}",
                self.S.nrows(),
                self.S.ncols(),
                p,
                p
            ));
        }
        Ok(())
    }
}

/// Optional initial iterates for the engines.
///
/// Policy iteration reads `k0`/`l0` (defaults: zero gains); value iteration
/// reads `p0` (default: identity). Unused fields are ignored by each engine.
#[derive(Debug, Clone, Default)]
pub struct WarmStart {
    /// Initial controller gain K₀ (m × n)
    pub k0: Option<DMatrix<f64>>,

    /// Initial adversary gain L₀ (p × n)
    pub l0: Option<DMatrix<f64>>,

    /// Initial cost matrix P₀ (n × n)
    pub p0: Option<DMatrix<f64>>,
}

/// Solver settings and parameters.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    /// Iteration budget. Both engines run exactly this many iterations
    /// unless `tol` triggers an early exit.
    pub num_iterations: usize,

    /// Optional early-exit tolerance. When set, policy iteration stops once
    /// the gain update falls below this value, and value iteration stops
    /// once the cost-matrix update does; `SolveInfo::iters` reports the
    /// count actually run. When `None` (the default) the engines run the
    /// full budget, which keeps repeated experiments exactly reproducible.
    pub tol: Option<f64>,

    /// Enable per-iteration diagnostics
    pub verbose: bool,

    /// Optional initial iterates
    pub warm_start: Option<WarmStart>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        // GAMIX_VERBOSE=1 turns on diagnostics without touching call sites
        let verbose = std::env::var("GAMIX_VERBOSE").ok().as_deref() == Some("1");

        Self {
            num_iterations: 100,
            tol: None,
            verbose,
            warm_start: None,
        }
    }
}

/// Solve diagnostics common to both engines.
#[derive(Debug, Clone, Copy)]
pub struct SolveInfo {
    /// Number of iterations completed
    pub iters: usize,

    /// Total solve time (milliseconds)
    pub solve_time_ms: u64,
}

/// Result of a policy-iteration solve.
///
/// `p` is the exact cost-to-go of the last evaluated policy pair; `k` and
/// `l` are the gains produced by the final improvement step. Histories are
/// indexed by iteration and owned by this value; nothing is shared across
/// calls.
#[derive(Debug, Clone)]
pub struct PolicyIterationResult {
    /// Final cost-to-go matrix P (n × n, symmetric)
    pub p: DMatrix<f64>,

    /// Final controller gain K (m × n)
    pub k: DMatrix<f64>,

    /// Final adversary gain L (p × n)
    pub l: DMatrix<f64>,

    /// Cost-to-go matrix at each iteration
    pub p_history: Vec<DMatrix<f64>>,

    /// Controller gain at each iteration
    pub k_history: Vec<DMatrix<f64>>,

    /// Adversary gain at each iteration
    pub l_history: Vec<DMatrix<f64>>,

    /// trace(P) at each iteration
    pub cost_history: Vec<f64>,

    /// Solve diagnostics
    pub info: SolveInfo,
}

/// Result of a value-iteration solve.
///
/// `p` is the cost matrix after the final update; `k` and `l` are
/// synthesized from it. The history records the cost matrix *before* each
/// update, mirroring the "cost so far" semantics of policy evaluation.
#[derive(Debug, Clone)]
pub struct ValueIterationResult {
    /// Final cost matrix P (n × n, symmetric)
    pub p: DMatrix<f64>,

    /// Final controller gain K (m × n)
    pub k: DMatrix<f64>,

    /// Final adversary gain L (p × n)
    pub l: DMatrix<f64>,

    /// Cost matrix at each iteration (pre-update)
    pub p_history: Vec<DMatrix<f64>>,

    /// trace(P) at each iteration (pre-update)
    pub cost_history: Vec<f64>,

    /// Solve diagnostics
    pub info: SolveInfo,
}
