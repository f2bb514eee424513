//! Simplex solver for zero-sum matrix games.
//!
//! # Overview
//!
//! A zero-sum matrix game is a pair of dual linear programs. After shifting
//! every payoff to at least 1 (which changes the value by the same constant
//! and leaves the optimal strategies untouched), the column player's problem
//! becomes
//!
//! ```text
//! maximise  Σ_j z_j   s.t.  Σ_j a[i][j] · z_j ≤ 1 for all i,  z ≥ 0
//! ```
//!
//! and the row player's problem is its dual
//!
//! ```text
//! minimise  Σ_i y_i   s.t.  Σ_i y_i · a[i][j] ≥ 1 for all j,  y ≥ 0
//! ```
//!
//! By strong duality `Σz = Σy = 1 / v`, so one simplex run yields both
//! strategies (`z / Σz` and `y / Σy`) and the shifted value `v`.
//!
//! # Termination
//!
//! Pivoting follows Bland's rule, which cannot cycle. The solver additionally
//! enforces a pivot bound of `8 · (m + n)²` (configurable), reporting a
//! [`NumericalFailureError`](crate::error::NumericalFailureError) rather than
//! running open-ended.
//!
//! # Usage
//!
//! ```
//! use zero_sum_solver::games;
//! use zero_sum_solver::lp::{SimplexConfig, SimplexSolver};
//!
//! let solver = SimplexSolver::new(SimplexConfig::default());
//! let (solution, stats) = solver.solve_with_stats(&games::classic()).unwrap();
//!
//! assert!((solution.value - 5.0).abs() < 1e-9);
//! println!("{} pivots in {:.6}s", stats.pivots, stats.elapsed_seconds);
//! ```
//!
//! # References
//!
//! - von Neumann, J. "Zur Theorie der Gesellschaftsspiele" (1928)
//! - Dantzig, G. "A Proof of the Equivalence of the Programming Problem and the Game Problem" (1951)
//! - Bland, R. "New Finite Pivoting Rules for the Simplex Method" (1977)

pub mod config;
pub mod solver;
mod tableau;

// Re-export main types for convenient access
pub use config::{
    SimplexConfig, SimplexStats, SolveMethod, DEFAULT_TOLERANCE, PIVOT_BOUND_FACTOR,
    PIVOT_EPSILON,
};
pub use solver::{solve, solve_rows, SimplexSolver, SolveOutcome};
