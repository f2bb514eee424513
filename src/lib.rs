//! # Zero-Sum Solver
//!
//! Exact optimal mixed strategies for two-player zero-sum matrix games.
//!
//! Given an m×n payoff matrix (payoffs to the row player), the solver returns
//! the row player's maximin strategy, the column player's minimax strategy and
//! the game value, using the simplex method on the game's LP and its dual.
//!
//! ## Features
//!
//! - **Exact**: deterministic simplex with Bland's rule and a polynomial pivot bound
//! - **Verified**: every answer is checked against both players' guarantees
//! - **Shortcuts**: single-row, single-column and pure saddle-point games skip the LP
//! - **Batch solving**: many independent games in parallel with rayon
//!
//! ## Quick Start
//!
//! ```
//! use zero_sum_solver::{solve, PayoffMatrix, DEFAULT_TOLERANCE};
//!
//! let rps = PayoffMatrix::from_rows(&[
//!     [0.0, -1.0, 1.0],
//!     [1.0, 0.0, -1.0],
//!     [-1.0, 1.0, 0.0],
//! ])
//! .unwrap();
//!
//! let solution = solve(&rps, DEFAULT_TOLERANCE).unwrap();
//! assert!(solution.value.abs() < 1e-9);
//! assert!((solution.row_strategy[0] - 1.0 / 3.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`game`]: payoff matrices, strategies, solutions
//! - [`lp`]: the simplex solver and its configuration
//! - [`error`]: invalid-input and numerical-failure errors
//! - [`games`]: reference games and a random-game generator
//! - [`output`]: text and JSON reports
//!
//! ## Architecture
//!
//! ```text
//! PayoffMatrix ──► SimplexSolver ──► Solution ──► verify ──► caller
//!                    │
//!                    ├─ 1 row / 1 column ─► direct answer
//!                    ├─ pure saddle point ─► direct answer
//!                    └─ normalise + shift ─► Tableau (Bland's rule)
//!                                              ├─ primal ─► column strategy
//!                                              └─ dual   ─► row strategy
//! ```

#![warn(missing_docs)]

/// Error types.
pub mod error;

/// Matrix game data model.
pub mod game;

/// Reference games for testing and demos.
pub mod games;

/// Linear-programming solver.
pub mod lp;

/// Result reports.
pub mod output;

// Re-export commonly used types at crate root for convenience
pub use error::{InvalidMatrixError, LoadError, NumericalFailureError, SolveError};
pub use game::{PayoffMatrix, Player, Solution, Strategy};
pub use lp::{solve, solve_rows, SimplexConfig, SimplexSolver, SimplexStats, DEFAULT_TOLERANCE};
