//! Configuration options for the simplex solver.
//!
//! This module provides the configuration struct that controls tolerances,
//! the pivot bound and parallel batch solving, plus the per-solve statistics.

use serde::{Deserialize, Serialize};

use crate::error::InvalidMatrixError;

/// Default numerical tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Largest threshold the simplex uses for reduced costs, pivot elements and
/// ratio ties. A tighter caller tolerance tightens it further.
pub const PIVOT_EPSILON: f64 = 1e-9;

/// Default pivot bound is `PIVOT_BOUND_FACTOR * (m + n)^2`.
pub const PIVOT_BOUND_FACTOR: usize = 8;

/// Configuration for the simplex solver.
///
/// # Example
/// ```
/// use zero_sum_solver::lp::SimplexConfig;
///
/// let config = SimplexConfig::default().with_tolerance(1e-6);
/// assert!(config.validate().is_ok());
/// assert!(config.detect_saddle_points);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplexConfig {
    /// Numerical tolerance.
    ///
    /// Used for clamping slightly negative strategy weights and (scaled by the
    /// largest absolute payoff) for the final check that both players'
    /// guarantees match the value. Pivoting uses `min(tolerance, PIVOT_EPSILON)`,
    /// so relaxing this never loosens the simplex itself.
    pub tolerance: f64,

    /// Maximum number of pivots before reporting a numerical failure.
    ///
    /// Set to `None` for the default of `8 * (m + n)^2`.
    pub max_pivots: Option<usize>,

    /// Check for a pure saddle point before running the LP.
    ///
    /// When one exists the answer is exact and no pivoting is needed.
    pub detect_saddle_points: bool,

    /// Number of threads for [`solve_batch`](crate::lp::SimplexSolver::solve_batch).
    ///
    /// Set to `None` to use rayon's global pool.
    pub num_threads: Option<usize>,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_pivots: None,
            detect_saddle_points: true,
            num_threads: None,
        }
    }
}

impl SimplexConfig {
    /// Create a new SimplexConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method: set an explicit pivot bound.
    pub fn with_max_pivots(mut self, max_pivots: usize) -> Self {
        self.max_pivots = Some(max_pivots);
        self
    }

    /// Builder method: enable or disable saddle-point detection.
    pub fn with_saddle_detection(mut self, enable: bool) -> Self {
        self.detect_saddle_points = enable;
        self
    }

    /// Builder method: set number of threads for batch solving.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Threshold for pivoting decisions on the normalised tableau.
    pub fn pivot_epsilon(&self) -> f64 {
        self.tolerance.min(PIVOT_EPSILON)
    }

    /// Pivot bound for an `rows x cols` game.
    pub fn pivot_limit(&self, rows: usize, cols: usize) -> usize {
        self.max_pivots
            .unwrap_or_else(|| PIVOT_BOUND_FACTOR * (rows + cols).pow(2))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), InvalidMatrixError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(InvalidMatrixError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// How a solution was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    /// One row: the row player has no choice.
    SingleRow,
    /// One column: the column player has no choice.
    SingleColumn,
    /// A pure saddle point was found directly.
    SaddlePoint,
    /// Full simplex run.
    Simplex,
}

/// Statistics recorded for one solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplexStats {
    /// Which path produced the solution.
    pub method: SolveMethod,

    /// Pivots performed (0 unless `method` is `Simplex`).
    pub pivots: usize,

    /// Constant added to every payoff after dividing by the largest absolute
    /// payoff, before the LP ran.
    pub shift: f64,

    /// Wall time spent solving (in seconds).
    pub elapsed_seconds: f64,

    /// Column guarantee minus row guarantee on the original matrix.
    pub duality_gap: f64,
}

impl SimplexStats {
    /// Stats for a solve that needed no pivoting.
    pub fn direct(method: SolveMethod) -> Self {
        Self {
            method,
            pivots: 0,
            shift: 0.0,
            elapsed_seconds: 0.0,
            duality_gap: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimplexConfig::default();
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert!(config.max_pivots.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_tolerance() {
        for tol in [0.0, -1e-8, f64::NAN, f64::INFINITY] {
            let err = SimplexConfig::default().with_tolerance(tol).validate();
            assert!(matches!(err, Err(InvalidMatrixError::InvalidTolerance(_))));
        }
    }

    #[test]
    fn test_pivot_limit() {
        let config = SimplexConfig::default();
        assert_eq!(config.pivot_limit(2, 3), 200);
        assert_eq!(config.with_max_pivots(7).pivot_limit(10, 10), 7);
    }

    #[test]
    fn test_pivot_epsilon_never_exceeds_cap() {
        assert_eq!(SimplexConfig::default().with_tolerance(0.1).pivot_epsilon(), PIVOT_EPSILON);
        assert_eq!(SimplexConfig::default().with_tolerance(1e-12).pivot_epsilon(), 1e-12);
    }

    #[test]
    fn test_config_json() {
        let json = r#"{
            "tolerance": 1e-6,
            "max_pivots": 50,
            "detect_saddle_points": false,
            "num_threads": null
        }"#;
        let config: SimplexConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.max_pivots, Some(50));
        assert!(!config.detect_saddle_points);
    }
}
