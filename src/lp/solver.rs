//! Exact equilibrium solver for zero-sum matrix games.
//!
//! The solver maps a payoff matrix to a verified saddle point:
//! - **Single row / single column**: answered directly
//! - **Pure saddle point**: answered directly (optional, on by default)
//! - **Everything else**: simplex on the column player's LP, with the row
//!   player's strategy read off the dual
//!
//! Every answer is checked against the original matrix before it is returned.

use std::time::Instant;

use rayon::prelude::*;

use crate::error::{NumericalFailureError, SolveError};
use crate::game::{PayoffMatrix, Player, Solution, Strategy};
use crate::lp::config::{SimplexConfig, SimplexStats, SolveMethod};
use crate::lp::tableau::Tableau;

/// Result of one solve together with its statistics.
pub type SolveOutcome = Result<(Solution, SimplexStats), SolveError>;

/// The simplex equilibrium solver.
///
/// Holds only configuration; every call owns its own tableau, so one solver
/// can be shared freely across threads.
///
/// # Example
/// ```
/// use zero_sum_solver::game::PayoffMatrix;
/// use zero_sum_solver::lp::{SimplexConfig, SimplexSolver};
///
/// let matrix = PayoffMatrix::from_rows(&[[3.0, 1.0], [2.0, 4.0]]).unwrap();
/// let solver = SimplexSolver::new(SimplexConfig::default());
/// let solution = solver.solve(&matrix).unwrap();
///
/// assert!((solution.value - 2.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimplexSolver {
    config: SimplexConfig,
}

impl SimplexSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: SimplexConfig) -> Self {
        Self { config }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SimplexConfig {
        &self.config
    }

    /// Solve a game.
    pub fn solve(&self, matrix: &PayoffMatrix) -> Result<Solution, SolveError> {
        self.solve_with_stats(matrix).map(|(solution, _)| solution)
    }

    /// Solve a game and report how it was solved.
    pub fn solve_with_stats(&self, matrix: &PayoffMatrix) -> SolveOutcome {
        self.config.validate()?;

        let start_time = Instant::now();
        let (rows, cols) = matrix.dims();
        log::debug!("solving {}x{} game", rows, cols);

        let saddle = if self.config.detect_saddle_points {
            matrix.saddle_point()
        } else {
            None
        };

        let (solution, mut stats) = if rows == 1 {
            Self::single_row(matrix)
        } else if cols == 1 {
            Self::single_column(matrix)
        } else if let Some((i, j)) = saddle {
            log::debug!("pure saddle point at ({}, {})", i, j);
            (
                Solution::new(Strategy::pure(rows, i), Strategy::pure(cols, j), matrix.get(i, j)),
                SimplexStats::direct(SolveMethod::SaddlePoint),
            )
        } else {
            self.run_simplex(matrix)?
        };

        solution.verify(matrix, self.config.tolerance)?;

        stats.duality_gap = solution.duality_gap(matrix);
        stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        log::debug!(
            "solved {}x{} game via {:?}: value {:.6}, {} pivots",
            rows,
            cols,
            stats.method,
            solution.value,
            stats.pivots
        );

        Ok((solution, stats))
    }

    /// Solve many independent games in parallel.
    ///
    /// Results are returned in input order.
    pub fn solve_batch(&self, matrices: &[PayoffMatrix]) -> Vec<Result<Solution, SolveError>> {
        self.solve_batch_with_callback(matrices, |_, _| {})
            .into_iter()
            .map(|outcome| outcome.map(|(solution, _)| solution))
            .collect()
    }

    /// Solve many games in parallel, calling `callback(index, &outcome)` as
    /// each one finishes (in completion order, from worker threads).
    pub fn solve_batch_with_callback<F>(
        &self,
        matrices: &[PayoffMatrix],
        callback: F,
    ) -> Vec<SolveOutcome>
    where
        F: Fn(usize, &SolveOutcome) + Sync,
    {
        let run = || -> Vec<SolveOutcome> {
            matrices
                .par_iter()
                .enumerate()
                .map(|(index, matrix)| {
                    let outcome = self.solve_with_stats(matrix);
                    callback(index, &outcome);
                    outcome
                })
                .collect()
        };

        match self.config.num_threads {
            Some(threads) if threads > 0 => {
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => pool.install(run),
                    Err(e) => {
                        log::warn!("could not build {}-thread pool ({}), using global pool", threads, e);
                        run()
                    }
                }
            }
            _ => run(),
        }
    }

    /// One row: the row player has no choice, the column player picks the
    /// first smallest entry.
    fn single_row(matrix: &PayoffMatrix) -> (Solution, SimplexStats) {
        let row = matrix.row(0);
        let (best, value) = row
            .iter()
            .copied()
            .enumerate()
            .fold((0, row[0]), |acc, (j, a)| if a < acc.1 { (j, a) } else { acc });

        (
            Solution::new(Strategy::pure(1, 0), Strategy::pure(row.len(), best), value),
            SimplexStats::direct(SolveMethod::SingleRow),
        )
    }

    /// One column: the column player has no choice, the row player picks the
    /// first largest entry.
    fn single_column(matrix: &PayoffMatrix) -> (Solution, SimplexStats) {
        let first = matrix.get(0, 0);
        let (best, value) = matrix
            .column(0)
            .enumerate()
            .fold((0, first), |acc, (i, a)| if a > acc.1 { (i, a) } else { acc });

        (
            Solution::new(Strategy::pure(matrix.num_rows(), best), Strategy::pure(1, 0), value),
            SimplexStats::direct(SolveMethod::SingleColumn),
        )
    }

    /// Divide by the largest absolute payoff, shift to at least 1, scale so
    /// the largest is 1, then pivot.
    ///
    /// Every intermediate stays within a few units of 1, so payoffs near
    /// `f64::MAX` cannot overflow and one pivot threshold fits all games.
    fn run_simplex(&self, matrix: &PayoffMatrix) -> Result<(Solution, SimplexStats), SolveError> {
        let tolerance = self.config.tolerance;
        let (rows, cols) = matrix.dims();

        let magnitude = match matrix.max_abs() {
            m if m > 0.0 => m,
            _ => 1.0,
        };
        let min = matrix.min_entry() / magnitude;
        let shift = if min <= 0.0 { 1.0 - min } else { 0.0 };
        let scale = matrix.max_entry() / magnitude + shift;

        let mut tableau =
            Tableau::for_game(matrix, magnitude, shift, scale, self.config.pivot_epsilon());
        let limit = self.config.pivot_limit(rows, cols);
        let pivots = tableau.optimize(limit)?;

        let total = tableau.objective();
        if !(total > 0.0) {
            return Err(NumericalFailureError::ZeroMass { player: Player::Column }.into());
        }

        let row_strategy = Strategy::from_weights(tableau.dual(), tolerance, Player::Row)?;
        let col_strategy = Strategy::from_weights(tableau.primal(), tolerance, Player::Column)?;
        let value = magnitude * (scale / total - shift);

        let stats = SimplexStats {
            method: SolveMethod::Simplex,
            pivots,
            shift,
            elapsed_seconds: 0.0,
            duality_gap: 0.0,
        };
        Ok((Solution::new(row_strategy, col_strategy, value), stats))
    }
}

/// Solve a game with the default configuration and the given tolerance.
pub fn solve(matrix: &PayoffMatrix, tolerance: f64) -> Result<Solution, SolveError> {
    SimplexSolver::new(SimplexConfig::default().with_tolerance(tolerance)).solve(matrix)
}

/// Validate raw rows and solve them.
pub fn solve_rows(rows: Vec<Vec<f64>>, tolerance: f64) -> Result<Solution, SolveError> {
    let matrix = PayoffMatrix::new(rows)?;
    solve(&matrix, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidMatrixError;
    use crate::games;
    use crate::games::random::RandomGameGenerator;
    use crate::lp::config::DEFAULT_TOLERANCE;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-9;

    fn matrix<const M: usize, const N: usize>(rows: [[f64; N]; M]) -> PayoffMatrix {
        PayoffMatrix::from_rows(&rows).unwrap()
    }

    fn assert_equilibrium(m: &PayoffMatrix, sol: &Solution) {
        assert_eq!(sol.row_strategy.len(), m.num_rows());
        assert_eq!(sol.col_strategy.len(), m.num_cols());
        assert_abs_diff_eq!(sol.row_strategy.total(), 1.0, epsilon = EPS);
        assert_abs_diff_eq!(sol.col_strategy.total(), 1.0, epsilon = EPS);
        assert!(sol.row_strategy.probabilities().iter().all(|&p| p >= 0.0));
        assert!(sol.col_strategy.probabilities().iter().all(|&p| p >= 0.0));

        let scale = m.max_abs().max(1.0);
        assert_abs_diff_eq!(sol.row_guarantee(m), sol.value, epsilon = 1e-8 * scale);
        assert_abs_diff_eq!(sol.col_guarantee(m), sol.value, epsilon = 1e-8 * scale);
    }

    #[test]
    fn test_mixed_two_by_two() {
        let m = matrix([[3.0, 1.0], [2.0, 4.0]]);
        let (sol, stats) = SimplexSolver::default().solve_with_stats(&m).unwrap();

        assert_eq!(stats.method, SolveMethod::Simplex);
        assert!(stats.pivots > 0);
        assert_abs_diff_eq!(sol.value, 2.5, epsilon = EPS);
        assert_abs_diff_eq!(sol.row_strategy[0], 0.5, epsilon = EPS);
        assert_abs_diff_eq!(sol.row_strategy[1], 0.5, epsilon = EPS);
        assert_abs_diff_eq!(sol.col_strategy[0], 0.75, epsilon = EPS);
        assert_abs_diff_eq!(sol.col_strategy[1], 0.25, epsilon = EPS);
        assert_equilibrium(&m, &sol);
    }

    #[test]
    fn test_rock_paper_scissors() {
        let m = games::rock_paper_scissors();
        let sol = solve(&m, DEFAULT_TOLERANCE).unwrap();

        assert_abs_diff_eq!(sol.value, 0.0, epsilon = EPS);
        for k in 0..3 {
            assert_abs_diff_eq!(sol.row_strategy[k], 1.0 / 3.0, epsilon = EPS);
            assert_abs_diff_eq!(sol.col_strategy[k], 1.0 / 3.0, epsilon = EPS);
        }
    }

    #[test]
    fn test_single_row() {
        let (sol, stats) = SimplexSolver::default()
            .solve_with_stats(&matrix([[5.0, 2.0, 8.0]]))
            .unwrap();

        assert_eq!(stats.method, SolveMethod::SingleRow);
        assert_eq!(sol.row_strategy.probabilities(), &[1.0]);
        assert_eq!(sol.col_strategy.pure_action(), Some(1));
        assert_eq!(sol.value, 2.0);
    }

    #[test]
    fn test_single_column() {
        let (sol, stats) = SimplexSolver::default()
            .solve_with_stats(&matrix([[3.0], [7.0]]))
            .unwrap();

        assert_eq!(stats.method, SolveMethod::SingleColumn);
        assert_eq!(sol.col_strategy.probabilities(), &[1.0]);
        assert_eq!(sol.row_strategy.pure_action(), Some(1));
        assert_eq!(sol.value, 7.0);
    }

    #[test]
    fn test_one_by_one() {
        let sol = solve(&matrix([[-4.5]]), DEFAULT_TOLERANCE).unwrap();
        assert_eq!(sol.value, -4.5);
        assert_eq!(sol.pure_actions(), Some((0, 0)));
    }

    #[test]
    fn test_saddle_point_is_exact() {
        let m = matrix([[1.0, 5.0], [2.0, 3.0]]);
        let (sol, stats) = SimplexSolver::default().solve_with_stats(&m).unwrap();

        assert_eq!(stats.method, SolveMethod::SaddlePoint);
        assert_eq!(stats.pivots, 0);
        assert_eq!(sol.pure_actions(), Some((1, 0)));
        assert_eq!(sol.value, 2.0);
    }

    #[test]
    fn test_saddle_point_reached_by_simplex() {
        let m = matrix([[1.0, 5.0], [2.0, 3.0]]);
        let solver = SimplexSolver::new(SimplexConfig::default().with_saddle_detection(false));
        let (sol, stats) = solver.solve_with_stats(&m).unwrap();

        assert_eq!(stats.method, SolveMethod::Simplex);
        assert_abs_diff_eq!(sol.value, 2.0, epsilon = EPS);
        assert_abs_diff_eq!(sol.row_strategy[1], 1.0, epsilon = EPS);
        assert_abs_diff_eq!(sol.col_strategy[0], 1.0, epsilon = EPS);
    }

    #[test]
    fn test_weak_saddle_value_zero() {
        let m = matrix([[1.0, 0.0], [0.0, 0.0]]);
        let detected = solve(&m, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(detected.value, 0.0);

        let solver = SimplexSolver::new(SimplexConfig::default().with_saddle_detection(false));
        let pivoted = solver.solve(&m).unwrap();
        assert_abs_diff_eq!(pivoted.value, 0.0, epsilon = EPS);
        assert_equilibrium(&m, &pivoted);
    }

    #[test]
    fn test_classic_example() {
        let m = games::classic();
        let sol = solve(&m, DEFAULT_TOLERANCE).unwrap();

        // Exact LP optimum: row (1/2, 0, 1/2, 0), column (2/3, 1/3, 0, 0).
        assert_abs_diff_eq!(sol.value, 5.0, epsilon = EPS);
        assert_equilibrium(&m, &sol);
    }

    #[test]
    fn test_negative_payoffs() {
        let m = matrix([[2.0, -1.0, 3.0], [-3.0, 4.0, -2.0]]);
        let sol = solve(&m, DEFAULT_TOLERANCE).unwrap();

        assert_abs_diff_eq!(sol.value, 0.5, epsilon = EPS);
        assert_abs_diff_eq!(sol.row_strategy[0], 0.7, epsilon = EPS);
        assert_equilibrium(&m, &sol);
    }

    #[test]
    fn test_column_view_negates_value() {
        let m = games::classic();
        let sol = solve(&m, DEFAULT_TOLERANCE).unwrap();
        let flipped = solve(&m.negated_transpose(), DEFAULT_TOLERANCE).unwrap();

        assert_abs_diff_eq!(flipped.value, -sol.value, epsilon = 1e-8);
    }

    #[test]
    fn test_deterministic() {
        let m = matrix([[0.3, -1.7, 2.2], [1.1, 0.4, -0.9], [-2.0, 1.5, 0.6]]);
        let a = solve(&m, DEFAULT_TOLERANCE).unwrap();
        let b = solve(&m, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            solve_rows(vec![vec![1.0, 2.0], vec![3.0]], DEFAULT_TOLERANCE),
            Err(SolveError::InvalidMatrix(InvalidMatrixError::RaggedRow { row: 1, .. }))
        ));
        assert!(matches!(
            solve_rows(vec![], DEFAULT_TOLERANCE),
            Err(SolveError::InvalidMatrix(InvalidMatrixError::Empty))
        ));
        assert!(matches!(
            solve_rows(vec![vec![1.0, f64::NAN]], DEFAULT_TOLERANCE),
            Err(SolveError::InvalidMatrix(InvalidMatrixError::NonFinite { .. }))
        ));
    }

    #[test]
    fn test_invalid_tolerance() {
        let m = games::matching_pennies();
        for tol in [0.0, -1e-8] {
            assert!(matches!(
                solve(&m, tol),
                Err(SolveError::InvalidMatrix(InvalidMatrixError::InvalidTolerance(_)))
            ));
        }
    }

    #[test]
    fn test_pivot_limit_reported() {
        let m = matrix([[3.0, 1.0], [2.0, 4.0]]);
        let solver = SimplexSolver::new(SimplexConfig::default().with_max_pivots(0));
        let err = solver.solve(&m).unwrap_err();

        assert_eq!(
            err,
            SolveError::NumericalFailure(NumericalFailureError::PivotLimit { pivots: 0, limit: 0 })
        );
        assert!(err.to_string().contains("0 pivots"));
    }

    #[test]
    fn test_large_magnitudes() {
        let m = matrix([[4.0e6, -2.0e6], [-1.0e6, 3.0e6]]);
        let sol = solve(&m, DEFAULT_TOLERANCE).unwrap();

        // x = (0.4, 0.6): 0.4·4e6 - 0.6·1e6 = 1e6
        assert_abs_diff_eq!(sol.value, 1.0e6, epsilon = 1e-3);
        assert_equilibrium(&m, &sol);
    }

    #[test]
    fn test_payoffs_near_f64_max() {
        let m = matrix([[1.0e308, -1.0e308], [-1.0e308, 1.0e308]]);
        let sol = solve(&m, DEFAULT_TOLERANCE).unwrap();

        assert_abs_diff_eq!(sol.value, 0.0, epsilon = 1e-8 * 1.0e308);
        assert_abs_diff_eq!(sol.row_strategy[0], 0.5, epsilon = EPS);
        assert_abs_diff_eq!(sol.col_strategy[1], 0.5, epsilon = EPS);
        assert_equilibrium(&m, &sol);

        let max = f64::MAX;
        let m = matrix([[0.0, -max, max], [max, 0.0, -max], [-max, max, 0.0]]);
        let sol = solve(&m, DEFAULT_TOLERANCE).unwrap();
        for k in 0..3 {
            assert_abs_diff_eq!(sol.row_strategy[k], 1.0 / 3.0, epsilon = EPS);
            assert_abs_diff_eq!(sol.col_strategy[k], 1.0 / 3.0, epsilon = EPS);
        }
        assert_equilibrium(&m, &sol);
    }

    #[test]
    fn test_relaxed_tolerance_still_solves() {
        let mut generator = RandomGameGenerator::new(17);
        let strict = SimplexSolver::new(SimplexConfig::default().with_saddle_detection(false));

        for rows in 2..=8 {
            for cols in 2..=8 {
                for _ in 0..4 {
                    let m = generator.generate(rows, cols);
                    let expected = strict.solve(&m).unwrap().value;

                    for tolerance in [1e-6, 1e-4, 1e-2, 5e-2, 1e-1] {
                        let relaxed = SimplexSolver::new(
                            SimplexConfig::default()
                                .with_tolerance(tolerance)
                                .with_saddle_detection(false),
                        );
                        let sol = relaxed
                            .solve(&m)
                            .unwrap_or_else(|e| panic!("tolerance {}: {:?}: {}", tolerance, m, e));
                        assert_abs_diff_eq!(sol.value, expected, epsilon = 1e-9 * m.max_abs());
                        assert_equilibrium(&m, &sol);
                    }
                }
            }
        }
    }

    #[test]
    fn test_relaxed_tolerance_on_fixtures() {
        for tolerance in [1e-3, 1e-1, 0.5] {
            let sol = solve(&games::classic(), tolerance).unwrap();
            assert_abs_diff_eq!(sol.value, 5.0, epsilon = EPS);

            let sol = solve(&games::mixed_2x2(), tolerance).unwrap();
            assert_abs_diff_eq!(sol.col_strategy[0], 0.75, epsilon = EPS);
        }
    }

    #[test]
    fn test_random_games_reach_equilibrium() {
        let mut generator = RandomGameGenerator::new(17);
        let solver = SimplexSolver::default();

        for rows in 1..=7 {
            for cols in 1..=7 {
                for _ in 0..5 {
                    let m = generator.generate(rows, cols);
                    let sol = solver.solve(&m).unwrap_or_else(|e| panic!("{:?}: {}", m, e));
                    assert_equilibrium(&m, &sol);
                }
            }
        }
    }

    #[test]
    fn test_random_integer_games_reach_equilibrium() {
        // Small integer ranges produce many ties and degenerate bases.
        let mut generator = RandomGameGenerator::new(5)
            .with_range(-2.0, 2.0)
            .with_integer_payoffs(true);
        let solver = SimplexSolver::new(SimplexConfig::default().with_saddle_detection(false));

        for _ in 0..300 {
            let m = generator.generate(4, 5);
            let sol = solver.solve(&m).unwrap_or_else(|e| panic!("{:?}: {}", m, e));
            assert_equilibrium(&m, &sol);
        }
    }

    #[test]
    fn test_saddle_detection_does_not_change_value() {
        let mut generator = RandomGameGenerator::new(99).with_integer_payoffs(true);
        let with = SimplexSolver::default();
        let without = SimplexSolver::new(SimplexConfig::default().with_saddle_detection(false));

        for _ in 0..100 {
            let m = generator.generate(3, 4);
            let a = with.solve(&m).unwrap();
            let b = without.solve(&m).unwrap();
            assert_abs_diff_eq!(a.value, b.value, epsilon = 1e-7 * m.max_abs().max(1.0));
        }
    }

    #[test]
    fn test_batch_matches_sequential() {
        let mut generator = RandomGameGenerator::new(3);
        let matrices: Vec<PayoffMatrix> = (0..40).map(|_| generator.generate(5, 6)).collect();
        let solver = SimplexSolver::new(SimplexConfig::default().with_threads(2));

        let batch = solver.solve_batch(&matrices);
        assert_eq!(batch.len(), matrices.len());
        for (m, result) in matrices.iter().zip(&batch) {
            let single = solver.solve(m).unwrap();
            assert_eq!(result.as_ref().unwrap().value, single.value);
        }
    }

    #[test]
    fn test_batch_callback_sees_every_game() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let matrices = vec![games::classic(), games::rock_paper_scissors(), games::matching_pennies()];
        let seen = AtomicUsize::new(0);
        let outcomes = SimplexSolver::default().solve_batch_with_callback(&matrices, |_, outcome| {
            assert!(outcome.is_ok());
            seen.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(seen.load(Ordering::Relaxed), 3);
        assert_eq!(outcomes.len(), 3);
    }
}
