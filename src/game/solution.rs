//! Equilibrium solutions and their verification.

use serde::{Deserialize, Serialize};

use crate::error::NumericalFailureError;
use crate::game::{PayoffMatrix, Strategy};

/// A saddle-point solution of a matrix game.
///
/// `value` equals both the row player's guaranteed payoff and the column
/// player's guaranteed loss, within the tolerance the solve used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Optimal mix of the maximising row player (length m).
    pub row_strategy: Strategy,
    /// Optimal mix of the minimising column player (length n).
    pub col_strategy: Strategy,
    /// Game value from the row player's perspective.
    pub value: f64,
}

impl Solution {
    /// Bundle two strategies and a value.
    pub fn new(row_strategy: Strategy, col_strategy: Strategy, value: f64) -> Self {
        Self {
            row_strategy,
            col_strategy,
            value,
        }
    }

    /// Worst-case payoff of the row strategy over all pure column replies.
    pub fn row_guarantee(&self, matrix: &PayoffMatrix) -> f64 {
        matrix
            .column_payoffs(&self.row_strategy)
            .into_iter()
            .fold(f64::INFINITY, f64::min)
    }

    /// Worst-case loss of the column strategy over all pure row replies.
    pub fn col_guarantee(&self, matrix: &PayoffMatrix) -> f64 {
        matrix
            .row_payoffs(&self.col_strategy)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Column guarantee minus row guarantee.
    ///
    /// Non-negative for any strategy pair and zero exactly at equilibrium;
    /// this is how much a best-responding opponent could exploit the pair.
    pub fn duality_gap(&self, matrix: &PayoffMatrix) -> f64 {
        self.col_guarantee(matrix) - self.row_guarantee(matrix)
    }

    /// `(row, col)` if both strategies are pure.
    pub fn pure_actions(&self) -> Option<(usize, usize)> {
        Some((self.row_strategy.pure_action()?, self.col_strategy.pure_action()?))
    }

    /// Check that both guarantees match `value`.
    ///
    /// The tolerance is scaled by `max(1, max|a_ij|)` so that large payoffs do
    /// not turn rounding noise into failures.
    pub fn verify(&self, matrix: &PayoffMatrix, tolerance: f64) -> Result<(), NumericalFailureError> {
        let row_value = self.row_guarantee(matrix);
        let col_value = self.col_guarantee(matrix);
        let scaled = tolerance * matrix.max_abs().max(1.0);

        if (row_value - self.value).abs() > scaled || (col_value - self.value).abs() > scaled {
            return Err(NumericalFailureError::ValueMismatch {
                row_value,
                col_value,
                tolerance: scaled,
            });
        }
        Ok(())
    }
}
