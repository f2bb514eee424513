//! Validated payoff matrix.
//!
//! A [`PayoffMatrix`] can only be built through a validating constructor, so
//! every value of the type is non-empty, rectangular and finite. Entries are
//! payoffs to the row player (and losses to the column player).

use std::fs;
use std::ops::Index;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidMatrixError, LoadError};
use crate::game::Strategy;

/// An m×n table of finite payoffs, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PayoffMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl PayoffMatrix {
    /// Build a matrix from owned rows.
    ///
    /// # Errors
    /// - [`InvalidMatrixError::Empty`] if there are no rows
    /// - [`InvalidMatrixError::NoColumns`] if the first row is empty
    /// - [`InvalidMatrixError::RaggedRow`] if any row length differs from the first
    /// - [`InvalidMatrixError::NonFinite`] if any entry is NaN or infinite
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, InvalidMatrixError> {
        Self::from_rows(&rows)
    }

    /// Build a matrix from anything row-like, e.g. `&[[3.0, 1.0], [2.0, 4.0]]`.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, InvalidMatrixError> {
        let first = rows.first().ok_or(InvalidMatrixError::Empty)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(InvalidMatrixError::NoColumns);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(InvalidMatrixError::RaggedRow {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(InvalidMatrixError::NonFinite { row: i, col: j, value });
                }
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build a matrix entry by entry. Crate-internal: callers guarantee
    /// positive dimensions and finite entries.
    pub(crate) fn from_fn<F>(rows: usize, cols: usize, mut entry: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        debug_assert!(rows > 0 && cols > 0);
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(entry(i, j));
            }
        }
        debug_assert!(data.iter().all(|a| a.is_finite()));
        Self { rows, cols, data }
    }

    /// Parse a matrix from a JSON array of arrays.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let rows: Vec<Vec<f64>> =
            serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;
        Ok(Self::new(rows)?)
    }

    /// Load a matrix from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| LoadError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Number of rows (row player's pure actions).
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (column player's pure actions).
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Entry at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if the indices are out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "index ({}, {}) out of range", i, j);
        self.data[i * self.cols + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols)
    }

    /// Iterate over column `j` top to bottom.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().skip(j).step_by(self.cols).copied()
    }

    /// Smallest entry.
    pub fn min_entry(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest entry.
    pub fn max_entry(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, &x| acc.max(x.abs()))
    }

    /// Minimum of each row (what the row player is guaranteed per pure action).
    pub fn row_minima(&self) -> Vec<f64> {
        self.rows()
            .map(|row| row.iter().copied().fold(f64::INFINITY, f64::min))
            .collect()
    }

    /// Maximum of each column (the column player's worst loss per pure action).
    pub fn column_maxima(&self) -> Vec<f64> {
        (0..self.cols)
            .map(|j| self.column(j).fold(f64::NEG_INFINITY, f64::max))
            .collect()
    }

    /// First pure saddle point in row-major order, if any.
    ///
    /// A saddle point is an entry that is both the minimum of its row and the
    /// maximum of its column.
    pub fn saddle_point(&self) -> Option<(usize, usize)> {
        let row_min = self.row_minima();
        let col_max = self.column_maxima();

        (0..self.rows)
            .flat_map(|i| (0..self.cols).map(move |j| (i, j)))
            .find(|&(i, j)| {
                let a = self.get(i, j);
                a == row_min[i] && a == col_max[j]
            })
    }

    /// Expected payoff of every pure column against a row-player mix.
    ///
    /// `result[j] = Σ_i x_i · a[i][j]`
    pub fn column_payoffs(&self, row_strategy: &Strategy) -> Vec<f64> {
        debug_assert_eq!(row_strategy.len(), self.rows);
        let mut payoffs = vec![0.0; self.cols];
        for (row, &p) in self.rows().zip(row_strategy.probabilities()) {
            for (acc, &a) in payoffs.iter_mut().zip(row) {
                *acc += p * a;
            }
        }
        payoffs
    }

    /// Expected payoff of every pure row against a column-player mix.
    ///
    /// `result[i] = Σ_j z_j · a[i][j]`
    pub fn row_payoffs(&self, col_strategy: &Strategy) -> Vec<f64> {
        debug_assert_eq!(col_strategy.len(), self.cols);
        self.rows()
            .map(|row| {
                row.iter()
                    .zip(col_strategy.probabilities())
                    .map(|(&a, &q)| a * q)
                    .sum()
            })
            .collect()
    }

    /// Expected payoff when both players mix.
    pub fn expected_payoff(&self, row_strategy: &Strategy, col_strategy: &Strategy) -> f64 {
        self.row_payoffs(col_strategy)
            .iter()
            .zip(row_strategy.probabilities())
            .map(|(&v, &p)| v * p)
            .sum()
    }

    /// The same game seen by the column player: `b[j][i] = -a[i][j]`.
    ///
    /// Its value is the negation of this game's value, and its row player's
    /// optimal strategies are this game's column player's optimal strategies.
    pub fn negated_transpose(&self) -> PayoffMatrix {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            data.extend(self.column(j).map(|a| -a));
        }
        PayoffMatrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Owned rows, e.g. for serialisation.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

impl Index<(usize, usize)> for PayoffMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.rows && j < self.cols, "index ({}, {}) out of range", i, j);
        &self.data[i * self.cols + j]
    }
}

impl TryFrom<Vec<Vec<f64>>> for PayoffMatrix {
    type Error = InvalidMatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<PayoffMatrix> for Vec<Vec<f64>> {
    fn from(matrix: PayoffMatrix) -> Self {
        matrix.to_rows()
    }
}
