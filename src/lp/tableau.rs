//! Dense simplex tableau for the column player's LP.
//!
//! With every payoff strictly positive (after shifting and scaling), the
//! column player's problem
//!
//! ```text
//! maximise  Σ_j z_j
//! s.t.      Σ_j a[i][j] · z_j ≤ 1   for every row i
//!           z ≥ 0
//! ```
//!
//! starts from a feasible all-slack basis. Its dual is the row player's
//! problem, whose variables are the reduced costs of the slack columns in the
//! final objective row.
//!
//! Layout: `rows + 1` tableau rows (constraints, then objective), each with
//! `cols` structural columns, `rows` slack columns and one right-hand side.
//!
//! Pivoting decisions use their own `epsilon`, independent of the tolerance a
//! caller checks the final strategies against.

use crate::error::NumericalFailureError;
use crate::game::PayoffMatrix;

pub(crate) struct Tableau {
    rows: usize,
    cols: usize,
    width: usize,
    cells: Vec<f64>,
    /// Basic variable of each constraint row.
    basis: Vec<usize>,
    epsilon: f64,
    pivots: usize,
}

impl Tableau {
    /// Tableau for `(a[i][j] / magnitude + shift) / scale`, which must be
    /// strictly positive.
    pub fn for_game(
        matrix: &PayoffMatrix,
        magnitude: f64,
        shift: f64,
        scale: f64,
        epsilon: f64,
    ) -> Self {
        let (rows, cols) = matrix.dims();
        let width = cols + rows + 1;
        let mut cells = vec![0.0; (rows + 1) * width];

        for (i, row) in matrix.rows().enumerate() {
            let line = &mut cells[i * width..(i + 1) * width];
            for (cell, &a) in line.iter_mut().zip(row) {
                *cell = (a / magnitude + shift) / scale;
            }
            line[cols + i] = 1.0;
            line[width - 1] = 1.0;
        }
        for cell in &mut cells[rows * width..rows * width + cols] {
            *cell = -1.0;
        }

        Self {
            rows,
            cols,
            width,
            cells,
            basis: (cols..cols + rows).collect(),
            epsilon,
            pivots: 0,
        }
    }

    fn at(&self, r: usize, c: usize) -> f64 {
        self.cells[r * self.width + c]
    }

    fn rhs(&self, r: usize) -> f64 {
        self.at(r, self.width - 1)
    }

    /// Bland's rule: lowest-index column with a negative reduced cost.
    fn entering_column(&self) -> Option<usize> {
        (0..self.cols + self.rows).find(|&c| self.at(self.rows, c) < -self.epsilon)
    }

    /// Minimum-ratio row, ties broken by the lowest basic variable index.
    fn leaving_row(&self, col: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for r in 0..self.rows {
            let a = self.at(r, col);
            if a <= self.epsilon {
                continue;
            }
            let ratio = self.rhs(r) / a;
            best = match best {
                None => Some((r, ratio)),
                Some((b, best_ratio))
                    if ratio < best_ratio - self.epsilon
                        || ((ratio - best_ratio).abs() <= self.epsilon
                            && self.basis[r] < self.basis[b]) =>
                {
                    Some((r, ratio))
                }
                keep => keep,
            };
        }

        best.map(|(r, _)| r)
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let w = self.width;
        let p = self.at(row, col);
        for cell in &mut self.cells[row * w..(row + 1) * w] {
            *cell /= p;
        }
        let pivot_row = self.cells[row * w..(row + 1) * w].to_vec();

        for r in (0..=self.rows).filter(|&r| r != row) {
            let factor = self.at(r, col);
            if factor == 0.0 {
                continue;
            }
            for (cell, &pv) in self.cells[r * w..(r + 1) * w].iter_mut().zip(&pivot_row) {
                *cell -= factor * pv;
            }
            self.cells[r * w + col] = 0.0;
        }

        self.basis[row] = col;
        self.pivots += 1;
    }

    /// Pivot until optimal. Returns the number of pivots performed.
    pub fn optimize(&mut self, limit: usize) -> Result<usize, NumericalFailureError> {
        while let Some(col) = self.entering_column() {
            if self.pivots >= limit {
                return Err(NumericalFailureError::PivotLimit {
                    pivots: self.pivots,
                    limit,
                });
            }
            let row = self
                .leaving_row(col)
                .ok_or(NumericalFailureError::Unbounded { column: col })?;

            log::trace!(
                "pivot {}: column {} enters, column {} leaves (row {})",
                self.pivots + 1,
                col,
                self.basis[row],
                row
            );
            self.pivot(row, col);
        }
        Ok(self.pivots)
    }

    /// Current objective `Σ z_j`.
    pub fn objective(&self) -> f64 {
        self.rhs(self.rows)
    }

    /// Structural variables `z` (column player, unnormalised).
    pub fn primal(&self) -> Vec<f64> {
        let mut z = vec![0.0; self.cols];
        for (r, &var) in self.basis.iter().enumerate() {
            if var < self.cols {
                z[var] = self.rhs(r);
            }
        }
        z
    }

    /// Dual variables `y` (row player, unnormalised).
    pub fn dual(&self) -> Vec<f64> {
        (0..self.rows)
            .map(|i| self.at(self.rows, self.cols + i))
            .collect()
    }
}
