//! Error types for matrix validation and solving.
//!
//! The solver reports exactly two kinds of failure:
//!
//! - [`InvalidMatrixError`]: the input is structurally malformed (or the
//!   tolerance is unusable). Nothing is computed.
//! - [`NumericalFailureError`]: the simplex run could not produce a verified
//!   equilibrium within its pivot bound.
//!
//! [`SolveError`] wraps both so callers can use `?` across layers.
//! [`LoadError`] is only produced by the file-loading helpers.

use std::fmt;

use crate::game::Player;

/// The payoff matrix (or the requested tolerance) is unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidMatrixError {
    /// The matrix has no rows.
    Empty,
    /// The matrix has rows but they contain no columns.
    NoColumns,
    /// A row's length differs from the first row's length.
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// An entry is NaN or infinite.
    NonFinite {
        /// Row index of the entry.
        row: usize,
        /// Column index of the entry.
        col: usize,
        /// The offending value.
        value: f64,
    },
    /// Tolerance must be finite and strictly positive.
    InvalidTolerance(f64),
}

impl fmt::Display for InvalidMatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMatrixError::Empty => write!(f, "Payoff matrix has no rows"),
            InvalidMatrixError::NoColumns => write!(f, "Payoff matrix has no columns"),
            InvalidMatrixError::RaggedRow { row, expected, actual } => write!(
                f,
                "Row {} has {} entries, expected {} (rows must have equal length)",
                row, actual, expected
            ),
            InvalidMatrixError::NonFinite { row, col, value } => {
                write!(f, "Entry ({}, {}) is not finite: {}", row, col, value)
            }
            InvalidMatrixError::InvalidTolerance(tol) => {
                write!(f, "Tolerance {} must be finite and greater than 0", tol)
            }
        }
    }
}

impl std::error::Error for InvalidMatrixError {}

/// The simplex run failed to produce a verified equilibrium.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericalFailureError {
    /// The pivot bound was exhausted before an optimal basis was reached.
    PivotLimit {
        /// Pivots performed.
        pivots: usize,
        /// The bound in force.
        limit: usize,
    },
    /// The ratio test found no leaving row for an improving column.
    Unbounded {
        /// The entering column.
        column: usize,
    },
    /// A raw strategy component was more negative than the tolerance allows.
    NegativeComponent {
        /// Whose strategy.
        player: Player,
        /// Index of the component.
        index: usize,
        /// The raw value.
        value: f64,
    },
    /// A raw strategy had no positive mass to normalise.
    ZeroMass {
        /// Whose strategy.
        player: Player,
    },
    /// The two players' guarantees disagree with the reported value.
    ValueMismatch {
        /// min over columns of the row strategy's expected payoff.
        row_value: f64,
        /// max over rows of the column strategy's expected loss.
        col_value: f64,
        /// The scaled tolerance the check used.
        tolerance: f64,
    },
}

impl fmt::Display for NumericalFailureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericalFailureError::PivotLimit { pivots, limit } => write!(
                f,
                "Simplex did not converge: {} pivots exhausted the limit of {}",
                pivots, limit
            ),
            NumericalFailureError::Unbounded { column } => {
                write!(f, "Ratio test failed for entering column {}", column)
            }
            NumericalFailureError::NegativeComponent { player, index, value } => write!(
                f,
                "{} strategy component {} is negative beyond tolerance: {}",
                player, index, value
            ),
            NumericalFailureError::ZeroMass { player } => {
                write!(f, "{} strategy has no positive mass to normalise", player)
            }
            NumericalFailureError::ValueMismatch { row_value, col_value, tolerance } => write!(
                f,
                "Row guarantee {} and column guarantee {} differ by more than {}",
                row_value, col_value, tolerance
            ),
        }
    }
}

impl std::error::Error for NumericalFailureError {}

/// Any failure of a solve call.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Malformed input; see [`InvalidMatrixError`].
    InvalidMatrix(InvalidMatrixError),
    /// Simplex failure; see [`NumericalFailureError`].
    NumericalFailure(NumericalFailureError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidMatrix(e) => write!(f, "Invalid matrix: {}", e),
            SolveError::NumericalFailure(e) => write!(f, "Numerical failure: {}", e),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::InvalidMatrix(e) => Some(e),
            SolveError::NumericalFailure(e) => Some(e),
        }
    }
}

impl From<InvalidMatrixError> for SolveError {
    fn from(e: InvalidMatrixError) -> Self {
        SolveError::InvalidMatrix(e)
    }
}

impl From<NumericalFailureError> for SolveError {
    fn from(e: NumericalFailureError) -> Self {
        SolveError::NumericalFailure(e)
    }
}

/// Errors from reading a payoff matrix out of a file or JSON string.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// The file could not be read.
    IoError(String),
    /// The contents were not a JSON array of numeric arrays.
    ParseError(String),
    /// The parsed rows do not form a valid matrix.
    Invalid(InvalidMatrixError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoadError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            LoadError::Invalid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<InvalidMatrixError> for LoadError {
    fn from(e: InvalidMatrixError) -> Self {
        LoadError::Invalid(e)
    }
}
