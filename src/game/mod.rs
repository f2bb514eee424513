//! Data model for two-player zero-sum matrix games.
//!
//! - [`PayoffMatrix`]: validated m×n payoffs from the row player's perspective
//! - [`Strategy`]: a probability distribution over one player's pure actions
//! - [`Solution`]: a strategy per player plus the game value
//!
//! The row player maximises the payoff, the column player minimises it.

pub mod matrix;
pub mod solution;
pub mod strategy;

pub use matrix::PayoffMatrix;
pub use solution::Solution;
pub use strategy::Strategy;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players of a matrix game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Chooses a row; maximises the payoff.
    Row,
    /// Chooses a column; minimises the payoff.
    Column,
}

impl Player {
    /// Prefix used when labelling this player's pure actions (`A1`, `B3`, ...).
    pub fn label_prefix(&self) -> char {
        match self {
            Player::Row => 'A',
            Player::Column => 'B',
        }
    }

    /// Label of a pure action, 1-based.
    pub fn action_label(&self, index: usize) -> String {
        format!("{}{}", self.label_prefix(), index + 1)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Row => write!(f, "Row player"),
            Player::Column => write!(f, "Column player"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels() {
        assert_eq!(Player::Row.action_label(0), "A1");
        assert_eq!(Player::Column.action_label(9), "B10");
    }
}
