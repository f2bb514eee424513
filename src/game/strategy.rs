//! Mixed strategies.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::NumericalFailureError;
use crate::game::Player;

/// A probability distribution over a player's pure actions.
///
/// Components are non-negative and sum to 1.0 within floating-point error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strategy {
    probabilities: Vec<f64>,
}

impl Strategy {
    /// All mass on `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn pure(len: usize, index: usize) -> Self {
        assert!(index < len, "pure action {} out of range for {} actions", index, len);
        let mut probabilities = vec![0.0; len];
        probabilities[index] = 1.0;
        Self { probabilities }
    }

    /// Equal mass on every action.
    pub fn uniform(len: usize) -> Self {
        Self {
            probabilities: vec![1.0 / len as f64; len],
        }
    }

    /// Normalise raw LP weights into a distribution.
    ///
    /// Components in `[-tolerance, 0)` are treated as zero. Anything more
    /// negative, or a vector with no positive mass, is a numerical failure.
    pub fn from_weights(
        weights: Vec<f64>,
        tolerance: f64,
        player: Player,
    ) -> Result<Self, NumericalFailureError> {
        let mut probabilities = weights;
        let mut clamped = 0usize;

        for (index, p) in probabilities.iter_mut().enumerate() {
            if *p < -tolerance {
                return Err(NumericalFailureError::NegativeComponent {
                    player,
                    index,
                    value: *p,
                });
            }
            if *p < 0.0 {
                *p = 0.0;
                clamped += 1;
            }
        }
        if clamped > 0 {
            log::debug!("{}: clamped {} slightly negative weights to zero", player, clamped);
        }

        let sum: f64 = probabilities.iter().sum();
        if sum <= 0.0 {
            return Err(NumericalFailureError::ZeroMass { player });
        }
        for p in probabilities.iter_mut() {
            *p /= sum;
        }

        Ok(Self { probabilities })
    }

    /// The probabilities in action order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Number of pure actions.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// True for a zero-length strategy (never produced by the solver).
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all components.
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Indices played with positive probability.
    pub fn support(&self) -> Vec<usize> {
        self.probabilities
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// The action played with certainty, if the strategy is pure.
    pub fn pure_action(&self) -> Option<usize> {
        match self.support().as_slice() {
            [only] if self.probabilities[*only] == 1.0 => Some(*only),
            _ => None,
        }
    }

    /// Consume into the raw vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.probabilities
    }
}

impl Index<usize> for Strategy {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.probabilities[i]
    }
}
