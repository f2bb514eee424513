//! Seeded random payoff matrices.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::PayoffMatrix;

/// Generates reproducible random games.
///
/// # Example
/// ```
/// use zero_sum_solver::games::random::RandomGameGenerator;
///
/// let mut a = RandomGameGenerator::new(42);
/// let mut b = RandomGameGenerator::new(42);
/// assert_eq!(a.generate(3, 4), b.generate(3, 4));
/// ```
#[derive(Debug, Clone)]
pub struct RandomGameGenerator {
    rng: StdRng,
    low: f64,
    high: f64,
    integer_payoffs: bool,
}

impl RandomGameGenerator {
    /// Payoffs uniform in `[-10, 10)`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            low: -10.0,
            high: 10.0,
            integer_payoffs: false,
        }
    }

    /// Builder method: set the payoff range.
    ///
    /// # Panics
    /// Panics unless `low < high` and both are finite.
    pub fn with_range(mut self, low: f64, high: f64) -> Self {
        assert!(
            low.is_finite() && high.is_finite() && low < high,
            "invalid payoff range [{}, {})",
            low,
            high
        );
        self.low = low;
        self.high = high;
        self
    }

    /// Builder method: round payoffs to whole numbers (inclusive range).
    ///
    /// Integer games hit ties and degenerate bases far more often.
    pub fn with_integer_payoffs(mut self, enable: bool) -> Self {
        self.integer_payoffs = enable;
        self
    }

    /// Draw a `rows x cols` game.
    ///
    /// # Panics
    /// Panics if either dimension is zero, or if integer payoffs are enabled
    /// and the range contains no whole number.
    pub fn generate(&mut self, rows: usize, cols: usize) -> PayoffMatrix {
        assert!(rows > 0 && cols > 0, "dimensions must be positive");
        let (low, high) = (self.low, self.high);
        let integer = self.integer_payoffs;
        let rng = &mut self.rng;

        PayoffMatrix::from_fn(rows, cols, |_, _| {
            if integer {
                rng.gen_range(low.ceil() as i64..=high.floor() as i64) as f64
            } else {
                rng.gen_range(low..high)
            }
        })
    }
}
