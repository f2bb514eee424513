//! Reference games.
//!
//! Small matrices with known solutions, used by the binaries, tests and
//! benchmarks, plus a seeded random-game generator.
//!
//! | Name                  | Size | Value | Notes                                  |
//! |-----------------------|------|-------|----------------------------------------|
//! | `classic`             | 4×4  | 5     | mixed, unique value, many zero weights |
//! | `rock-paper-scissors` | 3×3  | 0     | symmetric, uniform optimum             |
//! | `matching-pennies`    | 2×2  | 0     | uniform optimum                        |
//! | `mixed-2x2`           | 2×2  | 2.5   | no saddle point                        |
//! | `saddle`              | 3×3  | 2     | pure saddle at (1, 0)                  |

pub mod random;

use crate::game::PayoffMatrix;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "classic",
    "rock-paper-scissors",
    "matching-pennies",
    "mixed-2x2",
    "saddle",
];

fn fixed<const M: usize, const N: usize>(rows: [[f64; N]; M]) -> PayoffMatrix {
    PayoffMatrix::from_fn(M, N, |i, j| rows[i][j])
}

/// The 4×4 example game. Value 5.
pub fn classic() -> PayoffMatrix {
    fixed([
        [4.0, 7.0, 10.0, 11.0],
        [2.0, 5.0, 3.0, 1.0],
        [6.0, 3.0, 1.0, 1.0],
        [5.0, 2.0, 4.0, 8.0],
    ])
}

/// Rock-paper-scissors from the row player's side. Value 0.
pub fn rock_paper_scissors() -> PayoffMatrix {
    fixed([[0.0, -1.0, 1.0], [1.0, 0.0, -1.0], [-1.0, 1.0, 0.0]])
}

/// Matching pennies. Value 0.
pub fn matching_pennies() -> PayoffMatrix {
    fixed([[1.0, -1.0], [-1.0, 1.0]])
}

/// 2×2 game without a saddle point. Value 2.5.
pub fn mixed_2x2() -> PayoffMatrix {
    fixed([[3.0, 1.0], [2.0, 4.0]])
}

/// 3×3 game with a pure saddle point at (1, 0). Value 2.
pub fn saddle() -> PayoffMatrix {
    fixed([[1.0, 5.0, 0.0], [2.0, 3.0, 4.0], [0.0, 6.0, 1.0]])
}

/// Look up a reference game by name.
pub fn by_name(name: &str) -> Option<PayoffMatrix> {
    match name {
        "classic" => Some(classic()),
        "rock-paper-scissors" | "rps" => Some(rock_paper_scissors()),
        "matching-pennies" => Some(matching_pennies()),
        "mixed-2x2" => Some(mixed_2x2()),
        "saddle" => Some(saddle()),
        _ => None,
    }
}
