//! Output formatting for solved games.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::{PayoffMatrix, Player, Solution, Strategy};
use crate::lp::SimplexStats;

/// Probability of a single pure action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionProbability {
    /// `A1`, `A2`, ... for rows, `B1`, `B2`, ... for columns.
    pub label: String,
    /// Probability in `[0, 1]`.
    pub probability: f64,
    /// The same probability as a percentage.
    pub percent: f64,
}

/// Serializable report of one solved game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionReport {
    /// The solved payoff matrix.
    pub matrix: PayoffMatrix,
    /// Game value from the row player's perspective.
    pub value: f64,
    /// Row player's strategy, one entry per row.
    pub row_player: Vec<ActionProbability>,
    /// Column player's strategy, one entry per column.
    pub col_player: Vec<ActionProbability>,
    /// How the game was solved, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SimplexStats>,
}

fn actions(player: Player, strategy: &Strategy) -> Vec<ActionProbability> {
    strategy
        .probabilities()
        .iter()
        .enumerate()
        .map(|(i, &p)| ActionProbability {
            label: player.action_label(i),
            probability: p,
            percent: p * 100.0,
        })
        .collect()
}

impl SolutionReport {
    /// Build a report from a solved game.
    pub fn new(matrix: &PayoffMatrix, solution: &Solution, stats: Option<&SimplexStats>) -> Self {
        Self {
            matrix: matrix.clone(),
            value: solution.value,
            row_player: actions(Player::Row, &solution.row_strategy),
            col_player: actions(Player::Column, &solution.col_strategy),
            stats: stats.cloned(),
        }
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }

    /// Plain-text summary: value, then one table per player.
    pub fn summary(&self) -> String {
        self.to_string()
    }

    /// Print [`summary`](Self::summary) to stdout.
    pub fn print_summary(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.matrix.dims();

        writeln!(f, "========================================")?;
        writeln!(f, "  {}x{} zero-sum game", rows, cols)?;
        writeln!(f, "  Game value: {:.4}", self.value)?;
        if let Some(stats) = &self.stats {
            writeln!(
                f,
                "  Method: {:?} | Pivots: {} | Gap: {:.2e}",
                stats.method, stats.pivots, stats.duality_gap
            )?;
        }
        writeln!(f, "========================================")?;

        for (title, actions) in [("Row player (A)", &self.row_player), ("Column player (B)", &self.col_player)] {
            writeln!(f, "\n{}", title)?;
            writeln!(f, "  {:<8} {:>12} {:>9}", "Strategy", "Probability", "%")?;
            for a in actions {
                writeln!(f, "  {:<8} {:>12.4} {:>8.2}%", a.label, a.probability, a.percent)?;
            }
        }
        Ok(())
    }
}
