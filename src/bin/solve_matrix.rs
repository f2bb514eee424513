//! Solve a single zero-sum matrix game.
//!
//! Reads a JSON matrix (`[[a00, a01, ...], ...]`) or uses a built-in example,
//! prints the game value and both optimal strategies, and optionally writes a
//! JSON report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use zero_sum_solver::game::PayoffMatrix;
use zero_sum_solver::games;
use zero_sum_solver::lp::{SimplexConfig, SimplexSolver, DEFAULT_TOLERANCE};
use zero_sum_solver::output::SolutionReport;

#[derive(Parser, Debug)]
#[command(name = "solve_matrix", about = "Optimal mixed strategies for a zero-sum matrix game")]
struct Args {
    /// JSON file holding the payoff matrix (row player's payoffs)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Built-in game to solve when no input file is given
    #[arg(short, long, default_value = "classic")]
    example: String,

    /// Numerical tolerance
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Skip the pure saddle-point shortcut and always run the simplex
    #[arg(long)]
    no_saddle_detection: bool,

    /// Write the report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn load_matrix(args: &Args) -> Result<PayoffMatrix, String> {
    match &args.input {
        Some(path) => {
            let matrix = PayoffMatrix::from_json_file(path).map_err(|e| e.to_string())?;
            println!("Loaded matrix from: {}", path.display());
            Ok(matrix)
        }
        None => games::by_name(&args.example).ok_or_else(|| {
            format!(
                "Unknown example '{}' (available: {})",
                args.example,
                games::NAMES.join(", ")
            )
        }),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let matrix = match load_matrix(&args) {
        Ok(matrix) => matrix,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = SimplexConfig::default()
        .with_tolerance(args.tolerance)
        .with_saddle_detection(!args.no_saddle_detection);
    let solver = SimplexSolver::new(config);

    let (solution, stats) = match solver.solve_with_stats(&matrix) {
        Ok(solved) => solved,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = SolutionReport::new(&matrix, &solution, Some(&stats));
    report.print_summary();

    if let Some(path) = &args.json {
        match report.save_json(path) {
            Ok(_) => println!("\nSaved JSON: {}", path.display()),
            Err(e) => {
                eprintln!("Error saving JSON: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
