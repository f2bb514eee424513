//! Solve a seeded batch of random games in parallel.
//!
//! Every solve is verified by the solver itself; this binary reports how many
//! failed, the worst duality gap seen, and throughput.

use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use zero_sum_solver::game::PayoffMatrix;
use zero_sum_solver::games::random::RandomGameGenerator;
use zero_sum_solver::lp::{SimplexConfig, SimplexSolver, SolveMethod, DEFAULT_TOLERANCE};

#[derive(Parser, Debug)]
#[command(name = "solve_random", about = "Stress the solver on random games")]
struct Args {
    /// Number of games
    #[arg(short, long, default_value_t = 10_000)]
    games: usize,

    /// Rows per game
    #[arg(short, long, default_value_t = 10)]
    rows: usize,

    /// Columns per game
    #[arg(short, long, default_value_t = 10)]
    cols: usize,

    /// RNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Worker threads (0 = all cores)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Draw whole-number payoffs in [-3, 3] instead of reals in [-10, 10)
    #[arg(long)]
    integer: bool,

    /// Numerical tolerance
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!("=== Random Game Stress Test ===");
    println!(
        "Games: {} | Size: {}x{} | Seed: {} | Payoffs: {}\n",
        args.games,
        args.rows,
        args.cols,
        args.seed,
        if args.integer { "integer" } else { "real" }
    );

    let mut generator = RandomGameGenerator::new(args.seed);
    if args.integer {
        generator = generator.with_range(-3.0, 3.0).with_integer_payoffs(true);
    }
    let matrices: Vec<PayoffMatrix> = (0..args.games)
        .map(|_| generator.generate(args.rows.max(1), args.cols.max(1)))
        .collect();

    let mut config = SimplexConfig::default().with_tolerance(args.tolerance);
    if args.threads > 0 {
        config = config.with_threads(args.threads);
    }
    let solver = SimplexSolver::new(config);

    let progress = ProgressBar::new(matrices.len() as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
    {
        progress.set_style(style);
    }

    let start = Instant::now();
    let outcomes = solver.solve_batch_with_callback(&matrices, |_, _| progress.inc(1));
    progress.finish();
    let elapsed = start.elapsed().as_secs_f64();

    let mut failures = 0usize;
    let mut max_gap = 0.0f64;
    let mut pivots = 0usize;
    let mut simplex = 0usize;
    let mut direct = 0usize;

    for (index, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Ok((_, stats)) => {
                max_gap = max_gap.max(stats.duality_gap.abs());
                if stats.method == SolveMethod::Simplex {
                    simplex += 1;
                    pivots += stats.pivots;
                } else {
                    direct += 1;
                }
            }
            Err(e) => {
                failures += 1;
                log::error!("game {} failed: {}", index, e);
            }
        }
    }

    println!("\n=== Summary ===");
    println!("Total time: {:.2}s ({:.0} games/s)", elapsed, matrices.len() as f64 / elapsed.max(1e-9));
    println!("Solved: {} | Failed: {}", matrices.len() - failures, failures);
    println!("Simplex: {} | Direct (saddle/degenerate): {}", simplex, direct);
    if simplex > 0 {
        println!("Mean pivots: {:.2}", pivots as f64 / simplex as f64);
    }
    println!("Max duality gap: {:.3e}", max_gap);

    if failures > 0 {
        std::process::exit(1);
    }
}
